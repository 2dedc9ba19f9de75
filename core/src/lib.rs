#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Frogger engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to. Systems consume event streams, query immutable snapshots, and
//! respond exclusively with new command batches.

mod phase;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use phase::{Phase, PhaseTrigger, TransitionError};

/// Canonical banner shown on the character selection screen.
pub const WELCOME_BANNER: &str = "Welcome to Frogger!";

/// Prompt displayed above the selectable characters.
pub const SELECTION_PROMPT: &str = "Choose your character!";

/// Fixed board geometry. Every value is expressed in canvas pixels.
pub mod board {
    use std::time::Duration;

    use super::{Position, Rect};

    /// Width of the drawing canvas.
    pub const CANVAS_WIDTH: f32 = 505.0;
    /// Height of the drawing canvas.
    pub const CANVAS_HEIGHT: f32 = 606.0;
    /// Number of tile columns.
    pub const COLUMNS: u32 = 5;
    /// Number of tile rows (one water, three stone, two grass).
    pub const ROWS: u32 = 6;
    /// Horizontal size of a grid cell, also the player's horizontal step.
    pub const COLUMN_WIDTH: f32 = 101.0;
    /// Vertical size of a grid cell, also the player's vertical step.
    pub const ROW_HEIGHT: f32 = 83.0;

    /// Vertical coordinates of the three enemy lanes.
    pub const ENEMY_LANES: [f32; 3] = [60.0, 140.0, 220.0];
    /// Horizontal coordinate enemies start from and wrap back to.
    pub const ENEMY_START_X: f32 = -10.0;
    /// Enemies wrap once their horizontal coordinate exceeds this boundary.
    pub const ENEMY_WRAP_X: f32 = 505.0;
    /// Speeds of the enemies created at startup, in pixels per second.
    pub const ENEMY_SPEEDS: [f32; 3] = [100.0, 200.0, 300.0];

    /// Columns a gem can be revealed in.
    pub const GEM_COLUMNS: [f32; 5] = [0.0, 103.0, 206.0, 309.0, 412.0];
    /// Rows a gem can be revealed in.
    pub const GEM_ROWS: [f32; 3] = [86.0, 172.0, 258.0];
    /// Off-board coordinate marking a hidden gem.
    pub const GEM_HIDDEN: Position = Position::new(-99.0, -99.0);
    /// Size gems are drawn at.
    pub const GEM_DRAW_SIZE: (f32, f32) = (90.0, 120.0);

    /// Leftmost horizontal coordinate the player may occupy.
    pub const PLAYER_MIN_X: f32 = 0.0;
    /// Rightmost horizontal coordinate the player may occupy.
    pub const PLAYER_MAX_X: f32 = 400.0;
    /// Topmost vertical coordinate the player may occupy (the water edge).
    pub const PLAYER_MIN_Y: f32 = -10.0;
    /// Bottommost vertical coordinate the player may occupy.
    pub const PLAYER_MAX_Y: f32 = 400.0;
    /// Cell the player occupies after every respawn.
    pub const SPAWN: Position = Position::new(200.0, 400.0);
    /// Players above this line have reached the water.
    pub const WATER_LINE: f32 = 60.0;
    /// Delay between reaching the water and respawning.
    pub const CROSSING_RESPAWN_DELAY: Duration = Duration::from_millis(200);

    /// Seconds on the countdown when a round starts.
    pub const DEFAULT_COUNTDOWN_SECONDS: u32 = 90;

    /// Horizontal origins of the selectable characters.
    pub const CHARACTER_COLUMNS: [f32; 5] = [20.0, 110.0, 200.0, 290.0, 380.0];
    /// Vertical origin shared by every selectable character.
    pub const CHARACTER_ROW: f32 = 300.0;
    /// Width of a character's clickable image region.
    pub const CHARACTER_WIDTH: f32 = 101.0;
    /// Height of a character's clickable image region.
    pub const CHARACTER_HEIGHT: f32 = 171.0;

    /// Clickable region of the "Play Again" button.
    pub const PLAY_AGAIN_BUTTON: Rect = Rect::from_corners(120.0, 418.0, 316.0, 462.0);
}

/// Directional inputs accepted from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing horizontal coordinates.
    Left,
    /// Movement toward the water row.
    Up,
    /// Movement toward increasing horizontal coordinates.
    Right,
    /// Movement toward the grass rows.
    Down,
}

/// Point on the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new canvas position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Axis-aligned rectangle with inclusive edges, used for click regions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    origin: Position,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle anchored at its upper-left corner.
    #[must_use]
    pub const fn new(origin: Position, width: f32, height: f32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// Creates a rectangle spanning the two provided corners.
    #[must_use]
    pub const fn from_corners(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            origin: Position::new(left, top),
            width: right - left,
            height: bottom - top,
        }
    }

    /// Upper-left corner.
    #[must_use]
    pub const fn origin(&self) -> Position {
        self.origin
    }

    /// Horizontal extent.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Position) -> bool {
        point.x() >= self.origin.x()
            && point.x() <= self.origin.x() + self.width
            && point.y() >= self.origin.y()
            && point.y() <= self.origin.y() + self.height
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a collectible gem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GemId(u32);

impl GemId {
    /// Creates a new gem identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a selectable character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CharacterId(u32);

impl CharacterId {
    /// Creates a new character identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Avatars the player can choose from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Avatar {
    /// The boy sprite.
    Boy,
    /// The cat girl sprite.
    CatGirl,
    /// The horn girl sprite.
    HornGirl,
    /// The pink girl sprite.
    PinkGirl,
    /// The princess sprite.
    PrincessGirl,
}

impl Avatar {
    /// Every avatar in the order the selection screen lays them out.
    pub const ALL: [Avatar; 5] = [
        Avatar::Boy,
        Avatar::CatGirl,
        Avatar::HornGirl,
        Avatar::PinkGirl,
        Avatar::PrincessGirl,
    ];
}

/// Colour variants of the collectible gems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GemKind {
    /// Blue gem.
    Blue,
    /// Green gem.
    Green,
    /// Orange gem.
    Orange,
}

impl GemKind {
    /// Every gem kind, one instance of each exists on the board.
    pub const ALL: [GemKind; 3] = [GemKind::Blue, GemKind::Green, GemKind::Orange];
}

/// Reasons the player was returned to the spawn cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RespawnCause {
    /// An enemy overlapped the player.
    Collision,
    /// The delayed respawn after reaching the water fired.
    Crossing,
    /// A round ended or restarted.
    RoundReset,
}

/// Final numbers of a finished round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// Score held when the countdown expired.
    pub score: i64,
    /// Session-best score after the round was folded in.
    pub best_score: i64,
    /// Avatar the round was played with.
    pub avatar: Option<Avatar>,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances entities by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
        /// Wall-clock time since the previous tick, before any frame cap.
        elapsed: Duration,
    },
    /// Moves the player one grid cell.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Chooses the avatar of the listed character and starts the first round.
    SelectCharacter {
        /// Character that was clicked.
        character: CharacterId,
    },
    /// Starts a fresh round from the game over screen.
    PlayAgain,
    /// Removes one second from the countdown.
    DecrementCountdown,
    /// Penalises the player for touching an enemy and respawns them.
    CollideWithEnemy {
        /// Enemy the player overlapped.
        enemy: EnemyId,
    },
    /// Awards the bonus for a gem and hides it.
    CollectGem {
        /// Gem the player overlapped.
        gem: GemId,
    },
    /// Returns the player to the spawn cell, scoring a crossing when at the water.
    RespawnPlayer,
    /// Places a gem on the board.
    RevealGem {
        /// Gem to reveal.
        gem: GemId,
        /// Cell of the gem grid the gem is placed at.
        position: Position,
    },
    /// Hides every gem.
    HideGems,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Wall-clock time that elapsed in the tick; the round timer counts this.
        elapsed: Duration,
    },
    /// Reports that an enemy left the board and restarted on a new lane.
    EnemyWrapped {
        /// Enemy that wrapped.
        enemy: EnemyId,
        /// Lane the enemy was assigned.
        lane: f32,
    },
    /// Confirms that the player moved.
    PlayerMoved {
        /// Position before the move.
        from: Position,
        /// Position after the clamped move.
        to: Position,
    },
    /// Confirms the avatar chosen on the welcome screen.
    CharacterSelected {
        /// Character that was clicked.
        character: CharacterId,
        /// Avatar assigned to the player.
        avatar: Avatar,
    },
    /// Announces that the session entered a new phase.
    PhaseChanged {
        /// Phase that was left.
        from: Phase,
        /// Phase that became active.
        to: Phase,
    },
    /// Reports a command whose phase transition was illegal.
    PhaseTransitionRejected {
        /// Phase and trigger that were rejected.
        error: TransitionError,
    },
    /// Reports the countdown after a decrement.
    CountdownAdvanced {
        /// Seconds left in the round.
        remaining: u32,
    },
    /// Announces that the countdown expired and the round is over.
    RoundEnded {
        /// Final numbers of the round.
        summary: RoundSummary,
    },
    /// Confirms that an enemy collision cost the player a point.
    EnemyCollision {
        /// Enemy the player touched.
        enemy: EnemyId,
        /// Score after the penalty.
        score: i64,
    },
    /// Confirms that a gem was collected.
    GemCollected {
        /// Gem that was collected.
        gem: GemId,
        /// Score after the bonus.
        score: i64,
    },
    /// Confirms that a water crossing was scored.
    CrossingCompleted {
        /// Score after the crossing.
        score: i64,
    },
    /// Confirms that the player was returned to the spawn cell.
    PlayerRespawned {
        /// Why the respawn happened.
        cause: RespawnCause,
    },
    /// Confirms that a gem was placed on the board.
    GemRevealed {
        /// Gem that is now visible.
        gem: GemId,
        /// Where the gem was placed.
        position: Position,
    },
    /// Confirms that every gem was hidden.
    GemsHidden,
}

/// Immutable representation of the player used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Current position on the canvas.
    pub position: Position,
    /// Current score, negative after enough collisions.
    pub score: i64,
    /// Seconds left on the countdown.
    pub countdown: u32,
    /// Best score captured this session.
    pub best_score: i64,
    /// Avatar chosen on the welcome screen.
    pub avatar: Option<Avatar>,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Horizontal coordinate, `None` until the enemy's first update.
    pub x: Option<f32>,
    /// Vertical coordinate of the lane the enemy travels along.
    pub lane: f32,
    /// Travel speed in pixels per second.
    pub speed: f32,
}

impl EnemySnapshot {
    /// Position of the enemy once it has been placed on its lane.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        self.x.map(|x| Position::new(x, self.lane))
    }
}

/// Read-only snapshot describing all enemies.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single gem used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GemSnapshot {
    /// Unique identifier assigned to the gem.
    pub id: GemId,
    /// Colour of the gem.
    pub kind: GemKind,
    /// Current position, [`board::GEM_HIDDEN`] while hidden.
    pub position: Position,
}

impl GemSnapshot {
    /// Reports whether the gem is currently placed on the board.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.position != board::GEM_HIDDEN
    }
}

/// Read-only snapshot describing all gems.
#[derive(Clone, Debug, Default)]
pub struct GemView {
    snapshots: Vec<GemSnapshot>,
}

impl GemView {
    /// Creates a new gem view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<GemSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured gem snapshots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &GemSnapshot> {
        self.snapshots.iter()
    }

    /// Number of gems currently visible.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.snapshots.iter().filter(|gem| gem.is_visible()).count()
    }
}

/// Immutable representation of a selectable character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterSnapshot {
    /// Unique identifier assigned to the character.
    pub id: CharacterId,
    /// Avatar assigned to the player when this character is chosen.
    pub avatar: Avatar,
    /// Image region, also the clickable area.
    pub region: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_inclusive() {
        let button = board::PLAY_AGAIN_BUTTON;
        assert!(button.contains(Position::new(120.0, 418.0)));
        assert!(button.contains(Position::new(316.0, 462.0)));
        assert!(!button.contains(Position::new(316.5, 440.0)));
        assert!(!button.contains(Position::new(200.0, 417.0)));
    }

    #[test]
    fn hidden_gem_is_not_visible() {
        let gem = GemSnapshot {
            id: GemId::new(0),
            kind: GemKind::Blue,
            position: board::GEM_HIDDEN,
        };
        assert!(!gem.is_visible());
    }

    #[test]
    fn unplaced_enemy_has_no_position() {
        let enemy = EnemySnapshot {
            id: EnemyId::new(0),
            x: None,
            lane: board::ENEMY_LANES[0],
            speed: 100.0,
        };
        assert!(enemy.position().is_none());
    }

    #[test]
    fn views_iterate_in_id_order() {
        let view = EnemyView::from_snapshots(vec![
            EnemySnapshot {
                id: EnemyId::new(2),
                x: Some(0.0),
                lane: 60.0,
                speed: 300.0,
            },
            EnemySnapshot {
                id: EnemyId::new(1),
                x: Some(0.0),
                lane: 140.0,
                speed: 200.0,
            },
        ]);
        let ids: Vec<u32> = view.iter().map(|enemy| enemy.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn round_summary_round_trips_through_bincode() {
        let summary = RoundSummary {
            score: -3,
            best_score: 7,
            avatar: Some(Avatar::HornGirl),
        };
        let bytes = bincode::serialize(&summary).expect("serialize");
        let restored: RoundSummary = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, summary);
    }
}
