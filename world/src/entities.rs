//! Entity state owned by the world and the update rules each entity follows.

use frogger_core::{
    board, Avatar, CharacterId, Direction, EnemyId, GemId, GemKind, Position, Rect,
};
use rand::Rng;

/// Enemy travelling horizontally along one of the fixed lanes.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) x: Option<f32>,
    pub(crate) lane: f32,
    pub(crate) speed: f32,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, speed: f32, rng: &mut impl Rng) -> Self {
        Self {
            id,
            x: None,
            lane: random_lane(rng),
            speed,
        }
    }

    /// Advances the enemy by `dt` seconds and returns the new lane when it wrapped.
    ///
    /// The first update only places the enemy at the lane start, later updates
    /// move it by `speed * dt`.
    pub(crate) fn update(&mut self, dt: f32, rng: &mut impl Rng) -> Option<f32> {
        let Some(x) = self.x else {
            self.x = Some(board::ENEMY_START_X);
            return None;
        };

        let advanced = x + dt * self.speed;
        if advanced > board::ENEMY_WRAP_X {
            self.x = Some(board::ENEMY_START_X);
            self.lane = random_lane(rng);
            return Some(self.lane);
        }

        self.x = Some(advanced);
        None
    }
}

fn random_lane(rng: &mut impl Rng) -> f32 {
    board::ENEMY_LANES[rng.gen_range(0..board::ENEMY_LANES.len())]
}

/// The player-controlled sprite together with its round bookkeeping.
#[derive(Clone, Debug)]
pub(crate) struct Player {
    pub(crate) position: Position,
    pub(crate) score: i64,
    pub(crate) countdown: u32,
    pub(crate) best_score: i64,
    pub(crate) avatar: Option<Avatar>,
}

impl Player {
    pub(crate) fn new(countdown: u32) -> Self {
        Self {
            position: board::SPAWN,
            score: 0,
            countdown,
            best_score: 0,
            avatar: None,
        }
    }

    /// Moves one grid cell, clamping the result to the playable bounds.
    pub(crate) fn step(&mut self, direction: Direction) {
        let (x, y) = (self.position.x(), self.position.y());
        let (x, y) = match direction {
            Direction::Left => (x - board::COLUMN_WIDTH, y),
            Direction::Right => (x + board::COLUMN_WIDTH, y),
            Direction::Up => (x, y - board::ROW_HEIGHT),
            Direction::Down => (x, y + board::ROW_HEIGHT),
        };
        self.position = Position::new(
            x.clamp(board::PLAYER_MIN_X, board::PLAYER_MAX_X),
            y.clamp(board::PLAYER_MIN_Y, board::PLAYER_MAX_Y),
        );
    }

    pub(crate) fn at_water(&self) -> bool {
        self.position.y() < board::WATER_LINE
    }

    /// Folds the current score into the session best.
    pub(crate) fn capture_best(&mut self) {
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }
}

/// Bonus collectible, hidden while parked at [`board::GEM_HIDDEN`].
#[derive(Clone, Debug)]
pub(crate) struct Gem {
    pub(crate) id: GemId,
    pub(crate) kind: GemKind,
    pub(crate) position: Position,
}

impl Gem {
    pub(crate) fn new(id: GemId, kind: GemKind) -> Self {
        Self {
            id,
            kind,
            position: board::GEM_HIDDEN,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.position != board::GEM_HIDDEN
    }

    pub(crate) fn hide(&mut self) {
        self.position = board::GEM_HIDDEN;
    }
}

/// Avatar offered on the welcome screen.
#[derive(Clone, Debug)]
pub(crate) struct Character {
    pub(crate) id: CharacterId,
    pub(crate) avatar: Avatar,
    pub(crate) region: Rect,
}

/// Lays out one character per avatar along the selection row.
pub(crate) fn selection_row() -> Vec<Character> {
    Avatar::ALL
        .iter()
        .zip(board::CHARACTER_COLUMNS.iter())
        .enumerate()
        .map(|(index, (avatar, column))| Character {
            id: CharacterId::new(index as u32),
            avatar: *avatar,
            region: Rect::new(
                Position::new(*column, board::CHARACTER_ROW),
                board::CHARACTER_WIDTH,
                board::CHARACTER_HEIGHT,
            ),
        })
        .collect()
}
