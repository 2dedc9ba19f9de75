#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step scheduler that drives the Frogger world and its systems once per frame.
//!
//! A [`GameLoop`] owns the authoritative world and every pure system. Each
//! frame it routes the adapter's input into commands, advances the world by
//! the elapsed time, lets the systems react in a fixed order, and composes the
//! scene the rendering backend draws.

mod clock;
mod scene;

use std::time::Duration;

use frogger_core::{board, Command, Direction, Event, Position, RoundSummary};
use frogger_rendering::{FrameInput, Scene};
use frogger_system_bonus::{self as bonus, Bonus};
use frogger_system_collision::Collision;
use frogger_system_countdown::Countdown;
use frogger_system_menu::Menu;
use frogger_system_respawn::RespawnScheduler;
use frogger_world::{self as world, query, World};

pub use clock::{Clock, ManualClock, SystemClock};
pub use frogger_system_respawn::RespawnPolicy;

/// Longest frame delta fed to entity motion; slower frames slow the board down.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

const DEFAULT_RNG_SEED: u64 = 0x0f20_66e2_5eed_0001;
const BONUS_SEED_SALT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Configuration parameters required to construct the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    countdown_seconds: u32,
    rng_seed: u64,
    respawn_policy: RespawnPolicy,
}

impl Config {
    /// Creates a new configuration.
    #[must_use]
    pub const fn new(
        countdown_seconds: u32,
        rng_seed: u64,
        respawn_policy: RespawnPolicy,
    ) -> Self {
        Self {
            countdown_seconds,
            rng_seed,
            respawn_policy,
        }
    }

    /// Seconds on the countdown when a round starts.
    #[must_use]
    pub const fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Seed shared by the world and the bonus system.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Crossing respawn policy.
    #[must_use]
    pub const fn respawn_policy(&self) -> RespawnPolicy {
        self.respawn_policy
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            board::DEFAULT_COUNTDOWN_SECONDS,
            DEFAULT_RNG_SEED,
            RespawnPolicy::Coalesced,
        )
    }
}

/// Owns the world and every system, advancing them one frame at a time.
#[derive(Debug)]
pub struct GameLoop {
    world: World,
    menu: Menu,
    collision: Collision,
    respawn: RespawnScheduler,
    countdown: Countdown,
    bonus: Bonus,
    last_frame: Option<Duration>,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl GameLoop {
    /// Creates a game loop in the welcome phase.
    #[must_use]
    pub fn new(config: Config) -> Self {
        log::info!(
            "starting game loop: seed {:#x}, {}s rounds, {:?} respawns",
            config.rng_seed(),
            config.countdown_seconds(),
            config.respawn_policy()
        );
        let world = World::with_config(world::Config::new(
            config.countdown_seconds(),
            config.rng_seed(),
        ));
        Self {
            world,
            menu: Menu::new(),
            collision: Collision::new(),
            respawn: RespawnScheduler::new(config.respawn_policy()),
            countdown: Countdown::new(),
            bonus: Bonus::new(bonus::Config::new(config.rng_seed() ^ BONUS_SEED_SALT)),
            last_frame: None,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Advances the simulation to `now` and returns the scene to draw.
    ///
    /// The first frame only establishes the time base and simulates no time.
    pub fn frame(&mut self, now: Duration, input: FrameInput) -> Scene {
        let elapsed = self
            .last_frame
            .map_or(Duration::ZERO, |previous| now.saturating_sub(previous));
        self.last_frame = Some(now);

        self.step(elapsed, input);
        self.scene()
    }

    /// Runs one tick of the pipeline for `elapsed` wall-clock time.
    ///
    /// Enemies and the respawn delay advance by `elapsed` capped at
    /// [`MAX_FRAME_DELTA`]. The round timer counts the full `elapsed`.
    pub fn step(&mut self, elapsed: Duration, input: FrameInput) {
        self.events.clear();

        let dt = if elapsed > MAX_FRAME_DELTA {
            log::debug!("frame delta {elapsed:?} capped to {MAX_FRAME_DELTA:?}");
            MAX_FRAME_DELTA
        } else {
            elapsed
        };

        if let Some(direction) = input.direction {
            self.route_direction(direction);
        }
        if let Some(click) = input.click {
            self.route_click(Position::new(click.x, click.y));
        }

        world::apply(
            &mut self.world,
            Command::Tick { dt, elapsed },
            &mut self.events,
        );

        let phase = query::phase(&self.world);
        if phase.is_playing() {
            self.collision.handle(
                phase,
                &query::player(&self.world),
                &query::enemy_view(&self.world),
                &query::gem_view(&self.world),
                &mut self.commands,
            );
            self.flush_commands();
        }

        self.respawn.handle(
            &self.events,
            query::phase(&self.world),
            &query::player(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        self.countdown.handle(
            &self.events,
            query::phase(&self.world),
            query::player(&self.world).countdown,
            &mut self.commands,
        );
        self.flush_commands();

        self.bonus.handle(
            &self.events,
            query::phase(&self.world),
            query::player(&self.world).countdown,
            &query::gem_view(&self.world),
            &mut self.commands,
        );
        self.flush_commands();
    }

    /// Composes the scene for the current phase.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::compose(&self.world)
    }

    /// Events broadcast by the world during the most recent tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Read-only access to the world for queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Score, best score and avatar as they stand right now.
    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        let player = query::player(&self.world);
        RoundSummary {
            score: player.score,
            best_score: player.best_score,
            avatar: player.avatar,
        }
    }

    fn route_direction(&mut self, direction: Direction) {
        world::apply(
            &mut self.world,
            Command::MovePlayer { direction },
            &mut self.events,
        );
    }

    fn route_click(&mut self, click: Position) {
        self.menu.handle(
            click,
            query::phase(&self.world),
            &query::characters(&self.world),
            &mut self.commands,
        );
        self.flush_commands();
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
