#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Frogger.

mod entities;

use frogger_core::{
    board, Command, EnemyId, Event, GemId, GemKind, Phase, PhaseTrigger, RespawnCause,
    RoundSummary, WELCOME_BANNER,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use self::entities::{selection_row, Character, Enemy, Gem, Player};

const DEFAULT_RNG_SEED: u64 = 0x5eed_f20c_0a11_e77e;

/// Points lost for touching an enemy.
pub const COLLISION_PENALTY: i64 = 1;
/// Points earned for reaching the water.
pub const CROSSING_REWARD: i64 = 1;
/// Points earned for collecting a gem.
pub const GEM_BONUS: i64 = 5;

/// Configuration parameters required to construct the world.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    countdown_seconds: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided round length and seed.
    #[must_use]
    pub const fn new(countdown_seconds: u32, rng_seed: u64) -> Self {
        Self {
            countdown_seconds,
            rng_seed,
        }
    }

    /// Seconds on the countdown when a round starts.
    #[must_use]
    pub const fn countdown_seconds(&self) -> u32 {
        self.countdown_seconds
    }

    /// Seed used for lane selection.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(board::DEFAULT_COUNTDOWN_SECONDS, DEFAULT_RNG_SEED)
    }
}

/// Represents the authoritative Frogger world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    phase: Phase,
    countdown_start: u32,
    player: Player,
    enemies: Vec<Enemy>,
    gems: Vec<Gem>,
    characters: Vec<Character>,
    rng: ChaCha8Rng,
    tick_index: u64,
}

impl World {
    /// Creates a new world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new world in the welcome phase using the provided configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.rng_seed());
        let enemies = board::ENEMY_SPEEDS
            .iter()
            .enumerate()
            .map(|(index, speed)| Enemy::new(EnemyId::new(index as u32), *speed, &mut rng))
            .collect();
        let gems = GemKind::ALL
            .iter()
            .enumerate()
            .map(|(index, kind)| Gem::new(GemId::new(index as u32), *kind))
            .collect();

        Self {
            banner: WELCOME_BANNER,
            phase: Phase::Welcome,
            countdown_start: config.countdown_seconds(),
            player: Player::new(config.countdown_seconds()),
            enemies,
            gems,
            characters: selection_row(),
            rng,
            tick_index: 0,
        }
    }

    fn transition(&mut self, trigger: PhaseTrigger, out_events: &mut Vec<Event>) -> bool {
        match self.phase.transition(trigger) {
            Ok(next) => {
                log::debug!("phase {:?} -> {:?} on {:?}", self.phase, next, trigger);
                out_events.push(Event::PhaseChanged {
                    from: self.phase,
                    to: next,
                });
                self.phase = next;
                true
            }
            Err(error) => {
                log::warn!("rejected phase transition: {error}");
                out_events.push(Event::PhaseTransitionRejected { error });
                false
            }
        }
    }

    fn begin_round(&mut self, out_events: &mut Vec<Event>) {
        self.player.countdown = self.countdown_start;
        self.player.score = 0;
        self.player.position = board::SPAWN;
        self.hide_gems(out_events);
    }

    fn finish_round(&mut self, out_events: &mut Vec<Event>) {
        if !self.transition(PhaseTrigger::CountdownExpired, out_events) {
            return;
        }

        self.player.capture_best();
        self.player.position = board::SPAWN;
        out_events.push(Event::PlayerRespawned {
            cause: RespawnCause::RoundReset,
        });

        let summary = RoundSummary {
            score: self.player.score,
            best_score: self.player.best_score,
            avatar: self.player.avatar,
        };
        log::info!(
            "round over: score {} (best {})",
            summary.score,
            summary.best_score
        );
        out_events.push(Event::RoundEnded { summary });
    }

    fn respawn(&mut self, cause: RespawnCause, out_events: &mut Vec<Event>) {
        if self.player.at_water() {
            self.player.score += CROSSING_REWARD;
            out_events.push(Event::CrossingCompleted {
                score: self.player.score,
            });
        }
        self.player.position = board::SPAWN;
        log::debug!("player respawned ({cause:?}), score {}", self.player.score);
        out_events.push(Event::PlayerRespawned { cause });
    }

    fn hide_gems(&mut self, out_events: &mut Vec<Event>) {
        for gem in &mut self.gems {
            gem.hide();
        }
        out_events.push(Event::GemsHidden);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt, elapsed } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt, elapsed });

            let seconds = dt.as_secs_f32();
            let World { enemies, rng, .. } = world;
            for enemy in enemies.iter_mut() {
                if let Some(lane) = enemy.update(seconds, rng) {
                    out_events.push(Event::EnemyWrapped {
                        enemy: enemy.id,
                        lane,
                    });
                }
            }
        }
        Command::MovePlayer { direction } => {
            if !world.phase.is_playing() {
                return;
            }
            let from = world.player.position;
            world.player.step(direction);
            out_events.push(Event::PlayerMoved {
                from,
                to: world.player.position,
            });
        }
        Command::SelectCharacter { character } => {
            let Some(avatar) = world
                .characters
                .iter()
                .find(|candidate| candidate.id == character)
                .map(|candidate| candidate.avatar)
            else {
                return;
            };
            if !world.transition(PhaseTrigger::CharacterSelected, out_events) {
                return;
            }
            world.player.avatar = Some(avatar);
            out_events.push(Event::CharacterSelected { character, avatar });
            world.begin_round(out_events);
        }
        Command::PlayAgain => {
            if world.transition(PhaseTrigger::PlayAgain, out_events) {
                world.begin_round(out_events);
            }
        }
        Command::DecrementCountdown => {
            if !world.phase.is_playing() || world.player.countdown == 0 {
                return;
            }
            world.player.countdown -= 1;
            out_events.push(Event::CountdownAdvanced {
                remaining: world.player.countdown,
            });
            if world.player.countdown == 0 {
                world.finish_round(out_events);
            }
        }
        Command::CollideWithEnemy { enemy } => {
            if !world.phase.is_playing() || !world.enemies.iter().any(|e| e.id == enemy) {
                return;
            }
            world.player.score -= COLLISION_PENALTY;
            out_events.push(Event::EnemyCollision {
                enemy,
                score: world.player.score,
            });
            world.respawn(RespawnCause::Collision, out_events);
        }
        Command::CollectGem { gem } => {
            if !world.phase.is_playing() {
                return;
            }
            let Some(target) = world
                .gems
                .iter_mut()
                .find(|candidate| candidate.id == gem && candidate.is_visible())
            else {
                return;
            };
            target.hide();
            world.player.score += GEM_BONUS;
            out_events.push(Event::GemCollected {
                gem,
                score: world.player.score,
            });
        }
        Command::RespawnPlayer => {
            if world.phase.is_playing() {
                world.respawn(RespawnCause::Crossing, out_events);
            }
        }
        Command::RevealGem { gem, position } => {
            if !world.phase.is_playing() {
                return;
            }
            if let Some(target) = world.gems.iter_mut().find(|candidate| candidate.id == gem) {
                target.position = position;
                out_events.push(Event::GemRevealed { gem, position });
            }
        }
        Command::HideGems => {
            if world.phase.is_playing() {
                world.hide_gems(out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use frogger_core::{
        CharacterSnapshot, EnemySnapshot, EnemyView, GemSnapshot, GemView, Phase,
        PlayerSnapshot,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Reports the active phase.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Seconds on the countdown when a round starts.
    #[must_use]
    pub fn countdown_start(world: &World) -> u32 {
        world.countdown_start
    }

    /// Number of ticks applied since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Captures the player's position and round bookkeeping.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            position: world.player.position,
            score: world.player.score,
            countdown: world.player.countdown,
            best_score: world.player.best_score,
            avatar: world.player.avatar,
        }
    }

    /// Captures a read-only view of the enemies.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    x: enemy.x,
                    lane: enemy.lane,
                    speed: enemy.speed,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the gems, hidden ones included.
    #[must_use]
    pub fn gem_view(world: &World) -> GemView {
        GemView::from_snapshots(
            world
                .gems
                .iter()
                .map(|gem| GemSnapshot {
                    id: gem.id,
                    kind: gem.kind,
                    position: gem.position,
                })
                .collect(),
        )
    }

    /// Lists the characters offered on the welcome screen in layout order.
    #[must_use]
    pub fn characters(world: &World) -> Vec<CharacterSnapshot> {
        world
            .characters
            .iter()
            .map(|character| CharacterSnapshot {
                id: character.id,
                avatar: character.avatar,
                region: character.region,
            })
            .collect()
    }
}
