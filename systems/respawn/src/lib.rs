#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Scheduler for the delayed respawn that follows a successful water crossing.

use std::time::Duration;

use frogger_core::{board, Command, Event, Phase, PlayerSnapshot, RespawnCause};
use frogger_system_collision::crossed_water;

/// Rules deciding how many crossing respawns may be pending at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RespawnPolicy {
    /// A single pending respawn, cancelled by collisions and phase changes.
    #[default]
    Coalesced,
    /// One respawn per tick spent at the water, never cancelled.
    Legacy,
}

/// Pure system that arms and fires `RespawnPlayer` commands on simulation time.
#[derive(Debug)]
pub struct RespawnScheduler {
    policy: RespawnPolicy,
    delay: Duration,
    pending: Vec<Duration>,
}

impl RespawnScheduler {
    /// Creates a scheduler using the standard crossing delay.
    #[must_use]
    pub fn new(policy: RespawnPolicy) -> Self {
        Self::with_delay(policy, board::CROSSING_RESPAWN_DELAY)
    }

    /// Creates a scheduler that waits `delay` before every respawn.
    #[must_use]
    pub fn with_delay(policy: RespawnPolicy, delay: Duration) -> Self {
        Self {
            policy,
            delay,
            pending: Vec::new(),
        }
    }

    /// Number of respawns currently waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drops every pending respawn.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Advances pending respawns by the tick's elapsed time and arms new ones.
    ///
    /// `player` must reflect every command applied earlier in the tick so a
    /// collision respawn is not mistaken for a player still at the water.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        player: &PlayerSnapshot,
        out: &mut Vec<Command>,
    ) {
        let mut ticked = false;
        for event in events {
            match event {
                Event::TimeAdvanced { dt, .. } => {
                    ticked = true;
                    for remaining in &mut self.pending {
                        *remaining = remaining.saturating_sub(*dt);
                    }
                }
                Event::PhaseChanged { .. }
                | Event::PlayerRespawned {
                    cause: RespawnCause::Collision,
                } if self.policy == RespawnPolicy::Coalesced => self.cancel_all(),
                _ => {}
            }
        }

        let before = self.pending.len();
        self.pending.retain(|remaining| !remaining.is_zero());
        let fired = before - self.pending.len();
        for _ in 0..fired {
            out.push(Command::RespawnPlayer);
        }

        if !ticked || !phase.is_playing() || !crossed_water(player.position) {
            return;
        }

        match self.policy {
            RespawnPolicy::Coalesced => {
                if fired == 0 && self.pending.is_empty() {
                    self.pending.push(self.delay);
                }
            }
            RespawnPolicy::Legacy => self.pending.push(self.delay),
        }
    }
}
