#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bonus system that reveals and hides gems on a cadence tied to the countdown.

use frogger_core::{board, Command, Event, GemView, Phase, Position};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Countdown values divisible by this reveal or hide gems.
const CADENCE_SECONDS: u32 = 5;
/// Countdown values divisible by this reveal a gem, the rest of the cadence hides.
const REVEAL_SECONDS: u32 = 10;

/// Configuration parameters required to construct the bonus system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed for gem placement.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that decides when a gem appears and where it is placed.
#[derive(Debug)]
pub struct Bonus {
    armed: bool,
    rng: ChaCha8Rng,
}

impl Bonus {
    /// Creates a new bonus system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            armed: true,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Reports whether the next reveal second would place a gem.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consumes the tick's events and the current countdown to emit gem commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        countdown: u32,
        gems: &GemView,
        out: &mut Vec<Command>,
    ) {
        let mut ticked = false;
        for event in events {
            match event {
                Event::PhaseChanged {
                    to: Phase::Playing, ..
                } => self.armed = true,
                Event::TimeAdvanced { .. } => ticked = true,
                _ => {}
            }
        }

        if !ticked || !phase.is_playing() || countdown % CADENCE_SECONDS != 0 {
            return;
        }

        if countdown % REVEAL_SECONDS == 0 {
            if !self.armed {
                return;
            }
            let ids: Vec<_> = gems.iter().map(|gem| gem.id).collect();
            if ids.is_empty() {
                return;
            }
            let gem = ids[self.rng.gen_range(0..ids.len())];
            let position = self.random_cell();
            out.push(Command::RevealGem { gem, position });
            self.armed = false;
        } else {
            if !self.armed || gems.visible_count() > 0 {
                out.push(Command::HideGems);
            }
            self.armed = true;
        }
    }

    fn random_cell(&mut self) -> Position {
        let column = board::GEM_COLUMNS[self.rng.gen_range(0..board::GEM_COLUMNS.len())];
        let row = board::GEM_ROWS[self.rng.gen_range(0..board::GEM_ROWS.len())];
        Position::new(column, row)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use frogger_core::{GemId, GemKind, GemSnapshot};

    use super::*;

    fn tick() -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(16),
            elapsed: Duration::from_millis(16),
        }
    }

    fn hidden_gems() -> GemView {
        GemView::from_snapshots(
            GemKind::ALL
                .iter()
                .enumerate()
                .map(|(index, kind)| GemSnapshot {
                    id: GemId::new(index as u32),
                    kind: *kind,
                    position: board::GEM_HIDDEN,
                })
                .collect(),
        )
    }

    #[test]
    fn reveal_lands_on_the_gem_grid() {
        let mut bonus = Bonus::new(Config::new(11));
        let mut out = Vec::new();
        bonus.handle(&[tick()], Phase::Playing, 90, &hidden_gems(), &mut out);

        let [Command::RevealGem { position, .. }] = out.as_slice() else {
            panic!("expected a single reveal, got {out:?}");
        };
        assert!(board::GEM_COLUMNS.contains(&position.x()));
        assert!(board::GEM_ROWS.contains(&position.y()));
        assert!(!bonus.is_armed());
    }

    #[test]
    fn reveal_happens_once_per_reveal_second() {
        let mut bonus = Bonus::new(Config::new(11));
        let mut out = Vec::new();
        for _ in 0..60 {
            bonus.handle(&[tick()], Phase::Playing, 80, &hidden_gems(), &mut out);
        }
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn off_cadence_seconds_emit_nothing() {
        let mut bonus = Bonus::new(Config::new(11));
        let mut out = Vec::new();
        for countdown in [89, 87, 84, 81, 1] {
            bonus.handle(&[tick()], Phase::Playing, countdown, &hidden_gems(), &mut out);
        }
        assert!(out.is_empty());
    }

    #[test]
    fn hide_second_rearms_the_latch() {
        let mut bonus = Bonus::new(Config::new(11));
        let mut out = Vec::new();
        bonus.handle(&[tick()], Phase::Playing, 90, &hidden_gems(), &mut out);
        bonus.handle(&[tick()], Phase::Playing, 85, &hidden_gems(), &mut out);
        assert_eq!(out.last(), Some(&Command::HideGems));
        assert!(bonus.is_armed());
    }

    #[test]
    fn nothing_happens_without_time_or_outside_play() {
        let mut bonus = Bonus::new(Config::new(11));
        let mut out = Vec::new();
        bonus.handle(&[], Phase::Playing, 90, &hidden_gems(), &mut out);
        bonus.handle(&[tick()], Phase::Welcome, 90, &hidden_gems(), &mut out);
        bonus.handle(&[tick()], Phase::GameOver, 0, &hidden_gems(), &mut out);
        assert!(out.is_empty());
        assert!(bonus.is_armed());
    }

    #[test]
    fn same_seed_places_the_same_gem() {
        let mut first = Bonus::new(Config::new(3));
        let mut second = Bonus::new(Config::new(3));
        let mut a = Vec::new();
        let mut b = Vec::new();
        first.handle(&[tick()], Phase::Playing, 70, &hidden_gems(), &mut a);
        second.handle(&[tick()], Phase::Playing, 70, &hidden_gems(), &mut b);
        assert_eq!(a, b);
    }
}
