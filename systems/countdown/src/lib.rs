#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Countdown system that converts elapsed wall-clock time into whole-second decrements.

use std::time::Duration;

use frogger_core::{Command, Event, Phase};

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Pure system that emits one `DecrementCountdown` per elapsed second of play.
#[derive(Debug, Default)]
pub struct Countdown {
    accumulator: Duration,
}

impl Countdown {
    /// Creates a countdown system with an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the tick's events and emits decrements for every full second.
    ///
    /// `remaining` is the countdown reported by the world before this call and
    /// bounds the number of decrements emitted.
    pub fn handle(
        &mut self,
        events: &[Event],
        phase: Phase,
        remaining: u32,
        out: &mut Vec<Command>,
    ) {
        if !phase.is_playing() {
            self.accumulator = Duration::ZERO;
            return;
        }

        // Time reported in the tick a round starts was spent before the click.
        let mut round_started = false;
        for event in events {
            match event {
                Event::PhaseChanged {
                    to: Phase::Playing, ..
                } => {
                    self.accumulator = Duration::ZERO;
                    round_started = true;
                }
                Event::TimeAdvanced { elapsed, .. } if !round_started => {
                    self.accumulator = self.accumulator.saturating_add(*elapsed);
                }
                _ => {}
            }
        }

        let mut decrements = 0;
        while self.accumulator >= ONE_SECOND && decrements < remaining {
            self.accumulator -= ONE_SECOND;
            decrements += 1;
            out.push(Command::DecrementCountdown);
        }
    }

    /// Time carried toward the next decrement.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulator
    }
}
