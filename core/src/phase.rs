use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level progression of a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Character selection screen shown before the first round.
    #[default]
    Welcome,
    /// A round is running: entities move, collisions score and the countdown ticks.
    Playing,
    /// The countdown reached zero and the round summary is displayed.
    GameOver,
}

/// Inputs that may move the session between phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseTrigger {
    /// A selectable character was clicked on the welcome screen.
    CharacterSelected,
    /// The round countdown reached zero.
    CountdownExpired,
    /// The "Play Again" button was clicked on the game over screen.
    PlayAgain,
}

/// Reports a trigger that has no transition from the current phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("{trigger:?} is not a legal trigger while in the {phase:?} phase")]
pub struct TransitionError {
    /// Phase that was active when the trigger arrived.
    pub phase: Phase,
    /// Trigger that was rejected.
    pub trigger: PhaseTrigger,
}

impl Phase {
    /// Resolves the phase reached by applying `trigger`, rejecting illegal pairs.
    ///
    /// The legal edges are `Welcome -> Playing`, `Playing -> GameOver` and
    /// `GameOver -> Playing`. Everything else leaves the caller's phase
    /// untouched and yields a [`TransitionError`].
    pub fn transition(self, trigger: PhaseTrigger) -> Result<Phase, TransitionError> {
        match (self, trigger) {
            (Phase::Welcome, PhaseTrigger::CharacterSelected) => Ok(Phase::Playing),
            (Phase::Playing, PhaseTrigger::CountdownExpired) => Ok(Phase::GameOver),
            (Phase::GameOver, PhaseTrigger::PlayAgain) => Ok(Phase::Playing),
            (phase, trigger) => Err(TransitionError { phase, trigger }),
        }
    }

    /// Reports whether gameplay systems should advance in this phase.
    #[must_use]
    pub const fn is_playing(self) -> bool {
        matches!(self, Phase::Playing)
    }
}
