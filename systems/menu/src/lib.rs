#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Menu system that routes pointer clicks on the welcome and game over screens.

use frogger_core::{board, CharacterSnapshot, Command, Phase, Position};

/// Pure system translating clicks into phase-changing commands.
#[derive(Debug, Default)]
pub struct Menu;

impl Menu {
    /// Creates a new menu system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the command the click triggers in the active phase, if any.
    ///
    /// On the welcome screen the last listed character whose region contains
    /// the click is selected. On the game over screen only clicks on the play
    /// again button count. Clicks during play are ignored.
    pub fn handle(
        &self,
        click: Position,
        phase: Phase,
        characters: &[CharacterSnapshot],
        out: &mut Vec<Command>,
    ) {
        match phase {
            Phase::Welcome => {
                if let Some(character) = characters
                    .iter()
                    .rev()
                    .find(|character| character.region.contains(click))
                {
                    out.push(Command::SelectCharacter {
                        character: character.id,
                    });
                }
            }
            Phase::GameOver => {
                if board::PLAY_AGAIN_BUTTON.contains(click) {
                    out.push(Command::PlayAgain);
                }
            }
            Phase::Playing => {}
        }
    }
}
