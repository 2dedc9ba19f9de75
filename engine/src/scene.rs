//! Builds the rendering scene for the active phase from world queries.

use frogger_core::{Phase, Position, SELECTION_PROMPT};
use frogger_rendering::{
    CharacterPresentation, Color, EnemyPresentation, GemPresentation, HudPresentation,
    LabelPresentation, PlayerPresentation, Scene, SpriteKey, TextStyle,
};
use frogger_world::{query, World};
use glam::Vec2;

const WELCOME_STYLE: TextStyle = TextStyle::new(30.0, Color::WHITE);
const PROMPT_STYLE: TextStyle = TextStyle::new(30.0, Color::RED);
const GAME_OVER_STYLE: TextStyle = TextStyle::new(40.0, Color::RED);
const FINAL_SCORE_STYLE: TextStyle = TextStyle::new(40.0, Color::GREEN);
const PLAY_AGAIN_STYLE: TextStyle = TextStyle::new(40.0, Color::YELLOW);

pub(crate) fn compose(world: &World) -> Scene {
    let phase = query::phase(world);
    let mut scene = Scene::new(phase);
    match phase {
        Phase::Welcome => {
            scene.labels.push(LabelPresentation::new(
                query::welcome_banner(world),
                Vec2::new(20.0, 100.0),
                WELCOME_STYLE,
            ));
            scene.labels.push(LabelPresentation::new(
                SELECTION_PROMPT,
                Vec2::new(90.0, 250.0),
                PROMPT_STYLE,
            ));
            scene.characters = query::characters(world)
                .into_iter()
                .map(|character| CharacterPresentation {
                    sprite: SpriteKey::for_avatar(character.avatar),
                    origin: to_vec2(character.region.origin()),
                })
                .collect();
        }
        Phase::Playing => {
            scene.enemies = query::enemy_view(world)
                .iter()
                .filter_map(|enemy| enemy.position())
                .map(|position| EnemyPresentation {
                    position: to_vec2(position),
                })
                .collect();

            let player = query::player(world);
            scene.player = player.avatar.map(|avatar| PlayerPresentation {
                sprite: SpriteKey::for_avatar(avatar),
                position: to_vec2(player.position),
            });
            scene.gems = query::gem_view(world)
                .iter()
                .filter(|gem| gem.is_visible())
                .map(|gem| GemPresentation {
                    sprite: SpriteKey::for_gem(gem.kind),
                    position: to_vec2(gem.position),
                })
                .collect();
            scene.hud = Some(HudPresentation {
                countdown: player.countdown,
                score: player.score,
                best_score: player.best_score,
            });
        }
        Phase::GameOver => {
            let score = query::player(world).score;
            scene.labels = vec![
                LabelPresentation::new("GAME OVER!", Vec2::new(120.0, 250.0), GAME_OVER_STYLE),
                LabelPresentation::new(
                    format!("Your Score: {score}"),
                    Vec2::new(120.0, 350.0),
                    FINAL_SCORE_STYLE,
                ),
                LabelPresentation::new("Play Again!", Vec2::new(120.0, 450.0), PLAY_AGAIN_STYLE),
            ];
        }
    }
    scene
}

fn to_vec2(position: Position) -> Vec2 {
    Vec2::new(position.x(), position.y())
}

#[cfg(test)]
mod tests {
    use frogger_core::{CharacterId, Command};
    use frogger_world as world;

    use super::*;

    #[test]
    fn welcome_scene_lists_every_character() {
        let scene = compose(&World::new());
        assert_eq!(scene.phase, Phase::Welcome);
        assert_eq!(scene.characters.len(), 5);
        assert_eq!(scene.characters[0].sprite, SpriteKey::CharBoy);
        assert_eq!(scene.characters[4].origin, Vec2::new(380.0, 300.0));
        assert_eq!(scene.labels[0].text, "Welcome to Frogger!");
        assert!(scene.player.is_none());
    }

    #[test]
    fn playing_scene_hides_unplaced_enemies_and_gems() {
        let mut world = World::new();
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SelectCharacter {
                character: CharacterId::new(4),
            },
            &mut events,
        );

        let scene = compose(&world);
        assert!(scene.enemies.is_empty());
        assert!(scene.gems.is_empty());
        assert_eq!(
            scene.player.map(|player| player.sprite),
            Some(SpriteKey::CharPrincessGirl)
        );
        assert_eq!(
            scene.hud,
            Some(HudPresentation {
                countdown: 90,
                score: 0,
                best_score: 0,
            })
        );
    }
}
