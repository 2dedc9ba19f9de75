#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure collision system that turns bounding-box overlaps into world commands.

use frogger_core::{
    board, Command, EnemySnapshot, EnemyView, GemView, Phase, PlayerSnapshot, Position,
};

/// Width of the player's collision box.
pub const PLAYER_BOX_WIDTH: f32 = 60.0;
/// Effective width of an enemy, narrower than the sprite to forgive its padding.
pub const ENEMY_BOX_WIDTH: f32 = 80.0;
/// Height of an enemy's collision band, starting at its lane.
pub const ENEMY_BOX_HEIGHT: f32 = 60.0;
/// Width of a gem's collision box.
pub const GEM_BOX_WIDTH: f32 = 80.0;
/// Height of the band shared by player and gem boxes.
pub const GEM_BOX_HEIGHT: f32 = 60.0;
/// Vertical offset of the player's box when testing against gems.
pub const PLAYER_GEM_OFFSET: f32 = 24.0;

/// Reports whether the player overlaps an enemy located at `enemy`.
#[must_use]
pub fn player_hits_enemy(player: Position, enemy: Position) -> bool {
    player.x() < enemy.x() + ENEMY_BOX_WIDTH
        && enemy.x() < player.x() + PLAYER_BOX_WIDTH
        && enemy.y() < player.y()
        && player.y() < enemy.y() + ENEMY_BOX_HEIGHT
}

/// Reports whether the player overlaps a gem located at `gem`.
#[must_use]
pub fn player_hits_gem(player: Position, gem: Position) -> bool {
    player.x() + PLAYER_BOX_WIDTH > gem.x()
        && player.x() < gem.x() + GEM_BOX_WIDTH
        && gem.y() < player.y() + GEM_BOX_HEIGHT
        && player.y() + PLAYER_GEM_OFFSET < gem.y() + GEM_BOX_HEIGHT
}

/// Reports whether the player has reached the water row.
#[must_use]
pub fn crossed_water(player: Position) -> bool {
    player.y() < board::WATER_LINE
}

/// Collision system that checks the player against every enemy and gem once per tick.
#[derive(Debug, Default)]
pub struct Collision;

impl Collision {
    /// Creates a new collision system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `CollideWithEnemy` and `CollectGem` commands for every overlap.
    ///
    /// Enemies that have not been placed yet and hidden gems never collide.
    /// Several enemies may overlap the player in the same tick and each one
    /// produces its own command.
    pub fn handle(
        &self,
        phase: Phase,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        gems: &GemView,
        out: &mut Vec<Command>,
    ) {
        if !phase.is_playing() {
            return;
        }

        let position = player.position;
        for enemy in enemies.iter().filter(|enemy| touches(position, enemy)) {
            out.push(Command::CollideWithEnemy { enemy: enemy.id });
        }

        for gem in gems
            .iter()
            .filter(|gem| gem.is_visible() && player_hits_gem(position, gem.position))
        {
            out.push(Command::CollectGem { gem: gem.id });
        }
    }
}

fn touches(player: Position, enemy: &EnemySnapshot) -> bool {
    enemy
        .position()
        .is_some_and(|position| player_hits_enemy(player, position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_in_lane_overlaps_player_in_matching_row() {
        assert!(player_hits_enemy(
            Position::new(200.0, 68.0),
            Position::new(180.0, 60.0)
        ));
        assert!(player_hits_enemy(
            Position::new(200.0, 151.0),
            Position::new(150.0, 140.0)
        ));
    }

    #[test]
    fn enemy_edges_are_exclusive() {
        // enemy right edge touching the player's left edge
        assert!(!player_hits_enemy(
            Position::new(200.0, 68.0),
            Position::new(120.0, 60.0)
        ));
        // player right edge touching the enemy's left edge
        assert!(!player_hits_enemy(
            Position::new(200.0, 68.0),
            Position::new(260.0, 60.0)
        ));
        // player sitting exactly on the lane line
        assert!(!player_hits_enemy(
            Position::new(200.0, 60.0),
            Position::new(200.0, 60.0)
        ));
    }

    #[test]
    fn spawn_cell_is_out_of_every_lane() {
        for lane in board::ENEMY_LANES {
            assert!(!player_hits_enemy(board::SPAWN, Position::new(200.0, lane)));
        }
    }

    #[test]
    fn gem_overlap_uses_offset_player_box() {
        assert!(player_hits_gem(
            Position::new(200.0, 234.0),
            Position::new(206.0, 258.0)
        ));
        assert!(!player_hits_gem(
            Position::new(200.0, 317.0),
            Position::new(206.0, 258.0)
        ));
        assert!(!player_hits_gem(
            Position::new(200.0, 234.0),
            board::GEM_HIDDEN
        ));
    }

    #[test]
    fn water_line_is_strict() {
        assert!(crossed_water(Position::new(200.0, -10.0)));
        assert!(crossed_water(Position::new(200.0, 59.9)));
        assert!(!crossed_water(Position::new(200.0, 60.0)));
        assert!(!crossed_water(board::SPAWN));
    }
}
