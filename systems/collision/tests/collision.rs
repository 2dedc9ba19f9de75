use std::time::Duration;

use frogger_core::{
    board, CharacterId, Command, Direction, EnemyId, EnemySnapshot, EnemyView, Event, GemView,
    Phase, PlayerSnapshot, Position,
};
use frogger_system_collision::Collision;
use frogger_world::{self as world, query, World};
use proptest::prelude::*;

fn player_at(x: f32, y: f32) -> PlayerSnapshot {
    PlayerSnapshot {
        position: Position::new(x, y),
        score: 0,
        countdown: board::DEFAULT_COUNTDOWN_SECONDS,
        best_score: 0,
        avatar: None,
    }
}

fn enemy(id: u32, x: f32, lane: f32) -> EnemySnapshot {
    EnemySnapshot {
        id: EnemyId::new(id),
        x: Some(x),
        lane,
        speed: 100.0,
    }
}

fn collided_enemies(commands: &[Command]) -> Vec<EnemyId> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::CollideWithEnemy { enemy } => Some(*enemy),
            _ => None,
        })
        .collect()
}

#[test]
fn every_overlapping_enemy_emits_its_own_collision() {
    let player = player_at(200.0, 68.0);
    let enemies = EnemyView::from_snapshots(vec![
        enemy(0, 170.0, 60.0),
        enemy(1, 210.0, 60.0),
        enemy(2, 210.0, 140.0),
    ]);
    let mut commands = Vec::new();
    Collision::new().handle(
        Phase::Playing,
        &player,
        &enemies,
        &GemView::default(),
        &mut commands,
    );

    assert_eq!(
        collided_enemies(&commands),
        vec![EnemyId::new(0), EnemyId::new(1)]
    );
}

#[test]
fn collisions_are_ignored_outside_play() {
    let player = player_at(200.0, 68.0);
    let enemies = EnemyView::from_snapshots(vec![enemy(0, 190.0, 60.0)]);
    let mut commands = Vec::new();
    for phase in [Phase::Welcome, Phase::GameOver] {
        Collision::new().handle(phase, &player, &enemies, &GemView::default(), &mut commands);
    }
    assert!(commands.is_empty());
}

#[test]
fn unplaced_enemies_never_collide() {
    let player = player_at(0.0, 68.0);
    let enemies = EnemyView::from_snapshots(vec![EnemySnapshot {
        id: EnemyId::new(0),
        x: None,
        lane: 60.0,
        speed: 100.0,
    }]);
    let mut commands = Vec::new();
    Collision::new().handle(
        Phase::Playing,
        &player,
        &enemies,
        &GemView::default(),
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn walking_into_traffic_costs_points_through_the_world() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SelectCharacter {
            character: CharacterId::new(0),
        },
        &mut events,
    );
    for _ in 0..4 {
        world::apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Up,
            },
            &mut events,
        );
    }

    let collision = Collision::new();
    let mut hits = 0;
    for _ in 0..20_000 {
        events.clear();
        world::apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(16),
                elapsed: Duration::from_millis(16),
            },
            &mut events,
        );
        let mut commands = Vec::new();
        collision.handle(
            query::phase(&world),
            &query::player(&world),
            &query::enemy_view(&world),
            &query::gem_view(&world),
            &mut commands,
        );
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        hits += events
            .iter()
            .filter(|event| matches!(event, Event::EnemyCollision { .. }))
            .count();
        if hits > 0 {
            break;
        }
    }

    let player = query::player(&world);
    assert!(hits > 0, "an enemy should eventually reach the player");
    assert_eq!(player.score, -(hits as i64));
    assert_eq!(player.position, board::SPAWN);
}

fn arb_enemy() -> impl Strategy<Value = (f32, usize)> {
    (-10.0f32..505.0, 0usize..3)
}

proptest! {
    #[test]
    fn outcome_does_not_depend_on_enumeration_order(
        raw in proptest::collection::vec(arb_enemy(), 1..8),
        column in 0usize..5,
        row in 0usize..5,
    ) {
        let player = player_at(
            200.0 + (column as f32 - 2.0) * board::COLUMN_WIDTH,
            400.0 - row as f32 * board::ROW_HEIGHT,
        );
        let snapshots: Vec<EnemySnapshot> = raw
            .iter()
            .enumerate()
            .map(|(index, (x, lane))| enemy(index as u32, *x, board::ENEMY_LANES[*lane]))
            .collect();
        let mut reversed = snapshots.clone();
        reversed.reverse();

        let collision = Collision::new();
        let mut forward_commands = Vec::new();
        collision.handle(
            Phase::Playing,
            &player,
            &EnemyView::from_snapshots(snapshots),
            &GemView::default(),
            &mut forward_commands,
        );
        let mut reversed_commands = Vec::new();
        collision.handle(
            Phase::Playing,
            &player,
            &EnemyView::from_snapshots(reversed),
            &GemView::default(),
            &mut reversed_commands,
        );

        let mut forward = collided_enemies(&forward_commands);
        let mut backward = collided_enemies(&reversed_commands);
        forward.sort();
        backward.sort();
        prop_assert_eq!(forward, backward);
    }
}
