use std::time::Duration;

use frogger_core::{CharacterId, Command, Event, Phase};
use frogger_system_countdown::Countdown;
use frogger_world::{self as world, query, Config, World};

fn run_tick(world: &mut World, countdown: &mut Countdown, dt: Duration) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt, elapsed: dt }, &mut events);
    let mut commands = Vec::new();
    let player = query::player(world);
    countdown.handle(&events, query::phase(world), player.countdown, &mut commands);
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn started(seconds: u32) -> World {
    let mut world = World::with_config(Config::new(seconds, 5));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SelectCharacter {
            character: CharacterId::new(0),
        },
        &mut events,
    );
    world
}

#[test]
fn a_round_lasts_exactly_the_configured_seconds() {
    let mut world = started(3);
    let mut countdown = Countdown::new();
    let mut ended = 0;

    for _ in 0..179 {
        let events = run_tick(&mut world, &mut countdown, Duration::from_millis(1_000) / 60);
        ended += events
            .iter()
            .filter(|event| matches!(event, Event::RoundEnded { .. }))
            .count();
    }
    assert_eq!(query::phase(&world), Phase::Playing);
    assert_eq!(query::player(&world).countdown, 1);

    for _ in 0..2 {
        let events = run_tick(&mut world, &mut countdown, Duration::from_millis(1_000) / 60);
        ended += events
            .iter()
            .filter(|event| matches!(event, Event::RoundEnded { .. }))
            .count();
    }
    assert_eq!(query::phase(&world), Phase::GameOver);
    assert_eq!(query::player(&world).countdown, 0);
    assert_eq!(ended, 1);
}

#[test]
fn a_long_stall_expires_the_round_only_once() {
    let mut world = started(2);
    let mut countdown = Countdown::new();
    let events = run_tick(&mut world, &mut countdown, Duration::from_secs(10));

    let ended = events
        .iter()
        .filter(|event| matches!(event, Event::RoundEnded { .. }))
        .count();
    let rejected = events
        .iter()
        .filter(|event| matches!(event, Event::PhaseTransitionRejected { .. }))
        .count();
    assert_eq!(ended, 1);
    assert_eq!(rejected, 0);
    assert_eq!(query::phase(&world), Phase::GameOver);
}

#[test]
fn the_welcome_screen_does_not_consume_time() {
    let mut world = World::new();
    let mut countdown = Countdown::new();
    for _ in 0..10 {
        let _ = run_tick(&mut world, &mut countdown, Duration::from_secs(1));
    }
    assert_eq!(query::player(&world).countdown, 90);
    assert_eq!(countdown.pending(), Duration::ZERO);
}
