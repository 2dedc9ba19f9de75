use std::time::Duration;

use frogger_core::{board, Avatar, Direction, Event, Phase};
use frogger_engine::{Clock, Config, GameLoop, ManualClock, RespawnPolicy};
use frogger_rendering::FrameInput;
use frogger_world::query;
use glam::Vec2;

const FRAME: Duration = Duration::from_millis(250);

fn click(x: f32, y: f32) -> FrameInput {
    FrameInput {
        direction: None,
        click: Some(Vec2::new(x, y)),
    }
}

fn press(direction: Direction) -> FrameInput {
    FrameInput {
        direction: Some(direction),
        click: None,
    }
}

struct Harness {
    game: GameLoop,
    clock: ManualClock,
    frame: Duration,
    rounds_ended: usize,
}

impl Harness {
    fn new(config: Config) -> Self {
        Self::with_frame(config, FRAME)
    }

    fn with_frame(config: Config, frame: Duration) -> Self {
        Self {
            game: GameLoop::new(config),
            clock: ManualClock::new(),
            frame,
            rounds_ended: 0,
        }
    }

    fn frame(&mut self, input: FrameInput) {
        let _ = self.game.frame(self.clock.now(), input);
        self.rounds_ended += self
            .game
            .events()
            .iter()
            .filter(|event| matches!(event, Event::RoundEnded { .. }))
            .count();
        self.clock.advance(self.frame);
    }

    fn idle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame(FrameInput::default());
        }
    }
}

#[test]
fn select_play_expire_and_play_again() {
    let mut harness = Harness::new(Config::default());
    harness.frame(click(50.0, 350.0));

    let world = harness.game.world();
    assert_eq!(query::phase(world), Phase::Playing);
    assert_eq!(query::player(world).avatar, Some(Avatar::Boy));

    let prior_best = query::player(world).best_score;
    for _ in 0..3 {
        harness.frame(press(Direction::Up));
    }
    harness.idle(90 * 4);

    let player = query::player(harness.game.world());
    assert_eq!(query::phase(harness.game.world()), Phase::GameOver);
    assert_eq!(harness.rounds_ended, 1);
    assert_eq!(player.countdown, 0);
    assert_eq!(player.best_score, player.score.max(prior_best));
    assert_eq!(player.position, board::SPAWN);

    harness.idle(20);
    assert_eq!(harness.rounds_ended, 1);

    harness.frame(click(200.0, 440.0));
    let player = query::player(harness.game.world());
    assert_eq!(query::phase(harness.game.world()), Phase::Playing);
    assert_eq!(player.score, 0);
    assert_eq!(player.countdown, 90);
    assert_eq!(player.position, board::SPAWN);
    assert_eq!(query::gem_view(harness.game.world()).visible_count(), 1);
}

#[test]
fn ninety_one_second_frames_end_the_round() {
    let mut harness = Harness::with_frame(Config::default(), Duration::from_secs(1));
    harness.frame(click(50.0, 350.0));
    assert_eq!(query::phase(harness.game.world()), Phase::Playing);

    harness.idle(89);
    assert_eq!(query::phase(harness.game.world()), Phase::Playing);
    assert_eq!(query::player(harness.game.world()).countdown, 1);

    harness.idle(1);
    let player = query::player(harness.game.world());
    assert_eq!(query::phase(harness.game.world()), Phase::GameOver);
    assert_eq!(harness.rounds_ended, 1);
    assert_eq!(player.score, 0);
    assert_eq!(player.best_score, 0);

    harness.idle(5);
    assert_eq!(harness.rounds_ended, 1);

    harness.frame(click(200.0, 440.0));
    let player = query::player(harness.game.world());
    assert_eq!(query::phase(harness.game.world()), Phase::Playing);
    assert_eq!(player.score, 0);
    assert_eq!(player.countdown, 90);
}

#[test]
fn game_over_scene_reports_the_final_score() {
    let mut harness = Harness::new(Config::new(2, 7, RespawnPolicy::Coalesced));
    harness.frame(click(400.0, 320.0));
    assert_eq!(
        query::player(harness.game.world()).avatar,
        Some(Avatar::PrincessGirl)
    );
    harness.idle(9);

    let scene = harness.game.scene();
    assert_eq!(scene.phase, Phase::GameOver);
    let texts: Vec<&str> = scene.labels.iter().map(|label| label.text.as_str()).collect();
    assert_eq!(texts, vec!["GAME OVER!", "Your Score: 0", "Play Again!"]);
}

/// Enemies start at x = -10 and cannot pass x = 120 within the first 330 ms,
/// so a player sprinting up column x = 200 reaches the water untouched.
#[test]
fn crossing_the_road_scores_a_point_after_the_delay() {
    for seed in [1, 7, 42, 0xdead_beef] {
        let mut game = GameLoop::new(Config::new(90, seed, RespawnPolicy::Coalesced));
        let _ = game.frame(Duration::ZERO, click(50.0, 350.0));

        let mut now = Duration::ZERO;
        let mut collided = false;
        let mut crossings = 0;
        let mut count = |game: &GameLoop, collided: &mut bool| {
            for event in game.events() {
                match event {
                    Event::EnemyCollision { .. } => *collided = true,
                    Event::CrossingCompleted { .. } => crossings += 1,
                    _ => {}
                }
            }
        };

        for _ in 0..5 {
            now += Duration::from_millis(1);
            let _ = game.frame(now, press(Direction::Up));
            count(&game, &mut collided);
        }
        assert!(
            query::player(game.world()).position.y() < board::WATER_LINE,
            "seed {seed}: player should stand in the water"
        );

        for _ in 0..20 {
            now += Duration::from_millis(16);
            let _ = game.frame(now, FrameInput::default());
            count(&game, &mut collided);
        }

        assert!(!collided, "seed {seed}: the road should be clear");
        assert_eq!(crossings, 1, "seed {seed}");
        assert_eq!(query::player(game.world()).position, board::SPAWN);
    }
}

#[test]
fn identical_seeds_replay_identically() {
    let run = |seed: u64| {
        let mut harness = Harness::new(Config::new(30, seed, RespawnPolicy::Coalesced));
        harness.frame(click(210.0, 320.0));
        let mut trace = Vec::new();
        for index in 0..140 {
            let input = match index % 7 {
                0 => press(Direction::Up),
                3 => press(Direction::Left),
                5 => press(Direction::Right),
                _ => FrameInput::default(),
            };
            harness.frame(input);
            trace.push(harness.game.summary());
        }
        (trace, harness.game.scene())
    };

    assert_eq!(run(42), run(42));
}
