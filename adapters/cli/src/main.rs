#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Frogger experience.

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use frogger_core::{Phase, RoundSummary};
use frogger_engine::{Clock, Config, GameLoop, ManualClock, RespawnPolicy, SystemClock};
use frogger_rendering::{Color, FrameInput, Presentation, RenderingBackend};
use frogger_rendering_macroquad::{MacroquadBackend, SpriteAtlas};
use frogger_world::query;
use glam::Vec2;
use serde::Serialize;

const HEADLESS_FRAME: Duration = Duration::from_nanos(16_666_667);
const HEADLESS_FRAMES_PER_SECOND: u64 = 60;

/// Command-line arguments accepted by the Frogger binary.
#[derive(Debug, Parser)]
#[command(name = "frogger", about = "Cross the road, dodge the bugs, grab the gems.")]
struct CliArgs {
    /// Seed for enemy lanes and gem placement.
    #[arg(long)]
    seed: Option<u64>,
    /// Seconds on the countdown at the start of every round.
    #[arg(long, default_value_t = frogger_core::board::DEFAULT_COUNTDOWN_SECONDS)]
    countdown_seconds: u32,
    /// How crossings of the water row are rewarded.
    #[arg(long, value_enum, default_value_t = CliRespawnPolicy::Coalesced)]
    respawn_policy: CliRespawnPolicy,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_name = "on|off", value_parser = parse_toggle)]
    vsync: Option<bool>,
    /// Print frames per second once a second.
    #[arg(long)]
    show_fps: bool,
    /// Sprite manifest to load instead of the bundled one.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,
    /// Simulate the given number of seconds without a window and print a JSON summary.
    #[arg(long, value_name = "SECONDS")]
    headless: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CliRespawnPolicy {
    Coalesced,
    Legacy,
}

impl From<CliRespawnPolicy> for RespawnPolicy {
    fn from(value: CliRespawnPolicy) -> Self {
        match value {
            CliRespawnPolicy::Coalesced => RespawnPolicy::Coalesced,
            CliRespawnPolicy::Legacy => RespawnPolicy::Legacy,
        }
    }
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("expected `on` or `off`, got `{other}`")),
    }
}

#[derive(Debug, PartialEq, Serialize)]
struct HeadlessReport {
    seed: u64,
    seconds: u32,
    phase: Phase,
    summary: RoundSummary,
}

impl CliArgs {
    fn game_config(&self) -> Config {
        let defaults = Config::default();
        Config::new(
            self.countdown_seconds,
            self.seed.unwrap_or(defaults.rng_seed()),
            self.respawn_policy.into(),
        )
    }
}

/// Runs a session without a window, selecting the first character.
fn run_headless(config: Config, seconds: u32) -> HeadlessReport {
    let mut game = GameLoop::new(config);
    let mut clock = ManualClock::new();

    let click = query::characters(game.world()).first().map(|character| {
        let origin = character.region.origin();
        Vec2::new(origin.x() + 10.0, origin.y() + character.region.height() / 2.0)
    });
    let _ = game.frame(
        clock.now(),
        FrameInput {
            direction: None,
            click,
        },
    );

    for _ in 0..u64::from(seconds) * HEADLESS_FRAMES_PER_SECOND {
        clock.advance(HEADLESS_FRAME);
        let _ = game.frame(clock.now(), FrameInput::default());
    }

    let report = HeadlessReport {
        seed: config.rng_seed(),
        seconds,
        phase: query::phase(game.world()),
        summary: game.summary(),
    };
    log::info!(
        "headless run finished in {:?} with score {}",
        report.phase,
        report.summary.score
    );
    report
}

/// Entry point for the Frogger command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = args.game_config();

    if let Some(seconds) = args.headless {
        let report = run_headless(config, seconds);
        let encoded =
            serde_json::to_string_pretty(&report).context("failed to encode headless report")?;
        println!("{encoded}");
        return Ok(());
    }

    let mut game = GameLoop::new(config);
    let clock = SystemClock::new();
    let presentation = Presentation::new("Frogger", Color::BLACK, game.scene());

    let mut backend = MacroquadBackend::new()
        .with_show_fps(args.show_fps)
        .with_manifest_path(
            args.manifest
                .unwrap_or_else(SpriteAtlas::default_manifest_path),
        );
    if let Some(vsync) = args.vsync {
        backend = backend.with_vsync(vsync);
    }

    backend
        .run(presentation, move |input, scene| {
            *scene = game.frame(clock.now(), input);
        })
        .context("failed to run the Frogger window")
}
