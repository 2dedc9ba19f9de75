#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Frogger.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Every sprite listed in the manifest is loaded before the update closure
//! runs for the first time. When loading fails the window shows the error
//! until it is dismissed and [`RenderingBackend::run`] returns it.

mod sprites;

use std::{
    path::PathBuf,
    sync::mpsc,
    time::Duration,
};

use anyhow::{Context, Result};
use frogger_core::{board, Direction};
use frogger_rendering::{
    Color, DrawingSurface, FrameInput, Presentation, Renderable, RenderingBackend, Scene,
    SpriteKey, TextStyle,
};
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_key_released, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use macroquad::math::Vec2 as MacroquadVec2;
use macroquad::texture::{draw_texture_ex, DrawTextureParams};

pub use self::sprites::SpriteAtlas;

const ERROR_STYLE: TextStyle = TextStyle::new(20.0, Color::RED);
const ERROR_HINT_STYLE: TextStyle = TextStyle::new(16.0, Color::WHITE);

/// Opens a 505×606 macroquad window and drives the scene at the display rate.
#[derive(Debug)]
pub struct MacroquadBackend {
    vsync: Option<bool>,
    report_fps: bool,
    manifest_path: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            vsync: None,
            report_fps: false,
            manifest_path: SpriteAtlas::default_manifest_path(),
        }
    }
}

impl MacroquadBackend {
    /// Backend using the bundled sprite manifest and the platform's vsync setting.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces vsync on or off instead of leaving it to the platform.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = Some(enabled);
        self
    }

    /// Prints the measured frame rate to stdout once a second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.report_fps = show;
        self
    }

    /// Loads sprites from the manifest at `path` instead of the default location.
    #[must_use]
    pub fn with_manifest_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = path.into();
        self
    }
}

/// Keys read once per frame.
struct KeyboardState {
    quit: bool,
    direction: Option<Direction>,
}

impl KeyboardState {
    fn read() -> Self {
        let quit = [KeyCode::Escape, KeyCode::Q].into_iter().any(is_key_pressed);
        let direction = [
            (KeyCode::Left, Direction::Left),
            (KeyCode::Up, Direction::Up),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Down, Direction::Down),
        ]
        .into_iter()
        .find_map(|(key, direction)| is_key_released(key).then_some(direction));

        Self { quit, direction }
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Maps canvas coordinates onto the window, letterboxing to keep the aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
struct CanvasMetrics {
    scale: f32,
    offset: Vec2,
}

impl CanvasMetrics {
    fn from_screen(screen_width: f32, screen_height: f32) -> Self {
        let scale = (screen_width / board::CANVAS_WIDTH)
            .min(screen_height / board::CANVAS_HEIGHT)
            .max(f32::EPSILON);
        let offset = Vec2::new(
            (screen_width - board::CANVAS_WIDTH * scale) / 2.0,
            (screen_height - board::CANVAS_HEIGHT * scale) / 2.0,
        );
        Self { scale, offset }
    }

    fn to_screen(self, canvas: Vec2) -> Vec2 {
        self.offset + canvas * self.scale
    }

    fn to_canvas(self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.scale
    }
}

struct MacroquadSurface<'a> {
    atlas: &'a SpriteAtlas,
    metrics: CanvasMetrics,
}

impl DrawingSurface for MacroquadSurface<'_> {
    fn draw_sprite(&mut self, key: SpriteKey, position: Vec2, size: Option<Vec2>) {
        let Some(texture) = self.atlas.texture(key) else {
            return;
        };
        let size = size.unwrap_or_else(|| Vec2::new(texture.width(), texture.height()));
        let origin = self.metrics.to_screen(position);
        let dest = size * self.metrics.scale;
        draw_texture_ex(
            texture,
            origin.x,
            origin.y,
            macroquad::color::WHITE,
            DrawTextureParams {
                dest_size: Some(MacroquadVec2::new(dest.x, dest.y)),
                ..DrawTextureParams::default()
            },
        );
    }

    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        let origin = self.metrics.to_screen(position);
        let _ = macroquad::text::draw_text(
            text,
            origin.x,
            origin.y,
            style.font_size * self.metrics.scale,
            to_macroquad_color(style.color),
        );
    }
}

/// Surface used before sprites exist, drawing text only.
struct TextOnlySurface {
    metrics: CanvasMetrics,
}

impl DrawingSurface for TextOnlySurface {
    fn draw_sprite(&mut self, _key: SpriteKey, _position: Vec2, _size: Option<Vec2>) {}

    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle) {
        let origin = self.metrics.to_screen(position);
        let _ = macroquad::text::draw_text(
            text,
            origin.x,
            origin.y,
            style.font_size * self.metrics.scale,
            to_macroquad_color(style.color),
        );
    }
}

fn gather_frame_input(keyboard: &KeyboardState, metrics: CanvasMetrics) -> FrameInput {
    let click = is_mouse_button_pressed(MouseButton::Left).then(|| {
        let (x, y) = mouse_position();
        metrics.to_canvas(Vec2::new(x, y))
    });
    FrameInput {
        direction: keyboard.direction,
        click,
    }
}

fn error_lines(error: &anyhow::Error) -> Vec<String> {
    let mut lines = vec!["Failed to load game assets:".to_owned()];
    lines.extend(error.chain().map(|cause| cause.to_string()));
    lines
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Self {
            vsync,
            report_fps,
            manifest_path,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: board::CANVAS_WIDTH as i32,
            window_height: board::CANVAS_HEIGHT as i32,
            ..macroquad::window::Conf::default()
        };
        config.platform.swap_interval = vsync.map(i32::from);

        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let clear = to_macroquad_color(clear_color);
            let atlas = match SpriteAtlas::from_manifest_path(&manifest_path)
                .with_context(|| format!("failed to initialise sprites from {}", manifest_path.display()))
            {
                Ok(atlas) => atlas,
                Err(error) => {
                    log::error!("{error:#}");
                    let lines = error_lines(&error);
                    let _ = ready_tx.send(Err(error));
                    loop {
                        if KeyboardState::read().quit {
                            break;
                        }
                        macroquad::window::clear_background(macroquad::color::BLACK);
                        let mut surface = TextOnlySurface {
                            metrics: CanvasMetrics::from_screen(
                                macroquad::window::screen_width(),
                                macroquad::window::screen_height(),
                            ),
                        };
                        for (index, line) in lines.iter().enumerate() {
                            surface.draw_text(
                                line,
                                Vec2::new(20.0, 60.0 + index as f32 * 28.0),
                                ERROR_STYLE,
                            );
                        }
                        surface.draw_text(
                            "Press Esc to exit",
                            Vec2::new(20.0, board::CANVAS_HEIGHT - 30.0),
                            ERROR_HINT_STYLE,
                        );
                        macroquad::window::next_frame().await;
                    }
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));
            log::info!("sprites ready, entering the frame loop");

            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardState::read();
                if keyboard.quit {
                    break;
                }

                let metrics = CanvasMetrics::from_screen(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                let frame_input = gather_frame_input(&keyboard, metrics);
                update_scene(frame_input, &mut scene);

                macroquad::window::clear_background(clear);
                let mut surface = MacroquadSurface {
                    atlas: &atlas,
                    metrics,
                };
                scene.render(&mut surface);

                let frame = Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(per_second) = fps_counter.record_frame(frame) {
                    if report_fps {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        ready_rx.recv().unwrap_or(Ok(()))
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
