#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Frogger adapters.
//!
//! The engine describes every frame as a [`Scene`] built from small
//! presentation values. Each presentation implements [`Renderable`] and draws
//! itself onto a [`DrawingSurface`], so backends only need to know how to blit
//! a sprite and print a line of text.

use std::str::FromStr;

use anyhow::Result as AnyResult;
use frogger_core::{board, Avatar, Direction, GemKind, Phase};
use glam::Vec2;
use thiserror::Error;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(0xff, 0xff, 0xff);
    /// Opaque red.
    pub const RED: Self = Self::from_rgb_u8(0xff, 0x00, 0x00);
    /// Opaque green as used by canvas text.
    pub const GREEN: Self = Self::from_rgb_u8(0x00, 0x80, 0x00);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::from_rgb_u8(0xff, 0xff, 0x00);
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb_u8(0x00, 0x00, 0x00);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Identifies every image the game draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpriteKey {
    /// Stone road tile.
    StoneBlock,
    /// Water tile on the top row.
    WaterBlock,
    /// Grass tile on the bottom rows.
    GrassBlock,
    /// Enemy bug.
    EnemyBug,
    /// Boy avatar.
    CharBoy,
    /// Cat girl avatar.
    CharCatGirl,
    /// Horn girl avatar.
    CharHornGirl,
    /// Pink girl avatar.
    CharPinkGirl,
    /// Princess avatar.
    CharPrincessGirl,
    /// Blue gem.
    GemBlue,
    /// Green gem.
    GemGreen,
    /// Orange gem.
    GemOrange,
}

impl SpriteKey {
    /// Every sprite key in manifest order.
    pub const ALL: [SpriteKey; 12] = [
        SpriteKey::StoneBlock,
        SpriteKey::WaterBlock,
        SpriteKey::GrassBlock,
        SpriteKey::EnemyBug,
        SpriteKey::CharBoy,
        SpriteKey::CharCatGirl,
        SpriteKey::CharHornGirl,
        SpriteKey::CharPinkGirl,
        SpriteKey::CharPrincessGirl,
        SpriteKey::GemBlue,
        SpriteKey::GemGreen,
        SpriteKey::GemOrange,
    ];

    /// Name used for the sprite in the asset manifest.
    #[must_use]
    pub const fn manifest_name(self) -> &'static str {
        match self {
            SpriteKey::StoneBlock => "stone-block",
            SpriteKey::WaterBlock => "water-block",
            SpriteKey::GrassBlock => "grass-block",
            SpriteKey::EnemyBug => "enemy-bug",
            SpriteKey::CharBoy => "char-boy",
            SpriteKey::CharCatGirl => "char-cat-girl",
            SpriteKey::CharHornGirl => "char-horn-girl",
            SpriteKey::CharPinkGirl => "char-pink-girl",
            SpriteKey::CharPrincessGirl => "char-princess-girl",
            SpriteKey::GemBlue => "gem-blue",
            SpriteKey::GemGreen => "gem-green",
            SpriteKey::GemOrange => "gem-orange",
        }
    }

    /// Sprite drawn for the provided avatar.
    #[must_use]
    pub const fn for_avatar(avatar: Avatar) -> Self {
        match avatar {
            Avatar::Boy => SpriteKey::CharBoy,
            Avatar::CatGirl => SpriteKey::CharCatGirl,
            Avatar::HornGirl => SpriteKey::CharHornGirl,
            Avatar::PinkGirl => SpriteKey::CharPinkGirl,
            Avatar::PrincessGirl => SpriteKey::CharPrincessGirl,
        }
    }

    /// Sprite drawn for the provided gem colour.
    #[must_use]
    pub const fn for_gem(kind: GemKind) -> Self {
        match kind {
            GemKind::Blue => SpriteKey::GemBlue,
            GemKind::Green => SpriteKey::GemGreen,
            GemKind::Orange => SpriteKey::GemOrange,
        }
    }
}

impl FromStr for SpriteKey {
    type Err = RenderingError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        SpriteKey::ALL
            .into_iter()
            .find(|key| key.manifest_name() == name)
            .ok_or_else(|| RenderingError::UnknownSprite {
                name: name.to_owned(),
            })
    }
}

/// Font size and colour used when drawing text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Height of the glyphs in canvas pixels.
    pub font_size: f32,
    /// Fill colour of the glyphs.
    pub color: Color,
}

impl TextStyle {
    /// Creates a new text style.
    #[must_use]
    pub const fn new(font_size: f32, color: Color) -> Self {
        Self { font_size, color }
    }
}

/// Target that presentations draw onto.
///
/// Positions are canvas coordinates of the sprite's top-left corner and of the
/// text baseline's left end.
pub trait DrawingSurface {
    /// Draws a sprite at its natural size, or stretched to `size` when provided.
    fn draw_sprite(&mut self, key: SpriteKey, position: Vec2, size: Option<Vec2>);

    /// Draws a single line of text.
    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle);
}

/// Anything that knows how to draw itself onto a [`DrawingSurface`].
pub trait Renderable {
    /// Draws the presentation.
    fn render(&self, surface: &mut dyn DrawingSurface);
}

/// Tiled background of the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Tile drawn on each row, top to bottom.
    pub rows: [SpriteKey; board::ROWS as usize],
    /// Number of tiles drawn per row.
    pub columns: u32,
    /// Distance between neighbouring tiles.
    pub tile_step: Vec2,
}

impl BoardPresentation {
    /// Board with one water row, three stone rows and two grass rows.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            rows: [
                SpriteKey::WaterBlock,
                SpriteKey::StoneBlock,
                SpriteKey::StoneBlock,
                SpriteKey::StoneBlock,
                SpriteKey::GrassBlock,
                SpriteKey::GrassBlock,
            ],
            columns: board::COLUMNS,
            tile_step: Vec2::new(board::COLUMN_WIDTH, board::ROW_HEIGHT),
        }
    }
}

impl Renderable for BoardPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        for (row, key) in self.rows.iter().enumerate() {
            for column in 0..self.columns {
                let position = Vec2::new(
                    column as f32 * self.tile_step.x,
                    row as f32 * self.tile_step.y,
                );
                surface.draw_sprite(*key, position, None);
            }
        }
    }
}

/// Enemy bug at its current position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Top-left corner of the sprite.
    pub position: Vec2,
}

impl Renderable for EnemyPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.draw_sprite(SpriteKey::EnemyBug, self.position, None);
    }
}

/// Player sprite drawn with the chosen avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Avatar sprite.
    pub sprite: SpriteKey,
    /// Top-left corner of the sprite.
    pub position: Vec2,
}

impl Renderable for PlayerPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.draw_sprite(self.sprite, self.position, None);
    }
}

/// Visible gem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GemPresentation {
    /// Gem sprite.
    pub sprite: SpriteKey,
    /// Top-left corner of the sprite.
    pub position: Vec2,
}

impl Renderable for GemPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        let (width, height) = board::GEM_DRAW_SIZE;
        surface.draw_sprite(self.sprite, self.position, Some(Vec2::new(width, height)));
    }
}

/// Character offered on the welcome screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterPresentation {
    /// Avatar sprite.
    pub sprite: SpriteKey,
    /// Top-left corner of the clickable image.
    pub origin: Vec2,
}

impl Renderable for CharacterPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.draw_sprite(self.sprite, self.origin, None);
    }
}

/// Timer and score readouts shown during play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Seconds left in the round.
    pub countdown: u32,
    /// Current score.
    pub score: i64,
    /// Best score of the session.
    pub best_score: i64,
}

impl HudPresentation {
    /// Style of the small captions above each readout.
    pub const CAPTION_STYLE: TextStyle = TextStyle::new(20.0, Color::WHITE);
    /// Style of the readout values.
    pub const VALUE_STYLE: TextStyle = TextStyle::new(40.0, Color::WHITE);
}

impl Renderable for HudPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        let readouts = [
            (
                "Timer",
                Vec2::new(20.0, 80.0),
                self.countdown.to_string(),
                Vec2::new(20.0, 120.0),
            ),
            (
                "High Score",
                Vec2::new(210.0, 80.0),
                self.best_score.to_string(),
                Vec2::new(240.0, 120.0),
            ),
            (
                "Score",
                Vec2::new(430.0, 80.0),
                self.score.to_string(),
                Vec2::new(450.0, 120.0),
            ),
        ];
        for (caption, caption_at, value, value_at) in readouts {
            surface.draw_text(caption, caption_at, Self::CAPTION_STYLE);
            surface.draw_text(&value, value_at, Self::VALUE_STYLE);
        }
    }
}

/// Free-standing line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelPresentation {
    /// Text to draw.
    pub text: String,
    /// Left end of the baseline.
    pub position: Vec2,
    /// Font size and colour.
    pub style: TextStyle,
}

impl LabelPresentation {
    /// Creates a new label.
    #[must_use]
    pub fn new(text: impl Into<String>, position: Vec2, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            position,
            style,
        }
    }
}

impl Renderable for LabelPresentation {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        surface.draw_text(&self.text, self.position, self.style);
    }
}

/// Scene description for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Phase the scene was composed for, deciding which parts are drawn.
    pub phase: Phase,
    /// Tiled background.
    pub board: BoardPresentation,
    /// Enemies that have been placed on a lane.
    pub enemies: Vec<EnemyPresentation>,
    /// Player sprite once an avatar is chosen.
    pub player: Option<PlayerPresentation>,
    /// Visible gems.
    pub gems: Vec<GemPresentation>,
    /// Characters offered on the welcome screen.
    pub characters: Vec<CharacterPresentation>,
    /// Timer and score readouts.
    pub hud: Option<HudPresentation>,
    /// Banner and menu text.
    pub labels: Vec<LabelPresentation>,
}

impl Scene {
    /// Creates an empty scene on the standard board.
    #[must_use]
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            board: BoardPresentation::standard(),
            enemies: Vec::new(),
            player: None,
            gems: Vec::new(),
            characters: Vec::new(),
            hud: None,
            labels: Vec::new(),
        }
    }

    /// Presentations drawn for the scene's phase, back to front.
    #[must_use]
    pub fn renderables(&self) -> Vec<&dyn Renderable> {
        let mut layers: Vec<&dyn Renderable> = Vec::new();
        layers.push(&self.board);
        match self.phase {
            Phase::Welcome => {
                layers.extend(self.labels.iter().map(|label| label as &dyn Renderable));
                layers.extend(
                    self.characters
                        .iter()
                        .map(|character| character as &dyn Renderable),
                );
            }
            Phase::Playing => {
                layers.extend(self.enemies.iter().map(|enemy| enemy as &dyn Renderable));
                if let Some(player) = &self.player {
                    layers.push(player);
                }
                layers.extend(self.gems.iter().map(|gem| gem as &dyn Renderable));
                if let Some(hud) = &self.hud {
                    layers.push(hud);
                }
            }
            Phase::GameOver => {
                layers.extend(self.labels.iter().map(|label| label as &dyn Renderable));
            }
        }
        layers
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Phase::Welcome)
    }
}

impl Renderable for Scene {
    fn render(&self, surface: &mut dyn DrawingSurface) {
        for layer in self.renderables() {
            layer.render(surface);
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Arrow key released on this frame.
    pub direction: Option<Direction>,
    /// Canvas position of a primary-button click on this frame.
    pub click: Option<Vec2>,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Frogger scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// Every sprite must be loaded before `update_scene` is first invoked. The
    /// closure receives the input captured for the frame and replaces the
    /// scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when resolving rendering descriptors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderingError {
    /// The name does not match any sprite the game draws.
    #[error("unknown sprite `{name}`")]
    UnknownSprite {
        /// Name that failed to resolve.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_names_resolve_back_to_their_keys() {
        for key in SpriteKey::ALL {
            assert_eq!(key.manifest_name().parse::<SpriteKey>(), Ok(key));
        }
    }

    #[test]
    fn unknown_manifest_name_is_rejected() {
        let error = "rock"
            .parse::<SpriteKey>()
            .expect_err("rock is not a Frogger sprite");
        assert_eq!(error.to_string(), "unknown sprite `rock`");
    }

    #[test]
    fn avatars_and_gems_map_to_distinct_sprites() {
        let mut keys: Vec<SpriteKey> = Avatar::ALL
            .into_iter()
            .map(SpriteKey::for_avatar)
            .chain(GemKind::ALL.into_iter().map(SpriteKey::for_gem))
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn playing_scene_skips_menu_content() {
        let mut scene = Scene::new(Phase::Playing);
        scene.labels.push(LabelPresentation::new(
            "GAME OVER!",
            Vec2::new(120.0, 250.0),
            TextStyle::new(40.0, Color::RED),
        ));
        scene.enemies.push(EnemyPresentation {
            position: Vec2::new(-10.0, 60.0),
        });
        assert_eq!(scene.renderables().len(), 2);
    }
}
