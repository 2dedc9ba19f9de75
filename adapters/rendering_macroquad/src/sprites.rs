use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use frogger_rendering::SpriteKey;
use macroquad::texture::{FilterMode, Texture2D};

const MANIFEST_VERSION: u32 = 1;

/// One image named by the sprite manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SpriteEntry {
    key: SpriteKey,
    path: PathBuf,
}

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    sprites: BTreeMap<String, PathBuf>,
}

/// Every texture the game draws, loaded up front from the sprite manifest.
#[derive(Debug)]
pub struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
}

impl SpriteAtlas {
    /// Loads every sprite listed by the manifest at `path`.
    ///
    /// Image paths are resolved relative to the manifest's directory. Fails
    /// when the manifest is unreadable, names an unknown sprite or omits one.
    /// An image that cannot be read or decoded fails too.
    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self> {
        let entries = read_manifest(path.as_ref())?;
        Self::load(&entries, load_texture)
    }

    /// Location of the bundled manifest, relative to the working directory.
    #[must_use]
    pub fn default_manifest_path() -> PathBuf {
        PathBuf::from("assets/manifest.toml")
    }

    /// Reports whether `key` has a texture.
    #[must_use]
    pub fn contains(&self, key: SpriteKey) -> bool {
        self.textures.contains_key(&key)
    }

    /// Number of loaded textures.
    #[must_use]
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Texture drawn for `key`.
    #[must_use]
    pub fn texture(&self, key: SpriteKey) -> Option<Texture2D> {
        self.textures.get(&key).copied()
    }

    fn load(
        entries: &[SpriteEntry],
        mut loader: impl FnMut(&SpriteEntry) -> Result<Texture2D>,
    ) -> Result<Self> {
        let textures = entries
            .iter()
            .map(|entry| {
                loader(entry)
                    .with_context(|| {
                        format!("failed to load sprite {:?} from {}", entry.key, entry.path.display())
                    })
                    .map(|texture| (entry.key, texture))
            })
            .collect::<Result<HashMap<_, _>>>()?;
        log::debug!("loaded {} sprites", textures.len());
        Ok(Self { textures })
    }
}

/// RGBA8 pixels ready for upload.
#[derive(Debug)]
struct DecodedImage {
    width: u16,
    height: u16,
    rgba: Vec<u8>,
}

fn load_texture(entry: &SpriteEntry) -> Result<Texture2D> {
    let bytes = fs::read(&entry.path)
        .with_context(|| format!("failed to read {}", entry.path.display()))?;
    let image = decode_image(&bytes)
        .with_context(|| format!("failed to decode {}", entry.path.display()))?;
    let texture = Texture2D::from_rgba8(image.width, image.height, &image.rgba);
    texture.set_filter(FilterMode::Linear);
    Ok(texture)
}

fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("unrecognised image data")?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width: u16::try_from(width).with_context(|| format!("image width {width} is too large"))?,
        height: u16::try_from(height)
            .with_context(|| format!("image height {height} is too large"))?,
        rgba: rgba.into_raw(),
    })
}

fn read_manifest(path: &Path) -> Result<Vec<SpriteEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read sprite manifest at {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    parse_manifest(&contents, base)
}

/// Resolves the manifest into one entry per sprite, in [`SpriteKey::ALL`] order.
fn parse_manifest(contents: &str, base: &Path) -> Result<Vec<SpriteEntry>> {
    let Manifest {
        version,
        mut sprites,
    } = toml::from_str(contents).context("sprite manifest is not valid toml")?;
    ensure!(
        version == MANIFEST_VERSION,
        "unsupported sprite manifest version {version}; expected {MANIFEST_VERSION}"
    );

    let entries = SpriteKey::ALL
        .into_iter()
        .map(|key| {
            sprites
                .remove(key.manifest_name())
                .map(|relative| SpriteEntry {
                    key,
                    path: base.join(relative),
                })
                .with_context(|| {
                    format!("sprite manifest missing entry for `{}`", key.manifest_name())
                })
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(name) = sprites.into_keys().next() {
        let _ = name
            .parse::<SpriteKey>()
            .with_context(|| format!("sprite manifest entry `{name}` rejected"))?;
    }

    Ok(entries)
}
