//! Sprite library
//!
//! Loads every animation's frames once at startup from
//! `<assets_dir>/<folder>/<n>.png` (numeric order) plus the tile and bullet
//! images from `<assets_dir>/tiles/`. Missing art is not fatal: the canvas
//! falls back to flat rectangles and the default frame table is kept.

use macroquad::prelude::{load_texture, FilterMode, Texture2D};
use planetes::game::{AnimationId, AnimationInfo, AnimationSet, TileKind};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Upper bound when probing numbered frames without a directory listing
#[cfg(target_arch = "wasm32")]
const MAX_FRAMES: usize = 32;

#[derive(Default)]
pub struct SpriteLibrary {
    animations: HashMap<AnimationId, Vec<Texture2D>>,
    tiles: HashMap<TileKind, Texture2D>,
    bullet: Option<Texture2D>,
}

impl SpriteLibrary {
    pub async fn load(assets_dir: &Path) -> Self {
        let mut library = Self::default();

        for id in AnimationId::ALL {
            let frames = load_frames(&assets_dir.join(id.folder())).await;
            if frames.is_empty() {
                warn!("No frames for {:?} in {}", id, assets_dir.join(id.folder()).display());
                continue;
            }
            debug!("Loaded {} frame(s) for {:?}", frames.len(), id);
            library.animations.insert(id, frames);
        }

        let tiles_dir = assets_dir.join("tiles");
        for (kind, file) in [(TileKind::Wall, "wall.png"), (TileKind::Coin, "coin.png")] {
            if let Some(texture) = load_one(&tiles_dir.join(file)).await {
                library.tiles.insert(kind, texture);
            }
        }
        library.bullet = load_one(&tiles_dir.join("bullet.png")).await;

        library
    }

    /// Frame table for the simulation, sized from the loaded textures
    pub fn animations(&self) -> AnimationSet {
        let mut set = AnimationSet::default();
        for (id, frames) in &self.animations {
            if let Some(first) = frames.first() {
                set.set(*id, AnimationInfo::new(frames.len(), first.width(), first.height()));
            }
        }
        set
    }

    pub fn frame(&self, id: AnimationId, index: usize) -> Option<&Texture2D> {
        let frames = self.animations.get(&id)?;
        frames.get(index % frames.len().max(1))
    }

    pub fn tile(&self, kind: TileKind) -> Option<&Texture2D> {
        self.tiles.get(&kind)
    }

    pub fn bullet(&self) -> Option<&Texture2D> {
        self.bullet.as_ref()
    }
}

async fn load_one(path: &Path) -> Option<Texture2D> {
    let path_str = path.to_string_lossy();
    match load_texture(&path_str).await {
        Ok(texture) => {
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            debug!("Skipping {}: {}", path_str, e);
            None
        }
    }
}

/// Numbered PNG frames of one animation folder
#[cfg(not(target_arch = "wasm32"))]
async fn load_frames(dir: &Path) -> Vec<Texture2D> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<(u32, std::path::PathBuf)> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.to_ascii_lowercase() == "png")
                .unwrap_or(false)
        })
        .filter_map(|p| {
            let index = p.file_stem()?.to_str()?.parse().ok()?;
            Some((index, p))
        })
        .collect();

    // Sort by frame number for consistent ordering
    files.sort();

    let mut frames = Vec::with_capacity(files.len());
    for (_, path) in files {
        if let Some(texture) = load_one(&path).await {
            frames.push(texture);
        }
    }
    frames
}

/// WASM has no directory listing: probe 1.png, 2.png, ... until one is missing
#[cfg(target_arch = "wasm32")]
async fn load_frames(dir: &Path) -> Vec<Texture2D> {
    let mut frames = Vec::new();
    for n in 1..=MAX_FRAMES {
        match load_one(&dir.join(format!("{}.png", n))).await {
            Some(texture) => frames.push(texture),
            None => break,
        }
    }
    frames
}
