//! Rendering seam
//!
//! The simulation never touches a graphics API. `Level::render` describes
//! each visible thing as a `SpriteRef` plus a screen rect, and the frontend
//! decides which texture that means.

use crate::geometry::Rect;
use super::animation::AnimationId;
use super::tile::TileKind;

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteRef {
    Tile(TileKind),
    /// Player animation and frame within it
    Player(AnimationId, usize),
    Enemy(usize),
    Particle(AnimationId, usize),
    Bullet,
}

/// Drawing backend
pub trait Canvas {
    fn draw(&mut self, sprite: SpriteRef, rect: Rect, flip_x: bool);
}

/// Canvas that records every draw call, for tests and headless runs
#[derive(Debug, Default, Clone)]
pub struct RecordingCanvas {
    pub calls: Vec<(SpriteRef, Rect, bool)>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&SpriteRef) -> bool) -> usize {
        self.calls.iter().filter(|(s, _, _)| pred(s)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, sprite: SpriteRef, rect: Rect, flip_x: bool) {
        self.calls.push((sprite, rect, flip_x));
    }
}
