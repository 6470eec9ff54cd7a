//! Geometry primitives
//!
//! Screen-space vectors and axis-aligned rectangles shared by every entity
//! for collision testing and draw placement. Y grows downward.

mod rect;
mod vec2;

pub use rect::{Anchor, Rect};
pub use vec2::Vec2;
