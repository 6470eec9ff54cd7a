//! Platformer Simulation
//!
//! Frame-stepped level core with no graphics, clock or storage access of
//! its own. The frontend feeds `FrameInput` plus a timestamp into
//! `Level::update` and hands a `Canvas` to `Level::render`.
//!
//! Key concepts:
//! - Body: position, velocity, orientation and contact flags of a character
//! - Movable / Shooting: capabilities composed into Player and Enemy
//! - Tile: static geometry with collides / collectable / kills flags
//! - FrameOutcome: Continue, SaveRequested or LevelEnded, never an error

pub mod animation;
pub mod bullet;
pub mod character;
pub mod collision;
pub mod constants;
pub mod enemy;
pub mod event;
pub mod input;
pub mod layout;
pub mod level;
pub mod particles;
pub mod player;
pub mod render;
pub mod tile;

// Re-export main types
pub use animation::{AnimationId, AnimationInfo, AnimationSet};
pub use character::{Collisions, Movable, Orientation, Shooting};
pub use input::FrameInput;
pub use layout::{layout_from_str, parse_layout, read_layout_file, LayoutError};
pub use level::{EndReason, FrameOutcome, Level, LevelSettings};
pub use player::PlayerState;
pub use render::{Canvas, RecordingCanvas, SpriteRef};
pub use tile::{Tile, TileKind};
