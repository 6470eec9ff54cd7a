//! Planetes: a side-scrolling 2D platformer
//!
//! The library holds everything that is not window or GPU bound:
//! - `game`: frame-stepped level simulation (collisions, camera, entities)
//! - `save`: the save record and its JSON form
//! - `storage`: local key/value stores and the remote save client
//! - `config`: runtime settings from RON
//!
//! The `planetes` binary drives it with macroquad; `save_server` is the
//! remote save endpoint.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod game;
pub mod geometry;
pub mod save;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;
pub mod storage;

pub use config::GameConfig;
pub use game::{FrameInput, FrameOutcome, Level, LevelSettings};
pub use save::Save;
