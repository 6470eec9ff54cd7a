//! Gameplay constants
//!
//! Speeds are in pixels per frame, animation rates in frames per tick.
//! The simulation runs once per rendered frame at `TARGET_FPS`.

/// Fixed frame-rate target
pub const TARGET_FPS: u32 = 60;

/// Edge length of one layout cell
pub const TILE_SIZE: f32 = 64.0;

/// Default window width
pub const SCREEN_WIDTH: f32 = 1200.0;

/// Horizontal walk speed of the player
pub const PLAYER_SPEED: f32 = 8.0;

/// Vertical velocity set by a jump (negative is up)
pub const PLAYER_JUMP: f32 = -16.0;

/// Added to vertical velocity every frame
pub const GRAVITY: f32 = 0.8;

/// Minimum seconds between two successful shots
pub const SHOOT_DELAY: f64 = 0.18;

/// Patrol speed of enemies
pub const ENEMY_SPEED: f32 = 3.5;

/// Horizontal speed of a fired bullet
pub const BULLET_SPEED: f32 = 7.0;

/// Horizontal distance from spawn after which a bullet despawns
pub const BULLET_RANGE: f32 = 550.0;

pub const PLAYER_ANIMATION_SPEED: f32 = 0.15;
pub const PARTICLE_ANIMATION_SPEED: f32 = 0.5;
pub const DUST_ANIMATION_SPEED: f32 = 0.15;
pub const ENEMY_ANIMATION_SPEED: f32 = 0.15;

/// Vertical velocity above which a resting contact is considered lost
pub const FALL_THRESHOLD: f32 = 1.0;

/// Vertical velocity above which a ceiling contact is considered lost
pub const CEILING_RELEASE: f32 = 0.1;

/// Collectables are drawn at half a cell, inset by a quarter cell
pub const COIN_SIZE: f32 = TILE_SIZE / 2.0;
pub const COIN_INSET: f32 = TILE_SIZE / 4.0;

/// Bullet hitbox
pub const BULLET_WIDTH: f32 = 16.0;
pub const BULLET_HEIGHT: f32 = 8.0;
