//! Particle effects
//!
//! Disposable dust animations. A particle plays its frames once at a fixed
//! rate and dies after the last frame; nothing loops.

use crate::geometry::{Anchor, Rect, Vec2};
use super::animation::{AnimationId, AnimationSet};
use super::constants::{DUST_ANIMATION_SPEED, PARTICLE_ANIMATION_SPEED};

/// The kinds of dust the game spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Puff left behind by a jump
    Jump,
    /// Puff when touching down
    Land,
    /// Trail behind a running player
    RunDust,
}

impl ParticleKind {
    pub fn animation(&self) -> AnimationId {
        match self {
            ParticleKind::Jump => AnimationId::JumpDust,
            ParticleKind::Land => AnimationId::LandDust,
            ParticleKind::RunDust => AnimationId::RunDust,
        }
    }

    /// Frames advanced per tick
    pub fn rate(&self) -> f32 {
        match self {
            ParticleKind::Jump | ParticleKind::Land => PARTICLE_ANIMATION_SPEED,
            ParticleKind::RunDust => DUST_ANIMATION_SPEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleEffect {
    pub kind: ParticleKind,
    pub rect: Rect,
    pub frame_index: f32,
    pub flip_x: bool,
    frame_count: usize,
    alive: bool,
}

impl ParticleEffect {
    /// Spawn centered on `pos`
    pub fn spawn(kind: ParticleKind, pos: Vec2, animations: &AnimationSet) -> Self {
        let info = animations.get(kind.animation());
        Self {
            kind,
            rect: Rect::from_anchor(Anchor::Center, pos, info.width, info.height),
            frame_index: 0.0,
            flip_x: false,
            frame_count: info.frames,
            alive: true,
        }
    }

    pub fn flipped(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    /// Advance one tick; returns false once the animation is exhausted
    pub fn animate(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.frame_index += self.kind.rate();
        if self.frame_index >= self.frame_count as f32 {
            self.alive = false;
        }
        self.alive
    }

    /// Camera pan then animate, the order the level applies each frame
    pub fn update(&mut self, x_shift: f32) -> bool {
        self.rect.x += x_shift;
        self.animate()
    }

    /// Frame to draw
    pub fn frame(&self) -> usize {
        (self.frame_index as usize).min(self.frame_count.saturating_sub(1))
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
