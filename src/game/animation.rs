//! Animation tables
//!
//! Frame counts and frame sizes for every animation, built once at startup
//! and shared read-only by all entities of a level. The frontend fills it
//! from the textures it loaded; `Default` matches the bundled art.

use std::collections::HashMap;

/// Every animation the game knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    PlayerIdle,
    PlayerRun,
    PlayerJump,
    PlayerFall,
    EnemyWalk,
    JumpDust,
    LandDust,
    RunDust,
}

impl AnimationId {
    pub const ALL: [AnimationId; 8] = [
        AnimationId::PlayerIdle,
        AnimationId::PlayerRun,
        AnimationId::PlayerJump,
        AnimationId::PlayerFall,
        AnimationId::EnemyWalk,
        AnimationId::JumpDust,
        AnimationId::LandDust,
        AnimationId::RunDust,
    ];

    /// Folder name of the frames, relative to the graphics directory
    pub fn folder(&self) -> &'static str {
        match self {
            AnimationId::PlayerIdle => "character/idle",
            AnimationId::PlayerRun => "character/run",
            AnimationId::PlayerJump => "character/jump",
            AnimationId::PlayerFall => "character/fall",
            AnimationId::EnemyWalk => "enemy",
            AnimationId::JumpDust => "character/dust_particles/jump",
            AnimationId::LandDust => "character/dust_particles/land",
            AnimationId::RunDust => "character/dust_particles/run",
        }
    }
}

/// Frame count and per-frame size of one animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationInfo {
    pub frames: usize,
    pub width: f32,
    pub height: f32,
}

impl AnimationInfo {
    pub const fn new(frames: usize, width: f32, height: f32) -> Self {
        Self { frames, width, height }
    }
}

/// Read-only table of all animations
#[derive(Debug, Clone)]
pub struct AnimationSet {
    entries: HashMap<AnimationId, AnimationInfo>,
}

impl AnimationSet {
    /// Start from the defaults and override entries as assets load
    pub fn with(mut self, id: AnimationId, info: AnimationInfo) -> Self {
        self.set(id, info);
        self
    }

    pub fn set(&mut self, id: AnimationId, info: AnimationInfo) {
        // An empty folder would make every frame lookup invalid
        let frames = info.frames.max(1);
        self.entries.insert(id, AnimationInfo { frames, ..info });
    }

    pub fn get(&self, id: AnimationId) -> AnimationInfo {
        self.entries
            .get(&id)
            .copied()
            .unwrap_or(AnimationInfo::new(1, 1.0, 1.0))
    }

    pub fn frames(&self, id: AnimationId) -> usize {
        self.get(id).frames
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        let mut entries = HashMap::new();
        entries.insert(AnimationId::PlayerIdle, AnimationInfo::new(5, 40.0, 60.0));
        entries.insert(AnimationId::PlayerRun, AnimationInfo::new(6, 40.0, 60.0));
        entries.insert(AnimationId::PlayerJump, AnimationInfo::new(1, 40.0, 60.0));
        entries.insert(AnimationId::PlayerFall, AnimationInfo::new(1, 40.0, 60.0));
        entries.insert(AnimationId::EnemyWalk, AnimationInfo::new(4, 48.0, 64.0));
        entries.insert(AnimationId::JumpDust, AnimationInfo::new(6, 32.0, 32.0));
        entries.insert(AnimationId::LandDust, AnimationInfo::new(5, 32.0, 32.0));
        entries.insert(AnimationId::RunDust, AnimationInfo::new(5, 12.0, 10.0));
        Self { entries }
    }
}

/// Advance a fractional frame index, wrapping to 0 past the last frame
pub fn advance_looping(index: f32, rate: f32, frames: usize) -> f32 {
    let next = index + rate;
    if next >= frames as f32 {
        0.0
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_looping_wraps() {
        let mut index = 0.0;
        for _ in 0..6 {
            index = advance_looping(index, 0.5, 3);
        }
        assert_eq!(index, 0.0);
        assert_eq!(advance_looping(1.0, 0.5, 3), 1.5);
    }

    #[test]
    fn test_empty_animation_clamped() {
        let set = AnimationSet::default().with(AnimationId::EnemyWalk, AnimationInfo::new(0, 10.0, 10.0));
        assert_eq!(set.frames(AnimationId::EnemyWalk), 1);
    }
}
