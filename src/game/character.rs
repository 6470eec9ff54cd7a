//! Character capabilities
//!
//! Player and Enemy share a `Body` (position, velocity, orientation and
//! contact flags) and expose it through `Movable`, so collision and
//! edge-snap logic are free functions over the body. `Shooting` is an
//! optional capability that only the player composes in.

use bitflags::bitflags;
use crate::geometry::{Anchor, Rect, Vec2};
use super::animation::AnimationInfo;
use super::bullet::Bullet;
use super::constants::SHOOT_DELAY;

/// Facing of a character or bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    Left,
    #[default]
    Right,
}

impl Orientation {
    /// Sprites are authored facing right
    pub fn flip_x(&self) -> bool {
        matches!(self, Orientation::Left)
    }
}

bitflags! {
    /// Edges in contact with solid tiles this frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Collisions: u8 {
        const TOP    = 1 << 0;
        const BOTTOM = 1 << 1;
        const LEFT   = 1 << 2;
        const RIGHT  = 1 << 3;
    }
}

/// Which concrete entity owns a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterKind {
    Player,
    Enemy,
}

/// State shared by every character
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub rect: Rect,
    /// x: -1/0/+1 walk direction, y: vertical velocity
    pub direction: Vec2,
    /// Horizontal pixels per frame (0 while the camera pans)
    pub speed: f32,
    pub orientation: Orientation,
    pub collisions: Collisions,
    pub frame_index: f32,
}

impl Body {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            direction: Vec2::ZERO,
            speed,
            orientation: Orientation::default(),
            collisions: Collisions::empty(),
            frame_index: 0.0,
        }
    }

    pub fn grounded(&self) -> bool {
        self.collisions.contains(Collisions::BOTTOM)
    }
}

/// Access to the shared body of a character
pub trait Movable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    fn kind(&self) -> CharacterKind;

    fn rect(&self) -> Rect {
        self.body().rect
    }

    /// Does this character overlap another box?
    fn hits(&self, other: &Rect) -> bool {
        self.body().rect.intersects(other)
    }
}

/// Corner/edge checks in priority order; the first one fully contained wins
const SNAP_ORDER: [(Collisions, Anchor); 6] = [
    (Collisions::BOTTOM.union(Collisions::RIGHT), Anchor::BottomRight),
    (Collisions::BOTTOM.union(Collisions::LEFT), Anchor::BottomLeft),
    (Collisions::TOP.union(Collisions::RIGHT), Anchor::TopRight),
    (Collisions::TOP.union(Collisions::LEFT), Anchor::TopLeft),
    (Collisions::BOTTOM, Anchor::MidBottom),
    (Collisions::TOP, Anchor::MidTop),
];

/// Re-anchor the rect to the current frame size at the contact corner.
///
/// When frames share one size this leaves the position untouched. At most
/// one anchor is applied per call.
pub fn edge_snap(body: &mut Body, frame: AnimationInfo) -> Option<Anchor> {
    let (_, anchor) = SNAP_ORDER
        .iter()
        .find(|(flags, _)| body.collisions.contains(*flags))?;
    body.rect = body.rect.resized_at(*anchor, frame.width, frame.height);
    Some(*anchor)
}

/// Debounced bullet spawner
#[derive(Debug, Clone, Default)]
pub struct Shooter {
    pub bullets: Vec<Bullet>,
    last_shot: Option<f64>,
}

impl Shooter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire unless the previous shot was within `SHOOT_DELAY`.
    ///
    /// Requests during the cooldown are dropped, not queued.
    pub fn try_shoot(&mut self, x: f32, y: f32, orientation: Orientation, speed: f32, now: f64) -> bool {
        if let Some(last) = self.last_shot {
            if now - last <= SHOOT_DELAY {
                return false;
            }
        }
        self.bullets.push(Bullet::spawn(x, y, orientation, speed));
        self.last_shot = Some(now);
        true
    }

    /// Advance every bullet and drop the dead ones
    pub fn advance_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| b.alive);
    }
}

/// Capability of firing bullets from a muzzle point
pub trait Shooting {
    fn shooter(&self) -> &Shooter;
    fn shooter_mut(&mut self) -> &mut Shooter;

    /// Where bullets leave from and which way they fly
    fn muzzle(&self) -> (f32, f32, Orientation);

    fn try_shoot(&mut self, speed: f32, now: f64) -> bool {
        let (x, y, orientation) = self.muzzle();
        self.shooter_mut().try_shoot(x, y, orientation, speed, now)
    }

    fn bullets(&self) -> &[Bullet] {
        &self.shooter().bullets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_with(collisions: Collisions) -> Body {
        let mut body = Body::new(Rect::new(100.0, 100.0, 40.0, 60.0), 8.0);
        body.collisions = collisions;
        body
    }

    #[test]
    fn test_edge_snap_corner_priority() {
        let frame = AnimationInfo::new(1, 20.0, 30.0);

        let mut body = body_with(Collisions::BOTTOM | Collisions::RIGHT | Collisions::TOP);
        assert_eq!(edge_snap(&mut body, frame), Some(Anchor::BottomRight));
        assert_eq!(body.rect.bottom_right(), Vec2::new(140.0, 160.0));

        let mut body = body_with(Collisions::TOP | Collisions::LEFT);
        assert_eq!(edge_snap(&mut body, frame), Some(Anchor::TopLeft));
        assert_eq!(body.rect.top_left(), Vec2::new(100.0, 100.0));

        let mut body = body_with(Collisions::BOTTOM | Collisions::TOP);
        assert_eq!(edge_snap(&mut body, frame), Some(Anchor::MidBottom));
    }

    #[test]
    fn test_edge_snap_same_size_is_noop() {
        let frame = AnimationInfo::new(1, 40.0, 60.0);
        let mut body = body_with(Collisions::BOTTOM | Collisions::LEFT);
        let before = body.rect;
        edge_snap(&mut body, frame);
        assert_eq!(body.rect, before);
    }

    #[test]
    fn test_edge_snap_without_contact() {
        let frame = AnimationInfo::new(1, 20.0, 30.0);
        let mut body = body_with(Collisions::LEFT | Collisions::RIGHT);
        assert_eq!(edge_snap(&mut body, frame), None);
        assert_eq!(body.rect.w, 40.0);
    }

    #[test]
    fn test_shoot_cooldown() {
        let mut shooter = Shooter::new();
        assert!(shooter.try_shoot(0.0, 0.0, Orientation::Right, 7.0, 10.0));
        assert!(!shooter.try_shoot(0.0, 0.0, Orientation::Right, 7.0, 10.05));
        assert_eq!(shooter.bullets.len(), 1);

        let mut shooter = Shooter::new();
        assert!(shooter.try_shoot(0.0, 0.0, Orientation::Right, 7.0, 10.0));
        assert!(shooter.try_shoot(0.0, 0.0, Orientation::Right, 7.0, 10.2));
        assert_eq!(shooter.bullets.len(), 2);
    }

    #[test]
    fn test_dead_bullets_dropped() {
        let mut shooter = Shooter::new();
        shooter.try_shoot(0.0, 0.0, Orientation::Left, 600.0, 0.0);
        shooter.advance_bullets();
        assert!(shooter.bullets.is_empty());
    }
}
