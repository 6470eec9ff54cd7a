//! Bullets
//!
//! A bullet flies horizontally from where it was fired and despawns once it
//! is more than `BULLET_RANGE` away from its spawn point.

use crate::geometry::Rect;
use super::character::Orientation;
use super::constants::{BULLET_HEIGHT, BULLET_RANGE, BULLET_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// X coordinate the bullet was fired from; shifts with the camera
    pub spawn_x: f32,
    pub orientation: Orientation,
    pub speed: f32,
    pub alive: bool,
}

impl Bullet {
    /// Fire a live bullet with its top-left at (x, y)
    pub fn spawn(x: f32, y: f32, orientation: Orientation, speed: f32) -> Self {
        Self {
            rect: Rect::new(x, y, BULLET_WIDTH, BULLET_HEIGHT),
            spawn_x: x,
            orientation,
            speed,
            alive: true,
        }
    }

    /// Move one frame along the orientation, dying when out of range
    pub fn advance(&mut self) {
        if !self.alive {
            return;
        }
        match self.orientation {
            Orientation::Left => self.rect.x -= self.speed,
            Orientation::Right => self.rect.x += self.speed,
        }
        if self.travelled() > BULLET_RANGE {
            self.alive = false;
        }
    }

    /// Horizontal distance from the spawn point
    pub fn travelled(&self) -> f32 {
        (self.rect.x - self.spawn_x).abs()
    }

    /// Camera pan: the spawn anchor moves with the bullet
    pub fn shift(&mut self, dx: f32) {
        self.rect.x += dx;
        self.spawn_x += dx;
    }

    /// Does the bullet overlap the target box?
    pub fn hits(&self, target: &Rect) -> bool {
        self.alive && self.rect.intersects(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_along_orientation() {
        let mut right = Bullet::spawn(100.0, 50.0, Orientation::Right, 7.0);
        let mut left = Bullet::spawn(100.0, 50.0, Orientation::Left, 7.0);
        right.advance();
        left.advance();
        assert_eq!(right.rect.x, 107.0);
        assert_eq!(left.rect.x, 93.0);
    }

    #[test]
    fn test_dies_past_range() {
        let mut bullet = Bullet::spawn(0.0, 0.0, Orientation::Right, 7.0);
        let mut ticks = 0;
        while bullet.alive {
            bullet.advance();
            ticks += 1;
            if bullet.travelled() > BULLET_RANGE {
                assert!(!bullet.alive, "out of range but alive at tick {}", ticks);
            }
        }
        // 79 * 7 = 553 is the first displacement past 550
        assert_eq!(ticks, 79);
    }

    #[test]
    fn test_shift_keeps_displacement() {
        let mut bullet = Bullet::spawn(0.0, 0.0, Orientation::Left, 7.0);
        bullet.advance();
        bullet.shift(16.0);
        assert_eq!(bullet.travelled(), 7.0);
    }

    #[test]
    fn test_hits() {
        let bullet = Bullet::spawn(10.0, 10.0, Orientation::Right, 7.0);
        assert!(bullet.hits(&Rect::new(20.0, 0.0, 64.0, 64.0)));
        assert!(!bullet.hits(&Rect::new(200.0, 0.0, 64.0, 64.0)));
    }
}
