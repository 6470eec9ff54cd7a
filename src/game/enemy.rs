//! Enemy
//!
//! Patrols horizontally at a fixed speed and turns around at walls ahead on
//! its right; walls on the left just stop it. Enemies
//! ignore gravity; they walk along the row they were spawned on.

use crate::geometry::Rect;
use super::animation::{advance_looping, AnimationId, AnimationSet};
use super::character::{edge_snap, Body, CharacterKind, Movable, Orientation};
use super::constants::{ENEMY_ANIMATION_SPEED, ENEMY_SPEED};
use super::tile::Tile;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Body,
}

impl Enemy {
    /// Spawn with the top-left corner at (x, y), walking right
    pub fn new(x: f32, y: f32, animations: &AnimationSet) -> Self {
        let walk = animations.get(AnimationId::EnemyWalk);
        let mut body = Body::new(Rect::new(x, y, walk.width, walk.height), ENEMY_SPEED);
        body.direction.x = 1.0;
        Self { body }
    }

    /// See [`patrol_turn`]
    pub fn patrol_turn(&mut self, tile: &Tile) -> bool {
        patrol_turn(&mut self.body, tile)
    }

    pub fn update(&mut self, animations: &AnimationSet) {
        self.body.orientation = if self.body.direction.x < 0.0 {
            Orientation::Left
        } else {
            Orientation::Right
        };
        let frame = animations.get(AnimationId::EnemyWalk);
        self.body.frame_index = advance_looping(self.body.frame_index, ENEMY_ANIMATION_SPEED, frame.frames);
        edge_snap(&mut self.body, frame);
    }

    /// Camera pan
    pub fn shift(&mut self, dx: f32) {
        self.body.rect.x += dx;
    }

    pub fn frame(&self) -> usize {
        self.body.frame_index as usize
    }
}

/// Reverse at a solid tile the right edge is entering.
///
/// Only a right-moving body turns; walking left it is stopped by the usual
/// side snap instead. Only tiles sharing the body's vertical band count, so
/// the floor an enemy stands on never turns it around. The speed is reset to
/// the patrol speed.
pub fn patrol_turn(body: &mut Body, tile: &Tile) -> bool {
    if !tile.collides || body.direction.x <= 0.0 {
        return false;
    }
    let rect = body.rect;
    let same_band = tile.rect.top() < rect.bottom() && tile.rect.bottom() > rect.top();
    let entering = tile.rect.left() < rect.right() && rect.right() < tile.rect.right();
    if !same_band || !entering {
        return false;
    }

    body.direction.x = -body.direction.x;
    body.speed = ENEMY_SPEED;
    true
}

impl Movable for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn kind(&self) -> CharacterKind {
        CharacterKind::Enemy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_at_wall_ahead() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(0.0, 0.0, &animations);
        // Leading edge (x = 48) now inside the wall's span
        enemy.body.rect.x = 20.0;
        let wall = Tile::wall(64.0, 0.0);
        assert!(enemy.patrol_turn(&wall));
        assert_eq!(enemy.body.direction.x, -1.0);
    }

    #[test]
    fn test_turn_resets_speed() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(0.0, 0.0, &animations);
        enemy.body.rect.x = 20.0;
        enemy.body.speed = 1.0;
        assert!(enemy.patrol_turn(&Tile::wall(64.0, 0.0)));
        assert_eq!(enemy.body.speed, ENEMY_SPEED);
    }

    #[test]
    fn test_moving_left_does_not_turn() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(60.0, 0.0, &animations);
        enemy.body.direction.x = -1.0;
        // Left edge (x = 60) inside the wall's span
        assert!(!enemy.patrol_turn(&Tile::wall(0.0, 0.0)));
        assert_eq!(enemy.body.direction.x, -1.0);
    }

    #[test]
    fn test_floor_does_not_turn() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(0.0, 0.0, &animations);
        let floor = Tile::enemy_floor(0.0, 64.0);
        assert!(!enemy.patrol_turn(&floor));
        assert_eq!(enemy.body.direction.x, 1.0);
    }

    #[test]
    fn test_coins_do_not_turn() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(0.0, 0.0, &animations);
        let coin = Tile::coin(0.0, 0.0);
        assert!(!enemy.patrol_turn(&coin));
    }

    #[test]
    fn test_orientation_follows_direction() {
        let animations = AnimationSet::default();
        let mut enemy = Enemy::new(0.0, 0.0, &animations);
        enemy.body.direction.x = -1.0;
        enemy.update(&animations);
        assert!(enemy.body.orientation.flip_x());
    }
}
