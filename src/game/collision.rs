//! Collision System
//!
//! Axis-separated resolution against level tiles. Horizontal movement is
//! resolved first for every character, then gravity and vertical
//! resolution for the player only. Overlapping several tiles in one sweep
//! is resolved last-write-wins in tile order.

use tracing::debug;
use super::character::{Body, CharacterKind, Collisions, Movable};
use super::constants::{CEILING_RELEASE, FALL_THRESHOLD, GRAVITY};
use super::enemy::patrol_turn;
use super::player::Player;
use super::tile::Tile;

/// Result of one horizontal sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HorizontalResult {
    /// The player touched a lethal tile
    pub killed: bool,
    /// Number of tiles the body was snapped against
    pub snaps: usize,
}

/// Result of one vertical sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalResult {
    pub killed: bool,
    /// Collectables picked up this frame
    pub collected: u32,
    /// BOTTOM contact appeared this frame
    pub landed: bool,
}

/// Move a character horizontally and push it out of solid tiles.
///
/// `current_x` is the collision anchor: the x of the last wall edge any
/// character snapped against. Contact flags whose body is no longer pressed
/// against that edge are cleared after the sweep.
pub fn resolve_horizontal<M: Movable + ?Sized>(
    character: &mut M,
    tiles: &[Tile],
    current_x: &mut f32,
) -> HorizontalResult {
    let kind = character.kind();
    let body = character.body_mut();
    let mut result = HorizontalResult::default();

    body.rect.x += body.direction.x * body.speed;
    // Snapping follows this frame's movement even if a patrol turn flips it
    let moving = body.direction.x;

    for tile in tiles {
        if kind == CharacterKind::Enemy {
            patrol_turn(body, tile);
        }

        if !tile.collides || !tile.rect.intersects(&body.rect) {
            continue;
        }

        if tile.kills {
            if kind == CharacterKind::Player {
                result.killed = true;
                return result;
            }
            continue;
        }

        if moving < 0.0 {
            body.rect.set_left(tile.rect.right());
            body.collisions.insert(Collisions::LEFT);
            *current_x = tile.rect.right();
            result.snaps += 1;
        } else if moving > 0.0 {
            body.rect.set_right(tile.rect.left());
            body.collisions.insert(Collisions::RIGHT);
            *current_x = tile.rect.left();
            result.snaps += 1;
        }
    }

    clear_side_contacts(body, *current_x);
    result
}

/// Drop LEFT/RIGHT once the body left the anchor edge or stopped pressing
fn clear_side_contacts(body: &mut Body, current_x: f32) {
    let dir = body.direction.x;
    if body.collisions.contains(Collisions::LEFT) && (body.rect.left() < current_x || dir >= 0.0) {
        body.collisions.remove(Collisions::LEFT);
    }
    if body.collisions.contains(Collisions::RIGHT) && (body.rect.right() > current_x || dir <= 0.0) {
        body.collisions.remove(Collisions::RIGHT);
    }
}

/// Apply gravity to a body (unconditionally, grounded or not)
pub fn apply_gravity(body: &mut Body) {
    body.direction.y += GRAVITY;
    body.rect.y += body.direction.y;
}

/// Gravity, floor/ceiling resolution and pickups for the player
pub fn resolve_vertical(player: &mut Player, tiles: &mut Vec<Tile>) -> VerticalResult {
    let mut result = VerticalResult::default();
    let was_grounded = player.body.grounded();
    let body = &mut player.body;

    apply_gravity(body);

    for tile in tiles.iter() {
        if !tile.collides || !tile.rect.intersects(&body.rect) {
            continue;
        }

        if tile.kills {
            result.killed = true;
            return result;
        }

        if body.direction.y > 0.0 {
            body.rect.set_bottom(tile.rect.top());
            body.direction.y = 0.0;
            body.collisions.insert(Collisions::BOTTOM);
        } else if body.direction.y < 0.0 {
            body.rect.set_top(tile.rect.bottom());
            body.direction.y = 0.0;
            body.collisions.insert(Collisions::TOP);
        }
    }

    // Pickups are removed on first contact so they can never score twice
    let rect = body.rect;
    let before = tiles.len();
    tiles.retain(|tile| !(tile.collectable && tile.rect.intersects(&rect)));
    result.collected = (before - tiles.len()) as u32;
    if result.collected > 0 {
        debug!("Collected {} item(s)", result.collected);
    }

    let vy = body.direction.y;
    if body.collisions.contains(Collisions::BOTTOM) && (vy < 0.0 || vy > FALL_THRESHOLD) {
        body.collisions.remove(Collisions::BOTTOM);
    }
    if body.collisions.contains(Collisions::TOP) && vy > CEILING_RELEASE {
        body.collisions.remove(Collisions::TOP);
    }

    result.landed = !was_grounded && body.grounded();
    result
}
