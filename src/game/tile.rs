//! Level tiles
//!
//! Static level geometry. Each tile carries three independent capability
//! flags fixed at spawn; only its position (camera pan) ever changes.

use crate::geometry::Rect;
use super::constants::{COIN_INSET, COIN_SIZE, TILE_SIZE};

/// What a tile looks like (picked by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Wall,
    Coin,
    Hazard,
    /// Invisible support under an enemy spawn
    EnemyFloor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub rect: Rect,
    /// Blocks movement
    pub collides: bool,
    /// Removed and scored on player contact
    pub collectable: bool,
    /// Ends the level on player contact
    pub kills: bool,
}

impl Tile {
    /// A collides-only tile covering a full cell
    pub fn solid(kind: TileKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
            collides: true,
            collectable: false,
            kills: false,
        }
    }

    pub fn wall(x: f32, y: f32) -> Self {
        Self::solid(TileKind::Wall, x, y)
    }

    pub fn enemy_floor(x: f32, y: f32) -> Self {
        Self::solid(TileKind::EnemyFloor, x, y)
    }

    /// Solid and lethal
    pub fn hazard(x: f32, y: f32) -> Self {
        Self {
            kills: true,
            ..Self::solid(TileKind::Hazard, x, y)
        }
    }

    /// Half-cell pickup centered in its cell; does not block
    pub fn coin(x: f32, y: f32) -> Self {
        Self {
            kind: TileKind::Coin,
            rect: Rect::new(x + COIN_INSET, y + COIN_INSET, COIN_SIZE, COIN_SIZE),
            collides: false,
            collectable: true,
            kills: false,
        }
    }

    /// Camera pan
    pub fn update(&mut self, x_shift: f32) {
        self.rect.x += x_shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let wall = Tile::wall(0.0, 0.0);
        assert!(wall.collides && !wall.collectable && !wall.kills);

        let hazard = Tile::hazard(0.0, 0.0);
        assert!(hazard.collides && hazard.kills);

        let coin = Tile::coin(64.0, 128.0);
        assert!(!coin.collides && coin.collectable);
        assert_eq!(coin.rect, Rect::new(80.0, 144.0, 32.0, 32.0));
    }
}
