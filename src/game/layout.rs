//! Level layout parsing
//!
//! A layout is a list of equal-length rows, one character per cell:
//!
//! | cell | meaning                                       |
//! |------|-----------------------------------------------|
//! | ` `  | empty                                         |
//! | `X`  | wall                                          |
//! | `P`  | player spawn (exactly one)                    |
//! | `E`  | enemy spawn (standing on an invisible floor)  |
//! | `C`  | collectable coin                              |
//! | `D`  | hazard, ends the level on contact             |

use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use super::constants::TILE_SIZE;
use super::tile::Tile;

/// Construction errors; any of these aborts the level load
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },
    #[error("unknown cell {cell:?} at row {row}, column {col}")]
    UnknownCell { row: usize, col: usize, cell: char },
    #[error("layout has no player cell")]
    NoPlayer,
    #[error("layout has {count} player cells, expected exactly one")]
    MultiplePlayers { count: usize },
    #[error("cannot read layout file: {0}")]
    Io(String),
}

/// Cell codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    Empty,
    Wall,
    Player,
    Enemy,
    Coin,
    Hazard,
}

impl CellType {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(CellType::Empty),
            'X' => Some(CellType::Wall),
            'P' => Some(CellType::Player),
            'E' => Some(CellType::Enemy),
            'C' => Some(CellType::Coin),
            'D' => Some(CellType::Hazard),
            _ => None,
        }
    }
}

/// Everything a layout spawns, in pixel coordinates
#[derive(Debug, Clone)]
pub struct LayoutSpawns {
    pub tiles: Vec<Tile>,
    /// Top-left of the player cell
    pub player: (f32, f32),
    /// Top-left of each enemy body (one row above its cell)
    pub enemies: Vec<(f32, f32)>,
    pub rows: usize,
    pub cols: usize,
}

/// Parse rows into spawns, validating the whole grid first
pub fn parse_layout<S: AsRef<str>>(rows: &[S]) -> Result<LayoutSpawns, LayoutError> {
    let first = rows.first().ok_or(LayoutError::Empty)?;
    let cols = first.as_ref().chars().count();

    let mut tiles = Vec::new();
    let mut players = Vec::new();
    let mut enemies = Vec::new();

    for (row_index, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        let found = row.chars().count();
        if found != cols {
            return Err(LayoutError::RaggedRows { row: row_index, expected: cols, found });
        }

        for (col_index, cell) in row.chars().enumerate() {
            let x = col_index as f32 * TILE_SIZE;
            let y = row_index as f32 * TILE_SIZE;

            let cell_type = CellType::from_char(cell).ok_or(LayoutError::UnknownCell {
                row: row_index,
                col: col_index,
                cell,
            })?;

            match cell_type {
                CellType::Empty => {}
                CellType::Wall => tiles.push(Tile::wall(x, y)),
                CellType::Player => players.push((x, y)),
                CellType::Enemy => {
                    enemies.push((x, y - TILE_SIZE));
                    tiles.push(Tile::enemy_floor(x, y));
                }
                CellType::Coin => tiles.push(Tile::coin(x, y)),
                CellType::Hazard => tiles.push(Tile::hazard(x, y)),
            }
        }
    }

    let player = match players.as_slice() {
        [] => return Err(LayoutError::NoPlayer),
        [single] => *single,
        many => return Err(LayoutError::MultiplePlayers { count: many.len() }),
    };

    debug!(
        "Parsed layout {}x{}: {} tiles, {} enemies",
        cols,
        rows.len(),
        tiles.len(),
        enemies.len()
    );

    Ok(LayoutSpawns {
        tiles,
        player,
        enemies,
        rows: rows.len(),
        cols,
    })
}

/// Split layout text into rows, right-padding short rows with empty cells
/// (editors tend to strip trailing spaces)
pub fn layout_from_str(text: &str) -> Vec<String> {
    let mut rows: Vec<String> = text
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect();
    while rows.last().is_some_and(|r| r.trim().is_empty()) {
        rows.pop();
    }
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    for row in &mut rows {
        let missing = width - row.chars().count();
        row.extend(std::iter::repeat(' ').take(missing));
    }
    rows
}

/// Read a layout text file
pub fn read_layout_file(path: &Path) -> Result<Vec<String>, LayoutError> {
    let text = fs::read_to_string(path).map_err(|e| LayoutError::Io(format!("{}: {}", path.display(), e)))?;
    Ok(layout_from_str(&text))
}

/// Screen height for a layout with `rows` rows
pub fn screen_height(rows: usize) -> f32 {
    rows as f32 * TILE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile::TileKind;

    #[test]
    fn test_small_room() {
        let spawns = parse_layout(&["X X", "XPX", "XXX"]).unwrap();
        assert_eq!(spawns.player, (64.0, 64.0));
        let walls = spawns.tiles.iter().filter(|t| t.kind == TileKind::Wall).count();
        assert_eq!(walls, 7);
        assert_eq!(spawns.tiles.len(), 7);
        assert_eq!((spawns.cols, spawns.rows), (3, 3));
    }

    #[test]
    fn test_no_player() {
        assert_eq!(parse_layout(&["XXX", "X X"]).unwrap_err(), LayoutError::NoPlayer);
    }

    #[test]
    fn test_two_players() {
        assert_eq!(
            parse_layout(&["PP"]).unwrap_err(),
            LayoutError::MultiplePlayers { count: 2 }
        );
    }

    #[test]
    fn test_empty_and_ragged() {
        let empty: [&str; 0] = [];
        assert_eq!(parse_layout(&empty).unwrap_err(), LayoutError::Empty);
        assert_eq!(
            parse_layout(&["XPX", "XX"]).unwrap_err(),
            LayoutError::RaggedRows { row: 1, expected: 3, found: 2 }
        );
    }

    #[test]
    fn test_unknown_cell() {
        assert_eq!(
            parse_layout(&["P?"]).unwrap_err(),
            LayoutError::UnknownCell { row: 0, col: 1, cell: '?' }
        );
    }

    #[test]
    fn test_enemy_spawns_above_its_floor() {
        let spawns = parse_layout(&["  P", " E "]).unwrap();
        assert_eq!(spawns.enemies, vec![(64.0, 0.0)]);
        let floor = &spawns.tiles[0];
        assert_eq!(floor.kind, TileKind::EnemyFloor);
        assert!(floor.collides);
        assert_eq!((floor.rect.x, floor.rect.y), (64.0, 64.0));
    }

    #[test]
    fn test_layout_from_str_pads() {
        let rows = layout_from_str("XXX\r\nP\n\n");
        assert_eq!(rows, vec!["XXX".to_string(), "P  ".to_string()]);
        assert!(parse_layout(&rows).is_ok());
    }
}
