//! ASCII arena maps.

use std::str::FromStr;

use grid_siege_core::{CellCoord, TileEffect, TileMap};
use thiserror::Error;

/// Health removed or restored by effect tiles.
const TILE_EFFECT_AMOUNT: f32 = 10.0;

/// Arena used when no map file is provided.
pub const DEFAULT_ARENA: &str = "\
....................
....................
....................
....##.......##.....
....##.......##.....
.........~~.........
.........~~.........
....................
.....+........+.....
....................
....##.......##.....
....##.......##.....
....................
....................
....................";

/// Single cell of an arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tile {
    /// Walkable ground.
    Floor,
    /// Blocking wall.
    Wall,
    /// Walkable ground that hurts whoever enters it.
    Hazard,
    /// Walkable ground that heals whoever enters it.
    Spring,
}

impl Tile {
    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(Self::Floor),
            '#' => Some(Self::Wall),
            '~' => Some(Self::Hazard),
            '+' => Some(Self::Spring),
            _ => None,
        }
    }
}

/// Errors raised while parsing an ASCII arena.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArenaParseError {
    /// The text contained no rows.
    #[error("arena is empty")]
    Empty,
    /// A row's width differs from the first row's.
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A glyph does not name a tile.
    #[error("unknown tile '{glyph}' at row {row}, column {column}")]
    UnknownTile {
        /// Offending character.
        glyph: char,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// The arena does not fit the coordinate space.
    #[error("arena dimensions exceed the supported size")]
    TooLarge,
}

/// Rectangular arena of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arena {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Arena {
    /// Creates an arena of floor tiles.
    #[must_use]
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Floor; width as usize * height as usize],
        }
    }

    /// Parses an arena drawn with `#` walls, `.` floor, `~` hazards and `+`
    /// springs. Blank lines and trailing whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self, ArenaParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(ArenaParseError::Empty);
        };

        let expected = first.chars().count();
        let mut tiles = Vec::with_capacity(expected * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(ArenaParseError::Ragged {
                    row,
                    expected,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let tile = Tile::from_glyph(glyph).ok_or(ArenaParseError::UnknownTile {
                    glyph,
                    row,
                    column,
                })?;
                tiles.push(tile);
            }
        }

        Ok(Self {
            width: u32::try_from(expected).map_err(|_| ArenaParseError::TooLarge)?,
            height: u32::try_from(rows.len()).map_err(|_| ArenaParseError::TooLarge)?,
            tiles,
        })
    }

    /// Tile at the provided cell, `None` outside the arena.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<Tile> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Replaces the tile at the provided cell. Cells outside are ignored.
    pub fn set_tile(&mut self, cell: CellCoord, tile: Tile) {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.row() as usize * self.width as usize + cell.column() as usize)
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::parse(DEFAULT_ARENA).unwrap_or_else(|_| Self::open(20, 15))
    }
}

impl FromStr for Arena {
    type Err = ArenaParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl TileMap for Arena {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn is_walkable(&self, cell: CellCoord) -> bool {
        matches!(
            self.tile(cell),
            Some(Tile::Floor | Tile::Hazard | Tile::Spring)
        )
    }

    fn tile_effect(&self, cell: CellCoord) -> Option<TileEffect> {
        match self.tile(cell)? {
            Tile::Hazard => Some(TileEffect::Damage(TILE_EFFECT_AMOUNT)),
            Tile::Spring => Some(TileEffect::Heal(TILE_EFFECT_AMOUNT)),
            Tile::Floor | Tile::Wall => None,
        }
    }
}
