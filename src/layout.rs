//! Tile-index grids, one per level layer, and their CSV ingestion.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::geometry::Point;
use crate::settings::{EMPTY_CELL, TILE_SIZE};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Grid of raw cell tokens, row-major.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileLayout {
    pub rows: Vec<Vec<String>>,
}

/// A non-empty cell and its pixel position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell<'a> {
    pub row: usize,
    pub col: usize,
    pub token: &'a str,
}

impl Cell<'_> {
    pub fn pos(&self) -> Point {
        grid_to_pixel(self.row, self.col)
    }
}

pub fn grid_to_pixel(row: usize, col: usize) -> Point {
    Point::new(col as i32 * TILE_SIZE, row as i32 * TILE_SIZE)
}

impl TileLayout {
    /// Parse comma-separated rows. Blank lines are ignored and cells are
    /// trimmed, so files with trailing newlines or CRLF endings load cleanly.
    pub fn parse_csv(text: &str) -> Self {
        let rows = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').map(|c| c.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    pub fn load_csv(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse_csv(&text))
    }

    /// Width of the first row, in cells.
    pub fn width(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Every cell that is not the empty sentinel, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> {
        self.rows.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter()
                .enumerate()
                .filter(|(_, token)| token.as_str() != EMPTY_CELL && !token.is_empty())
                .map(move |(col, token)| Cell { row, col, token })
        })
    }
}

/// Named layers of a level, in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerName {
    BgPalms,
    Coins,
    Constraints,
    Crates,
    Enemies,
    FgPalms,
    Grass,
    Player,
    Terrain,
}

impl LayerName {
    pub const ALL: [LayerName; 9] = [
        LayerName::BgPalms,
        LayerName::Coins,
        LayerName::Constraints,
        LayerName::Crates,
        LayerName::Enemies,
        LayerName::FgPalms,
        LayerName::Grass,
        LayerName::Player,
        LayerName::Terrain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerName::BgPalms => "bg_palms",
            LayerName::Coins => "coins",
            LayerName::Constraints => "constraints",
            LayerName::Crates => "crates",
            LayerName::Enemies => "enemies",
            LayerName::FgPalms => "fg_palms",
            LayerName::Grass => "grass",
            LayerName::Player => "player",
            LayerName::Terrain => "terrain",
        }
    }
}

/// All layer grids of one level, indexed by [`LayerName`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelLayout {
    layers: [TileLayout; 9],
}

impl LevelLayout {
    pub fn layer(&self, name: LayerName) -> &TileLayout {
        &self.layers[name as usize]
    }

    pub fn layer_mut(&mut self, name: LayerName) -> &mut TileLayout {
        &mut self.layers[name as usize]
    }

    /// Level width in pixels, taken from the terrain layer.
    pub fn pixel_width(&self) -> i32 {
        self.layer(LayerName::Terrain).width() as i32 * TILE_SIZE
    }
}
