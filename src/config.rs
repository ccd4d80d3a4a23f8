//! Level catalogue: which CSV files make up each level and what beating it
//! unlocks. Stored as RON next to the layout files it references.

use std::path::{Path, PathBuf};

use log::warn;
use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

use crate::layout::{LayerName, LayoutError, LevelLayout, TileLayout};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read level catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse level catalogue {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("level catalogue {0} lists no levels")]
    Empty(PathBuf),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// CSV path per layer, relative to the catalogue file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LayerPaths {
    #[serde(default)]
    pub bg_palms: Option<PathBuf>,
    #[serde(default)]
    pub coins: Option<PathBuf>,
    #[serde(default)]
    pub constraints: Option<PathBuf>,
    #[serde(default)]
    pub crates: Option<PathBuf>,
    #[serde(default)]
    pub enemies: Option<PathBuf>,
    #[serde(default)]
    pub fg_palms: Option<PathBuf>,
    #[serde(default)]
    pub grass: Option<PathBuf>,
    pub player: PathBuf,
    pub terrain: PathBuf,
}

impl LayerPaths {
    pub fn get(&self, name: LayerName) -> Option<&Path> {
        let path = match name {
            LayerName::BgPalms => self.bg_palms.as_ref(),
            LayerName::Coins => self.coins.as_ref(),
            LayerName::Constraints => self.constraints.as_ref(),
            LayerName::Crates => self.crates.as_ref(),
            LayerName::Enemies => self.enemies.as_ref(),
            LayerName::FgPalms => self.fg_palms.as_ref(),
            LayerName::Grass => self.grass.as_ref(),
            LayerName::Player => Some(&self.player),
            LayerName::Terrain => Some(&self.terrain),
        };
        path.map(PathBuf::as_path)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LevelDescriptor {
    pub name: String,
    /// Level index unlocked by reaching this level's goal.
    pub unlock: usize,
    pub layers: LayerPaths,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelCatalogue {
    pub levels: Vec<LevelDescriptor>,
    /// Directory layer paths are resolved against.
    pub base_dir: PathBuf,
}

#[derive(Deserialize)]
struct CatalogueFile {
    levels: Vec<LevelDescriptor>,
}

impl LevelCatalogue {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&text, path, base_dir)
    }

    pub fn parse(text: &str, path: &Path, base_dir: PathBuf) -> Result<Self, ConfigError> {
        // Optional layers are written as bare paths, without `Some(..)`.
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        let file: CatalogueFile = options.from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if file.levels.is_empty() {
            return Err(ConfigError::Empty(path.to_path_buf()));
        }
        Ok(Self { levels: file.levels, base_dir })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Read every layer CSV of level `index`. Optional layers that are not
    /// listed load as empty grids.
    pub fn load_layout(&self, index: usize) -> Result<Option<LevelLayout>, ConfigError> {
        let Some(desc) = self.levels.get(index) else {
            return Ok(None);
        };
        let mut layout = LevelLayout::default();
        for name in LayerName::ALL {
            match desc.layers.get(name) {
                Some(rel) => {
                    *layout.layer_mut(name) = TileLayout::load_csv(&self.base_dir.join(rel))?;
                }
                None => warn!("level '{}' has no {} layer", desc.name, name.as_str()),
            }
        }
        Ok(Some(layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_layers_default_to_none() {
        let text = r#"(levels: [(name: "a", unlock: 1, layers: (player: "p.csv", terrain: "t.csv"))])"#;
        let cat = LevelCatalogue::parse(text, Path::new("x.ron"), PathBuf::new()).unwrap();
        assert_eq!(cat.len(), 1);
        assert!(cat.levels[0].layers.coins.is_none());
        assert_eq!(cat.levels[0].layers.get(LayerName::Player), Some(Path::new("p.csv")));
    }

    #[test]
    fn optional_layers_accept_bare_paths() {
        let text = r#"(levels: [(name: "a", unlock: 1, layers: (
            coins: "c.csv",
            grass: Some("g.csv"),
            player: "p.csv",
            terrain: "t.csv",
        ))])"#;
        let cat = LevelCatalogue::parse(text, Path::new("x.ron"), PathBuf::new()).unwrap();
        let layers = &cat.levels[0].layers;
        assert_eq!(layers.get(LayerName::Coins), Some(Path::new("c.csv")));
        assert_eq!(layers.get(LayerName::Grass), Some(Path::new("g.csv")));
        assert_eq!(layers.get(LayerName::Crates), None);
    }

    #[test]
    fn empty_catalogue_is_rejected() {
        let err = LevelCatalogue::parse("(levels: [])", Path::new("x.ron"), PathBuf::new());
        assert!(matches!(err, Err(ConfigError::Empty(_))));
    }
}
