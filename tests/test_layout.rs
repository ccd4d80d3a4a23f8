use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tide_runner::config::{ConfigError, LevelCatalogue};
use tide_runner::layout::{grid_to_pixel, LayerName, LayoutError, TileLayout};
use tide_runner::level::{Level, LevelError};
use tide_runner::settings::TILE_SIZE;

const CATALOGUE: &str = r#"
(
    levels: [
        (
            name: "First",
            unlock: 1,
            layers: (
                coins: "one/coins.csv",
                player: "one/player.csv",
                terrain: "one/terrain.csv",
            ),
        ),
        (
            name: "Broken",
            unlock: 1,
            layers: (
                player: "two/player.csv",
                terrain: "two/missing.csv",
            ),
        ),
    ],
)
"#;

fn write(dir: &Path, rel: &str, text: &str) {
    let path = dir.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn catalogue_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "levels.ron", CATALOGUE);
    write(dir.path(), "one/player.csv", "-1,-1,-1\n0,-1,1\n");
    write(dir.path(), "one/terrain.csv", "-1,-1,-1\n-1,-1,-1\n1,1,1\n");
    write(dir.path(), "one/coins.csv", "-1,0,-1\n-1,-1,-1\n-1,-1,-1\n");
    write(dir.path(), "two/player.csv", "0\n");
    dir
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[test]
fn grid_positions_are_column_row_times_tile_size() {
    assert_eq!(grid_to_pixel(0, 0).x, 0);
    let p = grid_to_pixel(3, 5);
    assert_eq!((p.x, p.y), (5 * TILE_SIZE, 3 * TILE_SIZE));
}

#[test]
fn csv_cells_report_their_pixel_positions() {
    let layout = TileLayout::parse_csv("-1,-1,4\n2,-1,-1\n");
    let positions: Vec<_> = layout.cells().map(|c| (c.token, c.pos())).collect();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].0, "4");
    assert_eq!(positions[0].1, grid_to_pixel(0, 2));
    assert_eq!(positions[1].1, grid_to_pixel(1, 0));
}

#[test]
fn missing_csv_reports_path() {
    let err = TileLayout::load_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
    let LayoutError::Io { path, .. } = &err;
    assert!(path.ends_with("here.csv"));
    assert!(err.to_string().contains("here.csv"));
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

#[test]
fn catalogue_loads_and_builds_levels() {
    let dir = catalogue_dir();
    let catalogue = LevelCatalogue::load(&dir.path().join("levels.ron")).unwrap();
    assert_eq!(catalogue.len(), 2);
    assert_eq!(catalogue.levels[0].name, "First");

    let layout = catalogue.load_layout(0).unwrap().unwrap();
    assert_eq!(layout.layer(LayerName::Terrain).height(), 3);
    assert!(layout.layer(LayerName::Enemies).rows.is_empty());
    assert_eq!(layout.pixel_width(), 3 * TILE_SIZE);

    let mut rng = StdRng::seed_from_u64(1);
    let level = Level::from_catalogue(&catalogue, 0, &mut rng).unwrap();
    assert_eq!(level.current_level, 0);
    assert_eq!(level.new_max_level, 1);
    assert_eq!(level.coins.len(), 1);
    assert!(level.goal.is_some());
    assert!(level.enemies.is_empty());
}

#[test]
fn unknown_level_index_is_reported() {
    let dir = catalogue_dir();
    let catalogue = LevelCatalogue::load(&dir.path().join("levels.ron")).unwrap();
    assert!(catalogue.load_layout(9).unwrap().is_none());
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        Level::from_catalogue(&catalogue, 9, &mut rng),
        Err(LevelError::UnknownLevel(9))
    ));
}

#[test]
fn missing_layer_file_is_a_config_error() {
    let dir = catalogue_dir();
    let catalogue = LevelCatalogue::load(&dir.path().join("levels.ron")).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        Level::from_catalogue(&catalogue, 1, &mut rng),
        Err(LevelError::Config(ConfigError::Layout(_)))
    ));
}

#[test]
fn malformed_catalogue_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "levels.ron", "(levels: [ (name: 3) ])");
    let err = LevelCatalogue::load(&dir.path().join("levels.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn missing_catalogue_is_an_io_error() {
    let err = LevelCatalogue::load(Path::new("/definitely/not/levels.ron")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn bundled_levels_load() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("levels/levels.ron");
    let catalogue = LevelCatalogue::load(&path).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for index in 0..catalogue.len() {
        let level = Level::from_catalogue(&catalogue, index, &mut rng).unwrap();
        assert!(level.goal.is_some());
        assert!(!level.terrain.is_empty());
    }
}
