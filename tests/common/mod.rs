#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use tide_runner::host::{AudioSink, GameHost, SoundCue};
use tide_runner::layout::{LayerName, LevelLayout, TileLayout};
use tide_runner::level::Level;

/// Host double that records every callback.
pub struct Recorder {
    pub health: i32,
    pub coins: Vec<u32>,
    pub health_changes: Vec<i32>,
    pub transitions: Vec<(usize, usize)>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self { health: 100, coins: Vec::new(), health_changes: Vec::new(), transitions: Vec::new() }
    }
}

impl GameHost for Recorder {
    fn create_overworld(&mut self, current_level: usize, unlock: usize) {
        self.transitions.push((current_level, unlock));
    }

    fn change_coins(&mut self, amount: u32) {
        self.coins.push(amount);
    }

    fn change_health(&mut self, delta: i32) {
        self.health += delta;
        self.health_changes.push(delta);
    }

    fn get_health(&self) -> i32 {
        self.health
    }
}

#[derive(Default)]
pub struct Sounds(pub Vec<SoundCue>);

impl AudioSink for Sounds {
    fn play(&mut self, cue: SoundCue) {
        self.0.push(cue);
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Build a layout from CSV text per layer; unlisted layers stay empty.
pub fn layout_from(layers: &[(LayerName, &str)]) -> LevelLayout {
    let mut layout = LevelLayout::default();
    for (name, csv) in layers {
        *layout.layer_mut(*name) = TileLayout::parse_csv(csv);
    }
    layout
}

pub fn build(layers: &[(LayerName, &str)]) -> Level {
    Level::new(0, 1, &layout_from(layers), &mut seeded_rng()).unwrap()
}

/// 5×10 level: player at row 7 col 1, solid floor on row 8.
pub fn floor_level() -> Level {
    let mut player = vec!["-1,-1,-1,-1,-1"; 10];
    player[7] = "-1,0,-1,-1,-1";
    let mut terrain = vec!["-1,-1,-1,-1,-1"; 10];
    terrain[8] = "1,1,1,1,1";
    let (player, terrain) = (player.join("\n"), terrain.join("\n"));
    build(&[(LayerName::Player, player.as_str()), (LayerName::Terrain, terrain.as_str())])
}
