//! Non-colliding scenery behind and in front of the level: sky bands,
//! drifting clouds and the animated water line.

use rand::Rng;

use crate::assets::{FrameClock, SpriteKey, CLOUD_VARIANTS};
use crate::frame::{DrawLayer, Frame};
use crate::geometry::Rect;
use crate::settings::{
    ANIMATION_SPEED, CLOUD_PARALLAX, SCREEN_WIDTH, TILE_SIZE, VERTICAL_TILE_NUMBER,
};

/// Full-width bands, fixed to the screen.
#[derive(Clone, Debug)]
pub struct Sky {
    pub horizon: i32,
}

impl Sky {
    pub fn new(horizon: i32) -> Self {
        Self { horizon }
    }

    pub fn draw(&self, frame: &mut Frame) {
        for row in 0..VERTICAL_TILE_NUMBER {
            let sprite = match row.cmp(&self.horizon) {
                std::cmp::Ordering::Less => SpriteKey::SkyTop,
                std::cmp::Ordering::Equal => SpriteKey::SkyMiddle,
                std::cmp::Ordering::Greater => SpriteKey::SkyBottom,
            };
            let rect = Rect::new(0, row * TILE_SIZE, SCREEN_WIDTH, TILE_SIZE);
            frame.push(DrawLayer::Sky, sprite, 0, rect, false);
        }
    }
}

#[derive(Clone, Debug)]
struct Cloud {
    sprite: SpriteKey,
    /// Fractional so partial parallax shifts accumulate.
    x: f32,
    y: i32,
}

/// Clouds scattered above the horizon across the whole level, plus one
/// screen of margin either side.
#[derive(Clone, Debug)]
pub struct Clouds {
    clouds: Vec<Cloud>,
}

impl Clouds {
    pub fn new(horizon: i32, level_width: i32, count: usize, rng: &mut impl Rng) -> Self {
        let min_x = -SCREEN_WIDTH;
        let max_x = level_width + SCREEN_WIDTH;
        let clouds = (0..count)
            .map(|_| Cloud {
                sprite: SpriteKey::Cloud(rng.gen_range(0..CLOUD_VARIANTS)),
                x: rng.gen_range(min_x..=max_x) as f32,
                y: rng.gen_range(0..=horizon.max(0)),
            })
            .collect();
        Self { clouds }
    }

    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    pub fn draw(&mut self, frame: &mut Frame, world_shift: i32) {
        for cloud in &mut self.clouds {
            cloud.x += world_shift as f32 * CLOUD_PARALLAX;
            let (w, h) = cloud.sprite.size();
            let rect = Rect::new(cloud.x as i32, cloud.y, w, h);
            frame.push(DrawLayer::Clouds, cloud.sprite, 0, rect, false);
        }
    }
}

/// Row of animated water tiles along the bottom of the screen.
#[derive(Clone, Debug)]
pub struct Water {
    tiles: Vec<Rect>,
    clock: FrameClock,
}

impl Water {
    pub fn new(top: i32, level_width: i32) -> Self {
        let (tile_w, tile_h) = SpriteKey::WaterTop.size();
        let start = -SCREEN_WIDTH;
        let count = (level_width + 2 * SCREEN_WIDTH) / tile_w;
        let tiles = (0..count)
            .map(|i| Rect::new(start + i * tile_w, top, tile_w, tile_h))
            .collect();
        Self { tiles, clock: FrameClock::default() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn draw(&mut self, frame: &mut Frame, world_shift: i32) {
        let count = SpriteKey::WaterTop.frames().count;
        self.clock.tick(ANIMATION_SPEED, count);
        let index = self.clock.frame(count);
        for tile in &mut self.tiles {
            tile.x += world_shift;
            frame.push(DrawLayer::Water, SpriteKey::WaterTop, index, *tile, false);
        }
    }
}
