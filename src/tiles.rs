//! Static and scroll-only level entities: terrain, grass, crates, coins,
//! palms, patrol constraints and the goal marker.
//!
//! The role of a tile is resolved once, when the layout is loaded, into a
//! [`TileKind`]. Per-frame code never looks at raw cell tokens.

use crate::assets::{FrameClock, SpriteKey};
use crate::frame::{DrawLayer, Frame};
use crate::geometry::{Anchor, Point, Rect};
use crate::settings::{ANIMATION_SPEED, TILE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoinKind {
    Gold,
    Silver,
}

impl CoinKind {
    pub fn value(&self) -> u32 {
        match self {
            CoinKind::Gold => 5,
            CoinKind::Silver => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PalmKind {
    /// Scenery only; never collides.
    Background,
    /// Collidable, spawned with a random offset.
    Small,
    Large,
}

impl PalmKind {
    /// How far the palm is raised above its cell.
    pub fn offset(&self) -> i32 {
        match self {
            PalmKind::Small => 38,
            PalmKind::Large | PalmKind::Background => 64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Terrain(u16),
    Grass(u16),
    Crate,
    /// Invisible patrol boundary for enemies.
    Constraint,
    Goal,
    Coin(CoinKind),
    Palm(PalmKind),
}

impl TileKind {
    pub fn sprite(&self) -> SpriteKey {
        match self {
            TileKind::Terrain(i) => SpriteKey::Terrain(*i),
            TileKind::Grass(i) => SpriteKey::Grass(*i),
            TileKind::Crate => SpriteKey::Crate,
            TileKind::Constraint => SpriteKey::Constraint,
            TileKind::Goal => SpriteKey::Goal,
            TileKind::Coin(CoinKind::Gold) => SpriteKey::CoinGold,
            TileKind::Coin(CoinKind::Silver) => SpriteKey::CoinSilver,
            TileKind::Palm(PalmKind::Small) => SpriteKey::PalmSmall,
            TileKind::Palm(PalmKind::Large) => SpriteKey::PalmLarge,
            TileKind::Palm(PalmKind::Background) => SpriteKey::PalmBackground,
        }
    }

    fn animated(&self) -> bool {
        matches!(self, TileKind::Coin(_) | TileKind::Palm(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    /// Grid-derived position of the source cell.
    pub origin: Point,
    pub rect: Rect,
    clock: FrameClock,
}

impl Tile {
    pub fn new(kind: TileKind, origin: Point) -> Self {
        Self::placed(kind, origin, origin)
    }

    /// Build a tile whose visual placement starts at `pos` rather than at its
    /// cell origin (jittered palms).
    pub fn placed(kind: TileKind, origin: Point, pos: Point) -> Self {
        let cell = Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE);
        let rect = match kind {
            TileKind::Crate => Rect::from_size(kind.sprite().size())
                .anchored(Anchor::BottomLeft, Point::new(pos.x, pos.y + TILE_SIZE)),
            TileKind::Coin(_) => Rect::from_size(kind.sprite().size()).anchored(Anchor::Center, cell.center()),
            TileKind::Palm(palm) => Rect::new(pos.x, pos.y - palm.offset(), TILE_SIZE, TILE_SIZE),
            _ => cell,
        };
        Self { kind, origin, rect, clock: FrameClock::default() }
    }

    pub fn coin_value(&self) -> Option<u32> {
        match self.kind {
            TileKind::Coin(coin) => Some(coin.value()),
            _ => None,
        }
    }

    /// Advance the animation (if any) and apply the camera shift.
    pub fn update(&mut self, world_shift: i32) {
        if self.kind.animated() {
            self.clock.tick(ANIMATION_SPEED, self.kind.sprite().frames().count);
        }
        self.rect.x += world_shift;
    }

    pub fn frame_index(&self) -> usize {
        self.clock.frame(self.kind.sprite().frames().count)
    }

    pub fn draw(&self, layer: DrawLayer, frame: &mut Frame) {
        frame.blit(layer, self.kind.sprite(), self.frame_index(), self.rect, false);
    }
}
