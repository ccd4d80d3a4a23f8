//! Patrolling enemy. Walks at a fixed speed and turns around when it runs
//! into an invisible constraint tile; the constraint tiles alone bound its
//! patrol range.

use crate::assets::{FrameClock, SpriteKey};
use crate::frame::{DrawLayer, Frame};
use crate::geometry::{Anchor, Point, Rect};
use crate::settings::{ANIMATION_SPEED, TILE_SIZE};
use crate::tiles::Tile;

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub origin: Point,
    pub rect: Rect,
    /// Signed pixels per frame; positive walks right.
    pub speed: i32,
    clock: FrameClock,
    /// Indices of the constraints overlapped at the previous check.
    touching: Vec<usize>,
}

impl Enemy {
    /// Feet rest on the bottom of the cell at `origin`.
    pub fn new(origin: Point, speed: i32) -> Self {
        let rect = Rect::from_size(SpriteKey::Enemy.size())
            .anchored(Anchor::BottomLeft, origin.offset(0, TILE_SIZE));
        Self {
            origin,
            rect,
            speed,
            clock: FrameClock::default(),
            touching: Vec::new(),
        }
    }

    pub fn moving_right(&self) -> bool {
        self.speed > 0
    }

    pub fn reverse(&mut self) {
        self.speed = -self.speed;
    }

    pub fn update(&mut self, world_shift: i32) {
        self.rect.x += world_shift;
        self.clock.tick(ANIMATION_SPEED, SpriteKey::Enemy.frames().count);
        self.rect.x += self.speed;
    }

    /// Reverse on the frame the enemy first overlaps a constraint. Staying
    /// inside the same constraint does not flip it back; entering another
    /// one does. Returns whether the enemy turned around.
    pub fn check_constraints(&mut self, constraints: &[Tile]) -> bool {
        let touching: Vec<usize> = constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| c.rect.colliderect(&self.rect))
            .map(|(i, _)| i)
            .collect();
        let reversed = touching.iter().any(|i| !self.touching.contains(i));
        if reversed {
            self.reverse();
        }
        self.touching = touching;
        reversed
    }

    pub fn draw(&self, frame: &mut Frame) {
        let index = self.clock.frame(SpriteKey::Enemy.frames().count);
        // Artwork faces left.
        frame.blit(DrawLayer::Enemies, SpriteKey::Enemy, index, self.rect, self.moving_right());
    }
}
