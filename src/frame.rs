//! The composed output of one simulation step: an ordered draw list.
//!
//! Commands are recorded in painter's order, so later commands occlude earlier
//! ones. Renderers must replay them as-is.

use crate::assets::SpriteKey;
use crate::geometry::Rect;

/// Visual layers, declared back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DrawLayer {
    Sky,
    Clouds,
    BackgroundPalms,
    Enemies,
    Crates,
    Grass,
    ForegroundPalms,
    Dust,
    Terrain,
    Coins,
    Goal,
    Water,
    Explosions,
    Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    pub sprite: SpriteKey,
    pub frame: usize,
    /// Destination in screen pixels, sized to the sprite frame.
    pub rect: Rect,
    pub flip_x: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: DrawLayer, sprite: SpriteKey, frame: usize, rect: Rect, flip_x: bool) {
        self.commands.push(DrawCommand { layer, sprite, frame, rect, flip_x });
    }

    /// Draw `sprite` with its top-left corner at the top-left of `at`.
    pub fn blit(&mut self, layer: DrawLayer, sprite: SpriteKey, frame: usize, at: Rect, flip_x: bool) {
        let (w, h) = sprite.size();
        self.push(layer, sprite, frame, Rect::new(at.x, at.y, w, h), flip_x);
    }

    pub fn in_layer(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// Layers in the order they first appear in this frame.
    pub fn layer_sequence(&self) -> Vec<DrawLayer> {
        let mut seq: Vec<DrawLayer> = Vec::new();
        for cmd in &self.commands {
            if seq.last() != Some(&cmd.layer) {
                seq.push(cmd.layer);
            }
        }
        seq
    }
}
