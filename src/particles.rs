//! One-shot animated effects: jump dust, landing dust and stomp explosions.

use crate::assets::{FrameClock, SpriteKey};
use crate::frame::{DrawLayer, Frame};
use crate::geometry::{Anchor, Point, Rect};
use crate::settings::PARTICLE_ANIMATION_SPEED;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Jump,
    Land,
    Explosion,
}

impl ParticleKind {
    pub fn sprite(&self) -> SpriteKey {
        match self {
            ParticleKind::Jump => SpriteKey::JumpDust,
            ParticleKind::Land => SpriteKey::LandDust,
            ParticleKind::Explosion => SpriteKey::Explosion,
        }
    }
}

/// Plays its animation once, then reports itself finished. Finished effects
/// are dropped by their owner and never restart.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleEffect {
    pub kind: ParticleKind,
    pub rect: Rect,
    clock: FrameClock,
    finished: bool,
}

impl ParticleEffect {
    /// Centred on `pos`.
    pub fn new(pos: Point, kind: ParticleKind) -> Self {
        let rect = Rect::from_size(kind.sprite().size()).anchored(Anchor::Center, pos);
        Self { kind, rect, clock: FrameClock::default(), finished: false }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn update(&mut self, world_shift: i32) {
        if self.clock.tick(PARTICLE_ANIMATION_SPEED, self.kind.sprite().frames().count) {
            self.finished = true;
        }
        self.rect.x += world_shift;
    }

    pub fn draw(&self, layer: DrawLayer, frame: &mut Frame) {
        if self.finished {
            return;
        }
        let sprite = self.kind.sprite();
        frame.blit(layer, sprite, self.clock.frame(sprite.frames().count), self.rect, false);
    }
}

/// Holds at most one live effect; adding a new one replaces the old.
#[derive(Clone, Debug, Default)]
pub struct EffectSlot {
    effect: Option<ParticleEffect>,
}

impl EffectSlot {
    pub fn set(&mut self, effect: ParticleEffect) {
        self.effect = Some(effect);
    }

    pub fn get(&self) -> Option<&ParticleEffect> {
        self.effect.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.effect.is_none()
    }

    /// Update the live effect and drop it once its cycle completes.
    pub fn update(&mut self, world_shift: i32) {
        if let Some(effect) = &mut self.effect {
            effect.update(world_shift);
            if effect.is_finished() {
                self.effect = None;
            }
        }
    }

    pub fn draw(&self, layer: DrawLayer, frame: &mut Frame) {
        if let Some(effect) = &self.effect {
            effect.draw(layer, frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_removes_itself_after_one_cycle() {
        let mut slot = EffectSlot::default();
        slot.set(ParticleEffect::new(Point::new(100, 100), ParticleKind::Land));
        // Five frames at half speed: ten updates to complete the cycle.
        for _ in 0..9 {
            slot.update(0);
            assert!(!slot.is_empty());
        }
        slot.update(0);
        assert!(slot.is_empty());
    }

    #[test]
    fn effect_is_centred_and_scrolls() {
        let mut effect = ParticleEffect::new(Point::new(100, 100), ParticleKind::Explosion);
        assert_eq!(effect.rect.center(), Point::new(100, 100));
        effect.update(-8);
        assert_eq!(effect.rect.centerx(), 92);
    }
}
