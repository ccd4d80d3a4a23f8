//! Sprite identifiers and their frame metadata.
//!
//! Image decoding happens outside the simulation. The core only needs to know
//! how many frames each animation has and how large those frames are, so that
//! animation wraparound and rect re-anchoring behave exactly as they would with
//! the real surfaces loaded.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    /// Cut from the terrain sheet by index.
    Terrain(u16),
    /// Cut from the grass sheet by index.
    Grass(u16),
    Crate,
    Constraint,
    Goal,
    CoinGold,
    CoinSilver,
    PalmSmall,
    PalmLarge,
    PalmBackground,
    Enemy,
    PlayerIdle,
    PlayerRun,
    PlayerJump,
    PlayerFall,
    RunDust,
    JumpDust,
    LandDust,
    Explosion,
    SkyTop,
    SkyMiddle,
    SkyBottom,
    Cloud(u8),
    WaterTop,
}

/// Number of distinct cloud images.
pub const CLOUD_VARIANTS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSet {
    pub count: usize,
    /// Width and height shared by every frame of the set.
    pub size: (i32, i32),
}

impl FrameSet {
    const fn new(count: usize, w: i32, h: i32) -> Self {
        Self { count, size: (w, h) }
    }
}

impl SpriteKey {
    pub fn frames(&self) -> FrameSet {
        match self {
            SpriteKey::Terrain(_) | SpriteKey::Grass(_) | SpriteKey::Constraint => {
                FrameSet::new(1, 64, 64)
            }
            SpriteKey::Crate => FrameSet::new(1, 64, 50),
            SpriteKey::Goal => FrameSet::new(1, 44, 30),
            SpriteKey::CoinGold => FrameSet::new(4, 26, 26),
            SpriteKey::CoinSilver => FrameSet::new(4, 20, 20),
            SpriteKey::PalmSmall => FrameSet::new(4, 64, 102),
            SpriteKey::PalmLarge => FrameSet::new(4, 64, 128),
            SpriteKey::PalmBackground => FrameSet::new(4, 64, 128),
            SpriteKey::Enemy => FrameSet::new(6, 52, 40),
            SpriteKey::PlayerIdle => FrameSet::new(5, 60, 64),
            SpriteKey::PlayerRun => FrameSet::new(6, 64, 64),
            SpriteKey::PlayerJump => FrameSet::new(3, 62, 64),
            SpriteKey::PlayerFall => FrameSet::new(1, 62, 66),
            SpriteKey::RunDust => FrameSet::new(5, 16, 12),
            SpriteKey::JumpDust => FrameSet::new(6, 40, 20),
            SpriteKey::LandDust => FrameSet::new(5, 50, 16),
            SpriteKey::Explosion => FrameSet::new(7, 80, 80),
            SpriteKey::SkyTop | SpriteKey::SkyMiddle | SpriteKey::SkyBottom => {
                FrameSet::new(1, 1200, 64)
            }
            SpriteKey::Cloud(0) => FrameSet::new(1, 180, 70),
            SpriteKey::Cloud(1) => FrameSet::new(1, 140, 52),
            SpriteKey::Cloud(_) => FrameSet::new(1, 220, 84),
            SpriteKey::WaterTop => FrameSet::new(4, 192, 64),
        }
    }

    pub fn size(&self) -> (i32, i32) {
        self.frames().size
    }
}

/// Looping frame counter shared by every animated sprite.
///
/// The index advances by a fractional speed each frame and wraps back to 0
/// once it passes the last frame (a wrap, never a bounce).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    pub index: f32,
}

impl FrameClock {
    /// Advance and wrap. Returns true when this step wrapped around.
    pub fn tick(&mut self, speed: f32, count: usize) -> bool {
        self.index += speed;
        if self.index >= count as f32 {
            self.index = 0.0;
            true
        } else {
            false
        }
    }

    pub fn frame(&self, count: usize) -> usize {
        (self.index as usize).min(count.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_wraps_to_zero_not_back() {
        let mut clock = FrameClock::default();
        let mut wrapped = false;
        for _ in 0..7 {
            wrapped = clock.tick(0.5, 3) || wrapped;
        }
        assert!(wrapped);
        assert_eq!(clock.index, 0.5);
    }

    #[test]
    fn frame_never_overruns() {
        let clock = FrameClock { index: 5.7 };
        assert_eq!(clock.frame(1), 0);
        assert_eq!(clock.frame(6), 5);
    }
}
