//! Interfaces the surrounding application provides to a running level.

/// State bridge owned by the host application (HUD, overworld, session).
pub trait GameHost {
    /// Tear the level down and return to the overworld. `unlock` is the
    /// highest level index this transition unlocks (0 unlocks nothing new).
    fn create_overworld(&mut self, current_level: usize, unlock: usize);
    fn change_coins(&mut self, amount: u32);
    fn change_health(&mut self, delta: i32);
    fn get_health(&self) -> i32;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Coin,
    Stomp,
    Jump,
    Hit,
}

/// Fire-and-forget audio trigger.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Directional and jump input sampled once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn left() -> Self {
        Self { left: true, ..Self::default() }
    }

    pub fn right() -> Self {
        Self { right: true, ..Self::default() }
    }

    pub fn jump() -> Self {
        Self { jump: true, ..Self::default() }
    }
}
