//! Progress kept across levels: coins, health and the highest unlocked
//! level. The session is the [`GameHost`] a running level talks to.

use log::info;

use crate::config::LevelCatalogue;
use crate::host::GameHost;
use crate::settings::MAX_HEALTH;

/// Requested by the level through `create_overworld`, applied between frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub unlock: usize,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub catalogue: LevelCatalogue,
    pub max_level: usize,
    pub coins: u32,
    pub health: i32,
    pub pending: Option<Transition>,
}

impl Session {
    pub fn new(catalogue: LevelCatalogue) -> Self {
        Self {
            catalogue,
            max_level: 0,
            coins: 0,
            health: MAX_HEALTH,
            pending: None,
        }
    }

    fn last_level(&self) -> usize {
        self.catalogue.len().saturating_sub(1)
    }

    /// Decide which level to build next and apply game-over rules.
    pub fn next_level(&mut self, t: Transition) -> usize {
        if self.health <= 0 {
            info!("game over: resetting progress");
            self.health = MAX_HEALTH;
            self.coins = 0;
            self.max_level = 0;
            return 0;
        }
        if t.unlock > t.from {
            t.unlock.min(self.last_level())
        } else {
            t.from
        }
    }
}

impl GameHost for Session {
    fn create_overworld(&mut self, current_level: usize, unlock: usize) {
        self.max_level = self.max_level.max(unlock.min(self.last_level()));
        self.pending = Some(Transition { from: current_level, unlock });
    }

    fn change_coins(&mut self, amount: u32) {
        self.coins += amount;
    }

    fn change_health(&mut self, delta: i32) {
        self.health = (self.health + delta).min(MAX_HEALTH);
    }

    fn get_health(&self) -> i32 {
        self.health
    }
}
