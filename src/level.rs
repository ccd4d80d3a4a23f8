//! One playable level: owns every entity, the camera shift, and the
//! per-frame update / collision / event pipeline.
//!
//! Frame order (see [`Level::run`]):
//! 1. death, win, coin and enemy checks against last frame's positions
//! 2. update and draw every non-player layer with last frame's world shift
//! 3. compute the new world shift from the player's screen position
//! 4. player input and animation, then horizontal and vertical collision
//! 5. landing dust, then the player sprite
//!
//! Background layers therefore scroll one frame behind the camera decision.

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::config::{ConfigError, LevelCatalogue};
use crate::decoration::{Clouds, Sky, Water};
use crate::enemy::Enemy;
use crate::frame::{DrawLayer, Frame};
use crate::geometry::Point;
use crate::host::{AudioSink, GameHost, InputState, SoundCue};
use crate::layout::{LayerName, LevelLayout, TileLayout};
use crate::particles::{EffectSlot, ParticleEffect, ParticleKind};
use crate::player::{Facing, Player};
use crate::settings::{
    CLOUD_HORIZON, PLAYER_SPEED, SCREEN_HEIGHT, SCREEN_WIDTH, SCROLL_AMOUNT, SKY_HORIZON,
    STOMP_BAND, STOMP_BOUNCE, WATER_OFFSET,
};
use crate::tiles::{CoinKind, PalmKind, Tile, TileKind};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level has no player start")]
    MissingPlayer,
    #[error("level has a second player start at {0:?}")]
    DuplicatePlayer(Point),
    #[error("level has a second goal at {0:?}")]
    DuplicateGoal(Point),
    #[error("no level with index {0}")]
    UnknownLevel(usize),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub struct Level {
    pub current_level: usize,
    /// Level index unlocked by reaching the goal.
    pub new_max_level: usize,
    pub world_shift: i32,

    pub bg_palms: Vec<Tile>,
    pub coins: Vec<Tile>,
    pub constraints: Vec<Tile>,
    pub crates: Vec<Tile>,
    pub enemies: Vec<Enemy>,
    pub fg_palms: Vec<Tile>,
    pub grass: Vec<Tile>,
    pub terrain: Vec<Tile>,
    pub player: Player,
    /// Grid position the player was spawned from.
    pub player_start: Point,
    pub goal: Option<Tile>,

    sky: Sky,
    clouds: Clouds,
    water: Water,

    /// Jump and landing dust share a single slot.
    pub dust: EffectSlot,
    pub explosion: EffectSlot,

    /// `on_ground` as it was before this frame's vertical pass.
    player_on_ground: bool,
}

impl Level {
    pub fn new(
        current_level: usize,
        new_max_level: usize,
        layout: &LevelLayout,
        rng: &mut impl Rng,
    ) -> Result<Self, LevelError> {
        let (player, player_start, goal) = player_setup(layout.layer(LayerName::Player))?;
        let level_width = layout.pixel_width();

        let level = Self {
            current_level,
            new_max_level,
            world_shift: 0,
            bg_palms: create_tile_group(layout, LayerName::BgPalms, rng),
            coins: create_tile_group(layout, LayerName::Coins, rng),
            constraints: create_tile_group(layout, LayerName::Constraints, rng),
            crates: create_tile_group(layout, LayerName::Crates, rng),
            enemies: create_enemies(layout.layer(LayerName::Enemies), rng),
            fg_palms: create_tile_group(layout, LayerName::FgPalms, rng),
            grass: create_tile_group(layout, LayerName::Grass, rng),
            terrain: create_tile_group(layout, LayerName::Terrain, rng),
            player,
            player_start,
            goal,
            sky: Sky::new(SKY_HORIZON),
            clouds: Clouds::new(CLOUD_HORIZON, level_width, rng.gen_range(10..=30), rng),
            water: Water::new(SCREEN_HEIGHT - WATER_OFFSET, level_width),
            dust: EffectSlot::default(),
            explosion: EffectSlot::default(),
            player_on_ground: false,
        };

        info!(
            "level {} built: {} terrain, {} coins, {} enemies, {} crates, width {}px",
            current_level,
            level.terrain.len(),
            level.coins.len(),
            level.enemies.len(),
            level.crates.len(),
            level_width,
        );
        Ok(level)
    }

    /// Load level `index` from a catalogue and build it.
    pub fn from_catalogue(
        catalogue: &LevelCatalogue,
        index: usize,
        rng: &mut impl Rng,
    ) -> Result<Self, LevelError> {
        let desc = catalogue.levels.get(index).ok_or(LevelError::UnknownLevel(index))?;
        let layout = catalogue
            .load_layout(index)?
            .ok_or(LevelError::UnknownLevel(index))?;
        Self::new(index, desc.unlock, &layout, rng)
    }

    pub fn clouds(&self) -> &Clouds {
        &self.clouds
    }

    pub fn water(&self) -> &Water {
        &self.water
    }

    // ── Effects ───────────────────────────────────────────────────────────────

    fn create_jump_particles(&mut self, pos: Point) {
        self.dust.set(ParticleEffect::new(pos, ParticleKind::Jump));
    }

    fn get_player_on_ground(&mut self) {
        self.player_on_ground = self.player.contacts.on_ground;
    }

    /// Spawn dust on the frame the player touches down, unless dust is
    /// already playing.
    pub fn create_landing_dust(&mut self) {
        if self.player_on_ground || !self.player.contacts.on_ground || !self.dust.is_empty() {
            return;
        }
        let offset = match self.player.facing {
            Facing::Right => Point::new(10, 15),
            Facing::Left => Point::new(-10, 15),
        };
        let feet = self.player.rect.midbottom();
        let pos = Point::new(feet.x - offset.x, feet.y - offset.y);
        self.dust.set(ParticleEffect::new(pos, ParticleKind::Land));
    }

    fn enemy_explosion(&mut self, enemy: &Enemy, audio: &mut impl AudioSink) {
        audio.play(SoundCue::Stomp);
        self.explosion
            .set(ParticleEffect::new(enemy.rect.center(), ParticleKind::Explosion));
    }

    // ── Camera ────────────────────────────────────────────────────────────────

    /// Keep the player inside the middle half of the screen by moving the
    /// world instead of the player near either edge.
    pub fn scroll_x(&mut self) {
        let player = &mut self.player;
        let player_x = player.rect.centerx();
        let direction_x = player.direction.x;

        if player_x < SCREEN_WIDTH / 4 && direction_x < 0.0 {
            self.world_shift = SCROLL_AMOUNT;
            player.speed = 0;
        } else if player_x > SCREEN_WIDTH * 3 / 4 && direction_x > 0.0 {
            self.world_shift = -SCROLL_AMOUNT;
            player.speed = 0;
        } else {
            self.world_shift = 0;
            player.speed = PLAYER_SPEED;
        }
    }

    // ── Collision ─────────────────────────────────────────────────────────────

    /// Move the player horizontally and push it out of the first solid it
    /// overlaps.
    pub fn horizontal_movement_collision(&mut self) {
        let player = &mut self.player;
        player.contacts.on_left = false;
        player.contacts.on_right = false;
        player.collision_rect.x += player.direction.x as i32 * player.speed;

        let solids = self.terrain.iter().chain(&self.crates).chain(&self.fg_palms);
        for tile in solids {
            if !tile.rect.colliderect(&player.collision_rect) {
                continue;
            }
            if player.direction.x < 0.0 {
                player.collision_rect.set_left(tile.rect.right());
                player.contacts.on_left = true;
            } else if player.direction.x > 0.0 {
                player.collision_rect.set_right(tile.rect.left());
                player.contacts.on_right = true;
            }
            break;
        }
    }

    /// Apply gravity, then push the player out of the first solid it
    /// overlaps vertically.
    pub fn vertical_movement_collision(&mut self) {
        let player = &mut self.player;
        player.contacts.on_ceiling = false;
        player.apply_gravity();

        let solids = self.terrain.iter().chain(&self.crates).chain(&self.fg_palms);
        for tile in solids {
            if !tile.rect.colliderect(&player.collision_rect) {
                continue;
            }
            if player.direction.y > 0.0 {
                player.collision_rect.set_bottom(tile.rect.top());
                player.direction.y = 0.0;
                player.contacts.on_ground = true;
            } else if player.direction.y < 0.0 {
                player.collision_rect.set_top(tile.rect.bottom());
                player.direction.y = 0.0;
                player.contacts.on_ceiling = true;
            }
            break;
        }

        if player.contacts.on_ground && player.direction.y < 0.0 || player.direction.y > 1.0 {
            player.contacts.on_ground = false;
        }
    }

    pub fn enemy_collision_reverse(&mut self) {
        for enemy in &mut self.enemies {
            enemy.check_constraints(&self.constraints);
        }
    }

    // ── Events ────────────────────────────────────────────────────────────────

    /// Fell off the bottom of the screen or ran out of health.
    pub fn check_death(&self, host: &mut impl GameHost) {
        if self.player.rect.top() > SCREEN_HEIGHT || host.get_health() <= 0 {
            info!("player died in level {}", self.current_level);
            host.create_overworld(self.current_level, 0);
        }
    }

    pub fn check_win(&self, host: &mut impl GameHost) {
        let reached = self
            .goal
            .as_ref()
            .is_some_and(|goal| goal.rect.colliderect(&self.player.rect));
        if reached {
            info!("level {} complete, unlocking {}", self.current_level, self.new_max_level);
            host.create_overworld(self.current_level, self.new_max_level);
        }
    }

    pub fn check_coin_collisions(&mut self, host: &mut impl GameHost, audio: &mut impl AudioSink) {
        let player_rect = self.player.rect;
        let (collected, remaining): (Vec<Tile>, Vec<Tile>) = std::mem::take(&mut self.coins)
            .into_iter()
            .partition(|coin| coin.rect.colliderect(&player_rect));
        self.coins = remaining;

        if collected.is_empty() {
            return;
        }
        audio.play(SoundCue::Coin);
        for value in collected.iter().filter_map(Tile::coin_value) {
            host.change_coins(value);
        }
    }

    /// Landing on an enemy from above destroys it and bounces the player;
    /// any other contact hurts the player.
    pub fn check_enemy_collisions(&mut self, host: &mut impl GameHost, audio: &mut impl AudioSink) {
        let mut i = 0;
        while i < self.enemies.len() {
            let enemy_rect = self.enemies[i].rect;
            if !enemy_rect.colliderect(&self.player.rect) {
                i += 1;
                continue;
            }

            let feet = self.player.rect.bottom();
            let stomped = self.player.direction.y > 0.0
                && enemy_rect.top() <= feet
                && feet <= enemy_rect.top() + STOMP_BAND;
            if stomped {
                let enemy = self.enemies.remove(i);
                self.player.direction.y = STOMP_BOUNCE;
                self.enemy_explosion(&enemy, audio);
                debug!("enemy stomped at {:?}", enemy.rect.center());
            } else {
                if self.player.take_damage(host) {
                    audio.play(SoundCue::Hit);
                }
                i += 1;
            }
        }
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Advance the level by one frame and return what to draw.
    pub fn run(
        &mut self,
        input: InputState,
        host: &mut impl GameHost,
        audio: &mut impl AudioSink,
    ) -> Frame {
        let mut frame = Frame::new();

        // Death and win only notify the host; the rest of the frame still
        // runs on state the host is about to discard.
        self.check_death(host);
        self.check_win(host);
        self.check_coin_collisions(host, audio);
        self.check_enemy_collisions(host, audio);

        let shift = self.world_shift;

        self.sky.draw(&mut frame);
        self.clouds.draw(&mut frame, shift);

        update_and_draw(&mut self.bg_palms, shift, DrawLayer::BackgroundPalms, &mut frame);

        for enemy in &mut self.enemies {
            enemy.update(shift);
            enemy.draw(&mut frame);
        }

        for constraint in &mut self.constraints {
            constraint.update(shift);
        }
        self.enemy_collision_reverse();

        update_and_draw(&mut self.crates, shift, DrawLayer::Crates, &mut frame);
        update_and_draw(&mut self.grass, shift, DrawLayer::Grass, &mut frame);
        update_and_draw(&mut self.fg_palms, shift, DrawLayer::ForegroundPalms, &mut frame);

        self.dust.update(shift);
        self.dust.draw(DrawLayer::Dust, &mut frame);

        update_and_draw(&mut self.terrain, shift, DrawLayer::Terrain, &mut frame);
        update_and_draw(&mut self.coins, shift, DrawLayer::Coins, &mut frame);

        if let Some(goal) = &mut self.goal {
            goal.update(shift);
            goal.draw(DrawLayer::Goal, &mut frame);
        }

        self.water.draw(&mut frame, shift);

        self.explosion.update(shift);
        self.explosion.draw(DrawLayer::Explosions, &mut frame);

        self.scroll_x();

        if let Some(pos) = self.player.update(input, &mut frame) {
            self.create_jump_particles(pos);
            audio.play(SoundCue::Jump);
        }
        self.horizontal_movement_collision();
        self.get_player_on_ground();
        self.vertical_movement_collision();
        self.create_landing_dust();
        self.player.draw(&mut frame);

        frame
    }
}

fn update_and_draw(tiles: &mut [Tile], shift: i32, layer: DrawLayer, frame: &mut Frame) {
    for tile in tiles.iter_mut() {
        tile.update(shift);
        tile.draw(layer, frame);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Resolve one cell of a tile layer. `None` means the token has no meaning
/// for that layer and the cell stays empty.
fn tile_for(layer: LayerName, token: &str, origin: Point, rng: &mut impl Rng) -> Option<Tile> {
    let kind = match (layer, token) {
        (LayerName::BgPalms, _) => TileKind::Palm(PalmKind::Background),
        (LayerName::Coins, "0") => TileKind::Coin(CoinKind::Gold),
        (LayerName::Coins, "1") => TileKind::Coin(CoinKind::Silver),
        (LayerName::Constraints, _) => TileKind::Constraint,
        (LayerName::Crates, _) => TileKind::Crate,
        (LayerName::FgPalms, "3") => {
            let jitter = origin.offset(rng.gen_range(0..=30), rng.gen_range(0..=30));
            return Some(Tile::placed(TileKind::Palm(PalmKind::Small), origin, jitter));
        }
        (LayerName::FgPalms, "4") => TileKind::Palm(PalmKind::Large),
        (LayerName::Grass, t) => TileKind::Grass(t.parse().ok()?),
        (LayerName::Terrain, t) => TileKind::Terrain(t.parse().ok()?),
        _ => return None,
    };
    Some(Tile::new(kind, origin))
}

fn create_tile_group(layout: &LevelLayout, layer: LayerName, rng: &mut impl Rng) -> Vec<Tile> {
    let mut tiles = Vec::new();
    for cell in layout.layer(layer).cells() {
        match tile_for(layer, cell.token, cell.pos(), rng) {
            Some(tile) => tiles.push(tile),
            None => debug!(
                "skipping token {:?} in {} at row {}, col {}",
                cell.token,
                layer.as_str(),
                cell.row,
                cell.col
            ),
        }
    }
    tiles
}

fn create_enemies(layout: &TileLayout, rng: &mut impl Rng) -> Vec<Enemy> {
    layout
        .cells()
        .map(|cell| Enemy::new(cell.pos(), rng.gen_range(3..=5)))
        .collect()
}

/// `0` marks the player start, `1` the goal.
fn player_setup(layout: &TileLayout) -> Result<(Player, Point, Option<Tile>), LevelError> {
    let mut start: Option<Point> = None;
    let mut goal: Option<Tile> = None;

    for cell in layout.cells() {
        let pos = cell.pos();
        match cell.token {
            "0" => {
                if start.is_some() {
                    return Err(LevelError::DuplicatePlayer(pos));
                }
                start = Some(pos);
            }
            "1" => {
                if goal.is_some() {
                    return Err(LevelError::DuplicateGoal(pos));
                }
                goal = Some(Tile::new(TileKind::Goal, pos));
            }
            other => debug!("skipping token {:?} in player layer", other),
        }
    }

    let start = start.ok_or(LevelError::MissingPlayer)?;
    Ok((Player::new(start), start, goal))
}
