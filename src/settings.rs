//! Fixed gameplay constants shared by the simulation and the terminal front end.

// ── World geometry ────────────────────────────────────────────────────────────

pub const TILE_SIZE: i32 = 64;
pub const VERTICAL_TILE_NUMBER: i32 = 11;
pub const SCREEN_HEIGHT: i32 = VERTICAL_TILE_NUMBER * TILE_SIZE;
pub const SCREEN_WIDTH: i32 = 1200;

/// Cell token meaning "no entity here" in every layout layer.
pub const EMPTY_CELL: &str = "-1";

// ── Player physics ────────────────────────────────────────────────────────────

/// Horizontal pixels per frame while the camera is not scrolling.
pub const PLAYER_SPEED: i32 = 8;
pub const GRAVITY: f32 = 0.8;
pub const JUMP_SPEED: f32 = -16.0;
/// Vertical velocity given to the player after stomping an enemy.
pub const STOMP_BOUNCE: f32 = -15.0;
/// Width of the hitbox used for physics; the visual rect follows it.
pub const PLAYER_COLLISION_WIDTH: i32 = 50;

/// A stomp counts if the player's feet are within this many pixels
/// below the enemy's top edge.
pub const STOMP_BAND: i32 = 20;

pub const DAMAGE_AMOUNT: i32 = 10;
/// Frames of invulnerability after taking a hit (400ms at 60 FPS).
pub const INVINCIBILITY_FRAMES: u32 = 24;
pub const MAX_HEALTH: i32 = 100;

// ── Camera ────────────────────────────────────────────────────────────────────

/// World shift applied while the player pushes against a dead-zone edge.
pub const SCROLL_AMOUNT: i32 = 8;

// ── Animation ─────────────────────────────────────────────────────────────────

pub const ANIMATION_SPEED: f32 = 0.15;
pub const PARTICLE_ANIMATION_SPEED: f32 = 0.5;

// ── Decoration ────────────────────────────────────────────────────────────────

/// Sky rows above this tile index use the top band.
pub const SKY_HORIZON: i32 = 8;
pub const CLOUD_HORIZON: i32 = 400;
/// Distance of the water surface above the bottom of the screen.
pub const WATER_OFFSET: i32 = 40;
/// Clouds drift at this fraction of the world shift.
pub const CLOUD_PARALLAX: f32 = 0.5;
