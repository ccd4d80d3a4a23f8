//! The player character: input sampling, animation status and sprite
//! anchoring. Movement against level geometry is resolved by the level,
//! which owns the obstacles; see `Level::horizontal_movement_collision`.

use crate::assets::{FrameClock, SpriteKey};
use crate::frame::{DrawLayer, Frame};
use crate::geometry::{Anchor, Point, Rect, Vec2};
use crate::host::{GameHost, InputState};
use crate::settings::{
    ANIMATION_SPEED, DAMAGE_AMOUNT, GRAVITY, INVINCIBILITY_FRAMES, JUMP_SPEED,
    PLAYER_COLLISION_WIDTH, PLAYER_SPEED,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Run,
    Jump,
    Fall,
}

impl Status {
    /// Derived from velocity alone.
    pub fn from_direction(direction: Vec2) -> Self {
        if direction.y < 0.0 {
            Status::Jump
        } else if direction.y > 0.0 {
            Status::Fall
        } else if direction.x != 0.0 {
            Status::Run
        } else {
            Status::Idle
        }
    }

    pub fn sprite(&self) -> SpriteKey {
        match self {
            Status::Idle => SpriteKey::PlayerIdle,
            Status::Run => SpriteKey::PlayerRun,
            Status::Jump => SpriteKey::PlayerJump,
            Status::Fall => SpriteKey::PlayerFall,
        }
    }
}

/// Contact with level geometry, derived from the latest collision passes.
///
/// `on_left`, `on_right` and `on_ceiling` are cleared before the pass that
/// computes them. `on_ground` carries over between frames and is only
/// cleared once the player is clearly moving away from the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactFlags {
    pub on_ground: bool,
    pub on_ceiling: bool,
    pub on_left: bool,
    pub on_right: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Visual rectangle, sized to the current animation frame.
    pub rect: Rect,
    /// Physics body. Fixed size, independent of the animation frame.
    pub collision_rect: Rect,
    /// `x` is -1, 0 or 1; `y` is pixels per frame.
    pub direction: Vec2,
    pub speed: i32,
    pub facing: Facing,
    pub contacts: ContactFlags,
    clock: FrameClock,
    dust_clock: FrameClock,
    invincibility: u32,
}

impl Player {
    pub fn new(pos: Point) -> Self {
        let rect = Rect::from_size(SpriteKey::PlayerIdle.size()).anchored(Anchor::TopLeft, pos);
        let collision_rect = Rect::new(pos.x, pos.y, PLAYER_COLLISION_WIDTH, rect.h);
        Self {
            rect,
            collision_rect,
            direction: Vec2::ZERO,
            speed: PLAYER_SPEED,
            facing: Facing::Right,
            contacts: ContactFlags::default(),
            clock: FrameClock::default(),
            dust_clock: FrameClock::default(),
            invincibility: 0,
        }
    }

    pub fn status(&self) -> Status {
        Status::from_direction(self.direction)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }

    /// One frame of player logic. Returns where a jump-dust effect should
    /// appear if the player jumped this frame.
    pub fn update(&mut self, input: InputState, frame: &mut Frame) -> Option<Point> {
        let jumped = self.get_input(input);
        self.animate();
        self.run_dust_animation(frame);
        self.invincibility = self.invincibility.saturating_sub(1);
        jumped
    }

    fn get_input(&mut self, input: InputState) -> Option<Point> {
        if input.left {
            self.direction.x = -1.0;
            self.facing = Facing::Left;
        } else if input.right {
            self.direction.x = 1.0;
            self.facing = Facing::Right;
        } else {
            self.direction.x = 0.0;
        }

        if input.jump {
            self.jump()
        } else {
            None
        }
    }

    /// Only from the ground. Returns the jump-dust position behind the feet.
    pub fn jump(&mut self) -> Option<Point> {
        if !self.contacts.on_ground {
            return None;
        }
        self.direction.y = JUMP_SPEED;
        let feet = self.rect.midbottom();
        Some(match self.facing {
            Facing::Right => feet.offset(-10, -5),
            Facing::Left => feet.offset(10, -5),
        })
    }

    /// Semi-implicit Euler step: velocity first, then position.
    pub fn apply_gravity(&mut self) {
        self.direction.y += GRAVITY;
        self.collision_rect.y += self.direction.y.round() as i32;
    }

    fn animate(&mut self) {
        let sprite = self.status().sprite();
        self.clock.tick(ANIMATION_SPEED, sprite.frames().count);

        let c = self.contacts;
        let anchor = if c.on_ground && c.on_right {
            Anchor::BottomRight
        } else if c.on_ground && c.on_left {
            Anchor::BottomLeft
        } else if c.on_ground {
            Anchor::MidBottom
        } else if c.on_ceiling && c.on_left {
            Anchor::TopLeft
        } else if c.on_ceiling && c.on_right {
            Anchor::TopRight
        } else if c.on_ceiling {
            Anchor::MidTop
        } else {
            Anchor::MidBottom
        };
        self.rect = Rect::from_size(sprite.size())
            .anchored(anchor, self.collision_rect.anchor_point(anchor));
    }

    /// Foot dust while running on the ground. Drawn directly, not spawned.
    fn run_dust_animation(&mut self, frame: &mut Frame) {
        if self.status() != Status::Run || !self.contacts.on_ground {
            return;
        }
        let count = SpriteKey::RunDust.frames().count;
        self.dust_clock.tick(ANIMATION_SPEED, count);
        let index = self.dust_clock.frame(count);

        let (at, flip) = match self.facing {
            Facing::Right => (self.rect.bottomleft().offset(-6, -10), false),
            Facing::Left => (self.rect.bottomright().offset(-6, -10), true),
        };
        frame.blit(
            DrawLayer::Player,
            SpriteKey::RunDust,
            index,
            Rect::new(at.x, at.y, 0, 0),
            flip,
        );
    }

    /// Lose health unless still invincible from a previous hit.
    pub fn take_damage(&mut self, host: &mut dyn GameHost) -> bool {
        if self.is_invincible() {
            return false;
        }
        host.change_health(-DAMAGE_AMOUNT);
        self.invincibility = INVINCIBILITY_FRAMES;
        true
    }

    pub fn draw(&self, frame: &mut Frame) {
        let sprite = self.status().sprite();
        let index = self.clock.frame(sprite.frames().count);
        frame.blit(DrawLayer::Player, sprite, index, self.rect, self.facing == Facing::Left);
    }
}
