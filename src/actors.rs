//! Actor state machines: aliens, the player ship and the bonus target.
//!
//! Every actor runs `Alive -> Exploding -> Removed` (the ship respawns
//! instead of being removed). `hit()` starts the explosion once; repeated
//! calls while exploding change nothing.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::collision::{Bounded, Rect, Size};
use crate::entities::{AlienKind, Cue};

pub const IDLE_FRAME_INTERVAL: Duration = Duration::from_millis(1000);
pub const EXPLOSION_FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Frame period the ship speed is expressed against.
pub const NOMINAL_FRAME: Duration = Duration::from_nanos(16_666_667);

pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 40;
pub const SHIP_EXPLOSION_FRAMES: usize = 3;
/// The ship may not rise above this fraction of the screen height.
pub const SHIP_BAND_TOP: f32 = 0.7;

pub const BONUS_WIDTH: i32 = 60;
pub const BONUS_HEIGHT: i32 = 26;
pub const BONUS_Y: f32 = 50.0;
pub const BONUS_REWARDS: [u32; 4] = [50, 100, 150, 300];
pub const BONUS_VALUE_DISPLAY: Duration = Duration::from_millis(1000);

// ── Timed frame sequences ────────────────────────────────────────────────────

/// Looping idle animation. The frame advances once the accumulated time
/// exceeds the interval; the accumulator then restarts from zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    pub frame: usize,
    pub frames: usize,
    pub elapsed: Duration,
    pub interval: Duration,
}

impl Animation {
    pub fn new(frames: usize, interval: Duration) -> Self {
        Self {
            frame: 0,
            frames: frames.max(1),
            elapsed: Duration::ZERO,
            interval,
        }
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        if self.elapsed > self.interval {
            self.elapsed = Duration::ZERO;
            self.frame = (self.frame + 1) % self.frames;
        }
    }
}

/// One-shot explosion. Finishes on the first tick past the interval while
/// showing its last frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub frame: usize,
    pub frames: usize,
    pub elapsed: Duration,
    pub interval: Duration,
}

impl Explosion {
    pub fn new(frames: usize) -> Self {
        Self {
            frame: 0,
            frames: frames.max(1),
            elapsed: Duration::ZERO,
            interval: EXPLOSION_FRAME_INTERVAL,
        }
    }

    /// Returns true once the sequence has run to completion.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        if self.elapsed <= self.interval {
            return false;
        }
        self.elapsed = Duration::ZERO;
        if self.frame + 1 < self.frames {
            self.frame += 1;
            false
        } else {
            true
        }
    }
}

/// What the renderer should draw for an actor this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    Idle(usize),
    Exploding(usize),
    /// Bonus target showing the points it was worth.
    Value(u32),
}

/// Per-frame result of updating an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActorStatus {
    Active,
    /// The explosion (or value display) finished; drop the actor.
    Expired,
}

// ── Alien ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Alien {
    pub kind: AlienKind,
    pub x: f32,
    pub y: f32,
    rect: Rect,
    pub animation: Animation,
    pub explosion: Option<Explosion>,
}

impl Alien {
    pub fn new(kind: AlienKind, x: f32, y: f32) -> Self {
        let spec = kind.spec();
        Self {
            kind,
            x,
            y,
            rect: Rect::at(x, y, spec.width, spec.height),
            animation: Animation::new(spec.idle_frames, IDLE_FRAME_INTERVAL),
            explosion: None,
        }
    }

    pub fn points(&self) -> u32 {
        self.kind.spec().points
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    /// Start exploding. Returns true only on the transition, which is also
    /// the only time the explosion cue is pushed.
    pub fn hit(&mut self, cues: &mut Vec<Cue>) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.explosion = Some(Explosion::new(self.kind.spec().explosion_frames));
        cues.push(Cue::Explosion);
        true
    }

    /// Advance animation timers.
    pub fn update(&mut self, dt: Duration) -> ActorStatus {
        match self.explosion.as_mut() {
            Some(explosion) => {
                if explosion.advance(dt) {
                    ActorStatus::Expired
                } else {
                    ActorStatus::Active
                }
            }
            None => {
                self.animation.advance(dt);
                ActorStatus::Active
            }
        }
    }

    /// Shift by a per-frame displacement. Exploding aliens stay put.
    pub fn shift(&mut self, dx: f32, dy: f32) {
        if self.is_exploding() {
            return;
        }
        self.x += dx;
        self.y += dy;
        self.sync_rect();
    }

    pub fn touches_edge(&self, screen_width: i32) -> bool {
        self.rect.right() >= screen_width || self.rect.left() <= 0
    }

    pub fn visual(&self) -> Visual {
        match &self.explosion {
            Some(e) => Visual::Exploding(e.frame),
            None => Visual::Idle(self.animation.frame),
        }
    }

    fn sync_rect(&mut self) {
        self.rect = Rect::at(self.x, self.y, self.rect.w, self.rect.h);
    }
}

impl Bounded for Alien {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn collidable(&self) -> bool {
        !self.is_exploding()
    }
}

// ── Player ship ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
    Up,
    Down,
}

/// The four movement flags, set and cleared by input edges only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub x: f32,
    pub y: f32,
    rect: Rect,
    pub speed: f32,
    pub moving: MoveFlags,
    pub explosion: Option<Explosion>,
    screen: Size,
}

impl Ship {
    /// A ship centred at the bottom of `screen`.
    pub fn new(screen: Size, speed: f32) -> Self {
        let mut ship = Self {
            x: 0.0,
            y: 0.0,
            rect: Rect::new(0, 0, SHIP_WIDTH, SHIP_HEIGHT),
            speed,
            moving: MoveFlags::default(),
            explosion: None,
            screen,
        };
        ship.center();
        ship
    }

    pub fn set_moving(&mut self, heading: Heading, on: bool) {
        match heading {
            Heading::Left => self.moving.left = on,
            Heading::Right => self.moving.right = on,
            Heading::Up => self.moving.up = on,
            Heading::Down => self.moving.down = on,
        }
    }

    /// Midbottom of the ship at the midbottom of the screen.
    pub fn center(&mut self) {
        self.x = (self.screen.width / 2 - SHIP_WIDTH / 2) as f32;
        self.y = (self.screen.height - SHIP_HEIGHT) as f32;
        self.explosion = None;
        self.sync_rect();
    }

    pub fn is_exploding(&self) -> bool {
        self.explosion.is_some()
    }

    pub fn hit(&mut self, cues: &mut Vec<Cue>) -> bool {
        if self.is_exploding() {
            return false;
        }
        self.explosion = Some(Explosion::new(SHIP_EXPLOSION_FRAMES));
        cues.push(Cue::Explosion);
        true
    }

    /// Move by the held flags (scaled by `dt`) and run the explosion timer.
    /// `Expired` means the explosion just finished and the ship wants to
    /// respawn.
    pub fn update(&mut self, dt: Duration) -> ActorStatus {
        if let Some(explosion) = self.explosion.as_mut() {
            return if explosion.advance(dt) {
                ActorStatus::Expired
            } else {
                ActorStatus::Active
            };
        }

        let step = self.speed * (dt.as_secs_f32() / NOMINAL_FRAME.as_secs_f32());
        if self.moving.right {
            self.x += step;
        }
        if self.moving.left {
            self.x -= step;
        }
        if self.moving.down {
            self.y += step;
        }
        if self.moving.up {
            self.y -= step;
        }

        let max_x = (self.screen.width - SHIP_WIDTH).max(0) as f32;
        let max_y = (self.screen.height - SHIP_HEIGHT).max(0) as f32;
        let min_y = (self.screen.height as f32 * SHIP_BAND_TOP).min(max_y);
        self.x = self.x.clamp(0.0, max_x);
        self.y = self.y.clamp(min_y, max_y);
        self.sync_rect();
        ActorStatus::Active
    }

    pub fn visual(&self) -> Visual {
        match &self.explosion {
            Some(e) => Visual::Exploding(e.frame),
            None => Visual::Idle(0),
        }
    }

    fn sync_rect(&mut self) {
        self.rect = Rect::at(self.x, self.y, SHIP_WIDTH, SHIP_HEIGHT);
    }
}

impl Bounded for Ship {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn collidable(&self) -> bool {
        !self.is_exploding()
    }
}

// ── Bonus target ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct BonusTarget {
    pub x: f32,
    rect: Rect,
    /// +1 travels right, -1 travels left.
    pub direction: f32,
    pub speed: f32,
    /// Set by `hit()`; while set the target shows its value and stops moving.
    pub value: Option<u32>,
    pub value_shown_for: Duration,
}

impl BonusTarget {
    /// Enter from the left edge heading right, or from the right heading left.
    pub fn spawn(screen: Size, speed: f32, from_left: bool) -> Self {
        let (x, direction) = if from_left {
            (-BONUS_WIDTH as f32, 1.0)
        } else {
            (screen.width as f32, -1.0)
        };
        Self {
            x,
            rect: Rect::at(x, BONUS_Y, BONUS_WIDTH, BONUS_HEIGHT),
            direction,
            speed,
            value: None,
            value_shown_for: Duration::ZERO,
        }
    }

    pub fn is_showing_value(&self) -> bool {
        self.value.is_some()
    }

    /// Pick a reward from the table. Returns the points on the first hit and
    /// `None` on any later one.
    pub fn hit(&mut self, rng: &mut impl Rng, cues: &mut Vec<Cue>) -> Option<u32> {
        if self.is_showing_value() {
            return None;
        }
        let points = *BONUS_REWARDS.choose(rng).unwrap_or(&BONUS_REWARDS[0]);
        self.value = Some(points);
        self.value_shown_for = Duration::ZERO;
        cues.push(Cue::BonusDestroyed);
        Some(points)
    }

    /// Stationary while the value is shown; only the display timer runs.
    pub fn update(&mut self, dt: Duration, screen_width: i32) -> ActorStatus {
        if self.is_showing_value() {
            self.value_shown_for += dt;
            return if self.value_shown_for >= BONUS_VALUE_DISPLAY {
                ActorStatus::Expired
            } else {
                ActorStatus::Active
            };
        }

        self.x += self.speed * self.direction;
        self.rect = Rect::at(self.x, BONUS_Y, BONUS_WIDTH, BONUS_HEIGHT);
        let gone = (self.direction > 0.0 && self.rect.left() > screen_width)
            || (self.direction < 0.0 && self.rect.right() < 0);
        if gone {
            ActorStatus::Expired
        } else {
            ActorStatus::Active
        }
    }

    pub fn visual(&self) -> Visual {
        match self.value {
            Some(points) => Visual::Value(points),
            None => Visual::Idle(0),
        }
    }
}

impl Bounded for BonusTarget {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn collidable(&self) -> bool {
        !self.is_showing_value()
    }
}
