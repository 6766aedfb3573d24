//! Fleet controller: layout, collective sweep, edge reversal and the
//! "fewer aliens, faster fleet" escalation.
//!
//! Movement is per frame (`speed` pixels per tick, independent of elapsed
//! time); only the animation timers consume `dt`.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::actors::{ActorStatus, Alien};
use crate::collision::{Bounded, Size};
use crate::entities::{AlienKind, ALIEN_HEIGHT, ALIEN_WIDTH};

/// Escalation starts once fewer than this fraction of the fleet remains.
pub const SPEEDUP_THRESHOLD: f32 = 0.75;
/// Vertical room kept free for the barriers between fleet and ship.
pub const BARRIER_CLEARANCE: i32 = 200;

#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    pub aliens: Vec<Alien>,
    /// +1.0 sweeping right, -1.0 sweeping left.
    pub direction: f32,
    pub speed: f32,
    pub base_speed: f32,
    pub drop_distance: f32,
    pub speedup_scale: f32,
    /// Size of the fleet when it was last built.
    pub initial_count: usize,
}

impl Fleet {
    pub fn new(base_speed: f32, drop_distance: f32, speedup_scale: f32) -> Self {
        Self {
            aliens: Vec::new(),
            direction: 1.0,
            speed: base_speed,
            base_speed,
            drop_distance,
            speedup_scale,
            initial_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    /// Replace the fleet with a full grid sized to the screen. Spacing
    /// between aliens equals one footprint; row bands come from
    /// `AlienKind::for_row`. A screen too small for one row yields an empty
    /// fleet.
    pub fn rebuild(&mut self, screen: Size, ship_height: i32) {
        let (w, h) = (ALIEN_WIDTH, ALIEN_HEIGHT);
        let available_x = screen.width - 2 * w;
        let columns = (available_x / (2 * w)).max(0);
        let available_y = screen.height - 3 * h - ship_height - BARRIER_CLEARANCE;
        let rows = (available_y / (2 * h)).max(0);

        self.aliens.clear();
        for row in 0..rows {
            let kind = AlienKind::for_row(row as usize);
            for col in 0..columns {
                let x = (w + 2 * w * col) as f32;
                let y = (h + 2 * h * row) as f32;
                self.aliens.push(Alien::new(kind, x, y));
            }
        }
        self.initial_count = self.aliens.len();
        info!(rows, columns, aliens = self.initial_count, "fleet built");
    }

    /// If any moving alien touches either screen edge, drop the whole fleet
    /// and flip the shared direction. Runs once per frame before `advance`.
    pub fn check_edges(&mut self, screen_width: i32) -> bool {
        let at_edge = self
            .aliens
            .iter()
            .any(|a| !a.is_exploding() && a.touches_edge(screen_width));
        if at_edge {
            for alien in &mut self.aliens {
                alien.shift(0.0, self.drop_distance);
            }
            self.direction = -self.direction;
            debug!(direction = self.direction, "fleet reversed");
        }
        at_edge
    }

    /// Run animation timers, drop finished explosions, then move every
    /// remaining alien by `speed * direction`. Returns how many aliens were
    /// removed this frame.
    pub fn advance(&mut self, dt: Duration) -> usize {
        let before = self.aliens.len();
        self.aliens
            .retain_mut(|alien| alien.update(dt) == ActorStatus::Active);
        let dx = self.speed * self.direction;
        for alien in &mut self.aliens {
            alien.shift(dx, 0.0);
        }
        before - self.aliens.len()
    }

    /// Recompute speed from the remaining fraction. Never lowers it.
    pub fn escalate(&mut self) {
        let target = escalated_speed(
            self.base_speed,
            self.speedup_scale,
            self.aliens.len(),
            self.initial_count,
        );
        if target > self.speed {
            debug!(from = self.speed, to = target, "fleet speed up");
            self.speed = target;
        }
    }

    /// Each moving alien rolls independently; returns the indices that fire.
    pub fn roll_fire(&self, probability: f64, rng: &mut impl Rng) -> Vec<usize> {
        let p = probability.clamp(0.0, 1.0);
        self.aliens
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_exploding())
            .filter(|_| rng.gen_bool(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Any moving alien's bottom edge at or past `screen_height`.
    pub fn reaches(&self, screen_height: i32) -> bool {
        self.aliens
            .iter()
            .any(|a| !a.is_exploding() && a.rect().bottom() >= screen_height)
    }
}

/// `base * (1 + scale * (0.75 - fraction))` once fewer than 75% remain,
/// otherwise `base`.
pub fn escalated_speed(base: f32, scale: f32, remaining: usize, initial: usize) -> f32 {
    if initial == 0 {
        return base;
    }
    let fraction = remaining as f32 / initial as f32;
    if fraction < SPEEDUP_THRESHOLD {
        base * (1.0 + scale * (SPEEDUP_THRESHOLD - fraction))
    } else {
        base
    }
}
