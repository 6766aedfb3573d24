//! Tuning knobs for a round. Read once at round start; the simulation never
//! writes back into them.

use std::path::Path;

use serde::Deserialize;

use crate::collision::Size;
use crate::error::GameError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Screen ────────────────────────────────────────────────────────────────
    pub screen_width: i32,
    pub screen_height: i32,

    // ── Ship ──────────────────────────────────────────────────────────────────
    /// Lives per round.
    pub ship_limit: u32,
    /// Pixels per nominal 60 Hz frame; scaled by elapsed time.
    pub ship_speed: f32,

    // ── Player bullets ────────────────────────────────────────────────────────
    pub bullet_speed: f32,
    pub bullet_width: i32,
    pub bullet_height: i32,
    pub bullets_allowed: usize,

    // ── Fleet ─────────────────────────────────────────────────────────────────
    /// Pixels per frame at the start of a round.
    pub alien_speed: f32,
    pub fleet_drop_speed: f32,
    pub alien_bullet_speed: f32,
    pub alien_bullet_width: i32,
    pub alien_bullet_height: i32,
    /// Chance per alien per frame of firing.
    pub alien_firing_rate: f64,
    /// Slope of the "fewer aliens, faster fleet" escalation.
    pub speedup_scale: f32,

    // ── Bonus target ──────────────────────────────────────────────────────────
    pub ufo_speed: f32,
    pub ufo_appearance_rate: f64,

    // ── Barriers ──────────────────────────────────────────────────────────────
    pub bunker_count: usize,

    // ── Session ───────────────────────────────────────────────────────────────
    /// Real-time stall after the ship is hit.
    pub hit_pause_ms: u64,
    /// Name written to the leaderboard.
    pub player_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            ship_limit: 3,
            ship_speed: 3.5,
            bullet_speed: 7.0,
            bullet_width: 3,
            bullet_height: 15,
            bullets_allowed: 3,
            alien_speed: 1.0,
            fleet_drop_speed: 10.0,
            alien_bullet_speed: 3.0,
            alien_bullet_width: 3,
            alien_bullet_height: 15,
            alien_firing_rate: 0.0005,
            speedup_scale: 3.0,
            ufo_speed: 2.0,
            ufo_appearance_rate: 0.001,
            bunker_count: 4,
            hit_pause_ms: 500,
            player_name: "ANON".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn screen(&self) -> Size {
        Size::new(self.screen_width, self.screen_height)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), GameError> {
            Err(GameError::InvalidConfig {
                field,
                reason: reason.to_string(),
            })
        }

        // Tiny screens are allowed; they produce an empty fleet.
        if self.screen_width < 0 || self.screen_height < 0 {
            return invalid("screen_width/screen_height", "must not be negative");
        }
        for (field, p) in [
            ("alien_firing_rate", self.alien_firing_rate),
            ("ufo_appearance_rate", self.ufo_appearance_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(field, "probability must be within 0..=1");
            }
        }
        for (field, v) in [
            ("ship_speed", self.ship_speed),
            ("bullet_speed", self.bullet_speed),
            ("alien_speed", self.alien_speed),
            ("alien_bullet_speed", self.alien_bullet_speed),
            ("ufo_speed", self.ufo_speed),
        ] {
            if !(v > 0.0) {
                return invalid(field, "speed must be positive");
            }
        }
        if self.fleet_drop_speed < 0.0 || self.speedup_scale < 0.0 {
            return invalid("fleet_drop_speed/speedup_scale", "must not be negative");
        }
        if self.bullet_width <= 0
            || self.bullet_height <= 0
            || self.alien_bullet_width <= 0
            || self.alien_bullet_height <= 0
        {
            return invalid("bullet size", "width and height must be positive");
        }
        Ok(())
    }
}
