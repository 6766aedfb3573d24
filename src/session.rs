//! Round/session controller: per-frame orchestration.
//!
//! The session exclusively owns the fleet, both bullet collections, the
//! barriers, the optional bonus target and the stats. Each `tick` runs
//! the whole frame in a fixed order:
//!
//! 1. ship (movement, explosion / respawn)
//! 2. bullets
//! 3. fleet (edge reversal, then sweep, then escalation)
//! 4. collision passes, in order: player bullets vs aliens, vs bonus target
//!    (rebuild the fleet if it is now empty), player bullets vs barriers,
//!    alien bullets vs barriers, bullet vs bullet, aliens vs ship, aliens at
//!    the bottom, alien bullets vs ship
//! 5. bonus target
//! 6. alien fire rolls
//!
//! Randomness always comes through the injected RNG so a seeded RNG gives a
//! reproducible frame.

use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{info, warn};

use crate::actors::{ActorStatus, BonusTarget, Heading, Ship, SHIP_HEIGHT};
use crate::barrier::{build_barriers, Barrier};
use crate::collision::{collide_any, collide_groups_removing, take_colliding, Removal};
use crate::entities::{Controls, Cue, FrameOutcome, Screen};
use crate::error::GameError;
use crate::fleet::Fleet;
use crate::persistence::ScoreStore;
use crate::projectiles::{BulletSpec, Projectiles};
use crate::settings::Settings;
use crate::stats::GameStats;

/// Target frame period (60 Hz).
pub const FRAME: Duration = Duration::from_nanos(16_666_667);

/// Elapsed wall-clock time between tick boundaries.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time since the previous call (or since `start`).
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}

/// Everything the driver has to act on after one frame.
#[derive(Debug)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub cues: Vec<Cue>,
    /// Real-time stall requested by a ship hit.
    pub pause: Option<Duration>,
    /// Persistence writes that failed during the frame.
    pub errors: Vec<GameError>,
}

pub struct Session<S: ScoreStore> {
    pub settings: Settings,
    pub screen: Screen,
    pub paused: bool,
    pub ship: Ship,
    pub fleet: Fleet,
    pub projectiles: Projectiles,
    pub barriers: Vec<Barrier>,
    pub bonus: Option<BonusTarget>,
    pub stats: GameStats,
    pub frame: u64,
    store: S,
    cues: Vec<Cue>,
    pause: Option<Duration>,
    errors: Vec<GameError>,
}

impl<S: ScoreStore> Session<S> {
    /// An idle session on the launch screen, with the persisted high score
    /// and leaderboard loaded.
    pub fn new(settings: Settings, store: S) -> Self {
        let stats = GameStats::new(store.load_high_score(), store.load_leaderboard());
        Self {
            ship: Ship::new(settings.screen(), settings.ship_speed),
            fleet: new_fleet(&settings),
            projectiles: new_projectiles(&settings),
            barriers: Vec::new(),
            bonus: None,
            stats,
            screen: Screen::Launch,
            paused: false,
            frame: 0,
            settings,
            store,
            cues: Vec::new(),
            pause: None,
            errors: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_active(&self) -> bool {
        self.screen == Screen::Playing
    }

    /// Cues queued since the last tick (e.g. by `fire_player_bullet`).
    pub fn pending_cues(&self) -> &[Cue] {
        &self.cues
    }

    // ── Screen transitions ───────────────────────────────────────────────────

    pub fn start_round(&mut self) {
        let screen = self.settings.screen();
        self.stats.reset(self.settings.ship_limit);
        self.ship = Ship::new(screen, self.settings.ship_speed);
        self.fleet = new_fleet(&self.settings);
        self.fleet.rebuild(screen, SHIP_HEIGHT);
        self.projectiles = new_projectiles(&self.settings);
        self.barriers = build_barriers(screen, self.settings.bunker_count);
        self.bonus = None;
        self.paused = false;
        self.frame = 0;
        self.screen = Screen::Playing;
        info!(ships = self.stats.ships_left, "round started");
    }

    pub fn show_high_scores(&mut self) {
        if !self.is_active() {
            self.screen = Screen::HighScores;
        }
    }

    pub fn show_launch(&mut self) {
        if !self.is_active() {
            self.screen = Screen::Launch;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_active() {
            self.paused = !self.paused;
        }
    }

    // ── Input-driven actions ─────────────────────────────────────────────────

    /// Fire from the ship. No-op (and silent) at the in-flight cap, while
    /// the ship explodes, or outside play.
    pub fn fire_player_bullet(&mut self) -> bool {
        if !self.is_active() || self.paused {
            return false;
        }
        self.projectiles.fire_player(&self.ship, &mut self.cues)
    }

    // ── Frame ────────────────────────────────────────────────────────────────

    pub fn tick(&mut self, controls: &Controls, dt: Duration, rng: &mut impl Rng) -> FrameReport {
        if controls.quit {
            self.quit();
            return self.report(FrameOutcome::Quit);
        }
        if !self.is_active() || self.paused {
            return self.report(FrameOutcome::Continue);
        }
        self.frame += 1;

        for (heading, on) in [
            (Heading::Left, controls.left),
            (Heading::Right, controls.right),
            (Heading::Up, controls.up),
            (Heading::Down, controls.down),
        ] {
            self.ship.set_moving(heading, on);
        }
        if controls.fire {
            self.fire_player_bullet();
        }

        if self.ship.update(dt) == ActorStatus::Expired {
            if let Some(outcome) = self.finish_ship_explosion() {
                return self.report(outcome);
            }
        }

        let screen = self.settings.screen();
        self.projectiles.advance(screen.height);

        self.fleet.check_edges(screen.width);
        self.fleet.advance(dt);
        self.fleet.escalate();

        self.player_bullets_vs_aliens();
        self.player_bullets_vs_bonus(rng);
        if self.fleet.is_empty() && self.fleet.initial_count > 0 {
            self.next_wave();
        }
        self.bullets_vs_barriers(rng);
        collide_groups_removing(
            &mut self.projectiles.player,
            &mut self.projectiles.alien,
            Removal::Both,
        );
        if collide_any(&self.ship, &self.fleet.aliens) {
            self.ship_hit();
        }
        if self.fleet.reaches(screen.height) {
            self.ship_hit();
        }
        self.alien_bullets_vs_ship();

        self.update_bonus(dt, rng);
        self.fire_alien_bullets(rng);

        self.report(FrameOutcome::Continue)
    }

    fn report(&mut self, outcome: FrameOutcome) -> FrameReport {
        FrameReport {
            outcome,
            cues: std::mem::take(&mut self.cues),
            pause: self.pause.take(),
            errors: std::mem::take(&mut self.errors),
        }
    }

    // ── Collision passes ─────────────────────────────────────────────────────

    /// A bullet may match several overlapping aliens; each one is hit and
    /// scored, but only on its transition into exploding.
    fn player_bullets_vs_aliens(&mut self) {
        let contacts = collide_groups_removing(
            &mut self.projectiles.player,
            &mut self.fleet.aliens,
            Removal::First,
        );
        let mut points = 0;
        for i in contacts.seconds() {
            let alien = &mut self.fleet.aliens[i];
            if alien.hit(&mut self.cues) {
                points += alien.points();
            }
        }
        if points > 0 {
            self.award(points);
        }
    }

    fn player_bullets_vs_bonus(&mut self, rng: &mut impl Rng) {
        let Some(bonus) = self.bonus.as_mut() else {
            return;
        };
        let removed = take_colliding(&*bonus, &mut self.projectiles.player);
        if removed.is_empty() {
            return;
        }
        if let Some(points) = bonus.hit(rng, &mut self.cues) {
            self.award(points);
        }
    }

    fn bullets_vs_barriers(&mut self, rng: &mut impl Rng) {
        for barrier in &mut self.barriers {
            let contacts = collide_groups_removing(
                &mut self.projectiles.player,
                &mut barrier.cells,
                Removal::First,
            );
            barrier.hit_cells(&contacts.seconds(), rng);
        }
        for barrier in &mut self.barriers {
            let contacts = collide_groups_removing(
                &mut self.projectiles.alien,
                &mut barrier.cells,
                Removal::First,
            );
            barrier.hit_cells(&contacts.seconds(), rng);
        }
    }

    fn alien_bullets_vs_ship(&mut self) {
        if self.ship.is_exploding() {
            return;
        }
        let removed = take_colliding(&self.ship, &mut self.projectiles.alien);
        if !removed.is_empty() {
            self.ship_hit();
        }
    }

    // ── Bookkeeping ──────────────────────────────────────────────────────────

    fn award(&mut self, points: u32) {
        if self.stats.add_score(points) {
            let high = self.stats.high_score;
            if let Err(e) = self.store.save_high_score(high) {
                warn!("could not save high score {}: {}", high, e);
                self.errors.push(e);
            }
        }
    }

    fn next_wave(&mut self) {
        self.projectiles.clear();
        self.fleet.rebuild(self.settings.screen(), SHIP_HEIGHT);
        self.fleet.escalate();
        info!(speed = self.fleet.speed, "fleet cleared, next wave");
    }

    /// Explosion, pause request and life decrement. Ignored while the ship
    /// is already exploding.
    fn ship_hit(&mut self) {
        if !self.ship.hit(&mut self.cues) {
            return;
        }
        self.pause = Some(Duration::from_millis(self.settings.hit_pause_ms));
        let left = self.stats.lose_ship();
        info!(ships_left = left, "ship hit");
    }

    /// Respawn with lives left; otherwise end the round.
    fn finish_ship_explosion(&mut self) -> Option<FrameOutcome> {
        if self.stats.ships_left > 0 {
            self.ship.center();
            self.projectiles.alien.clear();
            None
        } else {
            Some(self.end_round())
        }
    }

    fn end_round(&mut self) -> FrameOutcome {
        let score = self.stats.score;
        self.record_and_save();
        self.projectiles.clear();
        self.bonus = None;
        self.paused = false;
        self.screen = Screen::Launch;
        info!(score, "round over");
        FrameOutcome::RoundOver { score }
    }

    /// Persist the score of a round in progress before leaving.
    fn quit(&mut self) {
        if self.is_active() && self.stats.score > 0 {
            self.record_and_save();
        }
        self.screen = Screen::Launch;
        info!("quit");
    }

    fn record_and_save(&mut self) {
        self.stats.record_score(&self.settings.player_name);
        if let Err(e) = self.store.save_leaderboard(&self.stats.leaderboard) {
            warn!("could not save leaderboard: {}", e);
            self.errors.push(e);
        }
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    fn update_bonus(&mut self, dt: Duration, rng: &mut impl Rng) {
        let screen = self.settings.screen();
        if let Some(bonus) = self.bonus.as_mut() {
            if bonus.update(dt, screen.width) == ActorStatus::Expired {
                self.bonus = None;
            }
        }
        if self.bonus.is_none() && rng.gen_bool(self.settings.ufo_appearance_rate.clamp(0.0, 1.0)) {
            let from_left = rng.gen_bool(0.5);
            self.bonus = Some(BonusTarget::spawn(screen, self.settings.ufo_speed, from_left));
            self.cues.push(Cue::BonusArrival);
        }
    }

    fn fire_alien_bullets(&mut self, rng: &mut impl Rng) {
        for i in self.fleet.roll_fire(self.settings.alien_firing_rate, rng) {
            self.projectiles.fire_alien(&self.fleet.aliens[i]);
        }
    }
}

fn new_fleet(settings: &Settings) -> Fleet {
    Fleet::new(
        settings.alien_speed,
        settings.fleet_drop_speed,
        settings.speedup_scale,
    )
}

fn new_projectiles(settings: &Settings) -> Projectiles {
    Projectiles::new(
        BulletSpec {
            width: settings.bullet_width,
            height: settings.bullet_height,
            speed: settings.bullet_speed,
        },
        BulletSpec {
            width: settings.alien_bullet_width,
            height: settings.alien_bullet_height,
            speed: settings.alien_bullet_speed,
        },
        settings.bullets_allowed,
    )
}
