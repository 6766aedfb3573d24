//! Player and alien bullets: spawning, straight-line motion, retirement.

use crate::actors::{Alien, Ship};
use crate::collision::{Bounded, Rect};
use crate::entities::{BulletOwner, Cue};

/// Size and per-frame speed of one side's bullets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSpec {
    pub width: i32,
    pub height: i32,
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub y: f32,
    rect: Rect,
    speed: f32,
}

impl Bullet {
    /// Player bullet with its midtop on the ship's midtop.
    pub fn from_ship(ship: &Ship, spec: BulletSpec) -> Self {
        let ship_rect = ship.rect();
        let x = ship_rect.center_x() - spec.width / 2;
        let y = ship_rect.top() as f32;
        Self {
            owner: BulletOwner::Player,
            y,
            rect: Rect::at(x as f32, y, spec.width, spec.height),
            speed: spec.speed,
        }
    }

    /// Alien bullet with its midbottom on the alien's midbottom.
    pub fn from_alien(alien: &Alien, spec: BulletSpec) -> Self {
        let alien_rect = alien.rect();
        let x = alien_rect.center_x() - spec.width / 2;
        let y = (alien_rect.bottom() - spec.height) as f32;
        Self {
            owner: BulletOwner::Alien,
            y,
            rect: Rect::at(x as f32, y, spec.width, spec.height),
            speed: spec.speed,
        }
    }

    /// One frame of travel: up for the player, down for aliens.
    pub fn advance(&mut self) {
        match self.owner {
            BulletOwner::Player => self.y -= self.speed,
            BulletOwner::Alien => self.y += self.speed,
        }
        self.rect = Rect::at(self.rect.x as f32, self.y, self.rect.w, self.rect.h);
    }

    /// Fully outside the visible vertical range on its exit side.
    pub fn is_off_screen(&self, screen_height: i32) -> bool {
        match self.owner {
            BulletOwner::Player => self.rect.bottom() <= 0,
            BulletOwner::Alien => self.rect.top() >= screen_height,
        }
    }
}

impl Bounded for Bullet {
    fn rect(&self) -> Rect {
        self.rect
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectiles {
    pub player: Vec<Bullet>,
    pub alien: Vec<Bullet>,
    pub player_spec: BulletSpec,
    pub alien_spec: BulletSpec,
    /// In-flight cap for player bullets.
    pub cap: usize,
}

impl Projectiles {
    pub fn new(player_spec: BulletSpec, alien_spec: BulletSpec, cap: usize) -> Self {
        Self {
            player: Vec::new(),
            alien: Vec::new(),
            player_spec,
            alien_spec,
            cap,
        }
    }

    /// Fire from the ship's top centre unless the cap is reached or the ship
    /// is exploding. Only a successful shot pushes the fire cue.
    pub fn fire_player(&mut self, ship: &Ship, cues: &mut Vec<Cue>) -> bool {
        if self.player.len() >= self.cap || ship.is_exploding() {
            return false;
        }
        self.player.push(Bullet::from_ship(ship, self.player_spec));
        cues.push(Cue::Fire);
        true
    }

    pub fn fire_alien(&mut self, alien: &Alien) {
        self.alien.push(Bullet::from_alien(alien, self.alien_spec));
    }

    /// Move every bullet one frame and drop those that left the screen.
    pub fn advance(&mut self, screen_height: i32) {
        for bullet in self.player.iter_mut().chain(self.alien.iter_mut()) {
            bullet.advance();
        }
        self.player.retain(|b| !b.is_off_screen(screen_height));
        self.alien.retain(|b| !b.is_off_screen(screen_height));
    }

    pub fn clear(&mut self) {
        self.player.clear();
        self.alien.clear();
    }
}
