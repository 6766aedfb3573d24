use space_invaders::actors::{Alien, Ship};
use space_invaders::collision::{Bounded, Size};
use space_invaders::entities::{AlienKind, BulletOwner, Cue};
use space_invaders::projectiles::*;

fn spec(speed: f32) -> BulletSpec {
    BulletSpec {
        width: 3,
        height: 15,
        speed,
    }
}

fn make_projectiles() -> Projectiles {
    Projectiles::new(spec(7.0), spec(3.0), 3)
}

fn make_ship() -> Ship {
    Ship::new(Size::new(1280, 720), 3.5)
}

// ── spawning ──────────────────────────────────────────────────────────────────

#[test]
fn player_bullet_leaves_from_ship_midtop() {
    let mut p = make_projectiles();
    let mut cues = Vec::new();
    assert!(p.fire_player(&make_ship(), &mut cues));
    let r = p.player[0].rect();
    assert_eq!((r.x, r.y), (639, 680));
    assert_eq!(p.player[0].owner, BulletOwner::Player);
    assert_eq!(cues, vec![Cue::Fire]);
}

#[test]
fn alien_bullet_leaves_from_alien_midbottom() {
    let mut p = make_projectiles();
    p.fire_alien(&Alien::new(AlienKind::Red, 40.0, 30.0));
    let r = p.alien[0].rect();
    assert_eq!((r.x, r.y), (59, 45));
    assert_eq!(r.bottom(), 60);
    assert_eq!(p.alien[0].owner, BulletOwner::Alien);
}

#[test]
fn fire_at_cap_is_silent_no_op() {
    let mut p = make_projectiles();
    let ship = make_ship();
    let mut cues = Vec::new();
    for _ in 0..3 {
        assert!(p.fire_player(&ship, &mut cues));
    }
    assert!(!p.fire_player(&ship, &mut cues));
    assert_eq!(p.player.len(), 3);
    assert_eq!(cues.len(), 3);
}

#[test]
fn exploding_ship_cannot_fire() {
    let mut p = make_projectiles();
    let mut ship = make_ship();
    ship.hit(&mut Vec::new());
    let mut cues = Vec::new();
    assert!(!p.fire_player(&ship, &mut cues));
    assert!(cues.is_empty());
}

// ── motion ────────────────────────────────────────────────────────────────────

#[test]
fn bullets_travel_toward_their_exit() {
    let mut p = make_projectiles();
    p.fire_player(&make_ship(), &mut Vec::new());
    p.fire_alien(&Alien::new(AlienKind::Red, 40.0, 30.0));
    p.advance(720);
    assert_eq!(p.player[0].rect().y, 673);
    assert_eq!(p.alien[0].rect().y, 48);
}

#[test]
fn player_bullet_retires_once_fully_above_screen() {
    let mut p = make_projectiles();
    p.fire_player(&make_ship(), &mut Vec::new());
    for _ in 0..99 {
        p.advance(720);
    }
    assert_eq!(p.player.len(), 1); // bottom edge still at y=2
    p.advance(720);
    assert!(p.player.is_empty());
}

#[test]
fn alien_bullet_retires_below_screen() {
    let mut p = make_projectiles();
    p.fire_alien(&Alien::new(AlienKind::Red, 40.0, 30.0));
    // top starts at 45; 225 frames at 3 px reach 720.
    for _ in 0..224 {
        p.advance(720);
    }
    assert_eq!(p.alien.len(), 1);
    p.advance(720);
    assert!(p.alien.is_empty());
}

#[test]
fn clear_empties_both_sides() {
    let mut p = make_projectiles();
    p.fire_player(&make_ship(), &mut Vec::new());
    p.fire_alien(&Alien::new(AlienKind::Red, 40.0, 30.0));
    p.clear();
    assert!(p.player.is_empty() && p.alien.is_empty());
}
