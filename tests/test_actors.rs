use std::time::Duration;

use space_invaders::actors::*;
use space_invaders::collision::{Bounded, Size};
use space_invaders::entities::{AlienKind, Cue};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn screen() -> Size {
    Size::new(1280, 720)
}

/// Just past the explosion frame interval.
const TICK: Duration = Duration::from_millis(101);

// ── Animation / Explosion ─────────────────────────────────────────────────────

#[test]
fn idle_animation_steps_only_past_interval() {
    let mut anim = Animation::new(2, IDLE_FRAME_INTERVAL);
    anim.advance(Duration::from_millis(1000));
    assert_eq!(anim.frame, 0); // not strictly past yet
    anim.advance(Duration::from_millis(1));
    assert_eq!(anim.frame, 1);
    assert_eq!(anim.elapsed, Duration::ZERO);
    anim.advance(Duration::from_millis(1001));
    assert_eq!(anim.frame, 0); // wraps
}

#[test]
fn explosion_finishes_after_last_frame() {
    let mut e = Explosion::new(3);
    assert!(!e.advance(TICK));
    assert_eq!(e.frame, 1);
    assert!(!e.advance(TICK));
    assert_eq!(e.frame, 2);
    assert!(e.advance(TICK));
}

#[test]
fn explosion_holds_frame_at_exact_interval() {
    let mut e = Explosion::new(3);
    assert!(!e.advance(EXPLOSION_FRAME_INTERVAL));
    assert_eq!(e.frame, 0);
}

// ── Alien ─────────────────────────────────────────────────────────────────────

#[test]
fn alien_hit_is_idempotent() {
    let mut alien = Alien::new(AlienKind::Red, 100.0, 100.0);
    let mut cues = Vec::new();
    assert!(alien.hit(&mut cues));
    assert!(!alien.hit(&mut cues));
    assert_eq!(cues, vec![Cue::Explosion]);
    assert_eq!(alien.points(), 40);
    assert!(alien.is_exploding());
}

#[test]
fn exploding_alien_is_not_collidable() {
    let mut alien = Alien::new(AlienKind::Green, 0.0, 0.0);
    assert!(alien.collidable());
    alien.hit(&mut Vec::new());
    assert!(!alien.collidable());
    assert_eq!(alien.visual(), Visual::Exploding(0));
}

#[test]
fn alien_expires_when_explosion_completes() {
    let mut alien = Alien::new(AlienKind::Blue, 0.0, 0.0);
    assert_eq!(alien.update(TICK), ActorStatus::Active);
    alien.hit(&mut Vec::new());
    assert_eq!(alien.update(TICK), ActorStatus::Active);
    assert_eq!(alien.update(TICK), ActorStatus::Active);
    assert_eq!(alien.update(TICK), ActorStatus::Expired);
}

#[test]
fn exploding_alien_does_not_move() {
    let mut alien = Alien::new(AlienKind::Pink, 50.0, 50.0);
    alien.shift(2.5, 0.0);
    assert_eq!(alien.rect().x, 52);
    alien.hit(&mut Vec::new());
    alien.shift(10.0, 10.0);
    assert_eq!((alien.x, alien.y), (52.5, 50.0));
}

#[test]
fn alien_edge_test() {
    assert!(Alien::new(AlienKind::Red, 0.0, 0.0).touches_edge(1280));
    assert!(Alien::new(AlienKind::Red, 1240.0, 0.0).touches_edge(1280));
    assert!(!Alien::new(AlienKind::Red, 600.0, 0.0).touches_edge(1280));
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn ship_starts_at_bottom_centre() {
    let ship = Ship::new(screen(), 3.5);
    let r = ship.rect();
    assert_eq!((r.x, r.y), (615, 680));
    assert_eq!(r.bottom(), 720);
}

#[test]
fn ship_moves_by_scaled_step() {
    let mut ship = Ship::new(screen(), 3.5);
    ship.set_moving(Heading::Right, true);
    ship.update(NOMINAL_FRAME);
    assert!((ship.x - 618.5).abs() < 0.01);
    ship.update(NOMINAL_FRAME * 2);
    assert!((ship.x - 625.5).abs() < 0.01);
}

#[test]
fn ship_is_clamped_horizontally() {
    let mut ship = Ship::new(screen(), 3.5);
    ship.set_moving(Heading::Left, true);
    for _ in 0..400 {
        ship.update(NOMINAL_FRAME);
    }
    assert_eq!(ship.rect().left(), 0);

    ship.set_moving(Heading::Left, false);
    ship.set_moving(Heading::Right, true);
    for _ in 0..800 {
        ship.update(NOMINAL_FRAME);
    }
    assert_eq!(ship.rect().right(), 1280);
}

#[test]
fn ship_stays_in_lower_band() {
    let mut ship = Ship::new(screen(), 3.5);
    ship.set_moving(Heading::Up, true);
    for _ in 0..200 {
        ship.update(NOMINAL_FRAME);
    }
    let top = ship.rect().top();
    assert!((503..=504).contains(&top)); // 720 * 0.7

    ship.set_moving(Heading::Up, false);
    ship.set_moving(Heading::Down, true);
    for _ in 0..200 {
        ship.update(NOMINAL_FRAME);
    }
    assert_eq!(ship.rect().bottom(), 720);
}

#[test]
fn ship_hit_then_respawn() {
    let mut ship = Ship::new(screen(), 3.5);
    let mut cues = Vec::new();
    assert!(ship.hit(&mut cues));
    assert!(!ship.hit(&mut cues));
    assert_eq!(cues.len(), 1);
    assert!(!ship.collidable());

    // No movement while exploding.
    ship.set_moving(Heading::Left, true);
    assert_eq!(ship.update(TICK), ActorStatus::Active);
    assert_eq!(ship.update(TICK), ActorStatus::Active);
    assert_eq!(ship.update(TICK), ActorStatus::Expired);
    assert_eq!(ship.rect().x, 615);

    ship.center();
    assert!(!ship.is_exploding());
    assert_eq!(ship.visual(), Visual::Idle(0));
}

// ── Bonus target ──────────────────────────────────────────────────────────────

#[test]
fn bonus_enters_from_either_side() {
    let left = BonusTarget::spawn(screen(), 2.0, true);
    assert_eq!(left.rect().x, -BONUS_WIDTH);
    assert_eq!(left.direction, 1.0);

    let right = BonusTarget::spawn(screen(), 2.0, false);
    assert_eq!(right.rect().x, 1280);
    assert_eq!(right.direction, -1.0);
    assert_eq!(right.rect().y, 50);
}

#[test]
fn bonus_moves_and_leaves_far_edge() {
    let mut bonus = BonusTarget::spawn(Size::new(100, 100), 2.0, true);
    assert_eq!(bonus.update(Duration::ZERO, 100), ActorStatus::Active);
    assert_eq!(bonus.rect().x, -58);

    bonus.x = 99.0;
    assert_eq!(bonus.update(Duration::ZERO, 100), ActorStatus::Expired);
}

#[test]
fn bonus_leaving_left_expires() {
    let mut bonus = BonusTarget::spawn(Size::new(100, 100), 2.0, false);
    bonus.x = -BONUS_WIDTH as f32 + 1.0;
    assert_eq!(bonus.update(Duration::ZERO, 100), ActorStatus::Expired);
}

#[test]
fn bonus_hit_awards_once_from_table() {
    let mut rng = seeded_rng();
    let mut bonus = BonusTarget::spawn(screen(), 2.0, true);
    let mut cues = Vec::new();
    let points = bonus.hit(&mut rng, &mut cues).unwrap();
    assert!(BONUS_REWARDS.contains(&points));
    assert_eq!(bonus.hit(&mut rng, &mut cues), None);
    assert_eq!(cues, vec![Cue::BonusDestroyed]);
    assert!(!bonus.collidable());
    assert_eq!(bonus.visual(), Visual::Value(points));
}

#[test]
fn bonus_value_shows_for_a_second_then_expires() {
    let mut rng = seeded_rng();
    let mut bonus = BonusTarget::spawn(screen(), 2.0, true);
    bonus.hit(&mut rng, &mut Vec::new());
    let x = bonus.x;
    assert_eq!(bonus.update(Duration::from_millis(500), 1280), ActorStatus::Active);
    assert_eq!(bonus.x, x); // frozen while showing its value
    assert_eq!(bonus.update(Duration::from_millis(500), 1280), ActorStatus::Expired);
}
