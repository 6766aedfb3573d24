use space_invaders::barrier::*;
use space_invaders::collision::{Bounded, Rect, Size};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn cell() -> BarrierCell {
    BarrierCell::new(Rect::new(0, 0, CELL_SIZE, CELL_SIZE))
}

// ── BarrierCell ───────────────────────────────────────────────────────────────

#[test]
fn fresh_cell_is_fully_opaque() {
    let c = cell();
    assert_eq!(c.area(), 25);
    assert_eq!(c.opaque_pixels(), 25);
    assert_eq!(c.coverage(), 1.0);
    assert_eq!(c.damage, 0);
}

#[test]
fn three_hits_damage_four_destroy() {
    let mut rng = seeded_rng();
    let mut c = cell();
    for _ in 0..3 {
        assert_eq!(c.hit(&mut rng), CellState::Damaged);
    }
    assert_eq!(c.damage, 75);
    assert!(!c.is_destroyed());
    assert_eq!(c.hit(&mut rng), CellState::Destroyed);
    assert_eq!(c.damage, 100);
}

#[test]
fn transparency_follows_damage() {
    // area * damage / 400 for a 5x5 cell: 1, 3, 4 pixels.
    let mut rng = seeded_rng();
    let mut c = cell();
    c.hit(&mut rng);
    assert_eq!(c.opaque_pixels(), 24);
    c.hit(&mut rng);
    assert_eq!(c.opaque_pixels(), 22);
    c.hit(&mut rng);
    assert_eq!(c.opaque_pixels(), 21);
}

#[test]
fn larger_cell_clears_proportionally() {
    let mut rng = seeded_rng();
    let mut c = BarrierCell::new(Rect::new(0, 0, 20, 20));
    c.hit(&mut rng);
    assert_eq!(c.opaque_pixels(), 400 - 25);
    c.hit(&mut rng);
    assert_eq!(c.opaque_pixels(), 400 - 50);
}

// ── Barrier ───────────────────────────────────────────────────────────────────

#[test]
fn barrier_has_port_carved_from_base() {
    let b = Barrier::new(0, 0);
    // 20 x 15 grid minus an 8 x 4 port.
    assert_eq!(b.cells.len(), 300 - 32);

    let has_cell_at = |x: i32, y: i32| b.cells.iter().any(|c| c.rect().x == x && c.rect().y == y);
    assert!(has_cell_at(0, 70));
    assert!(has_cell_at(30, 50)); // column 6, just above the port
    assert!(!has_cell_at(30, 55)); // column 6, top port row
    assert!(!has_cell_at(65, 70)); // column 13
    assert!(has_cell_at(70, 70)); // column 14, right of the port
}

#[test]
fn hit_cells_removes_destroyed_cells() {
    let mut rng = seeded_rng();
    let mut b = Barrier::new(0, 0);
    let before = b.cells.len();
    for _ in 0..3 {
        assert_eq!(b.hit_cells(&[0, 1], &mut rng), 0);
    }
    assert_eq!(b.cells.len(), before);
    assert_eq!(b.hit_cells(&[0, 1], &mut rng), 2);
    assert_eq!(b.cells.len(), before - 2);
    assert!(!b.is_gone());
}

#[test]
fn hit_cells_ignores_stale_indices() {
    let mut rng = seeded_rng();
    let mut b = Barrier::new(0, 0);
    assert_eq!(b.hit_cells(&[10_000], &mut rng), 0);
}

// ── build_barriers ────────────────────────────────────────────────────────────

#[test]
fn barriers_spread_across_screen() {
    let barriers = build_barriers(Size::new(1280, 720), 4);
    let xs: Vec<i32> = barriers.iter().map(|b| b.rect.x).collect();
    assert_eq!(xs, vec![206, 462, 718, 974]);
    assert!(barriers.iter().all(|b| b.rect.y == 570));
}

#[test]
fn zero_barriers() {
    assert!(build_barriers(Size::new(1280, 720), 0).is_empty());
}
