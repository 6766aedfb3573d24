//! Destructible cover built from a grid of independently damaged cells.

use rand::seq::index;
use rand::Rng;

use crate::collision::{Bounded, Rect, Size};

pub const DAMAGE_PER_HIT: u32 = 25;
pub const DESTROYED_AT: u32 = 100;

pub const BARRIER_WIDTH: i32 = 100;
pub const BARRIER_HEIGHT: i32 = 75;
pub const CELL_SIZE: i32 = 5;
/// Rows at the base that carry the firing-port gap.
pub const PORT_ROWS: i32 = 4;
/// Barrier top sits this far above the bottom of the screen.
pub const BARRIER_RAISE: i32 = 150;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Damaged,
    Destroyed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BarrierCell {
    rect: Rect,
    pub damage: u32,
    /// Row-major opacity of each pixel in the cell.
    pub opaque: Vec<bool>,
}

impl BarrierCell {
    pub fn new(rect: Rect) -> Self {
        let area = (rect.w.max(0) * rect.h.max(0)) as usize;
        Self {
            rect,
            damage: 0,
            opaque: vec![true; area],
        }
    }

    pub fn area(&self) -> usize {
        self.opaque.len()
    }

    pub fn opaque_pixels(&self) -> usize {
        self.opaque.iter().filter(|&&p| p).count()
    }

    /// Fraction of the cell still drawn, 1.0 when untouched.
    pub fn coverage(&self) -> f32 {
        if self.opaque.is_empty() {
            return 0.0;
        }
        self.opaque_pixels() as f32 / self.area() as f32
    }

    pub fn is_destroyed(&self) -> bool {
        self.damage >= DESTROYED_AT
    }

    /// Take one hit. The transparency pattern is redrawn from a fully
    /// opaque base: `area * damage / 400` distinct pixels, sampled fresh.
    pub fn hit(&mut self, rng: &mut impl Rng) -> CellState {
        self.damage = (self.damage + DAMAGE_PER_HIT).min(DESTROYED_AT);
        if self.is_destroyed() {
            return CellState::Destroyed;
        }

        let area = self.area();
        let clear = area * self.damage as usize / 400;
        self.opaque.iter_mut().for_each(|p| *p = true);
        for i in index::sample(rng, area, clear.min(area)).into_iter() {
            self.opaque[i] = false;
        }
        CellState::Damaged
    }
}

impl Bounded for BarrierCell {
    fn rect(&self) -> Rect {
        self.rect
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Barrier {
    pub rect: Rect,
    pub cells: Vec<BarrierCell>,
}

impl Barrier {
    /// Full grid of cells with the U-shaped port carved out of the base:
    /// the bottom `PORT_ROWS` rows, middle third of the columns.
    pub fn new(x: i32, y: i32) -> Self {
        let cols = BARRIER_WIDTH / CELL_SIZE;
        let rows = BARRIER_HEIGHT / CELL_SIZE;
        let third = cols / 3;

        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let in_port = row >= rows - PORT_ROWS && col >= third && col < cols - third;
                if in_port {
                    continue;
                }
                cells.push(BarrierCell::new(Rect::new(
                    x + col * CELL_SIZE,
                    y + row * CELL_SIZE,
                    CELL_SIZE,
                    CELL_SIZE,
                )));
            }
        }

        Self {
            rect: Rect::new(x, y, BARRIER_WIDTH, BARRIER_HEIGHT),
            cells,
        }
    }

    /// Hit each listed cell once (ascending, distinct indices) and drop the
    /// ones that were destroyed. Returns how many were destroyed.
    pub fn hit_cells(&mut self, indices: &[usize], rng: &mut impl Rng) -> usize {
        let mut destroyed = 0;
        for &i in indices {
            if let Some(cell) = self.cells.get_mut(i) {
                if cell.hit(rng) == CellState::Destroyed {
                    destroyed += 1;
                }
            }
        }
        if destroyed > 0 {
            self.cells.retain(|c| !c.is_destroyed());
        }
        destroyed
    }

    pub fn is_gone(&self) -> bool {
        self.cells.is_empty()
    }
}

/// `count` barriers spread evenly across the screen, tops at
/// `height - BARRIER_RAISE`.
pub fn build_barriers(screen: Size, count: usize) -> Vec<Barrier> {
    if count == 0 {
        return Vec::new();
    }
    let spacing = screen.width / (count as i32 + 1);
    let y = screen.height - BARRIER_RAISE;
    (0..count as i32)
        .map(|i| Barrier::new(spacing * (i + 1) - BARRIER_WIDTH / 2, y))
        .collect()
}
