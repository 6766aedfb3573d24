//! Axis-aligned rectangle geometry and group collision queries.
//!
//! Positions are continuous (`f32`) on the actors; every query here works on
//! the integer rect derived from them by truncation.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rect at a continuous position, truncated toward zero.
    pub fn at(x: f32, y: f32, w: i32, h: i32) -> Self {
        Self::new(x as i32, y as i32, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Strict overlap: rects that only share an edge do not intersect, and an
    /// empty rect intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Anything with a collision rect.
pub trait Bounded {
    fn rect(&self) -> Rect;

    /// Whether the member currently takes part in collision queries.
    fn collidable(&self) -> bool {
        true
    }
}

impl Bounded for Rect {
    fn rect(&self) -> Rect {
        *self
    }
}

fn overlaps<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    a.collidable() && b.collidable() && a.rect().intersects(&b.rect())
}

// ── Single-vs-group ──────────────────────────────────────────────────────────

/// True if `one` overlaps any member of `group`.
pub fn collide_any<O: Bounded + ?Sized, T: Bounded>(one: &O, group: &[T]) -> bool {
    group.iter().any(|member| overlaps(one, member))
}

/// Indices of every member of `group` overlapping `one`, in order.
pub fn collide_with<O: Bounded + ?Sized, T: Bounded>(one: &O, group: &[T]) -> Vec<usize> {
    group
        .iter()
        .enumerate()
        .filter(|(_, member)| overlaps(one, *member))
        .map(|(i, _)| i)
        .collect()
}

/// Remove and return every member of `group` overlapping `one`.
pub fn take_colliding<O: Bounded + ?Sized, T: Bounded>(one: &O, group: &mut Vec<T>) -> Vec<T> {
    let hits = collide_with(one, group);
    remove_indices(group, &hits)
}

// ── Group-vs-group ───────────────────────────────────────────────────────────

/// One overlapping pair: index into the first group and into the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub first: usize,
    pub second: usize,
}

/// All overlapping pairs between two groups, ordered by first then second.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contacts(pub Vec<Contact>);

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Distinct first-group indices that matched, ascending.
    pub fn firsts(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.0.iter().map(|c| c.first).collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// Distinct second-group indices that matched, ascending.
    pub fn seconds(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self.0.iter().map(|c| c.second).collect();
        v.sort_unstable();
        v.dedup();
        v
    }
}

pub fn collide_groups<A: Bounded, B: Bounded>(a: &[A], b: &[B]) -> Contacts {
    let mut contacts = Vec::new();
    for (i, first) in a.iter().enumerate() {
        for (j, second) in b.iter().enumerate() {
            if overlaps(first, second) {
                contacts.push(Contact { first: i, second: j });
            }
        }
    }
    Contacts(contacts)
}

/// Which side of a group-vs-group query loses its matched members.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    Neither,
    First,
    Second,
    Both,
}

/// `collide_groups` followed by removal of the matched members on the chosen
/// side(s). The returned contacts index the groups as they were before removal.
pub fn collide_groups_removing<A: Bounded, B: Bounded>(
    a: &mut Vec<A>,
    b: &mut Vec<B>,
    removal: Removal,
) -> Contacts {
    let contacts = collide_groups(a, b);
    if matches!(removal, Removal::First | Removal::Both) {
        remove_indices(a, &contacts.firsts());
    }
    if matches!(removal, Removal::Second | Removal::Both) {
        remove_indices(b, &contacts.seconds());
    }
    contacts
}

/// Remove the members at `indices` (ascending, distinct) and return them in
/// their original order.
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) -> Vec<T> {
    let mut removed = Vec::with_capacity(indices.len());
    for &i in indices.iter().rev() {
        if i < items.len() {
            removed.push(items.remove(i));
        }
    }
    removed.reverse();
    removed
}
