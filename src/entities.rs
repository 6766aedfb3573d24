//! Plain game data shared by the simulation and the terminal front end.
//! No logic beyond lookup tables lives here.

use serde::{Deserialize, Serialize};

// ── Alien variants ────────────────────────────────────────────────────────────

/// Per-variant record: everything that differs between alien colours.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlienSpec {
    pub points: u32,
    pub width: i32,
    pub height: i32,
    pub idle_frames: usize,
    pub explosion_frames: usize,
}

/// Shared footprint of every alien variant, in logical pixels.
pub const ALIEN_WIDTH: i32 = 40;
pub const ALIEN_HEIGHT: i32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlienKind {
    Red,
    Pink,
    Blue,
    Green,
}

impl AlienKind {
    /// Highest value first, the order the fleet layout assigns row bands in.
    pub const ALL: [AlienKind; 4] = [
        AlienKind::Red,
        AlienKind::Pink,
        AlienKind::Blue,
        AlienKind::Green,
    ];

    pub fn spec(self) -> AlienSpec {
        let points = match self {
            AlienKind::Red => 40,
            AlienKind::Pink => 30,
            AlienKind::Blue => 20,
            AlienKind::Green => 10,
        };
        AlienSpec {
            points,
            width: ALIEN_WIDTH,
            height: ALIEN_HEIGHT,
            idle_frames: 2,
            explosion_frames: 3,
        }
    }

    /// Row band for a fleet row: one row of Red, two of Pink, two of Blue,
    /// Green for everything below.
    pub fn for_row(row: usize) -> AlienKind {
        match row {
            0 => AlienKind::Red,
            1 | 2 => AlienKind::Pink,
            3 | 4 => AlienKind::Blue,
            _ => AlienKind::Green,
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Alien,
}

// ── Session-level enums ───────────────────────────────────────────────────────

/// Which screen the front end should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Launch,
    Playing,
    HighScores,
}

/// Result of one frame, handed back to the driver loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// The last ship was lost; the final score is already on the leaderboard.
    RoundOver { score: u32 },
    /// Quit was requested; any pending score has been persisted.
    Quit,
}

/// Fire-and-forget audio cues emitted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Fire,
    Explosion,
    BonusArrival,
    BonusDestroyed,
}

/// Input state for one frame. Movement flags are levels, `fire` and `quit`
/// are edges produced by the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub quit: bool,
}

// ── Leaderboard ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}
