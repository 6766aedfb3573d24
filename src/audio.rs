//! Audio boundary. The simulation only emits `Cue`s; a sink decides what
//! to do with them and never answers back.

use std::io::Write;

use tracing::trace;

use crate::entities::Cue;

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Swallows every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue dropped");
    }
}

/// Rings the terminal bell on explosions. Everything else is silent.
#[derive(Debug)]
pub struct BellAudio<W: Write> {
    out: W,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: Cue) {
        trace!(?cue, "cue");
        if matches!(cue, Cue::Explosion | Cue::BonusDestroyed) {
            // Fire-and-forget: a failed bell is not worth surfacing.
            let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        }
    }
}
