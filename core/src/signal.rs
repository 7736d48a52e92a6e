use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Segment};

/// Identifies one draggable actor in a duel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Fire-and-forget notifications for UI and layout collaborators.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum DuelSignal {
    /// Where to point the tutorial hint before the first interaction
    HintTarget { point: Point },
    /// A drag began on an actor; `first` is set for the actor's first gesture
    DragStarted { actor: ActorId, first: bool },
    /// A smoothed segment was added to the actor's drawn trace
    TraceSegment { actor: ActorId, segment: Segment },
    TraceCleared { actor: ActorId },
    /// Both paths were connected but never cross; redraw is allowed
    PathsDisjoint,
    PlaybackStarted { attempt: u32 },
    /// Actors touched on a non-final attempt
    Collision { attempt: u32 },
    /// Actors touched on the final attempt; the duel is over
    SequenceEnded { attempts: u32 },
}

pub trait SignalSink {
    fn emit(&mut self, signal: DuelSignal);
}

impl SignalSink for Vec<DuelSignal> {
    fn emit(&mut self, signal: DuelSignal) {
        self.push(signal);
    }
}

/// Drops every signal
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SignalSink for NullSink {
    fn emit(&mut self, _signal: DuelSignal) {}
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F: FnMut(DuelSignal)> SignalSink for FnSink<F> {
    fn emit(&mut self, signal: DuelSignal) {
        (self.0)(signal)
    }
}
