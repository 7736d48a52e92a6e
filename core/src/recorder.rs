use serde::{Deserialize, Serialize};

use crate::geometry::{Path, Point, Rect, Segment};
use crate::signal::{ActorId, DuelSignal, SignalSink};

/// Interactive region reported by the surrounding layer's hit test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Region {
    Actor(ActorId),
    Target(ActorId),
    Other(u32),
}

/// "Which interactive region, if any, contains this point."
pub trait HitTest {
    fn region_at(&self, point: Point) -> Option<Region>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecorderState {
    Idle,
    Drawing,
    Connected,
}

/// Transient state of one drag-to-draw interaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureSession {
    pub active: bool,
    /// Last smoothed point; the next segment starts here
    pub origin: Option<Point>,
    pub path: Path,
    /// Released over the actor's own target
    pub connected: bool,
}

/// Captures one actor's drag gesture into a smoothed polyline.
#[derive(Clone, Debug)]
pub struct GesturePathRecorder {
    actor: ActorId,
    target_rest: Point,
    boundary: Option<Rect>,
    smooth_factor: f64,
    session: GestureSession,
    draggable: bool,
    trace: Vec<Segment>,
    gestures_started: u32,
}

impl GesturePathRecorder {
    pub fn new(actor: ActorId, target_rest: Point, smooth_factor: f64) -> Self {
        Self {
            actor,
            target_rest,
            boundary: None,
            smooth_factor,
            session: GestureSession::default(),
            draggable: true,
            trace: Vec::new(),
            gestures_started: 0,
        }
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn state(&self) -> RecorderState {
        if self.session.active {
            RecorderState::Drawing
        } else if self.session.connected {
            RecorderState::Connected
        } else {
            RecorderState::Idle
        }
    }

    pub fn is_connected(&self) -> bool {
        self.session.connected
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn session(&self) -> &GestureSession {
        &self.session
    }

    pub fn path(&self) -> &[Point] {
        &self.session.path
    }

    pub(crate) fn path_mut(&mut self) -> &mut Path {
        &mut self.session.path
    }

    /// Hand the recorded path forward; the session keeps an empty one
    pub(crate) fn take_path(&mut self) -> Path {
        std::mem::take(&mut self.session.path)
    }

    /// Segments drawn so far, for the renderer
    pub fn trace(&self) -> &[Segment] {
        &self.trace
    }

    pub fn target_rest(&self) -> Point {
        self.target_rest
    }

    pub fn set_target_rest(&mut self, point: Point) {
        self.target_rest = point;
    }

    /// Drawing is only accepted inside this rectangle. Until one is set,
    /// nothing is drawable.
    pub fn set_boundary(&mut self, boundary: Rect) {
        self.boundary = Some(boundary);
    }

    /// Start a gesture if the pointer went down on this recorder's actor.
    pub fn pointer_down(&mut self, point: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) -> bool {
        if !self.draggable || self.session.active {
            return false;
        }
        if hits.region_at(point) != Some(Region::Actor(self.actor)) {
            return false;
        }

        if self.session.connected {
            // redrawing over a kept path
            self.clear_trace(sink);
        }

        self.session = GestureSession {
            active: true,
            origin: Some(point),
            path: vec![point],
            connected: false,
        };

        let first = self.gestures_started == 0;
        self.gestures_started += 1;
        tracing::debug!(actor = self.actor.0, x = point.x, y = point.y, first, "drag started");
        sink.emit(DuelSignal::DragStarted { actor: self.actor, first });
        true
    }

    /// Append a smoothed point. Returns false when the move is rejected.
    ///
    /// Moves outside the boundary, or over another interactive region than
    /// this actor, pause drawing without ending the gesture.
    pub fn pointer_move(&mut self, raw: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) -> bool {
        if !self.session.active {
            return false;
        }
        let Some(origin) = self.session.origin else {
            return false;
        };
        if !self.boundary.is_some_and(|b| b.contains(raw)) {
            return false;
        }
        match hits.region_at(raw) {
            None => {}
            Some(Region::Actor(id)) if id == self.actor => {}
            Some(_) => return false,
        }

        let smoothed = origin.lerp(raw, self.smooth_factor);
        let segment = Segment::new(origin, smoothed);
        self.trace.push(segment);
        self.session.path.push(smoothed);
        self.session.origin = Some(smoothed);
        sink.emit(DuelSignal::TraceSegment { actor: self.actor, segment });
        true
    }

    /// Finish the gesture. Connects when released over this actor's target,
    /// otherwise discards the path.
    pub fn pointer_up(&mut self, point: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) -> bool {
        if !self.session.active {
            return false;
        }
        let over_target = hits.region_at(point) == Some(Region::Target(self.actor));
        if !over_target || self.session.path.is_empty() {
            self.discard(sink);
            return false;
        }

        self.session.path.push(self.target_rest);
        self.session.active = false;
        self.session.origin = None;
        self.session.connected = true;
        self.draggable = false;
        tracing::debug!(actor = self.actor.0, points = self.session.path.len(), "gesture connected");
        true
    }

    pub fn pointer_up_outside(&mut self, sink: &mut dyn SignalSink) {
        if self.session.active {
            self.discard(sink);
        }
    }

    /// Re-enable dragging while keeping a connected path
    pub fn unlock(&mut self) {
        self.draggable = true;
    }

    /// Back to a fresh idle recorder with dragging enabled
    pub fn reset(&mut self, sink: &mut dyn SignalSink) {
        self.clear_trace(sink);
        self.session = GestureSession::default();
        self.draggable = true;
    }

    fn discard(&mut self, sink: &mut dyn SignalSink) {
        tracing::debug!(actor = self.actor.0, points = self.session.path.len(), "gesture discarded");
        self.session.active = false;
        self.session.origin = None;
        self.session.path.clear();
        self.clear_trace(sink);
    }

    fn clear_trace(&mut self, sink: &mut dyn SignalSink) {
        self.trace.clear();
        sink.emit(DuelSignal::TraceCleared { actor: self.actor });
    }
}
