use serde::{Deserialize, Serialize};

use crate::config::DuelConfig;
use crate::error::ConfigError;
use crate::geometry::{Point, Rect, Size};
use crate::intersect;
use crate::recorder::{GesturePathRecorder, HitTest};
use crate::signal::{ActorId, DuelSignal, SignalSink};
use crate::trajectory::{Pose, TrajectoryPlayer};

/// Setup data for one duel slot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorSpec {
    pub home: Pose,
    pub size: Size,
    pub target: Point,
}

/// A movable entity with its own recorder and player.
#[derive(Clone, Debug)]
pub struct Actor {
    id: ActorId,
    pose: Pose,
    home: Pose,
    size: Size,
    recorder: GesturePathRecorder,
    player: TrajectoryPlayer,
}

impl Actor {
    fn new(id: ActorId, spec: ActorSpec, config: &DuelConfig) -> Self {
        Self {
            id,
            pose: spec.home,
            home: spec.home,
            size: spec.size,
            recorder: GesturePathRecorder::new(id, spec.target, config.smooth_factor),
            player: TrajectoryPlayer::new(config.turn_gain, config.frames_per_second),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn recorder(&self) -> &GesturePathRecorder {
        &self.recorder
    }

    pub fn player(&self) -> &TrajectoryPlayer {
        &self.player
    }

    /// Bounding-circle radius used by the proximity test
    pub fn collision_radius(&self, factor: f64) -> f64 {
        self.size.max_side() * factor
    }

    fn reset(&mut self, sink: &mut dyn SignalSink) {
        self.recorder.reset(sink);
        self.player.clear();
        self.pose = self.home;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelPhase {
    AwaitingGestures,
    Resolving,
    Playing,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub attempt_count: u32,
    pub max_attempts: u32,
    pub phase: DuelPhase,
}

/// How an attempt ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub attempt: u32,
    pub final_attempt: bool,
    pub frames: u32,
}

/// Frame clock handed to the coordinator.
pub trait TickSource {
    /// Delta of the next frame in baseline frames, or `None` when the clock stops
    fn next_delta(&mut self) -> Option<f64>;
}

/// `remaining` frames of a constant delta
#[derive(Clone, Copy, Debug)]
pub struct FixedTicks {
    pub delta: f64,
    pub remaining: u32,
}

impl FixedTicks {
    pub fn new(delta: f64, remaining: u32) -> Self {
        Self { delta, remaining }
    }
}

impl TickSource for FixedTicks {
    fn next_delta(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.delta)
    }
}

/// Runs a duel: two gestures, path resolution, playback, settlement, repeated
/// up to the configured number of attempts.
#[derive(Clone, Debug)]
pub struct DuelCoordinator {
    config: DuelConfig,
    actors: [Actor; 2],
    state: DuelState,
    frame_callback_registered: bool,
    frames: u32,
    hint_emitted: bool,
}

impl DuelCoordinator {
    pub fn new(config: DuelConfig, specs: [ActorSpec; 2]) -> Result<Self, ConfigError> {
        config.validate()?;
        let [a, b] = specs;
        Ok(Self {
            actors: [Actor::new(ActorId(0), a, &config), Actor::new(ActorId(1), b, &config)],
            state: DuelState {
                attempt_count: 0,
                max_attempts: config.max_attempts,
                phase: DuelPhase::AwaitingGestures,
            },
            config,
            frame_callback_registered: false,
            frames: 0,
            hint_emitted: false,
        })
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    pub fn state(&self) -> DuelState {
        self.state
    }

    pub fn phase(&self) -> DuelPhase {
        self.state.phase
    }

    pub fn attempt_count(&self) -> u32 {
        self.state.attempt_count
    }

    /// All attempts used; no further input is processed
    pub fn is_finished(&self) -> bool {
        self.state.attempt_count >= self.state.max_attempts
    }

    pub fn frame_callback_registered(&self) -> bool {
        self.frame_callback_registered
    }

    pub fn actors(&self) -> &[Actor; 2] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    /// Point the tutorial hint at the first actor's target, once, before any drag.
    pub fn begin(&mut self, sink: &mut dyn SignalSink) {
        if self.hint_emitted {
            return;
        }
        self.hint_emitted = true;
        sink.emit(DuelSignal::HintTarget { point: self.actors[0].recorder.target_rest() });
    }

    /// Push a recomputed drawable boundary into both recorders
    pub fn set_boundary(&mut self, boundary: Rect) {
        for actor in &mut self.actors {
            actor.recorder.set_boundary(boundary);
        }
    }

    /// Move an actor's home pose and drop target after a relayout.
    ///
    /// Only applies between attempts; a playing actor keeps its pose.
    pub fn relayout(&mut self, specs: [ActorSpec; 2]) {
        let accepting = self.accepts_input();
        for (actor, spec) in self.actors.iter_mut().zip(specs) {
            actor.home = spec.home;
            actor.size = spec.size;
            actor.recorder.set_target_rest(spec.target);
            if accepting && !actor.recorder.session().active {
                actor.pose = spec.home;
            }
        }
    }

    fn accepts_input(&self) -> bool {
        self.state.phase == DuelPhase::AwaitingGestures && !self.is_finished()
    }

    pub fn pointer_down(&mut self, point: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) {
        // one pointer drives one actor
        if !self.accepts_input() || self.actors.iter().any(|a| a.recorder.session().active) {
            return;
        }
        for actor in &mut self.actors {
            if actor.recorder.pointer_down(point, hits, sink) {
                break;
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) {
        if !self.accepts_input() {
            return;
        }
        for actor in &mut self.actors {
            actor.recorder.pointer_move(point, hits, sink);
        }
    }

    pub fn pointer_up(&mut self, point: Point, hits: &dyn HitTest, sink: &mut dyn SignalSink) {
        if !self.accepts_input() {
            return;
        }
        let mut connected = false;
        for actor in &mut self.actors {
            connected |= actor.recorder.pointer_up(point, hits, sink);
        }
        if connected {
            self.check_connected(sink);
        }
    }

    pub fn pointer_up_outside(&mut self, sink: &mut dyn SignalSink) {
        if !self.accepts_input() {
            return;
        }
        for actor in &mut self.actors {
            actor.recorder.pointer_up_outside(sink);
        }
    }

    fn check_connected(&mut self, sink: &mut dyn SignalSink) {
        if !self.actors.iter().all(|a| a.recorder.is_connected()) {
            return;
        }

        self.state.phase = DuelPhase::Resolving;
        let [a, b] = &mut self.actors;
        // Targets sharing a rest point: the untouched paths already end on the meeting point
        let met = intersect::resolve(a.recorder.path_mut(), b.recorder.path_mut())
            || intersect::ends_meet(a.recorder.path(), b.recorder.path());
        if !met {
            // Paths stay drawn; either actor may be redrawn.
            a.recorder.unlock();
            b.recorder.unlock();
            self.state.phase = DuelPhase::AwaitingGestures;
            tracing::debug!("connected paths do not cross, awaiting redraw");
            sink.emit(DuelSignal::PathsDisjoint);
            return;
        }

        let arrive = self.config.arrive_seconds;
        for actor in &mut self.actors {
            let path = actor.recorder.take_path();
            if let Some(first) = path.first() {
                actor.pose.position = *first;
            }
            actor.player.load(path);
            actor.player.prepare_speed(arrive);
        }

        self.frames = 0;
        self.frame_callback_registered = true;
        self.state.phase = DuelPhase::Playing;
        let attempt = self.state.attempt_count + 1;
        tracing::debug!(
            attempt,
            speed_a = self.actors[0].player.speed(),
            speed_b = self.actors[1].player.speed(),
            "playback started"
        );
        sink.emit(DuelSignal::PlaybackStarted { attempt });
    }

    /// Bounding circles overlap
    pub fn actors_touching(&self) -> bool {
        let [a, b] = &self.actors;
        let factor = self.config.collision_radius_factor;
        let distance = a.pose.position.distance_to(b.pose.position);
        distance <= a.collision_radius(factor) + b.collision_radius(factor)
    }

    /// One frame of playback. Both actors move before contact is checked.
    pub fn tick(&mut self, delta: f64, sink: &mut dyn SignalSink) -> Option<Settlement> {
        if !self.frame_callback_registered {
            return None;
        }
        self.frames = self.frames.saturating_add(1);
        for actor in &mut self.actors {
            actor.player.advance(&mut actor.pose, delta);
        }

        // Exhausted paths both end on the crossing point, so the actors rest on each other.
        let exhausted = self.actors.iter().all(|a| a.player.is_finished());
        if self.actors_touching() || exhausted {
            return Some(self.settle(sink));
        }
        None
    }

    /// Drive playback from a tick source until it settles or the source stops.
    pub fn run(&mut self, ticks: &mut dyn TickSource, sink: &mut dyn SignalSink) -> Option<Settlement> {
        while self.frame_callback_registered {
            let delta = ticks.next_delta()?;
            if let Some(settlement) = self.tick(delta, sink) {
                return Some(settlement);
            }
        }
        None
    }

    fn settle(&mut self, sink: &mut dyn SignalSink) -> Settlement {
        self.frame_callback_registered = false;
        self.state.phase = DuelPhase::Settled;
        for actor in &mut self.actors {
            actor.reset(sink);
        }
        self.state.attempt_count += 1;

        let attempt = self.state.attempt_count;
        let final_attempt = attempt == self.state.max_attempts;
        tracing::debug!(attempt, final_attempt, frames = self.frames, "attempt settled");
        if final_attempt {
            sink.emit(DuelSignal::SequenceEnded { attempts: attempt });
        } else {
            sink.emit(DuelSignal::Collision { attempt });
            self.state.phase = DuelPhase::AwaitingGestures;
        }

        Settlement { attempt, final_attempt, frames: self.frames }
    }
}
