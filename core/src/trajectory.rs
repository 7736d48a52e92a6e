use serde::{Deserialize, Serialize};

use crate::constants::HEADING_OFFSET;
use crate::geometry::{path_length, wrap_angle, Path, Point};

/// Position and heading (radians) of an actor
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point,
    pub heading: f64,
}

impl Pose {
    pub const fn new(position: Point, heading: f64) -> Self {
        Self { position, heading }
    }
}

/// Moves a pose along a polyline at constant speed.
///
/// `delta` is measured in baseline frames (1.0 is one frame at the configured
/// frame rate), so speed is in design units per baseline frame.
#[derive(Clone, Debug)]
pub struct TrajectoryPlayer {
    path: Path,
    speed: f64,
    index: usize,
    prepared: bool,
    turn_gain: f64,
    frames_per_second: f64,
}

impl TrajectoryPlayer {
    pub fn new(turn_gain: f64, frames_per_second: f64) -> Self {
        Self {
            path: Path::new(),
            speed: 0.0,
            index: 0,
            prepared: false,
            turn_gain,
            frames_per_second,
        }
    }

    pub fn load(&mut self, path: Path) {
        self.path = path;
        self.index = 0;
        self.speed = 0.0;
        self.prepared = false;
    }

    pub fn clear(&mut self) {
        self.load(Path::new());
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Next waypoint index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pick the speed that covers the whole path in `arrive_seconds`.
    pub fn prepare_speed(&mut self, arrive_seconds: f64) {
        let frames = arrive_seconds * self.frames_per_second;
        let total = path_length(&self.path);
        self.speed = if frames > 0.0 { total / frames } else { 0.0 };
        self.index = 0;
        self.prepared = true;
    }

    /// Unprepared players and exhausted paths are finished
    pub fn is_finished(&self) -> bool {
        !self.prepared || self.index >= self.path.len()
    }

    /// Advance one frame. Returns false once the path is exhausted.
    pub fn advance(&mut self, pose: &mut Pose, delta: f64) -> bool {
        if self.is_finished() {
            return false;
        }
        if !(delta > 0.0) {
            return true;
        }

        let target = self.path[self.index];
        let dx = target.x - pose.position.x;
        let dy = target.y - pose.position.y;
        let distance = (dx * dx + dy * dy).sqrt();
        let step = self.speed * delta;

        // Snap onto the waypoint instead of overshooting it. A zero speed
        // (zero-length path) walks the waypoints without moving.
        if distance <= step || self.speed <= 0.0 {
            pose.position = target;
            self.index += 1;
            return !self.is_finished();
        }

        let nx = dx / distance;
        let ny = dy / distance;

        let target_heading = dy.atan2(dx) + HEADING_OFFSET;
        let diff = wrap_angle(target_heading - pose.heading);
        pose.heading += diff * self.turn_gain * delta;

        pose.position.x += nx * step;
        pose.position.y += ny * step;
        true
    }
}
