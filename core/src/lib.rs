//! Gesture-capture, path-intersection and scripted-motion engine for a
//! two-vehicle parking duel, plus the device-adaptive coordinate system.
//!
//! Everything here is synchronous and single-threaded: pointer events and
//! frame ticks are fed in by the host, signals come back out through a
//! [`SignalSink`].

pub mod config;
pub mod constants;
pub mod duel;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod log;
pub mod recorder;
pub mod scene;
pub mod screen;
pub mod signal;
pub mod trajectory;

pub use config::DuelConfig;
pub use duel::{Actor, ActorSpec, DuelCoordinator, DuelPhase, DuelState, FixedTicks, Settlement, TickSource};
pub use error::{ConfigError, ScreenError};
pub use geometry::{Path, Point, Rect, Segment, Size};
pub use intersect::resolve;
pub use log::{compute_log_hash, GestureLog, InputEvent, Viewport};
pub use recorder::{GesturePathRecorder, HitTest, RecorderState, Region};
pub use scene::{ActorPlacement, SceneLayout};
pub use screen::{classify, ClassValues, Orientation, ScreenClass, ScreenProfile, ScreenTracker};
pub use signal::{ActorId, DuelSignal, FnSink, NullSink, SignalSink};
pub use trajectory::{Pose, TrajectoryPlayer};
