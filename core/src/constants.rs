// Engine tuning constants.
// These are the defaults for DuelConfig; layouts and replay logs may override them.
// All distances are in design-canvas units, all deltas in baseline frames.

use core::f64::consts::FRAC_PI_2;

/// Exponential smoothing toward the raw pointer while drawing
pub const SMOOTH_FACTOR: f64 = 0.1;

/// Seconds each actor takes to travel its truncated path
pub const ARRIVE_SECONDS: f64 = 3.0;

/// Attempts in one duel before the sequence ends
pub const MAX_ATTEMPTS: u32 = 3;

/// Collision radius as a fraction of an actor's larger dimension
pub const COLLISION_RADIUS_FACTOR: f64 = 0.45;

/// Heading turn rate per baseline frame
pub const TURN_GAIN: f64 = 0.15;

/// Frame rate the speed normalisation assumes
pub const FRAMES_PER_SECOND: f64 = 60.0;

/// Sprites face "up" at heading zero, so travel direction is rotated a quarter turn
pub const HEADING_OFFSET: f64 = FRAC_PI_2;

/// Two paths whose last points are closer than this already meet there
pub const MEET_EPSILON: f64 = 1e-9;

/// Aspect-ratio bucket ceilings (min side / max side), ascending
pub const RATIO_TALL_MOBILE: f64 = 0.58;
pub const RATIO_CLASSIC_MOBILE: f64 = 0.68;
pub const RATIO_FOLD_INNER: f64 = 0.78;
pub const RATIO_TABLET: f64 = 0.95;

/// Supported gesture log version
pub const LOG_VERSION: u32 = 1;

/// Maximum number of events accepted in one gesture log
pub const MAX_EVENTS: usize = 100_000;

/// Maximum `count` of one frames event (ten minutes at the baseline rate)
pub const MAX_FRAMES_PER_EVENT: u32 = 36_000;
