use thiserror::Error;

use crate::screen::ScreenClass;

/// Rejected tunables in a [`DuelConfig`](crate::config::DuelConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("smooth factor must be in (0, 1], got {0}")]
    SmoothFactor(f64),
    #[error("arrive seconds must be positive and finite, got {0}")]
    ArriveSeconds(f64),
    #[error("frames per second must be positive and finite, got {0}")]
    FramesPerSecond(f64),
    #[error("max attempts must be at least 1")]
    MaxAttempts,
    #[error("collision radius factor must be non-negative and finite, got {0}")]
    CollisionRadiusFactor(f64),
    #[error("turn gain must be non-negative and finite, got {0}")]
    TurnGain(f64),
}

/// Failures while classifying a viewport.
///
/// None of these are fatal: [`ScreenTracker`](crate::screen::ScreenTracker)
/// logs them and keeps its previous profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScreenError {
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
    #[error("unknown screen class: {0:?}")]
    UnknownScreenClass(ScreenClass),
    #[error("screen classifier has no ratio buckets")]
    EmptyClassTable,
}
