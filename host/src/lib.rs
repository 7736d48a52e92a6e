use duel_core::constants::{LOG_VERSION, MAX_EVENTS, MAX_FRAMES_PER_EVENT};
use duel_core::{
    compute_log_hash, DuelCoordinator, DuelPhase, DuelSignal, FixedTicks, GestureLog, InputEvent, Point,
    ScreenProfile, ScreenTracker, Settlement,
};
use serde::{Deserialize, Serialize};

pub mod layout;

pub use layout::ScreenLayouts;

/// Outcome of replaying a gesture log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplayReport {
    /// Hex SHA-256 of the log's viewport and events
    pub log_hash: String,
    pub events_len: u32,
    /// Screen profile after the last resize
    pub screen: ScreenProfile,
    pub attempts: u32,
    pub finished: bool,
    pub phase: DuelPhase,
    pub settlements: Vec<Settlement>,
    /// Frames the coordinator consumed across all playbacks
    pub frames: u64,
    pub trace_segments: u32,
    /// Every signal except trace segments, in emission order
    pub signals: Vec<DuelSignal>,
}

impl ReplayReport {
    pub fn count(&self, pred: impl Fn(&DuelSignal) -> bool) -> usize {
        self.signals.iter().filter(|s| pred(*s)).count()
    }
}

/// Replay a gesture log against a fresh duel.
///
/// Pointer events are mapped from viewport pixels onto the design canvas
/// through the current screen profile. A log without a fixed layout gets one
/// from `layouts`, and is re-laid out on every resize.
pub fn replay_log(log: &GestureLog, layouts: &ScreenLayouts) -> Result<ReplayReport, Box<dyn std::error::Error>> {
    if log.v != LOG_VERSION {
        return Err(format!("Unsupported log version: {} (expected {})", log.v, LOG_VERSION).into());
    }
    if log.events.len() > MAX_EVENTS {
        return Err(format!("Too many events: {} (max {})", log.events.len(), MAX_EVENTS).into());
    }
    if let Some(count) = log.events.iter().find_map(|ev| match *ev {
        InputEvent::Frames { count, .. } if count > MAX_FRAMES_PER_EVENT => Some(count),
        _ => None,
    }) {
        return Err(format!("Frames event too long: {} (max {})", count, MAX_FRAMES_PER_EVENT).into());
    }
    log.config.validate()?;

    // Fail loudly on a bad initial viewport; later resizes are allowed to be ignored
    let initial = duel_core::classify(log.viewport.width, log.viewport.height)?;
    let mut tracker = ScreenTracker::default();
    tracker.resize(log.viewport.width, log.viewport.height);

    let fixed = log.layout.is_some();
    let mut layout = match &log.layout {
        Some(layout) => layout.clone(),
        None => layouts
            .initial(&tracker)
            .ok_or_else(|| format!("No layout for screen class {:?} ({:?})", initial.screen_class, initial.orientation))?,
    };

    tracing::info!(
        events = log.events.len(),
        class = ?initial.screen_class,
        orientation = ?initial.orientation,
        fixed_layout = fixed,
        "replaying gesture log"
    );

    let mut duel = DuelCoordinator::new(log.config, layout.actor_specs())?;
    duel.set_boundary(layout.boundary);

    let mut signals: Vec<DuelSignal> = Vec::new();
    let mut settlements = Vec::new();
    let mut frames = 0u64;
    duel.begin(&mut signals);

    for (i, ev) in log.events.iter().enumerate() {
        match *ev {
            InputEvent::Resize { width, height } => {
                tracker.resize(width, height);
                if !fixed && layouts.apply(&tracker, &mut layout) {
                    duel.set_boundary(layout.boundary);
                    duel.relayout(layout.actor_specs());
                }
            }
            InputEvent::Down { x, y } => duel.pointer_down(to_design(&tracker, x, y), &layout, &mut signals),
            InputEvent::Move { x, y } => duel.pointer_move(to_design(&tracker, x, y), &layout, &mut signals),
            InputEvent::Up { x, y } => duel.pointer_up(to_design(&tracker, x, y), &layout, &mut signals),
            InputEvent::UpOutside => duel.pointer_up_outside(&mut signals),
            InputEvent::Frames { count, delta } => {
                let mut ticks = FixedTicks::new(delta, count);
                let settlement = duel.run(&mut ticks, &mut signals);
                frames += u64::from(count - ticks.remaining);
                if let Some(settlement) = settlement {
                    tracing::info!(
                        event = i,
                        attempt = settlement.attempt,
                        frames = settlement.frames,
                        final_attempt = settlement.final_attempt,
                        "attempt settled"
                    );
                    settlements.push(settlement);
                }
            }
        }
    }

    let trace_segments = signals
        .iter()
        .filter(|s| matches!(s, DuelSignal::TraceSegment { .. }))
        .count() as u32;
    signals.retain(|s| !matches!(s, DuelSignal::TraceSegment { .. }));

    let screen = tracker.profile().copied().unwrap_or(initial);
    let state = duel.state();

    tracing::info!(
        attempts = state.attempt_count,
        finished = duel.is_finished(),
        frames,
        "replay complete"
    );

    Ok(ReplayReport {
        log_hash: hex::encode(compute_log_hash(log)),
        events_len: log.events.len() as u32,
        screen,
        attempts: state.attempt_count,
        finished: duel.is_finished(),
        phase: state.phase,
        settlements,
        frames,
        trace_segments,
        signals,
    })
}

fn to_design(tracker: &ScreenTracker, x: f64, y: f64) -> Point {
    let screen = Point::new(x, y);
    match tracker.profile() {
        Some(profile) => profile.to_design(screen),
        None => screen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(v: u32, width: f64, height: f64) -> GestureLog {
        serde_json::from_value(serde_json::json!({
            "v": v,
            "viewport": { "width": width, "height": height },
            "events": []
        }))
        .unwrap()
    }

    #[test]
    fn rejects_unknown_version() {
        let err = replay_log(&log(2, 1080.0, 1920.0), &ScreenLayouts::parking_lot()).unwrap_err();
        assert!(err.to_string().contains("Unsupported log version"));
    }

    #[test]
    fn rejects_invalid_viewport() {
        assert!(replay_log(&log(1, 0.0, 1920.0), &ScreenLayouts::parking_lot()).is_err());
    }

    #[test]
    fn unauthored_screen_needs_a_layout() {
        let err = replay_log(&log(1, 1000.0, 1000.0), &ScreenLayouts::parking_lot()).unwrap_err();
        assert!(err.to_string().contains("No layout"));
    }

    #[test]
    fn rejects_overlong_frames_event() {
        let mut long = log(1, 1080.0, 1920.0);
        long.events.push(InputEvent::Frames { count: MAX_FRAMES_PER_EVENT, delta: 0.0 });
        long.events.push(InputEvent::Frames { count: u32::MAX, delta: 0.0 });
        let err = replay_log(&long, &ScreenLayouts::parking_lot()).unwrap_err();
        assert!(err.to_string().contains("Frames event too long"));
    }

    #[test]
    fn empty_log_only_hints() {
        let report = replay_log(&log(1, 1080.0, 1920.0), &ScreenLayouts::parking_lot()).unwrap();
        assert_eq!(report.attempts, 0);
        assert_eq!(report.phase, DuelPhase::AwaitingGestures);
        assert_eq!(report.signals.len(), 1);
        assert!(matches!(report.signals[0], DuelSignal::HintTarget { .. }));
        assert_eq!(report.log_hash.len(), 64);
    }
}
