use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::DuelConfig;
use crate::scene::SceneLayout;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

fn one_frame() -> f64 {
    1.0
}

/// One recorded input. Pointer positions are viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Resize { width: f64, height: f64 },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    UpOutside,
    /// `count` animation frames, each `delta` baseline frames long
    Frames {
        count: u32,
        #[serde(default = "one_frame")]
        delta: f64,
    },
}

impl InputEvent {
    fn tag(&self) -> u8 {
        match self {
            InputEvent::Resize { .. } => 0,
            InputEvent::Down { .. } => 1,
            InputEvent::Move { .. } => 2,
            InputEvent::Up { .. } => 3,
            InputEvent::UpOutside => 4,
            InputEvent::Frames { .. } => 5,
        }
    }
}

/// Recorded gesture session for deterministic replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GestureLog {
    pub v: u32,
    pub viewport: Viewport,
    #[serde(default)]
    pub config: DuelConfig,
    /// Fixed scene; when absent the replay host picks one per screen class
    #[serde(default)]
    pub layout: Option<SceneLayout>,
    pub events: Vec<InputEvent>,
}

/// SHA-256 over the viewport and events.
///
/// Binds a replay report to the exact input it was produced from. Config and
/// layout are excluded so the same gestures hash the same under retuning.
pub fn compute_log_hash(log: &GestureLog) -> [u8; 32] {
    let mut h = Sha256::new();

    // Version prefix: 9 bytes, then viewport and events as tag byte + LE f64 fields
    let mut buf = Vec::with_capacity(9 + 16 + log.events.len() * 17);
    buf.extend_from_slice(b"DUELLOGv1");
    buf.extend_from_slice(&log.viewport.width.to_le_bytes());
    buf.extend_from_slice(&log.viewport.height.to_le_bytes());

    for ev in log.events.iter() {
        buf.push(ev.tag());
        match *ev {
            InputEvent::Resize { width: a, height: b }
            | InputEvent::Down { x: a, y: b }
            | InputEvent::Move { x: a, y: b }
            | InputEvent::Up { x: a, y: b } => {
                buf.extend_from_slice(&a.to_le_bytes());
                buf.extend_from_slice(&b.to_le_bytes());
            }
            InputEvent::UpOutside => {}
            InputEvent::Frames { count, delta } => {
                buf.extend_from_slice(&count.to_le_bytes());
                buf.extend_from_slice(&delta.to_le_bytes());
            }
        }
    }

    h.update(&buf);

    let out = h.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}
