use serde::{Deserialize, Serialize};

use crate::duel::ActorSpec;
use crate::geometry::{Point, Rect, Size};
use crate::recorder::{HitTest, Region};
use crate::signal::ActorId;
use crate::trajectory::Pose;

/// Where one actor and its drop target sit on the design canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorPlacement {
    pub position: Point,
    #[serde(default)]
    pub heading: f64,
    pub size: Size,
    /// Resting position of the drop target; the final waypoint of a connected path
    pub target: Point,
    pub target_size: Size,
}

impl ActorPlacement {
    pub fn body(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    pub fn target_area(&self) -> Rect {
        Rect::centered(self.target, self.target_size)
    }
}

/// Rectangular scene: two actors with targets, static obstacles, and the
/// drawable boundary.
///
/// Hit testing follows draw order: actor bodies over targets over obstacles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    pub actors: [ActorPlacement; 2],
    pub boundary: Rect,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
}

impl SceneLayout {
    pub fn actor_specs(&self) -> [ActorSpec; 2] {
        self.actors.map(|a| ActorSpec {
            home: Pose::new(a.position, a.heading),
            size: a.size,
            target: a.target,
        })
    }
}

impl HitTest for SceneLayout {
    fn region_at(&self, point: Point) -> Option<Region> {
        let id = |i: usize| ActorId(i as u32);
        if let Some(i) = self.actors.iter().position(|a| a.body().contains(point)) {
            return Some(Region::Actor(id(i)));
        }
        if let Some(i) = self.actors.iter().position(|a| a.target_area().contains(point)) {
            return Some(Region::Target(id(i)));
        }
        self.obstacles
            .iter()
            .position(|r| r.contains(point))
            .map(|k| Region::Other(k as u32))
    }
}
