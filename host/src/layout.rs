use duel_core::{ActorPlacement, ClassValues, Point, Rect, SceneLayout, ScreenClass, ScreenTracker, Size};

/// Hand-authored scenes per screen class and orientation.
#[derive(Clone, Debug, Default)]
pub struct ScreenLayouts {
    pub portrait: ClassValues<SceneLayout>,
    pub landscape: ClassValues<SceneLayout>,
}

const CAR: Size = Size::new(96.0, 176.0);
const PARKED_CAR: Size = Size::new(96.0, 176.0);

fn car(x: f64, y: f64, slot_x: f64, slot_y: f64, slot: Size) -> ActorPlacement {
    ActorPlacement {
        position: Point::new(x, y),
        heading: 0.0,
        size: CAR,
        target: Point::new(slot_x, slot_y),
        target_size: slot,
    }
}

impl ScreenLayouts {
    /// Two-slot parking lot: the red car parks in the right-hand slot and the
    /// yellow car in the left-hand one, so straight drags cross.
    pub fn parking_lot() -> Self {
        // 1080x1920 canvas
        let portrait = SceneLayout {
            actors: [
                car(250.0, 1250.0, 665.0, 700.0, Size::new(240.0, 400.0)),
                car(650.0, 1250.0, 412.0, 700.0, Size::new(240.0, 400.0)),
            ],
            boundary: Rect::new(0.0, 1920.0 - 1345.0, 1080.0, 1920.0 - 975.0),
            obstacles: vec![
                Rect::centered(Point::new(165.0, 700.0), PARKED_CAR),
                Rect::centered(Point::new(915.0, 700.0), PARKED_CAR),
            ],
        };

        // 1920x1080 canvas
        let landscape = SceneLayout {
            actors: [
                car(500.0, 750.0, 1115.0, 180.0, Size::new(270.0, 400.0)),
                car(1250.0, 750.0, 815.0, 180.0, Size::new(270.0, 400.0)),
            ],
            boundary: Rect::new(0.0, 60.0, 1920.0, 1080.0 - 115.0),
            obstacles: vec![
                Rect::centered(Point::new(515.0, 180.0), PARKED_CAR),
                Rect::centered(Point::new(1415.0, 180.0), PARKED_CAR),
            ],
        };

        Self {
            portrait: ClassValues::new().with(ScreenClass::TallMobile, portrait),
            landscape: ClassValues::new().with(ScreenClass::TallMobile, landscape),
        }
    }

    /// Scene for the tracker's current class and orientation
    pub fn initial(&self, tracker: &ScreenTracker) -> Option<SceneLayout> {
        let profile = tracker.profile()?;
        let table = if profile.is_portrait() { &self.portrait } else { &self.landscape };
        tracker.value_for(table).cloned()
    }

    /// Overwrite `layout` after a resize. Returns false, leaving the layout
    /// as it was, when nothing is authored for the new screen.
    pub fn apply(&self, tracker: &ScreenTracker, layout: &mut SceneLayout) -> bool {
        // at most one of these matches the current orientation
        let portrait = tracker.apply_portrait(layout, &self.portrait);
        let landscape = tracker.apply_landscape(layout, &self.landscape);
        portrait || landscape
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{HitTest, Region, ActorId};

    #[test]
    fn tall_mobile_has_both_orientations() {
        let layouts = ScreenLayouts::parking_lot();
        let mut tracker = ScreenTracker::default();

        tracker.resize(1080.0, 1920.0);
        let portrait = layouts.initial(&tracker).unwrap();
        assert_eq!(portrait.boundary, Rect::new(0.0, 575.0, 1080.0, 945.0));

        tracker.resize(1920.0, 1080.0);
        let mut layout = portrait.clone();
        assert!(layouts.apply(&tracker, &mut layout));
        assert_eq!(layout.boundary, Rect::new(0.0, 60.0, 1920.0, 965.0));
    }

    #[test]
    fn unauthored_class_keeps_previous_layout() {
        let layouts = ScreenLayouts::parking_lot();
        let mut tracker = ScreenTracker::default();
        tracker.resize(1080.0, 1920.0);
        let mut layout = layouts.initial(&tracker).unwrap();
        let before = layout.clone();

        tracker.resize(1000.0, 1000.0);
        assert!(layouts.initial(&tracker).is_none());
        assert!(!layouts.apply(&tracker, &mut layout));
        assert_eq!(layout, before);
    }

    #[test]
    fn default_layouts_are_empty() {
        let mut tracker = ScreenTracker::default();
        tracker.resize(1080.0, 1920.0);
        assert!(ScreenLayouts::default().initial(&tracker).is_none());
    }

    #[test]
    fn parked_cars_block_drawing() {
        let layout = ScreenLayouts::parking_lot().portrait.get(ScreenClass::TallMobile).cloned().unwrap();
        assert_eq!(layout.region_at(Point::new(165.0, 700.0)), Some(Region::Other(0)));
        assert_eq!(layout.region_at(Point::new(665.0, 700.0)), Some(Region::Target(ActorId(0))));
        assert_eq!(layout.region_at(Point::new(650.0, 1250.0)), Some(Region::Actor(ActorId(1))));
    }
}
