//! Device-adaptive coordinate system.
//!
//! A viewport is bucketed into a [`ScreenClass`] by its aspect ratio, each
//! class has a canonical design resolution, and a uniform scale plus
//! centering offset fits that design canvas into the viewport.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ScreenError;
use crate::geometry::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScreenClass {
    TallMobile,
    ClassicMobile,
    FoldInner,
    Tablet,
    UltraWideMobile,
}

impl ScreenClass {
    pub const ALL: [ScreenClass; 5] = [
        ScreenClass::TallMobile,
        ScreenClass::ClassicMobile,
        ScreenClass::FoldInner,
        ScreenClass::Tablet,
        ScreenClass::UltraWideMobile,
    ];

    /// Canonical portrait design resolution
    pub fn design_size(self) -> Size {
        match self {
            ScreenClass::TallMobile => Size::new(1080.0, 1920.0),
            ScreenClass::ClassicMobile => Size::new(720.0, 1280.0),
            ScreenClass::FoldInner => Size::new(1812.0, 2176.0),
            ScreenClass::Tablet => Size::new(1536.0, 2048.0),
            ScreenClass::UltraWideMobile => Size::new(1280.0, 720.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Portrait only when strictly taller than wide
    pub fn of(width: f64, height: f64) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Classification and fit transform for one viewport size.
///
/// Recomputed wholesale on every resize.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenProfile {
    pub screen_class: ScreenClass,
    pub orientation: Orientation,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub design_width: f64,
    pub design_height: f64,
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ScreenProfile {
    /// Viewport pixel to design-canvas point
    pub fn to_design(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        )
    }

    /// Design-canvas point to viewport pixel
    pub fn to_screen(&self, design: Point) -> Point {
        Point::new(
            design.x * self.scale + self.offset_x,
            design.y * self.scale + self.offset_y,
        )
    }

    pub fn is_portrait(&self) -> bool {
        self.orientation == Orientation::Portrait
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioBucket {
    /// Inclusive upper bound on min side / max side
    pub max_ratio: f64,
    pub class: ScreenClass,
}

/// Ratio table plus per-class design resolutions.
#[derive(Clone, Debug)]
pub struct ScreenClassifier {
    buckets: Vec<RatioBucket>,
    designs: BTreeMap<ScreenClass, Size>,
}

impl Default for ScreenClassifier {
    fn default() -> Self {
        let buckets = vec![
            RatioBucket { max_ratio: RATIO_TALL_MOBILE, class: ScreenClass::TallMobile },
            RatioBucket { max_ratio: RATIO_CLASSIC_MOBILE, class: ScreenClass::ClassicMobile },
            RatioBucket { max_ratio: RATIO_FOLD_INNER, class: ScreenClass::FoldInner },
            RatioBucket { max_ratio: RATIO_TABLET, class: ScreenClass::Tablet },
            RatioBucket { max_ratio: f64::INFINITY, class: ScreenClass::UltraWideMobile },
        ];
        let designs = ScreenClass::ALL.iter().map(|c| (*c, c.design_size())).collect();
        Self { buckets, designs }
    }
}

impl ScreenClassifier {
    /// Classifier over a custom bucket table. Buckets are sorted ascending;
    /// ratios above the last ceiling fall into the last bucket.
    pub fn with_buckets(mut buckets: Vec<RatioBucket>, designs: BTreeMap<ScreenClass, Size>) -> Self {
        buckets.sort_by(|a, b| a.max_ratio.total_cmp(&b.max_ratio));
        Self { buckets, designs }
    }

    pub fn class_for_ratio(&self, ratio: f64) -> Option<ScreenClass> {
        self.buckets
            .iter()
            .find(|b| ratio <= b.max_ratio)
            .or_else(|| self.buckets.last())
            .map(|b| b.class)
    }

    pub fn classify(&self, width: f64, height: f64) -> Result<ScreenProfile, ScreenError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ScreenError::InvalidViewport { width, height });
        }

        let orientation = Orientation::of(width, height);
        let ratio = width.min(height) / width.max(height);
        let screen_class = self.class_for_ratio(ratio).ok_or(ScreenError::EmptyClassTable)?;
        let design = self
            .designs
            .get(&screen_class)
            .copied()
            .ok_or(ScreenError::UnknownScreenClass(screen_class))?;

        let (design_width, design_height) = match orientation {
            Orientation::Portrait => (design.width, design.height),
            Orientation::Landscape => (design.height, design.width),
        };

        let scale = (width / design_width).min(height / design_height);
        let offset_x = (width - design_width * scale) / 2.0;
        let offset_y = (height - design_height * scale) / 2.0;

        Ok(ScreenProfile {
            screen_class,
            orientation,
            viewport_width: width,
            viewport_height: height,
            design_width,
            design_height,
            scale,
            offset_x,
            offset_y,
        })
    }
}

/// Classify against the standard table
pub fn classify(width: f64, height: f64) -> Result<ScreenProfile, ScreenError> {
    ScreenClassifier::default().classify(width, height)
}

/// Per-screen-class values for one layout property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassValues<T>(BTreeMap<ScreenClass, T>);

impl<T> Default for ClassValues<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

impl<T> ClassValues<T> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, class: ScreenClass, value: T) -> Self {
        self.0.insert(class, value);
        self
    }

    pub fn get(&self, class: ScreenClass) -> Option<&T> {
        self.0.get(&class)
    }
}

impl<T: Clone> ClassValues<T> {
    pub fn uniform(value: T) -> Self {
        Self(ScreenClass::ALL.iter().map(|c| (*c, value.clone())).collect())
    }
}

/// Holds the current profile and answers layout lookups against it.
#[derive(Clone, Debug, Default)]
pub struct ScreenTracker {
    classifier: ScreenClassifier,
    profile: Option<ScreenProfile>,
}

impl ScreenTracker {
    pub fn new(classifier: ScreenClassifier) -> Self {
        Self { classifier, profile: None }
    }

    pub fn profile(&self) -> Option<&ScreenProfile> {
        self.profile.as_ref()
    }

    /// Reclassify after a viewport change.
    ///
    /// A classification failure is logged and the previous profile kept.
    pub fn resize(&mut self, width: f64, height: f64) -> Option<&ScreenProfile> {
        match self.classifier.classify(width, height) {
            Ok(profile) => {
                tracing::debug!(
                    class = ?profile.screen_class,
                    orientation = ?profile.orientation,
                    scale = profile.scale,
                    "screen profile updated"
                );
                self.profile = Some(profile);
            }
            Err(e) => {
                tracing::warn!("ignoring resize to {}x{}: {}", width, height, e);
            }
        }
        self.profile.as_ref()
    }

    /// Value for the current screen class, if any
    pub fn value_for<'a, T>(&self, values: &'a ClassValues<T>) -> Option<&'a T> {
        let profile = self.profile.as_ref()?;
        values.get(profile.screen_class)
    }

    /// Write the current class's value into `slot`; untouched when absent
    pub fn apply<T: Clone>(&self, slot: &mut T, values: &ClassValues<T>) -> bool {
        match self.value_for(values) {
            Some(v) => {
                *slot = v.clone();
                true
            }
            None => false,
        }
    }

    /// [`apply`](Self::apply) only while in portrait
    pub fn apply_portrait<T: Clone>(&self, slot: &mut T, values: &ClassValues<T>) -> bool {
        self.apply_when(Orientation::Portrait, slot, values)
    }

    /// [`apply`](Self::apply) only while in landscape
    pub fn apply_landscape<T: Clone>(&self, slot: &mut T, values: &ClassValues<T>) -> bool {
        self.apply_when(Orientation::Landscape, slot, values)
    }

    fn apply_when<T: Clone>(&self, orientation: Orientation, slot: &mut T, values: &ClassValues<T>) -> bool {
        match self.profile {
            Some(p) if p.orientation == orientation => self.apply(slot, values),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn narrow_portrait_is_tall_mobile() {
        let p = classify(400.0, 800.0).unwrap();
        assert_eq!(p.screen_class, ScreenClass::TallMobile);
        assert_eq!(p.orientation, Orientation::Portrait);
        assert_eq!((p.design_width, p.design_height), (1080.0, 1920.0));
    }

    #[test]
    fn landscape_swaps_design_size() {
        let p = classify(800.0, 400.0).unwrap();
        assert_eq!(p.screen_class, ScreenClass::TallMobile);
        assert_eq!(p.orientation, Orientation::Landscape);
        assert_eq!((p.design_width, p.design_height), (1920.0, 1080.0));
    }

    #[test]
    fn bucket_edges_are_inclusive() {
        let c = ScreenClassifier::default();
        assert_eq!(c.class_for_ratio(0.58), Some(ScreenClass::TallMobile));
        assert_eq!(c.class_for_ratio(0.6), Some(ScreenClass::ClassicMobile));
        assert_eq!(c.class_for_ratio(0.75), Some(ScreenClass::FoldInner));
        assert_eq!(c.class_for_ratio(0.95), Some(ScreenClass::Tablet));
        assert_eq!(c.class_for_ratio(1.0), Some(ScreenClass::UltraWideMobile));
    }

    #[test]
    fn square_viewport_is_landscape() {
        let p = classify(500.0, 500.0).unwrap();
        assert_eq!(p.orientation, Orientation::Landscape);
        assert_eq!(p.screen_class, ScreenClass::UltraWideMobile);
        // landscape swap of (1280, 720)
        assert_eq!((p.design_width, p.design_height), (720.0, 1280.0));
    }

    #[test]
    fn fit_is_uniform_and_centered() {
        // 600x1200 against 1080x1920: width limits the scale, so the canvas is letterboxed
        let p = classify(600.0, 1200.0).unwrap();
        let expected = (600.0f64 / 1080.0).min(1200.0 / 1920.0);
        assert!((p.scale - expected).abs() < EPS);
        assert!((p.offset_x - (600.0 - 1080.0 * p.scale) / 2.0).abs() < EPS);
        assert!((p.offset_y - (1200.0 - 1920.0 * p.scale) / 2.0).abs() < EPS);
        assert!(p.offset_x >= 0.0 && p.offset_y >= 0.0);
    }

    #[test]
    fn design_and_screen_transforms_invert() {
        let p = classify(600.0, 1200.0).unwrap();
        let design = Point::new(540.0, 960.0);
        let back = p.to_design(p.to_screen(design));
        assert!(back.approx_eq(design, 1e-6));
        // canvas center maps to viewport center
        assert!(p.to_screen(design).approx_eq(Point::new(300.0, 600.0), 1e-6));
    }

    #[test]
    fn invalid_viewport_is_an_error() {
        assert!(matches!(classify(0.0, 800.0), Err(ScreenError::InvalidViewport { .. })));
        assert!(matches!(classify(f64::NAN, 800.0), Err(ScreenError::InvalidViewport { .. })));
    }

    #[test]
    fn missing_design_is_unknown_class() {
        let buckets = vec![RatioBucket { max_ratio: 1.0, class: ScreenClass::Tablet }];
        let c = ScreenClassifier::with_buckets(buckets, BTreeMap::new());
        assert_eq!(c.classify(100.0, 200.0), Err(ScreenError::UnknownScreenClass(ScreenClass::Tablet)));

        let empty = ScreenClassifier::with_buckets(Vec::new(), BTreeMap::new());
        assert_eq!(empty.classify(100.0, 200.0), Err(ScreenError::EmptyClassTable));
    }

    #[test]
    fn tracker_keeps_profile_on_bad_resize() {
        let mut t = ScreenTracker::default();
        assert!(t.profile().is_none());
        t.resize(400.0, 800.0);
        let before = *t.profile().unwrap();
        let after = *t.resize(-1.0, 800.0).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn orientation_lookups_are_conditional() {
        let mut t = ScreenTracker::default();
        let values = ClassValues::new().with(ScreenClass::TallMobile, 7);
        let mut slot = 0;

        // no profile yet
        assert!(!t.apply(&mut slot, &values));

        t.resize(400.0, 800.0);
        assert!(!t.apply_landscape(&mut slot, &values));
        assert_eq!(slot, 0);
        assert!(t.apply_portrait(&mut slot, &values));
        assert_eq!(slot, 7);

        // class without a value leaves the slot alone
        t.resize(800.0, 800.0);
        slot = 1;
        assert!(!t.apply(&mut slot, &values));
        assert_eq!(slot, 1);
    }

    #[test]
    fn class_values_deserialize_by_name() {
        let v: ClassValues<f64> = serde_json::from_str(r#"{"tallMobile": 1.5, "tablet": 2.0}"#).unwrap();
        assert_eq!(v.get(ScreenClass::TallMobile), Some(&1.5));
        assert_eq!(v.get(ScreenClass::Tablet), Some(&2.0));
        assert_eq!(v.get(ScreenClass::FoldInner), None);
    }
}
