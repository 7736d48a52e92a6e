use core::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A point in design-canvas space
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Move `factor` of the way from `self` toward `target`
    #[inline]
    pub fn lerp(self, target: Point, factor: f64) -> Point {
        Point::new(
            self.x + (target.x - self.x) * factor,
            self.y + (target.y - self.y) * factor,
        )
    }

    #[inline]
    pub fn approx_eq(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Ordered waypoints; insertion order is draw order and traversal order.
pub type Path = Vec<Point>;

/// Sum of consecutive point distances
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn max_side(self) -> f64 {
        self.width.max(self.height)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Containment is half-open: the left and top edges are inside, the right and
/// bottom edges are not. Empty rectangles contain nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn centered(center: Point, size: Size) -> Self {
        Self::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Intersection point of segments p1p2 and p3p4.
///
/// Parallel and collinear pairs (zero determinant) never intersect. The point
/// of the infinite lines must fall inside both segments' bounding boxes,
/// edges included.
pub fn segment_intersection(p1: Point, p2: Point, p3: Point, p4: Point) -> Option<Point> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let (x4, y4) = (p4.x, p4.y);

    let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denom == 0.0 {
        return None;
    }

    let a = x1 * y2 - y1 * x2;
    let b = x3 * y4 - y3 * x4;
    let px = (a * (x3 - x4) - (x1 - x2) * b) / denom;
    let py = (a * (y3 - y4) - (y1 - y2) * b) / denom;

    let inside = |lo: f64, hi: f64, v: f64| v >= lo.min(hi) && v <= lo.max(hi);
    if !(inside(x1, x2, px) && inside(x3, x4, px) && inside(y1, y2, py) && inside(y3, y4, py)) {
        return None;
    }

    Some(Point::new(px, py))
}

/// Wrap an angle into [-PI, PI]
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid maps PI to -PI; keep the sign of the input at the boundary
    if wrapped == -PI && angle > 0.0 {
        PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn crossing_segments_meet_inside() {
        let p = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
        )
        .unwrap();
        assert!(p.approx_eq(Point::new(5.0, 5.0), EPS));
    }

    #[test]
    fn line_extension_outside_segment_is_rejected() {
        // The infinite lines cross at (20, 0), past the end of the first segment
        let p = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, -5.0),
            Point::new(20.0, 5.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn collinear_overlap_is_ignored() {
        let p = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(15.0, 0.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn touching_endpoint_counts() {
        let p = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, -5.0),
            Point::new(10.0, 5.0),
        );
        assert_eq!(p, Some(Point::new(10.0, 0.0)));
    }

    #[test]
    fn path_length_sums_segments() {
        let path = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
        assert!((path_length(&path) - 11.0).abs() < EPS);
        assert_eq!(path_length(&path[..1]), 0.0);
        assert_eq!(path_length(&[]), 0.0);
    }

    #[test]
    fn rect_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 4.99)));
        assert!(!r.contains(Point::new(10.0, 2.0)));
        assert!(!r.contains(Point::new(2.0, 5.0)));
        assert!(!Rect::new(0.0, 0.0, 0.0, 5.0).contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn centered_rect_round_trips_center() {
        let r = Rect::centered(Point::new(100.0, 50.0), Size::new(20.0, 10.0));
        assert_eq!(r, Rect::new(90.0, 45.0, 20.0, 10.0));
        assert_eq!(r.center(), Point::new(100.0, 50.0));
    }

    #[test]
    fn wrap_angle_stays_in_range() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < EPS);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < EPS);
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), -PI);
        assert!((wrap_angle(0.25) - 0.25).abs() < EPS);
    }
}
