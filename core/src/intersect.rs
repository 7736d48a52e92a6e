use crate::constants::MEET_EPSILON;
use crate::geometry::{segment_intersection, Path, Point};

/// Where two paths first cross, in scan order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Crossing {
    /// Segment `(a[a_index], a[a_index + 1])` of the first path
    pub a_index: usize,
    /// Segment `(b[b_index], b[b_index + 1])` of the second path
    pub b_index: usize,
    pub point: Point,
}

/// First crossing between two polylines.
///
/// Segments of `a` are scanned in order, and for each one every segment of `b`
/// in order; the first hit wins. This is a deterministic scan-order tie-break,
/// not "earliest along both paths". Paths with fewer than two points have no
/// segments and never cross.
///
/// When both last segments are reached and the paths already end on the same
/// point, that shared endpoint is a meeting, not a crossing. Re-resolving a
/// pair of truncated paths therefore finds nothing.
pub fn first_crossing(a: &[Point], b: &[Point]) -> Option<Crossing> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }
    let last_a = a.len() - 2;
    let last_b = b.len() - 2;
    let already_meet = a[a.len() - 1].approx_eq(b[b.len() - 1], MEET_EPSILON);

    for (i, sa) in a.windows(2).enumerate() {
        for (j, sb) in b.windows(2).enumerate() {
            if already_meet && i == last_a && j == last_b {
                continue;
            }
            if let Some(point) = segment_intersection(sa[0], sa[1], sb[0], sb[1]) {
                return Some(Crossing { a_index: i, b_index: j, point });
            }
        }
    }
    None
}

/// Both paths have segments and already end on the same point.
///
/// [`first_crossing`] skips that shared endpoint, so callers that treat a
/// meeting as a crossing check this separately.
pub fn ends_meet(a: &[Point], b: &[Point]) -> bool {
    match (a, b) {
        ([.., _, a_end], [.., _, b_end]) => a_end.approx_eq(*b_end, MEET_EPSILON),
        _ => false,
    }
}

/// Truncate both paths at their first crossing.
///
/// On success each path keeps the points up to and including the start of the
/// crossing segment, then ends on the crossing point, and `true` is returned.
/// Otherwise both paths are left untouched.
pub fn resolve(path_a: &mut Path, path_b: &mut Path) -> bool {
    let Some(crossing) = first_crossing(path_a, path_b) else {
        tracing::debug!(a_len = path_a.len(), b_len = path_b.len(), "paths do not cross");
        return false;
    };

    path_a.truncate(crossing.a_index + 1);
    path_a.push(crossing.point);
    path_b.truncate(crossing.b_index + 1);
    path_b.push(crossing.point);

    tracing::debug!(
        x = crossing.point.x,
        y = crossing.point.y,
        a_index = crossing.a_index,
        b_index = crossing.b_index,
        "truncated paths at first crossing"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Path {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn perpendicular_paths_cut_at_crossing() {
        let mut a = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let mut b = pts(&[(5.0, -5.0), (5.0, 5.0)]);

        assert!(resolve(&mut a, &mut b));
        assert_eq!(a, pts(&[(0.0, 0.0), (5.0, 0.0)]));
        assert_eq!(b, pts(&[(5.0, -5.0), (5.0, 0.0)]));
    }

    #[test]
    fn parallel_paths_are_untouched() {
        let mut a = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let mut b = pts(&[(0.0, 5.0), (10.0, 5.0)]);
        let (a0, b0) = (a.clone(), b.clone());

        assert!(!resolve(&mut a, &mut b));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }

    #[test]
    fn resolving_twice_finds_nothing_new() {
        let mut a = pts(&[(0.0, 0.0), (4.0, 1.0), (8.0, -1.0), (12.0, 0.5)]);
        let mut b = pts(&[(6.0, -6.0), (6.5, -1.0), (5.5, 4.0), (6.0, 9.0)]);

        assert!(resolve(&mut a, &mut b));
        let (a1, b1) = (a.clone(), b.clone());
        assert!(!resolve(&mut a, &mut b));
        assert_eq!(a, a1);
        assert_eq!(b, b1);
        assert_eq!(a.last(), b.last());
    }

    #[test]
    fn scan_order_picks_first_segment_of_a() {
        // b zig-zags across a twice; the crossing on a's first segment wins
        // even though b reaches the other one first.
        let a = pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        let b = pts(&[(15.0, -5.0), (15.0, 5.0), (5.0, 5.0), (5.0, -5.0)]);

        let c = first_crossing(&a, &b).unwrap();
        assert_eq!(c.a_index, 0);
        assert_eq!(c.b_index, 2);
        assert_eq!(c.point, Point::new(5.0, 0.0));
    }

    #[test]
    fn shared_endpoint_is_a_meeting_not_a_crossing() {
        let mut a = pts(&[(0.0, 0.0), (10.0, 10.0)]);
        let mut b = pts(&[(20.0, 0.0), (10.0, 10.0)]);

        assert!(!resolve(&mut a, &mut b));
        assert!(ends_meet(&a, &b));
        assert_eq!(a.len(), 2);

        assert!(!ends_meet(&a, &pts(&[(20.0, 0.0), (10.0, 9.0)])));
        assert!(!ends_meet(&a, &pts(&[(10.0, 10.0)])));
    }

    #[test]
    fn degenerate_paths_never_cross() {
        let mut a = pts(&[(0.0, 0.0)]);
        let mut b = pts(&[(5.0, -5.0), (5.0, 5.0)]);
        assert!(!resolve(&mut a, &mut b));

        let mut empty = Path::new();
        assert!(!resolve(&mut empty, &mut b));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn truncation_keeps_prefix_points() {
        let mut a = pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (10.0, 0.0)]);
        let mut b = pts(&[(7.0, -3.0), (7.0, -1.0), (7.0, 3.0), (9.0, 3.0)]);

        assert!(resolve(&mut a, &mut b));
        assert_eq!(a, pts(&[(0.0, 0.0), (2.0, 0.0), (4.0, 0.0), (7.0, 0.0)]));
        assert_eq!(b, pts(&[(7.0, -3.0), (7.0, -1.0), (7.0, 0.0)]));
    }
}
