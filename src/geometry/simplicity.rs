use crate::math::Point;

/// Signed area of the parallelogram spanned by `p->q` and `p->r`.
/// Positive when `r` lies to the left of `p->q`.
fn orientation(p: Point, q: Point, r: Point) -> f64 {
    (q - p).cross(r - p)
}

/// Whether `p`, already known to be collinear with `a-b`, lies within its bounds.
fn within_bounds(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Checks whether the closed segments `a1-a2` and `b1-b2` share at least one point.
/// Endpoint contact and collinear overlap both count.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    // Proper crossing: each segment straddles the other's supporting line.
    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_bounds(b1, b2, a1))
        || (d2 == 0.0 && within_bounds(b1, b2, a2))
        || (d3 == 0.0 && within_bounds(a1, a2, b1))
        || (d4 == 0.0 && within_bounds(a1, a2, b2))
}

/// Returns true if the closed loop `points` is not a simple polygon.
///
/// Fewer than 3 vertices is degenerate and counts as non-simple. Otherwise every
/// pair of non-adjacent edges is tested for contact; adjacent edges share a vertex
/// by construction and are skipped. O(n^2) in the vertex count.
pub fn is_nonsimple_polygon(points: &[Point]) -> bool {
    let n = points.len();
    if n < 3 {
        return true;
    }

    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..n {
        // j starts at i + 2 so that edge i + 1 (adjacent) is never tested
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue; // last edge closes the loop onto vertex 0
            }
            let (a1, a2) = edge(i);
            let (b1, b2) = edge(j);
            if segments_intersect(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}
