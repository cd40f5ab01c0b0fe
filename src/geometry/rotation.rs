use crate::math::{Point, Vec2};

/// Rotates `point` about `origin` by `angle` radians, counter-clockwise for
/// positive angles.
pub fn rotate_point(origin: Point, angle: f64, point: Point) -> Point {
    let (sin_a, cos_a) = angle.sin_cos();
    rotate_with(origin, sin_a, cos_a, point)
}

/// Lazily rotates every point of `points` about `origin`.
///
/// The iterator is `Clone`, so it can be restarted without touching the source slice.
pub fn rotate_points(
    origin: Point,
    angle: f64,
    points: &[Point],
) -> impl ExactSizeIterator<Item = Point> + Clone + '_ {
    let (sin_a, cos_a) = angle.sin_cos();
    points
        .iter()
        .map(move |&p| rotate_with(origin, sin_a, cos_a, p))
}

#[inline]
fn rotate_with(origin: Point, sin_a: f64, cos_a: f64, point: Point) -> Point {
    let d = point - origin;
    origin + Vec2::new(d.x * cos_a - d.y * sin_a, d.x * sin_a + d.y * cos_a)
}
