use crate::math::{Point, Vec2};
use crate::objects::{Body, Particle, PhysicalObject};
use crate::shapes::{Polygon, Rectangle};

use super::manifold::{CollisionDetectionResult, Contact};

/// Projections within this distance of the extreme count as touching it.
const CONTACT_TOLERANCE: f64 = 1e-9;

/// World-space extent used for collision tests.
#[derive(Debug, Clone, Copy)]
pub enum CollisionShape<'a> {
    Circle { center: Point, radius: f64 },
    Polygon(&'a Polygon),
}

impl CollisionShape<'_> {
    pub fn bounds(&self) -> Option<Rectangle> {
        match self {
            CollisionShape::Circle { center, radius } => {
                let r = Vec2::new(*radius, *radius);
                Some(Rectangle::new(*center - r, *center + r))
            }
            CollisionShape::Polygon(polygon) => polygon.bounds(),
        }
    }
}

/// Objects that may take part in collision detection.
pub trait Collidable {
    /// `None` when the object has no extent and can never collide.
    fn collision_shape(&self) -> Option<CollisionShape<'_>>;
}

impl Collidable for Particle {
    fn collision_shape(&self) -> Option<CollisionShape<'_>> {
        self.radius().map(|radius| CollisionShape::Circle {
            center: self.position(),
            radius,
        })
    }
}

impl Collidable for Body {
    fn collision_shape(&self) -> Option<CollisionShape<'_>> {
        Some(CollisionShape::Polygon(self.world_polygon()))
    }
}

impl Collidable for PhysicalObject {
    fn collision_shape(&self) -> Option<CollisionShape<'_>> {
        match self {
            PhysicalObject::Particle(p) => p.collision_shape(),
            PhysicalObject::Body(b) => b.collision_shape(),
        }
    }
}

/// Tests two objects for overlap. Pure query; nothing is moved.
///
/// Objects without a collision shape never collide, and shapes that only
/// touch (zero penetration) are reported as separated.
pub fn detect_collision<A, B>(first: &A, second: &B) -> CollisionDetectionResult
where
    A: Collidable + ?Sized,
    B: Collidable + ?Sized,
{
    let (Some(a), Some(b)) = (first.collision_shape(), second.collision_shape()) else {
        return CollisionDetectionResult::Separated;
    };
    detect_shapes(&a, &b)
}

pub fn detect_shapes(a: &CollisionShape<'_>, b: &CollisionShape<'_>) -> CollisionDetectionResult {
    if let (Some(bounds_a), Some(bounds_b)) = (a.bounds(), b.bounds()) {
        if !bounds_a.overlaps(&bounds_b) {
            return CollisionDetectionResult::Separated;
        }
    }

    match (*a, *b) {
        (
            CollisionShape::Circle { center: ca, radius: ra },
            CollisionShape::Circle { center: cb, radius: rb },
        ) => check_circle_circle(ca, ra, cb, rb),
        (CollisionShape::Circle { center, radius }, CollisionShape::Polygon(polygon)) => {
            check_circle_polygon(center, radius, polygon)
        }
        (CollisionShape::Polygon(polygon), CollisionShape::Circle { center, radius }) => {
            check_circle_polygon(center, radius, polygon).flipped()
        }
        (CollisionShape::Polygon(pa), CollisionShape::Polygon(pb)) => check_polygon_polygon(pa, pb),
    }
}

/// Circle against circle. The normal points from `a` to `b`.
pub fn check_circle_circle(ca: Point, ra: f64, cb: Point, rb: f64) -> CollisionDetectionResult {
    let dist_vec = cb - ca;
    let dist_sq = dist_vec.magnitude_squared();
    let radii_sum = ra + rb;

    if dist_sq >= radii_sum * radii_sum {
        return CollisionDetectionResult::Separated;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 1e-10 {
        dist_vec * (1.0 / distance)
    } else {
        // Concentric: any direction separates them
        Vec2::UP
    };
    let depth = radii_sum - distance;

    // Halfway between the two surface points
    let surface_a = ca + normal * ra;
    let surface_b = cb - normal * rb;
    let point = surface_a + (surface_b - surface_a) * 0.5;

    CollisionDetectionResult::Colliding(Contact { normal, depth, point })
}

/// Overlap of two projected intervals, or `None` if there is a gap or they only touch.
fn interval_overlap((min_a, max_a): (f64, f64), (min_b, max_b): (f64, f64)) -> Option<f64> {
    let overlap1 = max_a - min_b;
    let overlap2 = max_b - min_a;
    if overlap1 <= 0.0 || overlap2 <= 0.0 {
        None
    } else {
        Some(overlap1.min(overlap2))
    }
}

/// Circle against polygon via separating axes. The normal points from the
/// circle towards the polygon.
pub fn check_circle_polygon(center: Point, radius: f64, polygon: &Polygon) -> CollisionDetectionResult {
    let mut axes = polygon.edge_normals();

    // The axis through the closest vertex catches corner contacts
    if let Some(closest) = polygon
        .vertices
        .iter()
        .min_by(|p, q| p.distance_squared(center).total_cmp(&q.distance_squared(center)))
    {
        axes.push((*closest - center).normalize());
    }

    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO;

    for axis in axes {
        if axis.magnitude_squared() < 1e-20 {
            continue;
        }
        let c = center.to_vec().dot(axis);
        let Some(overlap) = interval_overlap((c - radius, c + radius), polygon.project(axis)) else {
            return CollisionDetectionResult::Separated;
        };
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
        }
    }

    if !min_overlap.is_finite() {
        return CollisionDetectionResult::Separated;
    }

    let mut normal = mtv_axis;
    if (polygon.centroid() - center).dot(normal) < 0.0 {
        normal = -normal;
    }

    // Midway through the overlapping sliver
    let point = center + normal * (radius - min_overlap / 2.0);

    CollisionDetectionResult::Colliding(Contact {
        normal,
        depth: min_overlap,
        point,
    })
}

/// Polygon against polygon via separating axes over both polygons' edge
/// normals. Exact for convex polygons. The normal points from `a` to `b`.
pub fn check_polygon_polygon(a: &Polygon, b: &Polygon) -> CollisionDetectionResult {
    let mut min_overlap = f64::INFINITY;
    let mut mtv_axis = Vec2::ZERO;

    for axis in a.edge_normals().into_iter().chain(b.edge_normals()) {
        if axis.magnitude_squared() < 1e-20 {
            continue; // zero-length edge
        }
        let Some(overlap) = interval_overlap(a.project(axis), b.project(axis)) else {
            return CollisionDetectionResult::Separated;
        };
        if overlap < min_overlap {
            min_overlap = overlap;
            mtv_axis = axis;
        }
    }

    if !min_overlap.is_finite() {
        return CollisionDetectionResult::Separated;
    }

    let mut normal = mtv_axis;
    if (b.centroid() - a.centroid()).dot(normal) < 0.0 {
        normal = -normal;
    }

    CollisionDetectionResult::Colliding(Contact {
        normal,
        depth: min_overlap,
        point: deepest_point(b, normal),
    })
}

/// Average of the vertices of `polygon` that reach furthest against `normal`.
fn deepest_point(polygon: &Polygon, normal: Vec2) -> Point {
    let (min_proj, _) = polygon.project(normal);
    let deepest: Vec<Point> = polygon
        .vertices
        .iter()
        .copied()
        .filter(|p| p.to_vec().dot(normal) - min_proj <= CONTACT_TOLERANCE)
        .collect();
    let sum = deepest.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec());
    Point::from(sum / deepest.len().max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeFactory;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-9;

    fn square_at(x: f64, y: f64) -> Body {
        let shape = ShapeFactory::default()
            .create_original_polygon_shape(&Polygon::square(1.0))
            .unwrap();
        Body::new(1.0, shape, Point::new(x, y)).unwrap()
    }

    fn ball_at(x: f64, y: f64, radius: f64) -> Particle {
        Particle::new(1.0, Point::new(x, y))
            .unwrap()
            .with_radius(radius)
            .unwrap()
    }

    fn contact_of(result: CollisionDetectionResult) -> Contact {
        *result.contact().expect("expected a collision")
    }

    #[test]
    fn test_overlapping_squares() {
        let result = detect_collision(&square_at(0.0, 0.0), &square_at(0.5, 0.0));
        let m = contact_of(result);
        assert!((m.normal.x - 1.0).abs() < EPSILON, "normal {:?}", m.normal);
        assert!(m.normal.y.abs() < EPSILON);
        assert!((m.depth - 0.5).abs() < EPSILON);
        assert!(m.point.x.abs() < EPSILON);
        assert!(m.point.y.abs() < EPSILON);
    }

    #[test]
    fn test_overlapping_squares_reversed_order() {
        let m = contact_of(detect_collision(&square_at(0.5, 0.0), &square_at(0.0, 0.0)));
        assert!((m.normal.x - -1.0).abs() < EPSILON);
        assert!((m.depth - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_distant_squares() {
        let result = detect_collision(&square_at(0.0, 0.0), &square_at(10.0, 10.0));
        assert!(!result.is_collision());
        assert!(result.contact().is_none());
    }

    #[test]
    fn test_touching_squares_do_not_collide() {
        let result = detect_collision(&square_at(0.0, 0.0), &square_at(1.0, 0.0));
        assert_eq!(result, CollisionDetectionResult::Separated);
    }

    #[test]
    fn test_rotated_square_separating_axis() {
        // A diamond whose bounds overlap the square's but whose edges do not
        let mut diamond = square_at(1.15, 1.15);
        diamond.rotation = PI / 4.0;
        diamond.invalidate_world_polygon();
        let square = square_at(0.0, 0.0);
        assert!(square.bounds().unwrap().overlaps(&diamond.bounds().unwrap()));
        assert!(!detect_collision(&square, &diamond).is_collision());
    }

    #[test]
    fn test_vertical_overlap() {
        let m = contact_of(detect_collision(&square_at(0.0, 0.0), &square_at(0.1, -0.8)));
        assert!(m.normal.x.abs() < EPSILON);
        assert!((m.normal.y - -1.0).abs() < EPSILON);
        assert!((m.depth - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_circle_circle() {
        let m = contact_of(detect_collision(&ball_at(0.0, 0.0, 1.0), &ball_at(1.5, 0.0, 1.0)));
        assert!((m.normal.x - 1.0).abs() < EPSILON);
        assert!((m.depth - 0.5).abs() < EPSILON);
        assert!((m.point.x - 0.75).abs() < EPSILON);

        assert!(!detect_collision(&ball_at(0.0, 0.0, 1.0), &ball_at(2.0, 0.0, 1.0)).is_collision());
    }

    #[test]
    fn test_circle_circle_concentric() {
        let m = contact_of(detect_collision(&ball_at(0.0, 0.0, 2.0), &ball_at(0.0, 0.0, 1.0)));
        assert!((m.depth - 3.0).abs() < EPSILON);
        assert_eq!(m.normal, Vec2::UP);
    }

    #[test]
    fn test_circle_polygon() {
        // Ball overlapping the square's right edge by 0.2
        let ball = ball_at(0.8, 0.0, 0.5);
        let square = square_at(0.0, 0.0);

        let m = contact_of(detect_collision(&ball, &square));
        assert!((m.normal.x - -1.0).abs() < EPSILON, "normal {:?}", m.normal);
        assert!(m.normal.y.abs() < EPSILON);
        assert!((m.depth - 0.2).abs() < EPSILON);

        // Same pair, other order: normal flips
        let m = contact_of(detect_collision(&square, &ball));
        assert!((m.normal.x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_near_corner_misses() {
        // Inside the square's bounds-plus-radius box but beyond the corner
        let ball = ball_at(0.9, 0.9, 0.5);
        assert!(!detect_collision(&ball, &square_at(0.0, 0.0)).is_collision());
    }

    #[test]
    fn test_point_particles_never_collide() {
        let a = Particle::new(1.0, Point::ORIGIN).unwrap();
        let b = Particle::new(1.0, Point::ORIGIN).unwrap();
        assert!(!detect_collision(&a, &b).is_collision());
        assert!(!detect_collision(&a, &square_at(0.0, 0.0)).is_collision());
    }

    #[test]
    fn test_physical_object_dispatch() {
        let a = PhysicalObject::from(square_at(0.0, 0.0));
        let b = PhysicalObject::from(ball_at(0.0, 0.9, 0.5));
        let m = contact_of(detect_collision(&a, &b));
        assert!((m.normal.y - 1.0).abs() < EPSILON);
        assert!((m.depth - 0.1).abs() < EPSILON);
    }
}
