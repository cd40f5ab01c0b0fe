use crate::geometry;
use crate::math::{Point, Vec2};

use super::rectangle::Rectangle;

/// An ordered loop of points. Vertex `i` connects to vertex `i + 1` and the
/// last vertex connects back to the first.
///
/// Construction accepts any point list. Simplicity and the 3-vertex minimum
/// are checked on demand, see [`Polygon::is_nonsimple`] and
/// [`ShapeFactory`](super::ShapeFactory).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Polygon { vertices }
    }

    /// Axis-aligned square of side `side` centred on the origin, counter-clockwise.
    pub fn square(side: f64) -> Self {
        let h = side / 2.0;
        Polygon::new(vec![
            Point::new(-h, -h),
            Point::new(h, -h),
            Point::new(h, h),
            Point::new(-h, h),
        ])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates the edges as `(start, end)` pairs, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn is_nonsimple(&self) -> bool {
        geometry::is_nonsimple_polygon(&self.vertices)
    }

    /// Shoelace area, positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self.edges().map(|(a, b)| a.to_vec().cross(b.to_vec())).sum();
        twice / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid. Falls back to the vertex average when the
    /// area vanishes (e.g. collinear vertices).
    pub fn centroid(&self) -> Point {
        let n = self.vertices.len();
        if n == 0 {
            return Point::ORIGIN;
        }

        let signed_area = self.signed_area();
        if signed_area.abs() < 1e-12 {
            let sum = self
                .vertices
                .iter()
                .fold(Vec2::ZERO, |acc, p| acc + p.to_vec());
            return Point::from(sum / n as f64);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.edges() {
            let cross = a.to_vec().cross(b.to_vec());
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        let factor = 1.0 / (6.0 * signed_area);
        Point::new(cx * factor, cy * factor)
    }

    /// Second moment of area about the origin, signed like [`Polygon::signed_area`].
    fn second_moment_about_origin(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let sum: f64 = self
            .edges()
            .map(|(a, b)| {
                let (v1, v2) = (a.to_vec(), b.to_vec());
                v1.cross(v2) * (v1.magnitude_squared() + v1.dot(v2) + v2.magnitude_squared())
            })
            .sum();
        sum / 12.0
    }

    /// Moment of inertia about the centroid for a body of unit mass spread
    /// uniformly over the polygon. Multiply by the mass to get the inertia.
    pub fn unit_inertia(&self) -> f64 {
        let signed_area = self.signed_area();
        if signed_area.abs() < 1e-12 {
            return 0.0;
        }
        // Both terms flip sign with the winding, so the ratio is orientation independent.
        let about_origin = self.second_moment_about_origin() / signed_area;
        let centroid = self.centroid().to_vec();
        (about_origin - centroid.magnitude_squared()).max(0.0)
    }

    /// Unit normals perpendicular to each edge, in edge order. They point
    /// outward for clockwise winding and inward for counter-clockwise; the
    /// separating-axis test only needs the axis, not its direction.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        self.edges()
            .map(|(a, b)| (b - a).perpendicular().normalize())
            .collect()
    }

    /// Returns a copy moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Polygon {
        Polygon::new(self.vertices.iter().map(|&p| p + offset).collect())
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        Rectangle::from_points(&self.vertices)
    }

    /// Projects every vertex onto `axis` and returns the `(min, max)` interval.
    pub fn project(&self, axis: Vec2) -> (f64, f64) {
        self.vertices
            .iter()
            .map(|p| p.to_vec().dot(axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d), hi.max(d))
            })
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Polygon::new(vertices)
    }
}

impl From<Rectangle> for Polygon {
    fn from(rect: Rectangle) -> Self {
        rect.to_polygon()
    }
}
