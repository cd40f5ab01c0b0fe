use std::sync::Arc;

use log::debug;

use crate::error::{PhysicsError, Result};
use crate::math::{Point, Vec2};

use super::polygon::Polygon;

/// Areas below this are treated as zero when validating a polygon.
const MIN_AREA: f64 = 1e-12;

/// Immutable geometric description of a body in its local space.
///
/// The stored polygon is centroid-aligned, so `center_of_mass` is the origin
/// (up to rounding) for every shape built by a [`ShapeFactory`].
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    original: Polygon,
    volume: f64,
    center_of_mass: Point,
    unit_inertia: f64,
}

impl Shape {
    /// The polygon in body space, centred on the centroid.
    pub fn original_polygon(&self) -> &Polygon {
        &self.original
    }

    /// Area of the shape (volume in 2D).
    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn center_of_mass(&self) -> Point {
        self.center_of_mass
    }

    /// Moment of inertia about the centre of mass per unit of mass.
    pub fn unit_inertia(&self) -> f64 {
        self.unit_inertia
    }
}

/// Builds validated [`Shape`]s from raw polygons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFactory {
    require_simple: bool,
}

impl ShapeFactory {
    pub fn new(require_simple: bool) -> Self {
        Self { require_simple }
    }

    pub fn requires_simple_polygons(&self) -> bool {
        self.require_simple
    }

    /// Validates `polygon`, moves it so that its centroid sits on the origin
    /// and caches the derived area, centroid and inertia.
    ///
    /// Fails with `InvalidGeometry` when the polygon has fewer than 3 points,
    /// has no area, or (if this factory requires it) intersects itself.
    pub fn create_original_polygon_shape(&self, polygon: &Polygon) -> Result<Arc<Shape>> {
        if polygon.len() < 3 {
            return Err(PhysicsError::InvalidGeometry(format!(
                "polygon needs at least 3 points, got {}",
                polygon.len()
            )));
        }
        if polygon.vertices.iter().any(|p| !p.is_finite()) {
            return Err(PhysicsError::InvalidGeometry(
                "polygon has a non-finite vertex".into(),
            ));
        }
        if self.require_simple && polygon.is_nonsimple() {
            return Err(PhysicsError::InvalidGeometry(
                "polygon is self-intersecting".into(),
            ));
        }
        let area = polygon.area();
        if area < MIN_AREA {
            return Err(PhysicsError::InvalidGeometry(format!(
                "polygon area {} is too small",
                area
            )));
        }

        let centroid: Vec2 = polygon.centroid().to_vec();
        let original = polygon.translated(-centroid);

        let shape = Shape {
            volume: original.area(),
            center_of_mass: original.centroid(),
            unit_inertia: original.unit_inertia(),
            original,
        };
        debug!(
            "created shape: {} vertices, volume {:.4}",
            shape.original.len(),
            shape.volume
        );
        Ok(Arc::new(shape))
    }
}

impl Default for ShapeFactory {
    fn default() -> Self {
        Self::new(true)
    }
}
