use std::cell::OnceCell;
use std::sync::Arc;

use crate::error::Result;
use crate::geometry::rotate_points;
use crate::math::{Point, Vec2};
use crate::shapes::{Polygon, Rectangle, Shape};

use super::material::Material;
use super::particle::Particle;
use super::ForceReceiver;

/// A particle with a rigid polygon shape and an orientation.
///
/// The particle's position is the world position of the shape's centroid.
/// The world-space polygon is derived on first access after a move and then
/// cached until the body moves again.
#[derive(Debug, Clone)]
pub struct Body {
    particle: Particle,
    shape: Arc<Shape>,
    inertia: f64,
    inv_inertia: f64,

    pub(crate) rotation: f64, // Radians
    pub(crate) angular_velocity: f64,
    pub(crate) torque: f64,

    world_polygon: OnceCell<Polygon>,
}

impl Body {
    /// Creates a body at `position` with zero rotation.
    /// Fails with `InvalidParameter` unless `mass > 0`.
    pub fn new(mass: f64, shape: Arc<Shape>, position: Point) -> Result<Self> {
        let particle = Particle::new(mass, position)?;
        let inertia = particle.mass() * shape.unit_inertia();
        let inv_inertia = if inertia > 0.0 { 1.0 / inertia } else { 0.0 };
        Ok(Self {
            particle,
            shape,
            inertia,
            inv_inertia,
            rotation: 0.0,
            angular_velocity: 0.0,
            torque: 0.0,
            world_polygon: OnceCell::new(),
        })
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.particle = self.particle.with_material(material);
        self
    }

    /// The point-mass part of this body.
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub(crate) fn particle_mut(&mut self) -> &mut Particle {
        self.world_polygon.take();
        &mut self.particle
    }

    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    pub fn mass(&self) -> f64 {
        self.particle.mass()
    }

    pub fn position(&self) -> Point {
        self.particle.position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.particle.velocity()
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    pub fn accumulated_torque(&self) -> f64 {
        self.torque
    }

    /// The shape's polygon moved to the current position and rotated about it
    /// by the current angle.
    pub fn world_polygon(&self) -> &Polygon {
        self.world_polygon.get_or_init(|| {
            let position = self.position();
            let placed = self.shape.original_polygon().translated(position.to_vec());
            Polygon::new(rotate_points(position, self.rotation, &placed.vertices).collect())
        })
    }

    pub fn bounds(&self) -> Option<Rectangle> {
        self.world_polygon().bounds()
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.particle.apply_force(force);
    }

    /// Applies `force` at a world-space point, producing torque about the centre of mass.
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Point) {
        let arm = point - self.position();
        self.apply_force_at_offset(force, arm);
    }

    /// Drops the cached world polygon after the body moved or turned.
    pub(crate) fn invalidate_world_polygon(&mut self) {
        self.world_polygon.take();
    }

    pub fn clear_accumulators(&mut self) {
        self.particle.clear_accumulator();
        self.torque = 0.0;
    }
}

impl ForceReceiver for Body {
    fn mass(&self) -> f64 {
        self.particle.mass()
    }

    fn velocity(&self) -> Vec2 {
        self.particle.velocity()
    }

    fn apply_force(&mut self, force: Vec2) {
        self.particle.apply_force(force);
    }

    fn apply_force_at_offset(&mut self, force: Vec2, offset: Vec2) {
        self.particle.apply_force(force);
        self.torque += offset.cross(force);
    }
}
