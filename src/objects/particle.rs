use crate::error::{require_positive, Result};
use crate::math::{Point, Vec2};

use super::material::Material;
use super::ForceReceiver;

/// A point mass with a per-tick force accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    mass: f64,
    inv_mass: f64,
    radius: Option<f64>,
    material: Material,

    pub(crate) position: Point,
    pub(crate) velocity: Vec2,
    // Cleared by the integrator at the end of every step
    pub(crate) force: Vec2,
}

impl Particle {
    /// Creates a resting particle. Fails with `InvalidParameter` unless `mass > 0`.
    pub fn new(mass: f64, position: Point) -> Result<Self> {
        let mass = require_positive("mass", mass)?;
        Ok(Self {
            mass,
            inv_mass: 1.0 / mass,
            radius: None,
            material: Material::default(),
            position,
            velocity: Vec2::ZERO,
            force: Vec2::ZERO,
        })
    }

    /// Gives the particle an implicit circular extent so it can collide.
    pub fn with_radius(mut self, radius: f64) -> Result<Self> {
        self.radius = Some(require_positive("radius", radius)?);
        Ok(self)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn radius(&self) -> Option<f64> {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Force accumulated so far in the current step.
    pub fn accumulated_force(&self) -> Vec2 {
        self.force
    }

    /// Adds `force` to the accumulator; velocity changes only on integration.
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    pub fn clear_accumulator(&mut self) {
        self.force = Vec2::ZERO;
    }
}

impl ForceReceiver for Particle {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn apply_force(&mut self, force: Vec2) {
        Particle::apply_force(self, force);
    }
}
