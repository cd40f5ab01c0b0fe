pub mod body;
pub mod material;
pub mod particle;

use std::fmt;

use crate::math::{Point, Vec2};

pub use body::Body;
pub use material::Material;
pub use particle::Particle;

/// Identity of an object owned by a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Anything a force can push on.
pub trait ForceReceiver {
    fn mass(&self) -> f64;

    fn velocity(&self) -> Vec2;

    /// Adds `force` to the per-tick accumulator.
    fn apply_force(&mut self, force: Vec2);

    /// Adds `force` acting at `offset` from the centre of mass.
    /// Objects without rotational state ignore the offset.
    fn apply_force_at_offset(&mut self, force: Vec2, _offset: Vec2) {
        self.apply_force(force);
    }
}

/// Either kind of simulated object.
#[derive(Debug, Clone)]
pub enum PhysicalObject {
    Particle(Particle),
    Body(Body),
}

impl PhysicalObject {
    pub fn as_particle(&self) -> Option<&Particle> {
        match self {
            PhysicalObject::Particle(p) => Some(p),
            PhysicalObject::Body(_) => None,
        }
    }

    pub fn as_body(&self) -> Option<&Body> {
        match self {
            PhysicalObject::Body(b) => Some(b),
            PhysicalObject::Particle(_) => None,
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, PhysicalObject::Body(_))
    }

    /// The point-mass state, for bodies the particle they extend.
    pub fn particle(&self) -> &Particle {
        match self {
            PhysicalObject::Particle(p) => p,
            PhysicalObject::Body(b) => b.particle(),
        }
    }

    pub fn position(&self) -> Point {
        self.particle().position()
    }

    pub fn velocity(&self) -> Vec2 {
        self.particle().velocity()
    }

    pub fn mass(&self) -> f64 {
        self.particle().mass()
    }

    pub fn inv_mass(&self) -> f64 {
        self.particle().inv_mass()
    }

    pub fn inv_inertia(&self) -> f64 {
        match self {
            PhysicalObject::Particle(_) => 0.0,
            PhysicalObject::Body(b) => b.inv_inertia(),
        }
    }

    pub fn angular_velocity(&self) -> f64 {
        match self {
            PhysicalObject::Particle(_) => 0.0,
            PhysicalObject::Body(b) => b.angular_velocity(),
        }
    }

    pub fn material(&self) -> &Material {
        self.particle().material()
    }

    /// Zeroes the force (and for bodies, torque) accumulators.
    pub(crate) fn clear_accumulators(&mut self) {
        match self {
            PhysicalObject::Particle(p) => p.clear_accumulator(),
            PhysicalObject::Body(b) => b.clear_accumulators(),
        }
    }

    /// Changes linear and angular velocity by the given amounts.
    pub(crate) fn add_velocity(&mut self, linear: Vec2, angular: f64) {
        match self {
            PhysicalObject::Particle(p) => p.velocity += linear,
            PhysicalObject::Body(b) => {
                b.particle_mut().velocity += linear;
                b.angular_velocity += angular;
            }
        }
    }

    /// Moves the object without touching its velocity.
    pub(crate) fn shift(&mut self, offset: Vec2) {
        match self {
            PhysicalObject::Particle(p) => p.position += offset,
            PhysicalObject::Body(b) => b.particle_mut().position += offset,
        }
    }
}

impl ForceReceiver for PhysicalObject {
    fn mass(&self) -> f64 {
        self.particle().mass()
    }

    fn velocity(&self) -> Vec2 {
        self.particle().velocity()
    }

    fn apply_force(&mut self, force: Vec2) {
        match self {
            PhysicalObject::Particle(p) => p.apply_force(force),
            PhysicalObject::Body(b) => b.apply_force(force),
        }
    }

    fn apply_force_at_offset(&mut self, force: Vec2, offset: Vec2) {
        match self {
            PhysicalObject::Particle(p) => p.apply_force(force),
            PhysicalObject::Body(b) => b.apply_force_at_offset(force, offset),
        }
    }
}

impl From<Particle> for PhysicalObject {
    fn from(p: Particle) -> Self {
        PhysicalObject::Particle(p)
    }
}

impl From<Body> for PhysicalObject {
    fn from(b: Body) -> Self {
        PhysicalObject::Body(b)
    }
}
