pub mod force;
pub mod force_set;

use std::fmt;

use crate::objects::{ObjectId, PhysicalObject};

pub use force::{Drag, Force, Gravity, Impulse, TimedForce};
pub use force_set::ForceSet;

/// Handle of a force registered with a [`World`](crate::world::World).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForceId(pub u64);

impl fmt::Display for ForceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "force#{}", self.0)
    }
}

/// Which objects a registered force acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceScope {
    /// Every particle and body.
    #[default]
    All,
    /// Only plain particles.
    Particles,
    /// Only shaped bodies.
    Bodies,
    /// A single object.
    Object(ObjectId),
}

impl ForceScope {
    pub fn includes(&self, id: ObjectId, object: &PhysicalObject) -> bool {
        match self {
            ForceScope::All => true,
            ForceScope::Particles => !object.is_body(),
            ForceScope::Bodies => object.is_body(),
            ForceScope::Object(target) => *target == id,
        }
    }
}
