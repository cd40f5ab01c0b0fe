//! Discrete-time 2D physics: particles and rigid polygon bodies driven by
//! composable forces, integrated with semi-implicit Euler and tested for
//! overlap with the separating-axis theorem.

pub mod collision;
pub mod config;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod integration;
pub mod math;
pub mod objects;
pub mod shapes;
pub mod world;

// Re-export key types for easier use
pub use collision::{detect_collision, CollisionDetectionResult, CollisionEvent, Contact, ImpulseResolver};
pub use config::{ResponseConfig, WorldConfig, EARTH_GRAVITY};
pub use error::{PhysicsError, Result};
pub use forces::{Drag, Force, ForceId, ForceScope, ForceSet, Gravity, Impulse, TimedForce};
pub use math::{Point, Vec2};
pub use objects::{Body, Material, ObjectId, Particle, PhysicalObject};
pub use shapes::{Polygon, Rectangle, Shape, ShapeFactory};
pub use world::{compose, World};
