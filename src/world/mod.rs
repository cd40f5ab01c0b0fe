pub mod compose;
pub mod physics_world;

pub use compose::compose;
pub use physics_world::World;
