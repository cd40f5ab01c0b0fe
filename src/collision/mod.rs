pub mod detection;
pub mod manifold;
pub mod resolver;

pub use detection::{
    check_circle_circle, check_circle_polygon, check_polygon_polygon, detect_collision,
    detect_shapes, Collidable, CollisionShape,
};
pub use manifold::{CollisionDetectionResult, CollisionEvent, Contact};
pub use resolver::ImpulseResolver;
