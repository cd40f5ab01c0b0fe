pub mod point;
pub mod vec2;

pub use point::Point;
pub use vec2::{safe, Vec2};
