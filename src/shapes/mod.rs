pub mod polygon;
pub mod rectangle;
pub mod shape;

pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use shape::{Shape, ShapeFactory};
