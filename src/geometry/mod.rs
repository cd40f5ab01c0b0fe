//! Pure point and polygon helpers. Nothing here touches simulation state.

pub mod rotation;
pub mod simplicity;

pub use rotation::{rotate_point, rotate_points};
pub use simplicity::{is_nonsimple_polygon, segments_intersect};
