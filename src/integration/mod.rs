pub mod integrator;

pub use integrator::{integrate, integrate_body, integrate_particle};
