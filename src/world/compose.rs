use log::debug;

use crate::config::WorldConfig;
use crate::error::Result;
use crate::shapes::ShapeFactory;

use super::World;

/// Builds a ready-to-step world from `config`.
///
/// Sets up the shape factory and the optional collision resolver, and
/// registers gravity as a global force when configured. Every value is
/// validated before anything is built.
pub fn compose(config: &WorldConfig) -> Result<World> {
    let gravity = config.gravity_force()?;
    let resolver = config.resolver()?;

    let mut world = World::from_parts(ShapeFactory::new(config.require_simple_polygons), resolver);
    if let Some(gravity) = gravity {
        world.add_force(gravity);
    }
    debug!("composed world from {:?}", config);
    Ok(world)
}
