//! Explicit configuration consumed by [`compose`](crate::world::compose).

use serde::{Deserialize, Serialize};

use crate::collision::ImpulseResolver;
use crate::error::Result;
use crate::forces::Gravity;

/// Standard gravitational acceleration at the Earth's surface, in m/s^2.
pub const EARTH_GRAVITY: f64 = 9.81;

/// Settings for a new [`World`](crate::world::World).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Acceleration of the global gravity force. `None` registers no gravity.
    pub gravity: Option<f64>,
    /// Reject self-intersecting polygons when spawning bodies.
    pub require_simple_polygons: bool,
    /// Resolve collisions after detecting them. `None` only reports them.
    pub collision_response: Option<ResponseConfig>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Some(EARTH_GRAVITY),
            require_simple_polygons: true,
            collision_response: None,
        }
    }
}

impl WorldConfig {
    /// A config with gravity disabled.
    pub fn weightless() -> Self {
        Self {
            gravity: None,
            ..Self::default()
        }
    }

    /// Checks every value without building anything.
    pub fn validate(&self) -> Result<()> {
        self.gravity_force()?;
        self.resolver()?;
        Ok(())
    }

    pub(crate) fn gravity_force(&self) -> Result<Option<Gravity>> {
        self.gravity.map(Gravity::new).transpose()
    }

    pub(crate) fn resolver(&self) -> Result<Option<ImpulseResolver>> {
        self.collision_response
            .as_ref()
            .map(ResponseConfig::build)
            .transpose()
    }
}

/// Parameters of the impulse resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    pub correction_percent: f64,
    pub slop: f64,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            correction_percent: ImpulseResolver::DEFAULT_CORRECTION_PERCENT,
            slop: ImpulseResolver::DEFAULT_SLOP,
        }
    }
}

impl ResponseConfig {
    pub fn build(&self) -> Result<ImpulseResolver> {
        ImpulseResolver::new(self.correction_percent, self.slop)
    }
}
