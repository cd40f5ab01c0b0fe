//! Surface properties consulted by collision response.

/// How bouncy an object is when the world resolves its contacts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Coefficient of restitution in [0, 1]; 0 = no bounce, 1 = perfectly elastic.
    pub restitution: f64,
}

impl Material {
    pub fn new(restitution: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Restitution used for a contact between two materials: the less bouncy one wins.
    pub fn combined_restitution(a: &Material, b: &Material) -> f64 {
        a.restitution.min(b.restitution)
    }
}

impl Default for Material {
    fn default() -> Self {
        Material { restitution: 0.2 }
    }
}
