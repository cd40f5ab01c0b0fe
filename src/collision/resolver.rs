use log::trace;

use crate::error::{require_non_negative, require_positive, PhysicsError, Result};
use crate::objects::{Material, PhysicalObject};

use super::manifold::Contact;

/// Impulse-based collision response with linear positional correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseResolver {
    correction_percent: f64,
    slop: f64,
}

impl ImpulseResolver {
    pub const DEFAULT_CORRECTION_PERCENT: f64 = 0.2; // Penetration fraction corrected per step
    pub const DEFAULT_SLOP: f64 = 0.01; // Penetration left alone

    /// `correction_percent` must lie in `(0, 1]`, `slop` must be non-negative.
    pub fn new(correction_percent: f64, slop: f64) -> Result<Self> {
        let correction_percent = require_positive("correction percent", correction_percent)?;
        if correction_percent > 1.0 {
            return Err(PhysicsError::InvalidParameter {
                name: "correction percent",
                value: correction_percent,
                reason: "must not exceed 1",
            });
        }
        Ok(Self {
            correction_percent,
            slop: require_non_negative("slop", slop)?,
        })
    }

    pub fn correction_percent(&self) -> f64 {
        self.correction_percent
    }

    pub fn slop(&self) -> f64 {
        self.slop
    }

    /// Resolves one contact whose normal points from `a` to `b`.
    pub fn resolve(&self, a: &mut PhysicalObject, b: &mut PhysicalObject, contact: &Contact) {
        self.apply_impulse(a, b, contact);
        self.apply_positional_correction(a, b, contact);
    }

    fn apply_impulse(&self, a: &mut PhysicalObject, b: &mut PhysicalObject, contact: &Contact) {
        let normal = contact.normal;
        let r_a = contact.point - a.position();
        let r_b = contact.point - b.position();

        // Velocity of each object at the contact point
        let v_a = a.velocity() + r_a.perpendicular() * a.angular_velocity();
        let v_b = b.velocity() + r_b.perpendicular() * b.angular_velocity();
        let relative_velocity_normal = (v_b - v_a).dot(normal);

        if relative_velocity_normal > 0.0 {
            trace!("already separating, no impulse");
            return;
        }

        let e = Material::combined_restitution(a.material(), b.material());

        let ra_cross_n = r_a.cross(normal);
        let rb_cross_n = r_b.cross(normal);
        let effective_mass = a.inv_mass()
            + b.inv_mass()
            + ra_cross_n * ra_cross_n * a.inv_inertia()
            + rb_cross_n * rb_cross_n * b.inv_inertia();
        if effective_mass < 1e-12 {
            return;
        }

        let j = -(1.0 + e) * relative_velocity_normal / effective_mass;
        let impulse = normal * j;
        trace!("impulse {:?} (j = {:.4}, e = {:.2})", impulse, j, e);

        let (inv_mass_a, inv_inertia_a) = (a.inv_mass(), a.inv_inertia());
        let (inv_mass_b, inv_inertia_b) = (b.inv_mass(), b.inv_inertia());
        a.add_velocity(-(impulse * inv_mass_a), -r_a.cross(impulse) * inv_inertia_a);
        b.add_velocity(impulse * inv_mass_b, r_b.cross(impulse) * inv_inertia_b);
    }

    fn apply_positional_correction(
        &self,
        a: &mut PhysicalObject,
        b: &mut PhysicalObject,
        contact: &Contact,
    ) {
        let correction_magnitude = (contact.depth - self.slop).max(0.0);
        if correction_magnitude < 1e-9 {
            return;
        }

        let total_inv_mass = a.inv_mass() + b.inv_mass();
        if total_inv_mass < 1e-9 {
            return;
        }

        let correction =
            contact.normal * (correction_magnitude / total_inv_mass * self.correction_percent);
        let (inv_mass_a, inv_mass_b) = (a.inv_mass(), b.inv_mass());
        a.shift(-(correction * inv_mass_a));
        b.shift(correction * inv_mass_b);
    }
}

impl Default for ImpulseResolver {
    fn default() -> Self {
        Self {
            correction_percent: Self::DEFAULT_CORRECTION_PERCENT,
            slop: Self::DEFAULT_SLOP,
        }
    }
}
