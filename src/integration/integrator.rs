use crate::objects::{Body, Particle, PhysicalObject};

/// Advances a particle by `dt` using semi-implicit Euler and clears its accumulator.
///
/// Velocity is updated first and the new velocity moves the position.
pub fn integrate_particle(particle: &mut Particle, dt: f64) {
    // a = F/m = F * inv_m
    let acceleration = particle.force * particle.inv_mass();
    particle.velocity += acceleration * dt;
    particle.position += particle.velocity * dt;
    particle.clear_accumulator();
}

/// Advances a body's linear and angular state by `dt` and clears its accumulators.
pub fn integrate_body(body: &mut Body, dt: f64) {
    integrate_particle(body.particle_mut(), dt);

    // alpha = T/I = T * inv_I
    let angular_acceleration = body.torque * body.inv_inertia();
    body.angular_velocity += angular_acceleration * dt;
    body.rotation = wrap_angle(body.rotation + body.angular_velocity * dt);

    body.torque = 0.0;
    body.invalidate_world_polygon();
}

pub fn integrate(object: &mut PhysicalObject, dt: f64) {
    match object {
        PhysicalObject::Particle(p) => integrate_particle(p, dt),
        PhysicalObject::Body(b) => integrate_body(b, dt),
    }
}

/// Wraps an angle in radians to [-PI, PI].
fn wrap_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    angle.sin().atan2(angle.cos())
}
