use crate::error::{require_non_negative, require_positive, Result};
use crate::math::Vec2;
use crate::objects::ForceReceiver;

use super::force_set::ForceSet;

/// Constant downward acceleration; scaled by the target's mass so every
/// object falls at the same rate. Never depletes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    acceleration: f64,
}

impl Gravity {
    /// Fails with `InvalidParameter` unless `acceleration > 0`.
    pub fn new(acceleration: f64) -> Result<Self> {
        Ok(Self {
            acceleration: require_positive("gravity acceleration", acceleration)?,
        })
    }

    pub fn acceleration(&self) -> f64 {
        self.acceleration
    }

    /// Force on an object of mass `mass`, pointing down the y axis.
    pub fn force_on(&self, mass: f64) -> Vec2 {
        Vec2::new(0.0, -self.acceleration * mass)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ImpulseState {
    Pending,
    Firing { dt: f64 },
    Spent,
}

/// One-shot change of momentum.
///
/// Fires during the first step with a positive time delta, delivering
/// `impulse / dt` as a force for that step, then depletes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    impulse: Vec2,
    offset: Option<Vec2>,
    state: ImpulseState,
}

impl Impulse {
    pub fn new(impulse: Vec2) -> Self {
        Self {
            impulse,
            offset: None,
            state: ImpulseState::Pending,
        }
    }

    /// Impulse delivered at `offset` from the centre of mass; spins bodies.
    pub fn at_offset(impulse: Vec2, offset: Vec2) -> Self {
        Self {
            offset: Some(offset),
            ..Self::new(impulse)
        }
    }

    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    fn step(&mut self, time: f64) {
        self.state = match self.state {
            ImpulseState::Pending if time > 0.0 => ImpulseState::Firing { dt: time },
            ImpulseState::Pending => ImpulseState::Pending,
            ImpulseState::Firing { .. } | ImpulseState::Spent => ImpulseState::Spent,
        };
    }

    fn apply<T: ForceReceiver + ?Sized>(&self, target: &mut T) {
        if let ImpulseState::Firing { dt } = self.state {
            let force = self.impulse / dt;
            match self.offset {
                Some(offset) => target.apply_force_at_offset(force, offset),
                None => target.apply_force(force),
            }
        }
    }
}

/// A constant force that lasts for `duration` seconds of simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedForce {
    force: Vec2,
    remaining: f64,
    active: bool,
}

impl TimedForce {
    /// Fails with `InvalidParameter` unless `duration > 0`.
    pub fn new(force: Vec2, duration: f64) -> Result<Self> {
        Ok(Self {
            force,
            remaining: require_positive("duration", duration)?,
            active: false,
        })
    }

    pub fn remaining(&self) -> f64 {
        self.remaining.max(0.0)
    }

    fn step(&mut self, time: f64) {
        self.active = self.remaining > 0.0;
        self.remaining -= time;
    }

    fn is_depleted(&self) -> bool {
        !self.active && self.remaining <= 0.0
    }
}

/// Linear drag opposing the current velocity: `-coefficient * v`. Never depletes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    coefficient: f64,
}

impl Drag {
    /// Fails with `InvalidParameter` if `coefficient` is negative.
    pub fn new(coefficient: f64) -> Result<Self> {
        Ok(Self {
            coefficient: require_non_negative("drag coefficient", coefficient)?,
        })
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

/// Every kind of force the world can apply.
///
/// Each tick the world calls [`Force::step`], skips the force if it reports
/// [`Force::is_depleted`], and otherwise calls [`Force::apply_to_object`] for
/// every target in scope.
#[derive(Debug, Clone, PartialEq)]
pub enum Force {
    Gravity(Gravity),
    Impulse(Impulse),
    Timed(TimedForce),
    Drag(Drag),
    Set(ForceSet),
}

impl Force {
    /// Advances the force's own state; targets are not touched.
    pub fn step(&mut self, time: f64) {
        match self {
            Force::Gravity(_) | Force::Drag(_) => {}
            Force::Impulse(impulse) => impulse.step(time),
            Force::Timed(timed) => timed.step(time),
            Force::Set(set) => set.step(time),
        }
    }

    /// Adds this force's contribution to `target`'s accumulator.
    pub fn apply_to_object<T: ForceReceiver + ?Sized>(&self, target: &mut T) {
        if self.is_depleted() {
            return;
        }
        match self {
            Force::Gravity(gravity) => {
                let force = gravity.force_on(target.mass());
                target.apply_force(force);
            }
            Force::Impulse(impulse) => impulse.apply(target),
            Force::Timed(timed) => {
                if timed.active {
                    target.apply_force(timed.force);
                }
            }
            Force::Drag(drag) => {
                let force = target.velocity() * -drag.coefficient;
                target.apply_force(force);
            }
            Force::Set(set) => set.apply_to_object(target),
        }
    }

    pub fn is_depleted(&self) -> bool {
        match self {
            Force::Gravity(_) | Force::Drag(_) => false,
            Force::Impulse(impulse) => impulse.state == ImpulseState::Spent,
            Force::Timed(timed) => timed.is_depleted(),
            Force::Set(set) => set.is_depleted(),
        }
    }
}

impl From<Gravity> for Force {
    fn from(g: Gravity) -> Self {
        Force::Gravity(g)
    }
}

impl From<Impulse> for Force {
    fn from(i: Impulse) -> Self {
        Force::Impulse(i)
    }
}

impl From<TimedForce> for Force {
    fn from(t: TimedForce) -> Self {
        Force::Timed(t)
    }
}

impl From<Drag> for Force {
    fn from(d: Drag) -> Self {
        Force::Drag(d)
    }
}

impl From<ForceSet> for Force {
    fn from(s: ForceSet) -> Self {
        Force::Set(s)
    }
}
