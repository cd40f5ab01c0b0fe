use crate::objects::ForceReceiver;

use super::force::Force;

/// An ordered group of forces that behaves like a single force.
///
/// Depleted members stop applying individually; the set as a whole is
/// depleted once every member is (or when it is empty).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForceSet {
    forces: Vec<Force>,
}

impl ForceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, force: impl Into<Force>) -> Self {
        self.push(force);
        self
    }

    pub fn push(&mut self, force: impl Into<Force>) {
        self.forces.push(force.into());
    }

    pub fn len(&self) -> usize {
        self.forces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Force> {
        self.forces.iter()
    }

    pub fn step(&mut self, time: f64) {
        for force in &mut self.forces {
            force.step(time);
        }
    }

    pub fn apply_to_object<T: ForceReceiver + ?Sized>(&self, target: &mut T) {
        for force in self.forces.iter().filter(|f| !f.is_depleted()) {
            force.apply_to_object(target);
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.forces.iter().all(Force::is_depleted)
    }
}

impl FromIterator<Force> for ForceSet {
    fn from_iter<I: IntoIterator<Item = Force>>(iter: I) -> Self {
        Self {
            forces: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::{Gravity, Impulse};
    use crate::math::{Point, Vec2};
    use crate::objects::Particle;

    #[test]
    fn test_empty_set_is_depleted() {
        assert!(ForceSet::new().is_depleted());
    }

    #[test]
    fn test_set_fans_out() {
        let mut set = ForceSet::new()
            .with(Gravity::new(10.0).unwrap())
            .with(Impulse::new(Vec2::new(1.0, 0.0)));
        assert_eq!(set.len(), 2);

        set.step(1.0);
        let mut p = Particle::new(2.0, Point::ORIGIN).unwrap();
        set.apply_to_object(&mut p);
        assert_eq!(p.accumulated_force(), Vec2::new(1.0, -20.0));
    }

    #[test]
    fn test_set_depleted_only_when_all_members_are() {
        let mut impulses: ForceSet = vec![
            Force::from(Impulse::new(Vec2::new(1.0, 0.0))),
            Force::from(Impulse::new(Vec2::new(0.0, 1.0))),
        ]
        .into_iter()
        .collect();
        impulses.step(0.1);
        assert!(!impulses.is_depleted());
        impulses.step(0.1);
        assert!(impulses.is_depleted());

        let mut mixed = ForceSet::new()
            .with(Gravity::new(1.0).unwrap())
            .with(Impulse::new(Vec2::new(1.0, 0.0)));
        mixed.step(0.1);
        mixed.step(0.1);
        assert!(!mixed.is_depleted());

        // The spent impulse no longer contributes
        let mut p = Particle::new(1.0, Point::ORIGIN).unwrap();
        mixed.apply_to_object(&mut p);
        assert_eq!(p.accumulated_force(), Vec2::new(0.0, -1.0));
    }
}
