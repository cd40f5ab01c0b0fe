use std::sync::Arc;

use log::{debug, trace};

use crate::collision::{detect_collision, CollisionEvent, ImpulseResolver};
use crate::error::{PhysicsError, Result};
use crate::forces::{Force, ForceId, ForceScope};
use crate::integration::integrate;
use crate::math::Point;
use crate::objects::{Body, ObjectId, Particle, PhysicalObject};
use crate::shapes::{Polygon, Shape, ShapeFactory};

#[derive(Debug)]
struct Entry {
    id: ObjectId,
    object: PhysicalObject,
}

#[derive(Debug)]
struct ActiveForce {
    id: ForceId,
    force: Force,
    scope: ForceScope,
}

/// Owns every simulated object and every active force, and advances them
/// together one step at a time.
///
/// A step applies forces in registration order, integrates every object,
/// tests all distinct pairs of collidable objects, optionally resolves the
/// contacts, and finally drops depleted forces.
#[derive(Debug, Default)]
pub struct World {
    objects: Vec<Entry>,
    forces: Vec<ActiveForce>,
    shape_factory: ShapeFactory,
    resolver: Option<ImpulseResolver>,
    // Collisions found by the most recent step
    collisions: Vec<CollisionEvent>,
    next_object_id: u64,
    next_force_id: u64,
    elapsed: f64,
}

impl World {
    /// An empty world with the default shape factory, no forces and no collision response.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(shape_factory: ShapeFactory, resolver: Option<ImpulseResolver>) -> Self {
        Self {
            shape_factory,
            resolver,
            ..Self::default()
        }
    }

    pub fn shape_factory(&self) -> &ShapeFactory {
        &self.shape_factory
    }

    pub fn resolver(&self) -> Option<&ImpulseResolver> {
        self.resolver.as_ref()
    }

    pub fn set_resolver(&mut self, resolver: Option<ImpulseResolver>) {
        self.resolver = resolver;
    }

    // --- Spawning ---

    /// Registers a resting point mass. Fails with `InvalidParameter` unless `mass > 0`.
    pub fn spawn_particle(&mut self, mass: f64, position: Point) -> Result<ObjectId> {
        let particle = Particle::new(mass, position)?;
        Ok(self.insert(particle.into()))
    }

    /// Registers a particle that collides as a circle of `radius`.
    pub fn spawn_sized_particle(&mut self, mass: f64, position: Point, radius: f64) -> Result<ObjectId> {
        let particle = Particle::new(mass, position)?.with_radius(radius)?;
        Ok(self.insert(particle.into()))
    }

    /// Builds a shape from `polygon` and registers a body whose centroid sits at `position`.
    ///
    /// Geometry failures from the shape factory propagate and nothing is registered.
    pub fn spawn_rigid_body(&mut self, mass: f64, polygon: &Polygon, position: Point) -> Result<ObjectId> {
        let shape = self.shape_factory.create_original_polygon_shape(polygon)?;
        self.spawn_body_with_shape(mass, shape, position)
    }

    /// Registers a body sharing an already-built shape.
    pub fn spawn_body_with_shape(&mut self, mass: f64, shape: Arc<Shape>, position: Point) -> Result<ObjectId> {
        let body = Body::new(mass, shape, position)?;
        Ok(self.insert(body.into()))
    }

    /// Registers a pre-built particle or body.
    pub fn insert(&mut self, object: PhysicalObject) -> ObjectId {
        let id = ObjectId(self.next_object_id);
        self.next_object_id += 1;
        debug!(
            "spawned {} ({}, mass {}) at {:?}",
            id,
            if object.is_body() { "body" } else { "particle" },
            object.mass(),
            object.position()
        );
        self.objects.push(Entry { id, object });
        id
    }

    /// Removes an object together with every force scoped to it alone.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<PhysicalObject> {
        let index = self
            .index_of(id)
            .ok_or_else(|| PhysicsError::InvalidArgument(format!("unknown object {}", id)))?;
        let entry = self.objects.remove(index);

        let before = self.forces.len();
        self.forces.retain(|f| f.scope != ForceScope::Object(id));
        debug!(
            "removed {} and {} force(s) scoped to it",
            id,
            before - self.forces.len()
        );
        Ok(entry.object)
    }

    // --- Forces ---

    /// Registers a force acting on every object until it depletes.
    pub fn add_force(&mut self, force: impl Into<Force>) -> ForceId {
        self.register_force(ForceScope::All, force.into())
    }

    /// Registers a force acting on the objects selected by `scope`.
    /// Fails with `InvalidArgument` if the scope names an unknown object.
    pub fn add_force_to(&mut self, scope: ForceScope, force: impl Into<Force>) -> Result<ForceId> {
        self.check_scope(scope)?;
        Ok(self.register_force(scope, force.into()))
    }

    pub fn remove_force(&mut self, id: ForceId) -> Result<Force> {
        let index = self
            .forces
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| PhysicsError::InvalidArgument(format!("unknown force {}", id)))?;
        debug!("removed {}", id);
        Ok(self.forces.remove(index).force)
    }

    fn register_force(&mut self, scope: ForceScope, force: Force) -> ForceId {
        let id = ForceId(self.next_force_id);
        self.next_force_id += 1;
        debug!("registered {} for {:?}", id, scope);
        self.forces.push(ActiveForce { id, force, scope });
        id
    }

    fn check_scope(&self, scope: ForceScope) -> Result<()> {
        match scope {
            ForceScope::Object(id) if self.index_of(id).is_none() => Err(
                PhysicsError::InvalidArgument(format!("force scoped to unknown object {}", id)),
            ),
            _ => Ok(()),
        }
    }

    // --- Read access ---

    fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|e| e.id == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PhysicalObject> {
        self.objects.iter().find(|e| e.id == id).map(|e| &e.object)
    }

    /// The object if it is a plain particle.
    pub fn particle(&self, id: ObjectId) -> Option<&Particle> {
        self.object(id).and_then(PhysicalObject::as_particle)
    }

    /// The object if it is a body.
    pub fn body(&self, id: ObjectId) -> Option<&Body> {
        self.object(id).and_then(PhysicalObject::as_body)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &PhysicalObject)> + '_ {
        self.objects.iter().map(|e| (e.id, &e.object))
    }

    pub fn bodies(&self) -> impl Iterator<Item = (ObjectId, &Body)> + '_ {
        self.objects
            .iter()
            .filter_map(|e| e.object.as_body().map(|b| (e.id, b)))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    /// Collisions detected during the most recent step.
    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collisions
    }

    /// Total simulated time.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    // --- Stepping ---

    /// Advances the simulation by `time` seconds.
    ///
    /// Fails with `InvalidParameter` if `time` is negative or not finite. All
    /// validation happens before anything is touched, so a failed step leaves
    /// the world exactly as it was. A zero step still evaluates forces and
    /// collisions but moves nothing.
    pub fn step(&mut self, time: f64) -> Result<()> {
        if !time.is_finite() || time < 0.0 {
            return Err(PhysicsError::InvalidParameter {
                name: "time step",
                value: time,
                reason: "must be a finite value of zero or more",
            });
        }
        for active in &self.forces {
            self.check_scope(active.scope)?;
        }

        // 1. Start every object from an empty accumulator
        for entry in &mut self.objects {
            entry.object.clear_accumulators();
        }

        // 2. Accumulate forces
        for active in &mut self.forces {
            active.force.step(time);
            if active.force.is_depleted() {
                continue;
            }
            for entry in &mut self.objects {
                if active.scope.includes(entry.id, &entry.object) {
                    active.force.apply_to_object(&mut entry.object);
                }
            }
        }

        // 3. Integrate motion
        for entry in &mut self.objects {
            integrate(&mut entry.object, time);
        }

        // 4. Collision detection
        self.detect_collisions();

        // 5. Collision response
        if let Some(resolver) = &self.resolver {
            for event in &self.collisions {
                let (Some(i), Some(j)) = (
                    self.objects.iter().position(|e| e.id == event.first),
                    self.objects.iter().position(|e| e.id == event.second),
                ) else {
                    continue;
                };
                let (a, b) = pair_mut(&mut self.objects, i, j);
                resolver.resolve(&mut a.object, &mut b.object, &event.contact);
            }
        }

        // 6. Drop depleted forces
        let before = self.forces.len();
        self.forces.retain(|f| !f.force.is_depleted());
        let pruned = before - self.forces.len();
        if pruned > 0 {
            debug!("pruned {} depleted force(s)", pruned);
        }

        self.elapsed += time;
        trace!(
            "step dt={} objects={} forces={} collisions={}",
            time,
            self.objects.len(),
            self.forces.len(),
            self.collisions.len()
        );
        Ok(())
    }

    /// Runs the collision detector over every distinct unordered pair.
    fn detect_collisions(&mut self) {
        self.collisions.clear();
        for i in 0..self.objects.len() {
            for j in (i + 1)..self.objects.len() {
                let (a, b) = (&self.objects[i], &self.objects[j]);
                if let Some(contact) = detect_collision(&a.object, &b.object).contact() {
                    trace!(
                        "{} hit {}: depth {:.4} normal {:?}",
                        a.id,
                        b.id,
                        contact.depth,
                        contact.normal
                    );
                    self.collisions.push(CollisionEvent {
                        first: a.id,
                        second: b.id,
                        contact: *contact,
                    });
                }
            }
        }
    }
}

/// Two distinct mutable elements of a slice. Indices must differ.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::{Gravity, Impulse, TimedForce};
    use crate::math::Vec2;

    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Polygon {
        Polygon::square(1.0)
    }

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert_eq!(world.object_count(), 0);
        assert_eq!(world.force_count(), 0);
        assert!(world.collisions().is_empty());
        assert!(world.resolver().is_none());
        assert_eq!(world.elapsed(), 0.0);
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut world = World::new();
        let a = world.spawn_particle(1.0, Point::ORIGIN).unwrap();
        let b = world.spawn_rigid_body(1.0, &unit_square(), Point::ORIGIN).unwrap();
        assert_ne!(a, b);
        assert!(world.particle(a).is_some());
        assert!(world.body(a).is_none());
        assert!(world.body(b).is_some());
        assert_eq!(world.bodies().count(), 1);
        assert_eq!(world.objects().count(), 2);
    }

    #[test]
    fn test_spawn_rejects_bad_mass() {
        let mut world = World::new();
        assert!(matches!(
            world.spawn_particle(0.0, Point::ORIGIN),
            Err(PhysicsError::InvalidParameter { .. })
        ));
        assert!(world.spawn_rigid_body(-1.0, &unit_square(), Point::ORIGIN).is_err());
        assert_eq!(world.object_count(), 0);
    }

    #[test]
    fn test_spawn_bowtie_registers_nothing() {
        let mut world = World::new();
        let bowtie = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]);
        let result = world.spawn_rigid_body(1.0, &bowtie, Point::ORIGIN);
        assert!(matches!(result, Err(PhysicsError::InvalidGeometry(_))));
        assert_eq!(world.object_count(), 0);
    }

    #[test]
    fn test_spawned_shapes_share_factory_shape() {
        let mut world = World::new();
        let shape = world
            .shape_factory()
            .create_original_polygon_shape(&unit_square())
            .unwrap();
        let a = world.spawn_body_with_shape(1.0, shape.clone(), Point::ORIGIN).unwrap();
        let b = world.spawn_body_with_shape(1.0, shape.clone(), Point::new(5.0, 0.0)).unwrap();
        assert!(Arc::ptr_eq(world.body(a).unwrap().shape(), world.body(b).unwrap().shape()));
        assert_eq!(Arc::strong_count(&shape), 3);
    }

    #[test]
    fn test_step_rejects_negative_time_without_change() {
        let mut world = World::new();
        let id = world.spawn_particle(1.0, Point::new(0.0, 5.0)).unwrap();
        world.add_force(Impulse::new(Vec2::new(1.0, 0.0)));

        assert!(world.step(-0.1).is_err());
        assert!(world.step(f64::NAN).is_err());
        assert_eq!(world.elapsed(), 0.0);
        assert_eq!(world.force_count(), 1);

        // The impulse is still pending and fires on the first valid step
        world.step(1.0).unwrap();
        assert!((world.object(id).unwrap().velocity().x - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_step_moves_nothing() {
        let mut world = World::new();
        world.add_force(Gravity::new(9.81).unwrap());
        let id = world.spawn_particle(1.0, Point::new(1.0, 2.0)).unwrap();
        world.step(0.0).unwrap();
        let p = world.particle(id).unwrap();
        assert_eq!(p.position(), Point::new(1.0, 2.0));
        assert_eq!(p.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_step_ignores_force_applied_before_insert() {
        let mut world = World::new();
        let mut particle = Particle::new(1.0, Point::ORIGIN).unwrap();
        particle.apply_force(Vec2::new(100.0, 0.0));
        let p = world.insert(particle.into());

        let shape = world
            .shape_factory()
            .create_original_polygon_shape(&unit_square())
            .unwrap();
        let mut body = Body::new(1.0, shape, Point::new(5.0, 0.0)).unwrap();
        body.apply_force_at_point(Vec2::new(0.0, 50.0), Point::new(5.5, 0.0));
        let b = world.insert(body.into());

        world.step(1.0).unwrap();

        let particle = world.particle(p).unwrap();
        assert_eq!(particle.velocity(), Vec2::ZERO);
        assert_eq!(particle.position(), Point::ORIGIN);
        let body = world.body(b).unwrap();
        assert_eq!(body.velocity(), Vec2::ZERO);
        assert_eq!(body.angular_velocity(), 0.0);
    }

    #[test]
    fn test_step_gravity() {
        let mut world = World::new();
        world.add_force(Gravity::new(10.0).unwrap());
        let id = world.spawn_particle(1.0, Point::ORIGIN).unwrap();

        world.step(0.1).unwrap();
        let p = world.particle(id).unwrap();
        assert!(p.velocity().x.abs() < EPSILON);
        assert!((p.velocity().y - -1.0).abs() < EPSILON);
        assert!((p.position().y - -0.1).abs() < EPSILON);
        assert!((world.elapsed() - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_impulse_applied_once_then_pruned() {
        let mut world = World::new();
        let id = world.spawn_particle(2.0, Point::ORIGIN).unwrap();
        world.add_force(Impulse::new(Vec2::new(4.0, 0.0)));

        world.step(0.5).unwrap();
        // dv = J / m
        assert!((world.particle(id).unwrap().velocity().x - 2.0).abs() < EPSILON);

        world.step(0.5).unwrap();
        assert!((world.particle(id).unwrap().velocity().x - 2.0).abs() < EPSILON);
        assert_eq!(world.force_count(), 0);
    }

    #[test]
    fn test_impulse_at_offset_spins_body() {
        let mut world = World::new();
        let id = world.spawn_rigid_body(1.0, &unit_square(), Point::ORIGIN).unwrap();
        world
            .add_force_to(
                ForceScope::Object(id),
                Impulse::at_offset(Vec2::new(0.0, 1.0), Vec2::new(0.5, 0.0)),
            )
            .unwrap();
        world.step(0.1).unwrap();
        let body = world.body(id).unwrap();
        // dw = (r x J) / I = 0.5 / (1/6)
        assert!((body.angular_velocity() - 3.0).abs() < EPSILON);
        assert!((body.velocity().y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_scoped_forces() {
        let mut world = World::new();
        let p = world.spawn_particle(1.0, Point::ORIGIN).unwrap();
        let b = world.spawn_rigid_body(1.0, &unit_square(), Point::new(10.0, 0.0)).unwrap();

        world
            .add_force_to(ForceScope::Particles, TimedForce::new(Vec2::new(1.0, 0.0), 10.0).unwrap())
            .unwrap();
        world
            .add_force_to(ForceScope::Object(b), TimedForce::new(Vec2::new(0.0, 1.0), 10.0).unwrap())
            .unwrap();
        world.step(1.0).unwrap();

        assert_eq!(world.particle(p).unwrap().velocity(), Vec2::new(1.0, 0.0));
        assert_eq!(world.body(b).unwrap().velocity(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_scope_to_unknown_object_fails() {
        let mut world = World::new();
        let result = world.add_force_to(ForceScope::Object(ObjectId(42)), Gravity::new(1.0).unwrap());
        assert!(matches!(result, Err(PhysicsError::InvalidArgument(_))));
        assert_eq!(world.force_count(), 0);
    }

    #[test]
    fn test_remove_object_drops_its_forces() {
        let mut world = World::new();
        let a = world.spawn_particle(1.0, Point::ORIGIN).unwrap();
        world.add_force(Gravity::new(1.0).unwrap());
        world
            .add_force_to(ForceScope::Object(a), Gravity::new(1.0).unwrap())
            .unwrap();
        assert_eq!(world.force_count(), 2);

        let removed = world.remove_object(a).unwrap();
        assert!(!removed.is_body());
        assert!(!world.contains(a));
        assert_eq!(world.force_count(), 1);
        assert!(world.remove_object(a).is_err());
    }

    #[test]
    fn test_remove_force() {
        let mut world = World::new();
        let id = world.add_force(Gravity::new(1.0).unwrap());
        assert!(world.remove_force(id).is_ok());
        assert_eq!(world.force_count(), 0);
        assert!(matches!(world.remove_force(id), Err(PhysicsError::InvalidArgument(_))));
    }

    #[test]
    fn test_collisions_reported_per_step() {
        let mut world = World::new();
        let a = world.spawn_rigid_body(1.0, &unit_square(), Point::ORIGIN).unwrap();
        let b = world.spawn_rigid_body(1.0, &unit_square(), Point::new(0.5, 0.0)).unwrap();
        let _far = world.spawn_rigid_body(1.0, &unit_square(), Point::new(10.0, 10.0)).unwrap();
        let _point = world.spawn_particle(1.0, Point::ORIGIN).unwrap();

        world.step(0.0).unwrap();
        assert_eq!(world.collisions().len(), 1);
        let event = world.collisions()[0];
        assert_eq!((event.first, event.second), (a, b));
        assert!(event.involves(b));
        assert!((event.contact.depth - 0.5).abs() < EPSILON);

        // Detection only: positions untouched
        assert_eq!(world.body(a).unwrap().position(), Point::ORIGIN);

        world.remove_object(b).unwrap();
        world.step(0.0).unwrap();
        assert!(world.collisions().is_empty());
    }

    #[test]
    fn test_resolver_separates_approaching_balls() {
        let mut world = World::new();
        world.set_resolver(Some(ImpulseResolver::default()));
        let a = world.spawn_sized_particle(1.0, Point::new(0.0, 0.0), 0.5).unwrap();
        let b = world.spawn_sized_particle(1.0, Point::new(0.9, 0.0), 0.5).unwrap();
        world.add_force_to(ForceScope::Object(a), Impulse::new(Vec2::new(1.0, 0.0))).unwrap();

        world.step(0.01).unwrap();
        assert_eq!(world.collisions().len(), 1);
        // Default restitution 0.2 leaves b moving away faster than a
        let va = world.particle(a).unwrap().velocity().x;
        let vb = world.particle(b).unwrap().velocity().x;
        assert!(vb > va);
        assert!((va + vb - 1.0).abs() < EPSILON, "momentum is conserved");
    }

    #[test]
    fn test_pair_mut_either_order() {
        let mut items = [1, 2, 3];
        let (a, b) = pair_mut(&mut items, 2, 0);
        std::mem::swap(a, b);
        assert_eq!(items, [3, 2, 1]);
    }
}
