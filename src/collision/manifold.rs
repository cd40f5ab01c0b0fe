use crate::math::{Point, Vec2};
use crate::objects::ObjectId;

/// Contact geometry between two overlapping objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first object towards the second.
    pub normal: Vec2,
    /// Penetration depth along `normal`; always positive.
    pub depth: f64,
    /// Representative world-space contact point.
    pub point: Point,
}

impl Contact {
    /// The same contact seen from the other object.
    pub fn flipped(self) -> Contact {
        Contact {
            normal: -self.normal,
            ..self
        }
    }
}

/// Outcome of testing one pair of objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionDetectionResult {
    Separated,
    Colliding(Contact),
}

impl CollisionDetectionResult {
    pub fn is_collision(&self) -> bool {
        matches!(self, CollisionDetectionResult::Colliding(_))
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            CollisionDetectionResult::Colliding(contact) => Some(contact),
            CollisionDetectionResult::Separated => None,
        }
    }

    pub(crate) fn flipped(self) -> Self {
        match self {
            CollisionDetectionResult::Colliding(contact) => {
                CollisionDetectionResult::Colliding(contact.flipped())
            }
            CollisionDetectionResult::Separated => CollisionDetectionResult::Separated,
        }
    }
}

/// A collision reported by the world for one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub first: ObjectId,
    pub second: ObjectId,
    pub contact: Contact,
}

impl CollisionEvent {
    pub fn involves(&self, id: ObjectId) -> bool {
        self.first == id || self.second == id
    }
}
