//! Contact points reported by the narrow phase.

use nalgebra::{Point3, Vector3};

use crate::{BodyIdentity, BodyKind, PairKey};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single contact point between two bodies.
///
/// Narrow-phase backends may label the two bodies in either order. Before a
/// contact is stored it is [canonicalized](Contact::canonicalized) so that
/// `body_a < body_b` lexicographically, with the normal flipped to keep it
/// pointing from `body_a` toward `body_b`.
///
/// # Example
///
/// ```
/// use collision_types::{BodyIdentity, Contact, Point3, Vector3};
///
/// let wrist = BodyIdentity::robot_link("wrist");
/// let can = BodyIdentity::world_object("can");
///
/// // The backend labeled the bodies in non-canonical order.
/// let contact = Contact::new(Point3::origin(), Vector3::z(), 0.001, &wrist, &can);
/// assert_eq!(contact.body_a, "wrist");
///
/// let contact = contact.canonicalized();
/// assert_eq!(contact.body_a, "can");
/// assert_eq!(contact.normal, -Vector3::z());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contact {
    /// Contact position in world coordinates.
    pub position: Point3<f64>,
    /// Contact normal, pointing from the first body toward the second.
    pub normal: Vector3<f64>,
    /// Penetration depth (non-negative for true overlaps).
    pub depth: f64,
    /// Name of the first body.
    pub body_a: String,
    /// Classification of the first body.
    pub kind_a: BodyKind,
    /// Name of the second body.
    pub body_b: String,
    /// Classification of the second body.
    pub kind_b: BodyKind,
}

impl Contact {
    /// Create a contact between two identified bodies.
    #[must_use]
    pub fn new(
        position: Point3<f64>,
        normal: Vector3<f64>,
        depth: f64,
        a: &BodyIdentity,
        b: &BodyIdentity,
    ) -> Self {
        Self {
            position,
            normal,
            depth,
            body_a: a.name.clone(),
            kind_a: a.kind,
            body_b: b.name.clone(),
            kind_b: b.kind,
        }
    }

    /// Whether the bodies are already in canonical (lexicographic) order.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.body_a < self.body_b
    }

    /// Reorder the bodies into canonical order, flipping the normal if they
    /// swap.
    #[must_use]
    pub fn canonicalized(self) -> Self {
        if self.is_canonical() {
            self
        } else {
            Self {
                position: self.position,
                normal: -self.normal,
                depth: self.depth,
                body_a: self.body_b,
                kind_a: self.kind_b,
                body_b: self.body_a,
                kind_b: self.kind_a,
            }
        }
    }

    /// The canonical storage key for this contact's pair.
    #[must_use]
    pub fn pair_key(&self) -> PairKey {
        PairKey::new(&self.body_a, &self.body_b)
    }
}
