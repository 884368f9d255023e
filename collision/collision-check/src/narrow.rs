//! Narrow-phase generator contract.
//!
//! The decision core never computes contact geometry itself. It asks an
//! external generator for contacts, choosing the cheapest query mode that
//! still answers the question at hand: a boolean overlap test when nothing
//! can be stored, a bounded enumeration when budget remains, and an
//! exhaustive enumeration only when a per-contact predicate makes partial
//! results unsafe.

use collision_types::{BodyIdentity, Contact};

/// Query mode for one narrow-phase invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactQuery {
    /// Overlap test only: at most one contact, geometry not required.
    BooleanOnly,
    /// Bounded enumeration with full contact geometry. The cap is at least 1.
    AtMost(usize),
    /// Uncapped enumeration with full contact geometry.
    Exhaustive,
}

impl ContactQuery {
    /// The cap on returned contacts, if any.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        match self {
            Self::BooleanOnly => Some(1),
            Self::AtMost(n) => Some(*n),
            Self::Exhaustive => None,
        }
    }

    /// Whether the caller will read contact geometry (position, normal,
    /// depth), as opposed to only checking for presence.
    #[must_use]
    pub fn wants_geometry(&self) -> bool {
        !matches!(self, Self::BooleanOnly)
    }
}

/// Narrow-phase contact generation for one body pair.
///
/// Implementations own the geometry: they resolve body names to whatever
/// acceleration structures they built from [`ShapeDescription`]s, run the
/// exact tests, and return raw contacts. The decision core treats the
/// returned sequence as opaque data in implementation-defined order, and the
/// bodies may be labeled in either order — storage canonicalizes.
///
/// A generator may return more contacts than the query's cap; the caller
/// clamps. Returning an empty vector means the bodies do not overlap.
///
/// [`ShapeDescription`]: collision_types::ShapeDescription
pub trait ContactGenerator {
    /// Generate contacts between two bodies under the given query mode.
    fn generate(
        &mut self,
        a: &BodyIdentity,
        b: &BodyIdentity,
        query: ContactQuery,
    ) -> Vec<Contact>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_limits() {
        assert_eq!(ContactQuery::BooleanOnly.limit(), Some(1));
        assert_eq!(ContactQuery::AtMost(4).limit(), Some(4));
        assert_eq!(ContactQuery::Exhaustive.limit(), None);
    }

    #[test]
    fn test_geometry_requirements() {
        assert!(!ContactQuery::BooleanOnly.wants_geometry());
        assert!(ContactQuery::AtMost(1).wants_geometry());
        assert!(ContactQuery::Exhaustive.wants_geometry());
    }
}
