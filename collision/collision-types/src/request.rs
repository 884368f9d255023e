//! Collision check requests.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a collision check should compute.
///
/// The default request only answers "is anything colliding?" — no contact
/// geometry is computed or stored. Contact storage is opt-in and bounded
/// both globally and per body pair.
///
/// # Example
///
/// ```
/// use collision_types::CollisionRequest;
///
/// // Boolean-only check.
/// let request = CollisionRequest::default();
/// assert!(!request.contacts);
///
/// // Store up to 20 contacts, at most 4 per pair.
/// let request = CollisionRequest::default().with_contacts(20, 4);
/// assert!(request.contacts);
/// assert_eq!(request.max_contacts, 20);
/// assert_eq!(request.max_contacts_per_pair, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionRequest {
    /// Whether contact information should be computed and stored.
    pub contacts: bool,
    /// Global cap on stored contacts across all pairs.
    pub max_contacts: usize,
    /// Cap on stored contacts for any single pair.
    pub max_contacts_per_pair: usize,
    /// Emit a diagnostic event for every disposition and acceptance decision.
    pub verbose: bool,
}

impl Default for CollisionRequest {
    fn default() -> Self {
        Self {
            contacts: false,
            max_contacts: 1,
            max_contacts_per_pair: 1,
            verbose: false,
        }
    }
}

impl CollisionRequest {
    /// Request contact storage with the given global and per-pair caps.
    #[must_use]
    pub fn with_contacts(mut self, max_contacts: usize, max_contacts_per_pair: usize) -> Self {
        self.contacts = true;
        self.max_contacts = max_contacts;
        self.max_contacts_per_pair = max_contacts_per_pair;
        self
    }

    /// Enable per-decision diagnostics.
    #[must_use]
    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_boolean_only() {
        let request = CollisionRequest::default();
        assert!(!request.contacts);
        assert_eq!(request.max_contacts, 1);
        assert_eq!(request.max_contacts_per_pair, 1);
        assert!(!request.verbose);
    }

    #[test]
    fn test_builder_chain() {
        let request = CollisionRequest::default().with_contacts(10, 3).with_verbose();
        assert!(request.contacts);
        assert_eq!(request.max_contacts, 10);
        assert_eq!(request.max_contacts_per_pair, 3);
        assert!(request.verbose);
    }
}
