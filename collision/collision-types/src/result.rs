//! Accumulated collision results.

use std::collections::BTreeMap;

use crate::{Contact, PairKey};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The cumulative result of one collision-check run.
///
/// The fields are private so the counting invariant holds by construction:
/// `contact_count()` always equals the summed length of the stored contact
/// sequences, because every insertion goes through [`record`](Self::record),
/// which updates both together. The collision flag is monotonic within a run
/// — [`mark_collision`](Self::mark_collision) never unsets it and repeated
/// calls are no-ops.
///
/// Stored contacts are keyed by canonical pair and iterate in key order,
/// independent of the order the broad phase enumerated candidate pairs in.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CollisionResult {
    collision: bool,
    contact_count: usize,
    contacts: BTreeMap<PairKey, Vec<Contact>>,
}

impl CollisionResult {
    /// Create an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any reportable collision was found.
    #[must_use]
    pub fn collision_detected(&self) -> bool {
        self.collision
    }

    /// Total number of stored contacts across all pairs.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contact_count
    }

    /// Number of pairs with at least one stored contact.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.contacts.len()
    }

    /// Stored contacts keyed by canonical pair, in key order.
    #[must_use]
    pub fn contacts(&self) -> &BTreeMap<PairKey, Vec<Contact>> {
        &self.contacts
    }

    /// Stored contacts for one pair, in discovery order.
    #[must_use]
    pub fn contacts_for(&self, key: &PairKey) -> Option<&[Contact]> {
        self.contacts.get(key).map(Vec::as_slice)
    }

    /// Flag that a reportable collision was found.
    pub fn mark_collision(&mut self) {
        self.collision = true;
    }

    /// Store a contact under its canonical pair key.
    ///
    /// The contact is canonicalized first, so the stored record always has
    /// `body_a < body_b`. The total count is incremented in the same step.
    pub fn record(&mut self, contact: Contact) {
        let contact = contact.canonicalized();
        let key = contact.pair_key();
        self.contacts.entry(key).or_default().push(contact);
        self.contact_count += 1;
    }

    /// Reset to an empty result for reuse across runs.
    pub fn clear(&mut self) {
        self.collision = false;
        self.contact_count = 0;
        self.contacts.clear();
    }
}
