//! Allowed-collision policy lookup.
//!
//! The matrix maps unordered body pairs to a disposition: unconditionally
//! allowed (never checked, never reported), conditionally allowed via a
//! per-contact predicate, or unspecified (checked normally). It is built
//! once per scene, then shared read-only across evaluation runs.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;

use collision_types::{Contact, PairKey};

/// Per-contact acceptance predicate for conditionally allowed pairs.
///
/// Returns true when the given contact is acceptable, i.e. NOT a reportable
/// collision. Invoked once per generated contact, so acceptance can depend
/// on contact geometry (position, depth, normal), not just on the pair.
pub type DecideContactFn = Arc<dyn Fn(&Contact) -> bool + Send + Sync>;

/// Disposition of a body pair under the policy.
#[derive(Clone)]
pub enum Disposition {
    /// No entry: the pair is checked normally.
    NotSpecified,
    /// The pair never constitutes a collision; no contacts are computed.
    Always,
    /// Each contact is judged individually by the predicate.
    Conditional(DecideContactFn),
}

impl Disposition {
    /// Whether the pair is unconditionally allowed.
    #[must_use]
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Whether the pair has no policy entry.
    #[must_use]
    pub fn is_not_specified(&self) -> bool {
        matches!(self, Self::NotSpecified)
    }
}

impl fmt::Debug for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSpecified => write!(f, "NotSpecified"),
            Self::Always => write!(f, "Always"),
            Self::Conditional(_) => write!(f, "Conditional(..)"),
        }
    }
}

#[derive(Clone)]
enum Entry {
    Always,
    Conditional(DecideContactFn),
}

/// Read-only lookup table of allowed collisions between body pairs.
///
/// # Example
///
/// ```
/// use collision_check::AllowedCollisionMatrix;
///
/// let mut matrix = AllowedCollisionMatrix::new();
/// matrix.allow("upper_arm", "forearm");
/// // Adjacent links touch by construction; deep penetrations still count.
/// matrix.allow_when("forearm", "wrist", |contact| contact.depth < 0.001);
///
/// assert!(matrix.lookup("forearm", "upper_arm").is_always());
/// assert!(matrix.lookup("forearm", "table").is_not_specified());
/// ```
#[derive(Clone, Default)]
pub struct AllowedCollisionMatrix {
    entries: HashMap<PairKey, Entry>,
}

impl AllowedCollisionMatrix {
    /// Create an empty matrix (all pairs checked normally).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pair as unconditionally allowed.
    pub fn allow(&mut self, a: &str, b: &str) {
        self.entries.insert(PairKey::new(a, b), Entry::Always);
    }

    /// Mark the pair as conditionally allowed via a per-contact predicate.
    ///
    /// The predicate returns true for contacts that are acceptable (not
    /// reportable collisions).
    pub fn allow_when<F>(&mut self, a: &str, b: &str, decide: F)
    where
        F: Fn(&Contact) -> bool + Send + Sync + 'static,
    {
        self.entries
            .insert(PairKey::new(a, b), Entry::Conditional(Arc::new(decide)));
    }

    /// Remove the entry for a pair, returning whether one existed.
    pub fn remove(&mut self, a: &str, b: &str) -> bool {
        self.entries.remove(&PairKey::new(a, b)).is_some()
    }

    /// Look up the disposition of a pair. Order of the names is irrelevant.
    #[must_use]
    pub fn lookup(&self, a: &str, b: &str) -> Disposition {
        match self.entries.get(&PairKey::new(a, b)) {
            None => Disposition::NotSpecified,
            Some(Entry::Always) => Disposition::Always,
            Some(Entry::Conditional(decide)) => Disposition::Conditional(Arc::clone(decide)),
        }
    }

    /// Number of pairs with an entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the matrix has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AllowedCollisionMatrix {
    // Entries hold closures, so Debug reports only the pair count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllowedCollisionMatrix")
            .field("entries", &self.entries.len())
            .finish()
    }
}
