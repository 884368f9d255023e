//! Canonical unordered body pairs.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Canonical unordered pair of body names.
///
/// The two names are stored so that `first < second` lexicographically,
/// regardless of the order they were supplied in. A broad phase that reports
/// `(A, B)` in one run and `(B, A)` in the next therefore always maps to the
/// same lookup and storage key.
///
/// # Example
///
/// ```
/// use collision_types::PairKey;
///
/// let key = PairKey::new("wrist", "can");
/// assert_eq!(key.first(), "can");
/// assert_eq!(key.second(), "wrist");
/// assert_eq!(key, PairKey::new("can", "wrist"));
/// ```
///
/// # Panics
///
/// `PairKey::new` panics if both names are equal: a body is never
/// collision-checked against itself, and an equal pair at this level is a
/// caller bug, not a data condition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PairKey {
    first: String,
    second: String,
}

impl PairKey {
    /// Create the canonical key for the pair `(a, b)`.
    #[must_use]
    pub fn new(a: &str, b: &str) -> Self {
        assert_ne!(a, b, "body '{a}' cannot be collision-checked against itself");
        if a < b {
            Self {
                first: a.to_owned(),
                second: b.to_owned(),
            }
        } else {
            Self {
                first: b.to_owned(),
                second: a.to_owned(),
            }
        }
    }

    /// The lexicographically smaller body name.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// The lexicographically larger body name.
    #[must_use]
    pub fn second(&self) -> &str {
        &self.second
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}
