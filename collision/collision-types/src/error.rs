//! Error types for collision operations.

use thiserror::Error;

/// Errors that can occur while preparing a collision check.
///
/// The pairwise decision core itself has no error paths: missing policy
/// entries, exhausted budgets, and empty contact sets are all ordinary
/// branch outcomes. These variants cover the configuration layer around it,
/// chiefly geometry construction for narrow-phase backends.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    /// Shape category not supported by the narrow-phase backend.
    #[error("shape type '{kind}' is not supported by this collision backend")]
    UnsupportedShape {
        /// The unsupported shape category.
        kind: String,
    },

    /// Shape description with degenerate or non-finite parameters.
    #[error("invalid shape: {reason}")]
    InvalidShape {
        /// Description of what's wrong.
        reason: String,
    },

    /// Body name not known to the backend.
    #[error("body not found: {name}")]
    BodyNotFound {
        /// Name of the missing body.
        name: String,
    },
}

impl CollisionError {
    /// Create an unsupported-shape error.
    #[must_use]
    pub fn unsupported_shape(kind: impl Into<String>) -> Self {
        Self::UnsupportedShape { kind: kind.into() }
    }

    /// Create an invalid-shape error.
    #[must_use]
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }

    /// Check if this is an unsupported-shape error.
    #[must_use]
    pub fn is_unsupported_shape(&self) -> bool {
        matches!(self, Self::UnsupportedShape { .. })
    }

    /// Check if this is an invalid-shape error.
    #[must_use]
    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, Self::InvalidShape { .. })
    }
}
