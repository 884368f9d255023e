//! Pairwise collision decision core.
//!
//! Given candidate body pairs from a broad phase, this crate decides which
//! pairs constitute reportable collisions and how many contact points to
//! compute and retain, under per-pair and global budgets and an
//! allowed-collision policy. It builds on [`collision_types`] for the data
//! structures and delegates exact contact geometry to an external
//! [`ContactGenerator`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Broad-phase driver                        │
//! │  Enumerates candidate pairs in arbitrary order (external)   │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │ one call per pair
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   EvaluationContext                          │
//! │  Policy lookup → touch-link rule → budget → query strategy  │
//! │  Accumulates: CollisionResult, done flag                    │
//! └──────────┬──────────────────────────────┬───────────────────┘
//!            │                              │
//!            ▼                              ▼
//! ┌─────────────────────────┐  ┌─────────────────────────────────┐
//! │  AllowedCollisionMatrix  │  │       ContactGenerator          │
//! │  Always / Conditional /  │  │  BooleanOnly / AtMost(n) /      │
//! │  NotSpecified            │  │  Exhaustive queries (external)  │
//! └─────────────────────────┘  └─────────────────────────────────┘
//! ```
//!
//! The evaluator always issues the cheapest sufficient query: a boolean
//! overlap test when nothing can be stored, a bounded enumeration when
//! storage room remains, and an exhaustive enumeration only for
//! conditionally allowed pairs, where a truncated scan could miss the one
//! contact that decides the outcome. Once a collision is found and the
//! contact budget is met, the run is done and every further call is a
//! no-op, whatever order — or how often — the broad phase re-reports pairs.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless planning and validation loops
//! - Hardware control code
//! - Analysis tools
//! - Other engines
//!
//! # Quick Start
//!
//! ```
//! use collision_check::{
//!     AllowedCollisionMatrix, ContactGenerator, ContactQuery, EvaluationContext,
//! };
//! use collision_types::{BodyIdentity, CollisionRequest, Contact, Point3, Vector3};
//!
//! // A toy generator: every queried pair touches at the origin.
//! struct AlwaysTouching;
//!
//! impl ContactGenerator for AlwaysTouching {
//!     fn generate(
//!         &mut self,
//!         a: &BodyIdentity,
//!         b: &BodyIdentity,
//!         _query: ContactQuery,
//!     ) -> Vec<Contact> {
//!         vec![Contact::new(Point3::origin(), Vector3::z(), 0.001, a, b)]
//!     }
//! }
//!
//! let wrist = BodyIdentity::robot_link("wrist");
//! let can = BodyIdentity::world_object("can");
//! let table = BodyIdentity::world_object("table");
//!
//! // The wrist is allowed to rest against the table, but not the can.
//! let mut matrix = AllowedCollisionMatrix::new();
//! matrix.allow("wrist", "table");
//!
//! let request = CollisionRequest::default().with_contacts(10, 2);
//! let mut ctx = EvaluationContext::new(&request, Some(&matrix));
//! let mut generator = AlwaysTouching;
//!
//! ctx.run(&mut generator, [(&wrist, &table), (&wrist, &can)]);
//!
//! let result = ctx.finish();
//! assert!(result.collision_detected());
//! assert_eq!(result.contact_count(), 1); // the allowed pair stored nothing
//! ```

#![doc(html_root_url = "https://docs.rs/collision-check/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Borrow-holding constructors can't be const
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod budget;
mod evaluate;
mod matrix;
mod narrow;

pub use budget::remaining_for_pair;
pub use evaluate::EvaluationContext;
pub use matrix::{AllowedCollisionMatrix, DecideContactFn, Disposition};
pub use narrow::{ContactGenerator, ContactQuery};

// Re-export key types from collision-types for convenience
pub use collision_types::{
    BodyIdentity, BodyKind, CollisionError, CollisionRequest, CollisionResult, Contact, PairKey,
    ShapeDescription,
};

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use collision_types::{Point3, Vector3};

    /// Overlapping pair that the policy filters out entirely.
    #[test]
    fn test_filtered_pair_contributes_nothing() {
        struct OneContact;
        impl ContactGenerator for OneContact {
            fn generate(
                &mut self,
                a: &BodyIdentity,
                b: &BodyIdentity,
                _query: ContactQuery,
            ) -> Vec<Contact> {
                vec![Contact::new(Point3::origin(), Vector3::z(), 0.01, a, b)]
            }
        }

        let base = BodyIdentity::robot_link("base_link");
        let mount = BodyIdentity::world_object("mount");

        let mut matrix = AllowedCollisionMatrix::new();
        matrix.allow("base_link", "mount");

        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, Some(&matrix));
        let done = ctx.evaluate(&mut OneContact, &base, &mount);

        assert!(!done);
        let result = ctx.finish();
        assert!(!result.collision_detected());
        assert_eq!(result.contact_count(), 0);
    }
}
