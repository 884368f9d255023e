//! Core types for pairwise collision checking.
//!
//! This crate provides the foundational types for deciding which candidate
//! body pairs constitute reportable collisions:
//!
//! - [`BodyIdentity`] - Name and classification of a collision body
//! - [`PairKey`] - Canonical unordered pair of body names
//! - [`Contact`] - A contact point reported by a narrow-phase backend
//! - [`ShapeDescription`] - Geometry descriptions handed to backends
//! - [`CollisionRequest`] / [`CollisionResult`] - What to compute, and what was found
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no filtering policy, no budget
//! logic, no geometry math. They're the common language between:
//!
//! - The pairwise decision core (collision-check)
//! - Narrow-phase backends (external contact generators)
//! - Broad-phase drivers enumerating candidate pairs
//! - Logging and replay (serialized collision results)
//!
//! The one exception is [`CollisionResult`], which guards its own counting
//! invariant: contacts enter only through [`CollisionResult::record`], so the
//! total contact count always equals the number of stored contacts.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//!
//! - Headless planning and validation loops
//! - Hardware control code
//! - Analysis tools
//! - Other engines
//!
//! # Example
//!
//! ```
//! use collision_types::{BodyIdentity, PairKey};
//!
//! let gripper = BodyIdentity::robot_link("gripper");
//! let part = BodyIdentity::attached_body("part", "gripper", ["gripper"]);
//!
//! // The grasped part is allowed to touch the link holding it.
//! assert!(part.allows_touch("gripper"));
//!
//! // Pair keys are canonical: enumeration order does not matter.
//! assert_eq!(
//!     PairKey::new(&gripper.name, &part.name),
//!     PairKey::new(&part.name, &gripper.name),
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/collision-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,     // Many methods can't be const due to nalgebra
    clippy::missing_errors_doc,        // Error docs added where non-obvious
)]

mod body;
mod contact;
mod error;
mod pair;
mod request;
mod result;
mod shape;

pub use body::{BodyIdentity, BodyKind};
pub use contact::Contact;
pub use error::CollisionError;
pub use pair::PairKey;
pub use request::CollisionRequest;
pub use result::CollisionResult;
pub use shape::ShapeDescription;

// Re-export math types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for collision operations.
pub type Result<T> = std::result::Result<T, CollisionError>;
