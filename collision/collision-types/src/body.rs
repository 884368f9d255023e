//! Body identity and classification.
//!
//! Every body known to the collision checker carries a [`BodyIdentity`]: a
//! scene-unique name plus a classification that drives filtering decisions.
//! Identities are constructed once per scene body and never mutated
//! afterwards; the decision core only ever borrows them.

use std::collections::HashSet;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Classification of a collision body.
///
/// The classification is a closed set: filtering rules match on it
/// exhaustively, so adding a category means revisiting those rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BodyKind {
    /// A link of the robot model.
    RobotLink,
    /// An object rigidly attached to a robot link (e.g. a grasped part).
    AttachedBody,
    /// An object in the world, not part of the robot.
    WorldObject,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RobotLink => write!(f, "robot link"),
            Self::AttachedBody => write!(f, "attached body"),
            Self::WorldObject => write!(f, "world object"),
        }
    }
}

/// Identity and classification of one collision body.
///
/// Names are unique within a scene and are the key for every policy and
/// accounting decision the checker makes. Attached bodies additionally name
/// the link they are attached to and the set of links permitted to touch
/// them without being flagged as colliding.
///
/// # Example
///
/// ```
/// use collision_types::BodyIdentity;
///
/// let gripper = BodyIdentity::robot_link("gripper");
/// let part = BodyIdentity::attached_body("part", "gripper", ["gripper", "finger_l"]);
///
/// assert!(part.allows_touch("gripper"));
/// assert!(!part.allows_touch("elbow"));
/// // Only attached bodies carry touch permissions.
/// assert!(!gripper.allows_touch("part"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyIdentity {
    /// Scene-unique body name.
    pub name: String,
    /// Classification used by filtering decisions.
    pub kind: BodyKind,
    /// For attached bodies, the robot link the body is attached to.
    pub parent_link: Option<String>,
    /// For attached bodies, links permitted to touch this body.
    pub touch_links: HashSet<String>,
}

impl BodyIdentity {
    /// Create the identity of a robot link.
    #[must_use]
    pub fn robot_link(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::RobotLink,
            parent_link: None,
            touch_links: HashSet::new(),
        }
    }

    /// Create the identity of a world object.
    #[must_use]
    pub fn world_object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: BodyKind::WorldObject,
            parent_link: None,
            touch_links: HashSet::new(),
        }
    }

    /// Create the identity of a body attached to a robot link.
    ///
    /// `touch_links` names the links permitted to touch this body without
    /// the pair being reported as a collision.
    #[must_use]
    pub fn attached_body<I, S>(name: impl Into<String>, parent_link: impl Into<String>, touch_links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: BodyKind::AttachedBody,
            parent_link: Some(parent_link.into()),
            touch_links: touch_links.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the named robot link is permitted to touch this body.
    ///
    /// Always false for bodies that are not attached bodies.
    #[must_use]
    pub fn allows_touch(&self, link_name: &str) -> bool {
        self.kind == BodyKind::AttachedBody && self.touch_links.contains(link_name)
    }
}

impl fmt::Display for BodyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_link_identity() {
        let link = BodyIdentity::robot_link("elbow");
        assert_eq!(link.name, "elbow");
        assert_eq!(link.kind, BodyKind::RobotLink);
        assert!(link.parent_link.is_none());
        assert!(link.touch_links.is_empty());
    }

    #[test]
    fn test_attached_body_touch_links() {
        let part = BodyIdentity::attached_body("box", "gripper", ["gripper", "finger_l"]);
        assert_eq!(part.kind, BodyKind::AttachedBody);
        assert_eq!(part.parent_link.as_deref(), Some("gripper"));
        assert!(part.allows_touch("gripper"));
        assert!(part.allows_touch("finger_l"));
        assert!(!part.allows_touch("base_link"));
    }

    #[test]
    fn test_only_attached_bodies_allow_touch() {
        let object = BodyIdentity::world_object("table");
        assert!(!object.allows_touch("table"));

        let link = BodyIdentity::robot_link("wrist");
        assert!(!link.allows_touch("wrist"));
    }

    #[test]
    fn test_display() {
        let part = BodyIdentity::attached_body("box", "gripper", ["gripper"]);
        assert_eq!(part.to_string(), "attached body 'box'");
        assert_eq!(BodyKind::WorldObject.to_string(), "world object");
    }
}
