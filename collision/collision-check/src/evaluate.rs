//! Per-pair evaluation and the run driver.
//!
//! One [`EvaluationContext`] lives for one collision-check run. The broad
//! phase hands it candidate pairs one at a time; each call decides whether
//! the pair is a reportable collision, how many contacts to store for it,
//! and whether the whole run can stop early because nothing more can be
//! learned or stored.

use tracing::info;

use collision_types::{BodyIdentity, BodyKind, CollisionRequest, CollisionResult, PairKey};

use crate::budget::remaining_for_pair;
use crate::matrix::{AllowedCollisionMatrix, DecideContactFn, Disposition};
use crate::narrow::{ContactGenerator, ContactQuery};

/// Shared state for one collision-check run.
///
/// Borrows the request and the (optional) allowed-collision matrix, owns the
/// accumulating [`CollisionResult`] and the run's done flag. The broad-phase
/// driver threads it mutably through serial [`evaluate`](Self::evaluate)
/// calls; once `done` turns true, every further call is a cheap no-op.
///
/// A context is used for exactly one run. Concurrent drivers must each own
/// their own context and merge results afterwards.
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    request: &'a CollisionRequest,
    matrix: Option<&'a AllowedCollisionMatrix>,
    result: CollisionResult,
    done: bool,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context for one run. `None` for the matrix means no
    /// filtering: every candidate pair is checked.
    #[must_use]
    pub fn new(request: &'a CollisionRequest, matrix: Option<&'a AllowedCollisionMatrix>) -> Self {
        Self {
            request,
            matrix,
            result: CollisionResult::new(),
            done: false,
        }
    }

    /// The request this run is evaluating under.
    #[must_use]
    pub fn request(&self) -> &CollisionRequest {
        self.request
    }

    /// The result accumulated so far. The global contact bound is only
    /// final once the run has completed.
    #[must_use]
    pub fn result(&self) -> &CollisionResult {
        &self.result
    }

    /// Whether the run has terminated early.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consume the context, yielding the accumulated result.
    #[must_use]
    pub fn finish(self) -> CollisionResult {
        self.result
    }

    /// Evaluate one candidate pair.
    ///
    /// Returns true when the run should stop: a collision has been found
    /// and either no contacts were requested or the global contact budget
    /// is met. Subsequent calls after that return immediately.
    ///
    /// # Panics
    ///
    /// Panics if both identities name the same body; a self-pair from the
    /// broad phase is a caller bug.
    pub fn evaluate<G>(&mut self, generator: &mut G, a: &BodyIdentity, b: &BodyIdentity) -> bool
    where
        G: ContactGenerator + ?Sized,
    {
        if self.done {
            return true;
        }
        assert_ne!(
            a.name, b.name,
            "broad phase produced a self-pair for body '{}'",
            a.name
        );

        let verbose = self.request.verbose;

        // Policy lookup, then the structural touch-link rule on top. The
        // override applies only when the table did not already resolve the
        // pair to always-allowed.
        let mut always_allowed = false;
        let mut decide: Option<DecideContactFn> = None;
        let disposition = self
            .matrix
            .map_or(Disposition::NotSpecified, |m| m.lookup(&a.name, &b.name));
        match disposition {
            Disposition::Always => {
                always_allowed = true;
                if verbose {
                    info!(
                        "Collision between '{}' and '{}' is always allowed. No contacts are computed.",
                        a.name, b.name
                    );
                }
            }
            Disposition::Conditional(f) => {
                decide = Some(f);
                if verbose {
                    info!(
                        "Collision between '{}' and '{}' is conditionally allowed.",
                        a.name, b.name
                    );
                }
            }
            Disposition::NotSpecified => {}
        }

        if !always_allowed {
            if let Some((link, attached)) = touch_link_allowance(a, b) {
                always_allowed = true;
                if verbose {
                    info!(
                        "Robot link '{}' is allowed to touch attached body '{}'. No contacts are computed.",
                        link, attached
                    );
                }
            }
        }

        if always_allowed {
            return self.done;
        }

        let key = PairKey::new(&a.name, &b.name);
        let mut want = remaining_for_pair(self.request, &self.result, &key);

        if let Some(decide) = decide {
            // Acceptance depends on each contact, so a truncated enumeration
            // could miss the contact that decides the outcome.
            let contacts = generator.generate(a, b, ContactQuery::Exhaustive);
            if verbose && !contacts.is_empty() {
                info!(
                    "Found {} contacts between '{}' and '{}'. Evaluating each for acceptance.",
                    contacts.len(),
                    a.name,
                    b.name
                );
            }
            for contact in contacts {
                if decide(&contact) {
                    if verbose {
                        info!(
                            "Contact between '{}' and '{}' is accepted.",
                            a.name, b.name
                        );
                    }
                    continue;
                }
                self.result.mark_collision();
                if want > 0 {
                    want -= 1;
                    if verbose {
                        info!(
                            "Found unacceptable contact between '{}' and '{}'. Contact was stored.",
                            a.name, b.name
                        );
                    }
                    self.result.record(contact);
                } else if verbose {
                    info!(
                        "Found unacceptable contact between '{}' and '{}'. Contact was not stored.",
                        a.name, b.name
                    );
                }
                // A collision is already flagged and no storage room
                // remains; the rest of the enumeration can teach nothing.
                if want == 0 {
                    break;
                }
            }
        } else if want > 0 {
            let contacts = generator.generate(a, b, ContactQuery::AtMost(want));
            if !contacts.is_empty() {
                if verbose {
                    info!(
                        "Found {} contacts between '{}' and '{}', which constitute a collision. {} will be stored.",
                        contacts.len(),
                        a.name,
                        b.name,
                        contacts.len().min(want)
                    );
                }
                self.result.mark_collision();
                for contact in contacts.into_iter().take(want) {
                    self.result.record(contact);
                }
            }
        } else {
            // No storage room: presence is all that can still be learned.
            let contacts = generator.generate(a, b, ContactQuery::BooleanOnly);
            if !contacts.is_empty() {
                self.result.mark_collision();
                if verbose {
                    info!(
                        "Found a contact between '{}' and '{}', which constitutes a collision. Contact information is not stored.",
                        a.name, b.name
                    );
                }
            }
        }

        if self.result.collision_detected()
            && (!self.request.contacts || self.result.contact_count() >= self.request.max_contacts)
        {
            self.done = true;
            if verbose {
                info!(
                    "Collision checking is considered complete ({} contacts stored).",
                    self.result.contact_count()
                );
            }
        }

        self.done
    }

    /// Drive a whole run over a candidate-pair stream, stopping as soon as
    /// a call reports the run done.
    pub fn run<'b, G, I>(&mut self, generator: &mut G, pairs: I)
    where
        G: ContactGenerator + ?Sized,
        I: IntoIterator<Item = (&'b BodyIdentity, &'b BodyIdentity)>,
    {
        for (a, b) in pairs {
            if self.evaluate(generator, a, b) {
                break;
            }
        }
    }
}

/// The touch-link rule: a robot link may touch an attached body that names
/// it in its touch set. Returns `(link_name, attached_body_name)` when the
/// rule applies.
fn touch_link_allowance<'b>(
    a: &'b BodyIdentity,
    b: &'b BodyIdentity,
) -> Option<(&'b str, &'b str)> {
    if a.kind == BodyKind::RobotLink && b.allows_touch(&a.name) {
        Some((&a.name, &b.name))
    } else if b.kind == BodyKind::RobotLink && a.allows_touch(&b.name) {
        Some((&b.name, &a.name))
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use collision_types::{Contact, Point3, Vector3};

    /// Generator that reports a fixed number of contacts for every pair.
    struct FixedOverlap {
        per_pair: usize,
        calls: Vec<ContactQuery>,
    }

    impl FixedOverlap {
        fn new(per_pair: usize) -> Self {
            Self {
                per_pair,
                calls: Vec::new(),
            }
        }
    }

    impl ContactGenerator for FixedOverlap {
        fn generate(
            &mut self,
            a: &BodyIdentity,
            b: &BodyIdentity,
            query: ContactQuery,
        ) -> Vec<Contact> {
            self.calls.push(query);
            let n = query.limit().unwrap_or(self.per_pair).min(self.per_pair);
            (0..n)
                .map(|i| {
                    Contact::new(
                        Point3::new(i as f64, 0.0, 0.0),
                        Vector3::z(),
                        0.001,
                        a,
                        b,
                    )
                })
                .collect()
        }
    }

    /// Generator that must never be called.
    struct Untouchable;

    impl ContactGenerator for Untouchable {
        fn generate(
            &mut self,
            a: &BodyIdentity,
            b: &BodyIdentity,
            _query: ContactQuery,
        ) -> Vec<Contact> {
            panic!("narrow phase invoked for filtered pair ({}, {})", a.name, b.name);
        }
    }

    #[test]
    fn test_boolean_only_run_stops_after_first_hit() {
        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, None);
        let mut generator = FixedOverlap::new(3);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        assert!(ctx.evaluate(&mut generator, &a, &b));
        assert!(ctx.is_done());
        assert!(ctx.result().collision_detected());
        assert_eq!(ctx.result().contact_count(), 0);
        assert_eq!(generator.calls, vec![ContactQuery::BooleanOnly]);
    }

    #[test]
    fn test_done_short_circuits_further_calls() {
        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, None);
        let mut generator = FixedOverlap::new(1);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");
        let c = BodyIdentity::world_object("table");

        assert!(ctx.evaluate(&mut generator, &a, &b));
        let calls_before = generator.calls.len();

        // Already done: the generator must not run again.
        assert!(ctx.evaluate(&mut generator, &a, &c));
        assert_eq!(generator.calls.len(), calls_before);
    }

    #[test]
    fn test_always_allowed_pair_is_never_queried() {
        let request = CollisionRequest::default();
        let mut matrix = AllowedCollisionMatrix::new();
        matrix.allow("wrist", "can");
        let mut ctx = EvaluationContext::new(&request, Some(&matrix));

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        assert!(!ctx.evaluate(&mut Untouchable, &a, &b));
        assert!(!ctx.result().collision_detected());
        assert!(!ctx.is_done());
    }

    #[test]
    fn test_touch_link_override_is_symmetric() {
        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, None);

        let link = BodyIdentity::robot_link("gripper");
        let part = BodyIdentity::attached_body("part", "gripper", ["gripper"]);

        assert!(!ctx.evaluate(&mut Untouchable, &link, &part));
        assert!(!ctx.evaluate(&mut Untouchable, &part, &link));
        assert!(!ctx.result().collision_detected());
    }

    #[test]
    fn test_touch_link_does_not_cover_other_links() {
        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, None);
        let mut generator = FixedOverlap::new(1);

        let link = BodyIdentity::robot_link("elbow");
        let part = BodyIdentity::attached_body("part", "gripper", ["gripper"]);

        assert!(ctx.evaluate(&mut generator, &link, &part));
        assert!(ctx.result().collision_detected());
    }

    #[test]
    fn test_bounded_branch_stores_up_to_want() {
        let request = CollisionRequest::default().with_contacts(10, 2);
        let mut ctx = EvaluationContext::new(&request, None);
        let mut generator = FixedOverlap::new(5);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        ctx.evaluate(&mut generator, &a, &b);
        assert_eq!(ctx.result().contact_count(), 2);
        assert_eq!(generator.calls, vec![ContactQuery::AtMost(2)]);
        assert!(!ctx.is_done());
    }

    #[test]
    fn test_bounded_branch_clamps_over_returning_generator() {
        /// Ignores the cap and always returns 4 contacts.
        struct Chatty;
        impl ContactGenerator for Chatty {
            fn generate(
                &mut self,
                a: &BodyIdentity,
                b: &BodyIdentity,
                _query: ContactQuery,
            ) -> Vec<Contact> {
                (0..4)
                    .map(|_| Contact::new(Point3::origin(), Vector3::z(), 0.001, a, b))
                    .collect()
            }
        }

        let request = CollisionRequest::default().with_contacts(10, 2);
        let mut ctx = EvaluationContext::new(&request, None);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        ctx.evaluate(&mut Chatty, &a, &b);
        assert_eq!(ctx.result().contact_count(), 2);
    }

    #[test]
    fn test_conditional_acceptance_suppresses_collision() {
        let request = CollisionRequest::default().with_contacts(10, 5);
        let mut matrix = AllowedCollisionMatrix::new();
        matrix.allow_when("wrist", "can", |_| true);
        let mut ctx = EvaluationContext::new(&request, Some(&matrix));
        let mut generator = FixedOverlap::new(3);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        assert!(!ctx.evaluate(&mut generator, &a, &b));
        assert!(!ctx.result().collision_detected());
        assert_eq!(ctx.result().contact_count(), 0);
        // Conditional pairs always enumerate exhaustively.
        assert_eq!(generator.calls, vec![ContactQuery::Exhaustive]);
    }

    #[test]
    fn test_conditional_rejection_stores_within_budget() {
        let request = CollisionRequest::default().with_contacts(10, 2);
        let mut matrix = AllowedCollisionMatrix::new();
        // Reject every second contact by position.
        matrix.allow_when("wrist", "can", |c| c.position.x % 2.0 < 1.0);
        let mut ctx = EvaluationContext::new(&request, Some(&matrix));
        let mut generator = FixedOverlap::new(6);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        ctx.evaluate(&mut generator, &a, &b);
        assert!(ctx.result().collision_detected());
        assert_eq!(ctx.result().contact_count(), 2);
    }

    #[test]
    fn test_conditional_detects_even_with_zero_budget() {
        let request = CollisionRequest::default();
        let mut matrix = AllowedCollisionMatrix::new();
        matrix.allow_when("wrist", "can", |_| false);
        let mut ctx = EvaluationContext::new(&request, Some(&matrix));
        let mut generator = FixedOverlap::new(3);

        let a = BodyIdentity::robot_link("wrist");
        let b = BodyIdentity::world_object("can");

        assert!(ctx.evaluate(&mut generator, &a, &b));
        assert!(ctx.result().collision_detected());
        assert_eq!(ctx.result().contact_count(), 0);
    }

    #[test]
    fn test_run_stops_at_global_budget() {
        let request = CollisionRequest::default().with_contacts(5, 10);
        let mut ctx = EvaluationContext::new(&request, None);
        let mut generator = FixedOverlap::new(3);

        let bodies: Vec<BodyIdentity> = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|n| BodyIdentity::world_object(*n))
            .collect();
        let pairs: Vec<_> = (0..bodies.len() - 1)
            .map(|i| (&bodies[i], &bodies[i + 1]))
            .collect();

        ctx.run(&mut generator, pairs);

        assert!(ctx.is_done());
        assert_eq!(ctx.result().contact_count(), 5);
        // Pair 1 stored 3, pair 2 was clamped to the 2 remaining globally;
        // later pairs were never evaluated.
        assert_eq!(generator.calls.len(), 2);
        assert_eq!(generator.calls[1], ContactQuery::AtMost(2));
    }

    #[test]
    #[should_panic(expected = "self-pair")]
    fn test_self_pair_is_rejected() {
        let request = CollisionRequest::default();
        let mut ctx = EvaluationContext::new(&request, None);
        let a = BodyIdentity::robot_link("wrist");
        let a2 = BodyIdentity::robot_link("wrist");
        let _ = ctx.evaluate(&mut Untouchable, &a, &a2);
    }
}
