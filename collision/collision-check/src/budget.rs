//! Contact budget accounting.
//!
//! The budget bounds how many additional contacts may be accepted for a
//! given pair without exceeding either the per-pair cap or the global cap.
//! Earlier pairs in the same run consume global budget, so the remainder is
//! recomputed fresh on every pairwise evaluation.

use collision_types::{CollisionRequest, CollisionResult, PairKey};

/// How many more contacts may be stored for `key` in this run.
///
/// Returns 0 when the request does not want contacts at all. Otherwise the
/// remainder is the smaller of the global headroom
/// (`max_contacts - contact_count`) and the per-pair headroom
/// (`max_contacts_per_pair - stored for this pair`), both floored at 0.
///
/// # Example
///
/// ```
/// use collision_check::remaining_for_pair;
/// use collision_types::{CollisionRequest, CollisionResult, PairKey};
///
/// let request = CollisionRequest::default().with_contacts(10, 3);
/// let result = CollisionResult::new();
/// let key = PairKey::new("wrist", "can");
///
/// assert_eq!(remaining_for_pair(&request, &result, &key), 3);
/// ```
#[must_use]
pub fn remaining_for_pair(
    request: &CollisionRequest,
    result: &CollisionResult,
    key: &PairKey,
) -> usize {
    if !request.contacts {
        return 0;
    }

    let global = request.max_contacts.saturating_sub(result.contact_count());
    let have = result.contacts_for(key).map_or(0, <[_]>::len);
    let per_pair = request.max_contacts_per_pair.saturating_sub(have);

    global.min(per_pair)
}
