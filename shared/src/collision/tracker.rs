//! Contact tracking: folds per-step contact transitions into gameplay state.
//!
//! The tracker consumes the (begin/end, tag, tag) sequence produced by the
//! world wrapper each step and maintains two pieces of state:
//!
//! - a ground-contact counter for the foot sensor. A counter, not a boolean:
//!   the foot can straddle two adjacent tiles, and losing one of those two
//!   contacts must not clear grounded state.
//! - a pending-removal queue of collectibles touched by the player's body.
//!   Destroying a body while the engine is mid-step is unsafe, so collection
//!   is recorded here and the simulation drains it between steps.
//!
//! The tracker never touches the physics world. It only counts and queues.

use log::warn;

use crate::collision::types::{ContactEvent, ContactPhase, FixtureTag, ItemId};

/// Per-step contact state machine. One instance per player.
#[derive(Debug, Default)]
pub struct ContactTracker {
    ground_contacts: u32,
    pending_items: Vec<ItemId>,
}

/// Unordered match: is this pair (foot sensor, platform)?
fn is_foot_on_platform(a: FixtureTag, b: FixtureTag) -> bool {
    matches!(
        (a, b),
        (FixtureTag::PlayerFoot, FixtureTag::Platform(_))
            | (FixtureTag::Platform(_), FixtureTag::PlayerFoot)
    )
}

/// Unordered match: is this pair (player body, item)? Returns the item id.
fn body_touched_item(a: FixtureTag, b: FixtureTag) -> Option<ItemId> {
    match (a, b) {
        (FixtureTag::PlayerBody, FixtureTag::Item(id))
        | (FixtureTag::Item(id), FixtureTag::PlayerBody) => Some(id),
        _ => None,
    }
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Is the foot sensor currently overlapping at least one platform in the
    /// active channel?
    pub fn is_grounded(&self) -> bool {
        self.ground_contacts > 0
    }

    /// Fold one contact transition into the tracker state.
    ///
    /// Pairs other than (foot, platform) and (body, item) are ignored.
    pub fn observe(&mut self, event: ContactEvent) {
        match event.phase {
            ContactPhase::Begin => {
                if is_foot_on_platform(event.a, event.b) {
                    self.ground_contacts += 1;
                } else if let Some(id) = body_touched_item(event.a, event.b) {
                    // Idempotent enqueue: the engine may report the same
                    // still-touching pair more than once before the drain.
                    if !self.pending_items.contains(&id) {
                        self.pending_items.push(id);
                    }
                }
            }
            ContactPhase::End => {
                if is_foot_on_platform(event.a, event.b) {
                    if self.ground_contacts == 0 {
                        // End without a matching begin. Contact ordering is an
                        // engine-side guarantee we don't re-verify, so clamp
                        // and keep going.
                        warn!("ground-contact counter underflow; clamping to zero");
                    } else {
                        self.ground_contacts -= 1;
                    }
                }
                // Item end-contacts carry no gameplay meaning.
            }
        }
    }

    /// Take the collectibles queued since the last drain, in touch order.
    ///
    /// Call between steps only; the caller destroys the bodies.
    pub fn drain_collected(&mut self) -> Vec<ItemId> {
        std::mem::take(&mut self.pending_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::filter::Channel;

    fn ev(phase: ContactPhase, a: FixtureTag, b: FixtureTag) -> ContactEvent {
        ContactEvent { phase, a, b }
    }

    const FOOT: FixtureTag = FixtureTag::PlayerFoot;
    const BODY: FixtureTag = FixtureTag::PlayerBody;
    const TILE: FixtureTag = FixtureTag::Platform(Channel::Red);

    #[test]
    fn grounded_survives_losing_one_of_two_tile_contacts() {
        // Foot straddling two adjacent tiles: both contacts must end before
        // grounded clears.
        let mut t = ContactTracker::new();
        t.observe(ev(ContactPhase::Begin, FOOT, TILE));
        t.observe(ev(ContactPhase::Begin, TILE, FOOT));
        assert!(t.is_grounded());

        t.observe(ev(ContactPhase::End, FOOT, TILE));
        assert!(t.is_grounded());

        t.observe(ev(ContactPhase::End, FOOT, TILE));
        assert!(!t.is_grounded());
    }

    #[test]
    fn unmatched_end_clamps_at_zero() {
        let mut t = ContactTracker::new();
        t.observe(ev(ContactPhase::End, FOOT, TILE));
        assert!(!t.is_grounded());

        // Still counts correctly afterwards.
        t.observe(ev(ContactPhase::Begin, FOOT, TILE));
        assert!(t.is_grounded());
    }

    #[test]
    fn duplicate_item_begins_enqueue_once() {
        let mut t = ContactTracker::new();
        let item = FixtureTag::Item(ItemId(7));
        t.observe(ev(ContactPhase::Begin, BODY, item));
        t.observe(ev(ContactPhase::Begin, item, BODY));
        assert_eq!(t.drain_collected(), vec![ItemId(7)]);

        // Drained: the queue is empty until a fresh begin arrives.
        assert!(t.drain_collected().is_empty());
    }

    #[test]
    fn item_end_contact_is_ignored() {
        let mut t = ContactTracker::new();
        t.observe(ev(ContactPhase::End, BODY, FixtureTag::Item(ItemId(0))));
        assert!(t.drain_collected().is_empty());
    }

    #[test]
    fn unrelated_pairs_do_nothing() {
        let mut t = ContactTracker::new();
        // The filter model prevents these pairs in practice; the tracker must
        // still ignore them if they ever show up.
        t.observe(ev(ContactPhase::Begin, TILE, FixtureTag::Item(ItemId(1))));
        t.observe(ev(ContactPhase::Begin, FOOT, FixtureTag::Item(ItemId(1))));
        t.observe(ev(ContactPhase::Begin, BODY, TILE));
        assert!(!t.is_grounded());
        assert!(t.drain_collected().is_empty());
    }

    #[test]
    fn drain_preserves_touch_order() {
        let mut t = ContactTracker::new();
        for id in [3u32, 1, 2] {
            t.observe(ev(ContactPhase::Begin, BODY, FixtureTag::Item(ItemId(id))));
        }
        assert_eq!(
            t.drain_collected(),
            vec![ItemId(3), ItemId(1), ItemId(2)]
        );
    }
}
