//! Category/mask bit assignment and the channel-cycling filter model.
//!
//! # Model
//! - Every fixture advertises category bits (`memberships`) and a mask
//!   (`filter`). Two fixtures interact only if each one's category intersects
//!   the other's mask.
//! - The player occupies exactly one of three collision channels at a time.
//!   Platforms in the active channel are solid; the other two layers are
//!   pass-through because neither side's mask matches.
//! - Switching channels rewrites exactly two fixtures (main body + foot
//!   sensor). Both rewrites happen between steps, so no contact callback can
//!   observe a half-applied switch.
//!
//! The full category set lives here as one constant block. Call sites never
//! hard-code numeric bit values.

use rapier2d::prelude::{Group, InteractionGroups};

/// Category bit of the player's fixtures (body and foot).
pub const PLAYER_BIT: Group = Group::GROUP_1;
/// Category bit of red-channel platforms.
pub const RED_BIT: Group = Group::GROUP_2;
/// Category bit of green-channel platforms.
pub const GREEN_BIT: Group = Group::GROUP_3;
/// Category bit of blue-channel platforms.
pub const BLUE_BIT: Group = Group::GROUP_4;
/// Category bit of collectible sensors.
pub const ITEM_BIT: Group = Group::GROUP_5;

/// Union of the three channel bits. Mask rewrites clear exactly this set
/// before inserting the new channel bit, leaving unrelated bits untouched.
pub const CHANNEL_BITS: Group = RED_BIT.union(GREEN_BIT).union(BLUE_BIT);

/// One of the three mutually exclusive collision channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// The fixed cyclic switch order: Red → Green → Blue → Red → …
    ///
    /// Total, with no terminal state; three applications are the identity.
    pub const fn next(self) -> Self {
        match self {
            Channel::Red => Channel::Green,
            Channel::Green => Channel::Blue,
            Channel::Blue => Channel::Red,
        }
    }

    /// Category bit advertised by platforms of this channel.
    pub const fn category(self) -> Group {
        match self {
            Channel::Red => RED_BIT,
            Channel::Green => GREEN_BIT,
            Channel::Blue => BLUE_BIT,
        }
    }
}

/// Replace the channel bits of `mask` with the single bit of `channel`.
///
/// Only the {RED, GREEN, BLUE} bits are touched; anything else (ITEM, and any
/// future bits) passes through unchanged.
pub const fn mask_with_channel(mask: Group, channel: Channel) -> Group {
    mask.difference(CHANNEL_BITS).union(channel.category())
}

/// Clear the item bit from `mask`. Used for the foot sensor, which must never
/// register collectible contacts.
pub const fn mask_without_items(mask: Group) -> Group {
    mask.difference(ITEM_BIT)
}

/// Filter for the player's main body fixture: collides with the active
/// channel's platforms and with collectibles.
pub fn body_groups(channel: Channel) -> InteractionGroups {
    InteractionGroups::new(PLAYER_BIT, channel.category().union(ITEM_BIT))
}

/// Filter for the player's foot sensor: the active channel's platforms only.
pub fn foot_groups(channel: Channel) -> InteractionGroups {
    InteractionGroups::new(PLAYER_BIT, channel.category())
}

/// Filter for a tile platform: collides with the player and nothing else —
/// never with another platform, never with a collectible.
pub fn platform_groups(channel: Channel) -> InteractionGroups {
    InteractionGroups::new(channel.category(), PLAYER_BIT)
}

/// Filter for a collectible sensor: the player's fixtures only.
pub fn item_groups() -> InteractionGroups {
    InteractionGroups::new(ITEM_BIT, PLAYER_BIT)
}

/// Compute the post-switch filters for the player's two fixtures from their
/// current filters.
///
/// The body mask swaps the old channel bit for `next` and keeps its item bit;
/// the foot mask is recomputed identically but with the item bit always
/// cleared. Unrelated bits survive both rewrites.
pub fn switched_player_groups(
    body: InteractionGroups,
    foot: InteractionGroups,
    next: Channel,
) -> (InteractionGroups, InteractionGroups) {
    let body = InteractionGroups::new(body.memberships, mask_with_channel(body.filter, next));
    let foot = InteractionGroups::new(
        foot.memberships,
        mask_without_items(mask_with_channel(foot.filter, next)),
    );
    (body, foot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_order_cycles_with_period_three() {
        // Red → Green → Blue → Red, and nothing else.
        assert_eq!(Channel::Red.next(), Channel::Green);
        assert_eq!(Channel::Green.next(), Channel::Blue);
        assert_eq!(Channel::Blue.next(), Channel::Red);

        // N applications are the identity exactly when 3 divides N.
        for start in [Channel::Red, Channel::Green, Channel::Blue] {
            let mut c = start;
            for n in 1..=12 {
                c = c.next();
                assert_eq!(c == start, n % 3 == 0, "after {n} switches from {start:?}");
            }
        }
    }

    #[test]
    fn categories_are_five_distinct_single_bits() {
        let all = [PLAYER_BIT, RED_BIT, GREEN_BIT, BLUE_BIT, ITEM_BIT];
        for (i, a) in all.iter().enumerate() {
            assert_eq!(a.bits().count_ones(), 1, "category {i} is not a single bit");
            for b in &all[i + 1..] {
                assert!(a.intersection(*b).is_empty(), "categories overlap");
            }
        }
    }

    #[test]
    fn platform_mask_is_exactly_player() {
        for ch in [Channel::Red, Channel::Green, Channel::Blue] {
            let g = platform_groups(ch);
            assert_eq!(g.memberships, ch.category());
            assert_eq!(g.filter, PLAYER_BIT);
        }
    }

    #[test]
    fn item_filter_is_sensor_facing_player_only() {
        let g = item_groups();
        assert_eq!(g.memberships, ITEM_BIT);
        assert_eq!(g.filter, PLAYER_BIT);
    }

    #[test]
    fn body_mask_holds_one_channel_plus_item() {
        for ch in [Channel::Red, Channel::Green, Channel::Blue] {
            let g = body_groups(ch);
            assert_eq!(g.filter.intersection(CHANNEL_BITS), ch.category());
            assert!(g.filter.contains(ITEM_BIT));
        }
    }

    #[test]
    fn foot_mask_never_contains_item_bit() {
        // Run an arbitrary switch sequence through the rewrite path and check
        // the foot invariant at every stage.
        let mut body = body_groups(Channel::Red);
        let mut foot = foot_groups(Channel::Red);
        let mut ch = Channel::Red;
        for _ in 0..10 {
            ch = ch.next();
            (body, foot) = switched_player_groups(body, foot, ch);
            assert!(!foot.filter.contains(ITEM_BIT));
            assert_eq!(foot.filter.intersection(CHANNEL_BITS), ch.category());
            assert_eq!(body.filter.intersection(CHANNEL_BITS), ch.category());
            assert!(body.filter.contains(ITEM_BIT));
        }
    }

    #[test]
    fn mask_rewrite_preserves_unrelated_bits() {
        // Plant a bit outside {RED, GREEN, BLUE, ITEM} and make sure both
        // rewrites carry it through.
        let extra = Group::GROUP_9;
        let mask = RED_BIT.union(ITEM_BIT).union(extra);

        let switched = mask_with_channel(mask, Channel::Blue);
        assert!(switched.contains(extra));
        assert!(switched.contains(ITEM_BIT));
        assert!(switched.contains(BLUE_BIT));
        assert!(!switched.contains(RED_BIT));

        let no_items = mask_without_items(switched);
        assert!(no_items.contains(extra));
        assert!(!no_items.contains(ITEM_BIT));
    }
}
