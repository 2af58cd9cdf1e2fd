/*!
Core collision types and math aliases shared by the collision submodules.

This module intentionally contains no algorithms. It defines the data types
exchanged between:
- the world wrapper (which owns the physics engine and the tag registry)
- the contact tracker (which folds contact events into gameplay state)
- the filter model (channel/category semantics)

Notes on tagging:
- Every fixture the gameplay layer cares about carries a [`FixtureTag`], held
  in a registry keyed by collider handle on the world wrapper side. The tag is
  deliberately NOT stored in the engine's native user-data slot; a closed enum
  kept outside the engine is cheaper to match on and can't collide with other
  uses of that slot.
*/

use crate::collision::filter::Channel;

/// Common math alias for clarity and consistency.
pub type Vec2 = nalgebra::Vector2<f32>;

/// Stable identifier of a collectible, assigned at level load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// Role of a fixture in the gameplay rules.
///
/// This is the full, closed set of roles the contact tracker matches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureTag {
    /// The player's main (solid) body fixture.
    PlayerBody,
    /// The player's foot sensor, used solely for ground detection.
    PlayerFoot,
    /// A tile platform belonging to one collision channel.
    Platform(Channel),
    /// A collectible sensor.
    Item(ItemId),
}

/// Whether a contact pair started or stopped touching this step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactPhase {
    Begin,
    End,
}

/// One contact transition, delivered in-order within a step.
///
/// The pair is unordered: consumers must not rely on which fixture ends up
/// in `a` versus `b`.
#[derive(Clone, Copy, Debug)]
pub struct ContactEvent {
    pub phase: ContactPhase,
    pub a: FixtureTag,
    pub b: FixtureTag,
}
