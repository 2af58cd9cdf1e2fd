/*!
Collision root module.

This module re-exports the submodules that implement the switchable-channel
collision rules. The code is split for clarity:

- types:   shared data types (FixtureTag, ContactEvent, ItemId, math aliases)
- filter:  category/mask bit assignment and the channel-cycling filter model
- tracker: contact state machine (grounded counter, pending collectibles)

The physics-engine-facing side (body/fixture creation, stepping, raw event
translation) lives in [`crate::world`]; everything here is engine-agnostic
and unit-testable without a physics world.
*/

pub mod filter;
pub mod tracker;
pub mod types;

// Re-export commonly used types and functions.
pub use filter::{Channel, body_groups, foot_groups, item_groups, platform_groups};
pub use tracker::ContactTracker;
pub use types::{ContactEvent, ContactPhase, FixtureTag, ItemId, Vec2};
