//! Read-only frame views handed to the render/HUD/camera side.

use shared::{Channel, Vec2};

/// Everything the presentation layer needs about the player, captured once
/// per frame. Plain data; holding one never borrows the simulation.
#[derive(Clone, Copy, Debug)]
pub struct PlayerSnapshot {
    /// World-space body center (meters).
    pub position: Vec2,
    pub channel: Channel,
    pub grounded: bool,
    pub collected: u32,
}
