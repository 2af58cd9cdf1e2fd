//! Player spawning, state, and the channel-switch fixture rewrite.

use shared::collision::filter;
use shared::constants::{
    FOOT_HALF_EXTENT_M, FOOT_OFFSET_M, JUMP_IMPULSE, PLAYER_HALF_EXTENT_M, PLAYER_MASS_KG,
    PLAYER_SPAWN_M,
};
use shared::{Channel, PhysicsWorld, PlayerColliders, Vec2};

/// Shape and placement of the player's two fixtures.
///
/// Defaults describe a square main box with a small foot sensor straddling
/// its bottom edge. Override fields from game data as needed.
#[derive(Clone, Copy, Debug)]
pub struct PlayerSpec {
    /// Spawn point (meters).
    pub spawn: Vec2,
    /// Half-extent of the main body box (meters).
    pub body_half_extent: f32,
    /// Half-extent of the foot sensor box (meters).
    pub foot_half_extent: f32,
    /// Downward offset of the foot sensor from the body center (meters).
    pub foot_offset: f32,
    /// Body mass (kilograms).
    pub mass: f32,
    /// Upward impulse applied on a grounded jump (N·s).
    pub jump_impulse: f32,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(PLAYER_SPAWN_M[0], PLAYER_SPAWN_M[1]),
            body_half_extent: PLAYER_HALF_EXTENT_M,
            foot_half_extent: FOOT_HALF_EXTENT_M,
            foot_offset: FOOT_OFFSET_M,
            mass: PLAYER_MASS_KG,
            jump_impulse: JUMP_IMPULSE,
        }
    }
}

/// Gameplay state owned by the simulation.
///
/// `channel` changes only through [`apply_channel`]; `grounded` and
/// `collected` only from contact-tracker results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub channel: Channel,
    pub grounded: bool,
    pub collected: u32,
}

impl PlayerState {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            grounded: false,
            collected: 0,
        }
    }
}

/// Create the player's body and fixtures in `world`, filtered for `channel`.
pub fn spawn_player(
    world: &mut PhysicsWorld,
    spec: &PlayerSpec,
    channel: Channel,
) -> PlayerColliders {
    world.add_player(
        spec.spawn,
        spec.body_half_extent,
        spec.foot_half_extent,
        spec.foot_offset,
        spec.mass,
        channel,
    )
}

/// Rewrite both player fixtures for `next`.
///
/// Both rewrites happen back-to-back between steps, so the engine never
/// observes one fixture on the old channel and the other on the new one.
/// The rewrite is mask-preserving: only the channel bits move, and the foot
/// additionally drops the item bit.
pub fn apply_channel(world: &mut PhysicsWorld, player: &PlayerColliders, next: Channel) {
    let (Some(body), Some(foot)) = (
        world.collision_groups(player.body_collider),
        world.collision_groups(player.foot_collider),
    ) else {
        return;
    };
    let (body, foot) = filter::switched_player_groups(body, foot, next);
    world.set_collision_groups(player.body_collider, body);
    world.set_collision_groups(player.foot_collider, foot);
    // The body may be asleep on a platform; its support set just changed.
    world.wake_body(player.body);
}
