//! Fixed-tick simulation driver.
//!
//! This module owns the physics world, the contact tracker, and the player
//! state, and advances them strictly in order once per tick:
//!
//! 1. apply input intents (jump gated on grounded state, channel switch)
//! 2. advance the physics world by one fixed time slice
//! 3. fold the step's contact transitions into the tracker
//! 4. drain the pending-removal queue: destroy collected bodies and count them
//!
//! Step 4 runs strictly after step 2 — body destruction while the engine is
//! mid-step is forbidden, which is why collection is queued, not applied, when
//! the contact is first seen. All drains for a tick complete before the next
//! tick's input is applied.

use std::collections::HashMap;

use log::debug;
use thiserror::Error;

use shared::constants::{FIXED_TIMESTEP, GRAVITY_MPS2};
use shared::world::rapier2d::prelude::RigidBodyHandle;
use shared::{
    Channel, ContactTracker, ItemId, LevelDef, LevelError, PhysicsWorld, PlayerColliders, Vec2,
    build_level,
};

use crate::input::TickInput;
use crate::player::{self, PlayerSpec, PlayerState};
use crate::snapshot::PlayerSnapshot;

/// Internal-consistency violation surfaced by a tick.
///
/// Not a recoverable runtime condition: the idempotent-enqueue rule in the
/// contact tracker is supposed to make this unreachable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TickError {
    #[error("collected item {0:?} has no live body (double removal)")]
    MissingItemBody(ItemId),
}

/// The simulation: exclusive owner of the world, tracker, and player state.
pub struct Simulation {
    world: PhysicsWorld,
    tracker: ContactTracker,
    player: PlayerColliders,
    state: PlayerState,
    jump_impulse: f32,
    platforms: Vec<RigidBodyHandle>,
    items: HashMap<ItemId, RigidBodyHandle>,
}

impl Simulation {
    /// Build the world from a level definition and spawn the player.
    ///
    /// Runs once per level; a malformed definition fails here, before any
    /// tick runs.
    pub fn new(
        level: &LevelDef,
        spec: &PlayerSpec,
        channel: Channel,
    ) -> Result<Self, LevelError> {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, -GRAVITY_MPS2), FIXED_TIMESTEP);
        let bodies = build_level(&mut world, level)?;
        let player = player::spawn_player(&mut world, spec, channel);

        Ok(Self {
            world,
            tracker: ContactTracker::new(),
            player,
            state: PlayerState::new(channel),
            jump_impulse: spec.jump_impulse,
            platforms: bodies.platforms,
            items: bodies.items,
        })
    }

    /// Advance the simulation by one fixed tick.
    pub fn tick(&mut self, input: TickInput) -> Result<(), TickError> {
        // 1. Input intents. Grounded state here reflects the previous step's
        //    contacts; both intents finish before the world advances, so no
        //    contact callback can observe a half-applied switch.
        if input.jump && self.tracker.is_grounded() {
            self.world
                .apply_impulse(self.player.body, Vec2::new(0.0, self.jump_impulse));
        }
        if input.switch {
            let next = self.state.channel.next();
            player::apply_channel(&mut self.world, &self.player, next);
            self.state.channel = next;
        }

        // 2 + 3. Advance and fold this step's contact transitions.
        for event in self.world.step() {
            self.tracker.observe(event);
        }

        // 4. Drain collected items: destroy each body exactly once and count
        //    it. Destruction is only legal here, between steps.
        for id in self.tracker.drain_collected() {
            let handle = self
                .items
                .remove(&id)
                .ok_or(TickError::MissingItemBody(id))?;
            self.world.remove_body(handle);
            self.state.collected += 1;
            debug!("collected item {id:?} ({} total)", self.state.collected);
        }

        self.state.grounded = self.tracker.is_grounded();
        Ok(())
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.tracker.is_grounded()
    }

    /// Platform bodies created at load. Immutable for the level's lifetime.
    pub fn platforms(&self) -> &[RigidBodyHandle] {
        &self.platforms
    }

    /// Collectibles still present in the world.
    pub fn remaining_items(&self) -> usize {
        self.items.len()
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    /// Capture the per-frame view for the render/HUD/camera side.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            position: self
                .world
                .translation(self.player.body)
                .unwrap_or_else(Vec2::zeros),
            channel: self.state.channel,
            grounded: self.state.grounded,
            collected: self.state.collected,
        }
    }
}
