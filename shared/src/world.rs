//! Rapier-backed physics world wrapper.
//!
//! This module owns every Rapier structure needed for dynamics plus the
//! fixture-tag registry, and exposes the small surface the gameplay layer
//! needs:
//!
//! - spawn helpers for the three fixture roles (platform chain, collectible
//!   sensor, player body + foot sensor), each registering its [`FixtureTag`]
//! - [`PhysicsWorld::step`], which advances the world by the fixed timestep
//!   and returns the step's contact transitions as tag pairs
//! - body removal, filter rewrites, and read-only body accessors
//!
//! Design notes
//! - Contact delivery is collect-then-drain: Rapier invokes the event handler
//!   synchronously inside `step`, the handler only queues, and the queue is
//!   translated to [`ContactEvent`]s after the step returns. Nothing mutates
//!   the world while the engine is iterating.
//! - Events whose collider handles no longer resolve to a tag (the collider
//!   was destroyed in an earlier drain) are dropped during translation.

// Re-export Rapier so downstream crates can use Rapier types
// without needing to depend on `rapier2d` directly.
pub use rapier2d;

use std::collections::HashMap;
use std::sync::Mutex;

use rapier2d::prelude::*;

use crate::collision::filter::{self, Channel};
use crate::collision::types::{ContactEvent, ContactPhase, FixtureTag, ItemId, Vec2};

/// Queueing event handler handed to the Rapier pipeline.
///
/// The mutex exists only because Rapier's `EventHandler` trait requires
/// `Send + Sync`; this core is single-threaded and the lock is uncontended.
#[derive(Default)]
struct EventQueue {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl EventHandler for EventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut queue) = self.collisions.lock() {
            queue.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Handles of the player's body and its two fixtures.
#[derive(Clone, Copy, Debug)]
pub struct PlayerColliders {
    pub body: RigidBodyHandle,
    pub body_collider: ColliderHandle,
    pub foot_collider: ColliderHandle,
}

/// Owner of the Rapier sets, the pipeline, and the fixture-tag registry.
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    gravity: Vec2,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    events: EventQueue,
    tags: HashMap<ColliderHandle, FixtureTag>,
}

impl PhysicsWorld {
    /// Create an empty world advancing by `dt` seconds per step.
    pub fn new(gravity: Vec2, dt: f32) -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity,
            params: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            events: EventQueue::default(),
            tags: HashMap::new(),
        }
    }

    /// Advance the world by one fixed time slice and return the step's
    /// contact transitions, in delivery order.
    pub fn step(&mut self) -> Vec<ContactEvent> {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &self.events,
        );

        let raw = self
            .events
            .collisions
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default();

        raw.into_iter()
            .filter_map(|event| self.translate(event))
            .collect()
    }

    /// Resolve a raw collider-pair event to a tag pair, dropping events for
    /// colliders that no longer exist.
    fn translate(&self, event: CollisionEvent) -> Option<ContactEvent> {
        let (h1, h2, phase) = match event {
            CollisionEvent::Started(h1, h2, _) => (h1, h2, ContactPhase::Begin),
            CollisionEvent::Stopped(h1, h2, _) => (h1, h2, ContactPhase::End),
        };
        let a = *self.tags.get(&h1)?;
        let b = *self.tags.get(&h2)?;
        Some(ContactEvent { phase, a, b })
    }

    /// Insert one fixed platform body at a cell center.
    ///
    /// The fixture is an open 3-vertex chain (bottom-left → top-left →
    /// top-right): the bottom and right edges are deliberately omitted so the
    /// tile only resists motion from above and from the left. Friction is
    /// zero so adjacent tiles never snag the player at their seams.
    pub fn add_platform(
        &mut self,
        center: Vec2,
        half_extent: f32,
        channel: Channel,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let body_handle = self.bodies.insert(body);

        let h = half_extent;
        let chain = vec![point![-h, -h], point![-h, h], point![h, h]];
        let collider = ColliderBuilder::polyline(chain, None)
            .friction(0.0)
            .collision_groups(filter::platform_groups(channel))
            .build();
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);
        self.tags
            .insert(collider_handle, FixtureTag::Platform(channel));

        body_handle
    }

    /// Insert one fixed collectible sensor.
    pub fn add_item(&mut self, center: Vec2, radius: f32, id: ItemId) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let body_handle = self.bodies.insert(body);

        let collider = ColliderBuilder::ball(radius)
            .sensor(true)
            .collision_groups(filter::item_groups())
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle = self
            .colliders
            .insert_with_parent(collider, body_handle, &mut self.bodies);
        self.tags.insert(collider_handle, FixtureTag::Item(id));

        body_handle
    }

    /// Insert the player: a dynamic body with a solid main box and a foot
    /// sensor hanging below its bottom edge. Rotation is locked.
    pub fn add_player(
        &mut self,
        spawn: Vec2,
        body_half_extent: f32,
        foot_half_extent: f32,
        foot_offset: f32,
        mass: f32,
        channel: Channel,
    ) -> PlayerColliders {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![spawn.x, spawn.y])
            .lock_rotations()
            .build();
        let body_handle = self.bodies.insert(body);

        let main = ColliderBuilder::cuboid(body_half_extent, body_half_extent)
            .mass(mass)
            .collision_groups(filter::body_groups(channel))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let body_collider = self
            .colliders
            .insert_with_parent(main, body_handle, &mut self.bodies);

        let foot = ColliderBuilder::cuboid(foot_half_extent, foot_half_extent)
            .translation(vector![0.0, -foot_offset])
            .sensor(true)
            .mass(0.0)
            .collision_groups(filter::foot_groups(channel))
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let foot_collider = self
            .colliders
            .insert_with_parent(foot, body_handle, &mut self.bodies);

        self.tags.insert(body_collider, FixtureTag::PlayerBody);
        self.tags.insert(foot_collider, FixtureTag::PlayerFoot);

        PlayerColliders {
            body: body_handle,
            body_collider,
            foot_collider,
        }
    }

    /// Remove a body, its fixtures, and their tag registrations.
    ///
    /// Must only be called between steps; the contact tracker defers
    /// collectible removal for exactly this reason.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        if let Some(body) = self.bodies.get(handle) {
            for collider in body.colliders() {
                self.tags.remove(collider);
            }
        }
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// The tag registered for a fixture, if the fixture still exists.
    pub fn tag(&self, collider: ColliderHandle) -> Option<FixtureTag> {
        self.tags.get(&collider).copied()
    }

    /// Current filter of a fixture.
    pub fn collision_groups(&self, collider: ColliderHandle) -> Option<InteractionGroups> {
        self.colliders.get(collider).map(|c| c.collision_groups())
    }

    /// Rewrite a fixture's filter. Call between steps only.
    pub fn set_collision_groups(&mut self, collider: ColliderHandle, groups: InteractionGroups) {
        if let Some(c) = self.colliders.get_mut(collider) {
            c.set_collision_groups(groups);
        }
    }

    /// Wake a body that may have fallen asleep at rest.
    pub fn wake_body(&mut self, body: RigidBodyHandle) {
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.wake_up(true);
        }
    }

    /// Apply an impulse to a dynamic body's center of mass.
    pub fn apply_impulse(&mut self, body: RigidBodyHandle, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.apply_impulse(impulse, true);
        }
    }

    /// World-space translation of a body.
    pub fn translation(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|rb| *rb.translation())
    }

    /// Linear velocity of a body.
    pub fn linvel(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|rb| *rb.linvel())
    }

    /// Does this body still exist?
    pub fn contains_body(&self, body: RigidBodyHandle) -> bool {
        self.bodies.get(body).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FIXED_TIMESTEP, GRAVITY_MPS2};

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(Vec2::new(0.0, -GRAVITY_MPS2), FIXED_TIMESTEP)
    }

    #[test]
    fn dynamic_body_falls_under_gravity() {
        let mut w = world();
        let player = w.add_player(Vec2::new(0.0, 2.0), 0.05, 0.02, 0.05, 1.0, Channel::Red);
        for _ in 0..30 {
            w.step();
        }
        let y = w.translation(player.body).map(|t| t.y);
        assert!(y.is_some_and(|y| y < 1.95), "player did not fall: {y:?}");
    }

    #[test]
    fn platform_fixture_is_an_open_three_vertex_chain() {
        let mut w = world();
        let body = w.add_platform(Vec2::new(1.0, 1.0), 0.25, Channel::Green);

        let colliders = w.bodies.get(body).map(|b| b.colliders().to_vec());
        let colliders = colliders.unwrap_or_default();
        assert_eq!(colliders.len(), 1);

        let collider = w.colliders.get(colliders[0]).expect("platform collider");
        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.0);

        let polyline = collider.shape().as_polyline().expect("polyline shape");
        assert_eq!(polyline.vertices().len(), 3);
        assert_eq!(polyline.num_segments(), 2);
    }

    #[test]
    fn items_are_ball_sensors() {
        let mut w = world();
        let body = w.add_item(Vec2::new(0.5, 0.5), 0.08, ItemId(0));

        let colliders = w.bodies.get(body).map(|b| b.colliders().to_vec());
        let collider = w
            .colliders
            .get(colliders.unwrap_or_default()[0])
            .expect("item collider");
        assert!(collider.is_sensor());
        assert!(collider.shape().as_ball().is_some());
        assert_eq!(collider.collision_groups(), filter::item_groups());
    }

    #[test]
    fn removed_bodies_lose_their_tags() {
        let mut w = world();
        let body = w.add_item(Vec2::new(0.0, 0.0), 0.08, ItemId(3));
        let collider = w.bodies.get(body).map(|b| b.colliders()[0]);
        let collider = collider.expect("item collider");

        assert_eq!(w.tag(collider), Some(FixtureTag::Item(ItemId(3))));
        w.remove_body(body);
        assert!(!w.contains_body(body));
        assert_eq!(w.tag(collider), None);
    }

    #[test]
    fn foot_begin_contact_reported_when_landing_on_platform() {
        let mut w = world();
        // One tile directly under the spawn point.
        w.add_platform(Vec2::new(0.0, 0.5), 0.25, Channel::Red);
        w.add_player(Vec2::new(0.0, 1.2), 0.05, 0.02, 0.05, 1.0, Channel::Red);

        let mut saw_foot_begin = false;
        for _ in 0..120 {
            for event in w.step() {
                if event.phase == ContactPhase::Begin
                    && matches!(event.a, FixtureTag::PlayerFoot | FixtureTag::Platform(_))
                    && matches!(event.b, FixtureTag::PlayerFoot | FixtureTag::Platform(_))
                {
                    saw_foot_begin = true;
                }
            }
        }
        assert!(saw_foot_begin, "no foot/platform begin contact in 2 s");
    }

    #[test]
    fn mismatched_channel_platform_is_pass_through() {
        let mut w = world();
        // Blue tile under a red-channel player: no interaction, player falls
        // straight through.
        w.add_platform(Vec2::new(0.0, 0.5), 0.25, Channel::Blue);
        let player = w.add_player(Vec2::new(0.0, 1.2), 0.05, 0.02, 0.05, 1.0, Channel::Red);

        for _ in 0..120 {
            w.step();
        }
        let y = w.translation(player.body).map(|t| t.y);
        assert!(y.is_some_and(|y| y < 0.0), "player rested on wrong channel: {y:?}");
    }
}
