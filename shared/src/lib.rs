pub mod collision;
pub mod constants;
pub mod level;
pub mod world;

pub use collision::{
    Channel, ContactEvent, ContactPhase, ContactTracker, FixtureTag, ItemId, Vec2,
};
pub use level::{ItemDef, LevelBodies, LevelDef, LevelError, TileLayer, build_level};
pub use world::{PhysicsWorld, PlayerColliders};
