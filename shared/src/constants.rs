/// Pixels-per-meter ratio used by the render layer.
///
/// The simulation works in meters; sprite/tile assets are authored in pixels.
/// Divide pixel coordinates by this to get world coordinates.
pub const PIXELS_PER_METER: f32 = 100.0;

/// Fixed simulation timestep in seconds.
///
/// The tick loop advances the physics world by exactly this much, once per
/// tick. Input is polled once per tick; there are no partial steps.
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Gravity magnitude in meters per second squared (positive value).
/// Applied as a downward acceleration by the physics world.
pub const GRAVITY_MPS2: f32 = 9.81;

/// Half-extent of the player's main body fixture (meters).
/// The body is a square box; 0.05 m = a 10 px sprite at the default ratio.
pub const PLAYER_HALF_EXTENT_M: f32 = 0.05;

/// Half-extent of the foot sensor box (meters).
pub const FOOT_HALF_EXTENT_M: f32 = 0.02;

/// Downward offset of the foot sensor center from the body center (meters).
/// Places the sensor straddling the body's bottom edge so it overlaps
/// whatever the player is standing on.
pub const FOOT_OFFSET_M: f32 = 0.05;

/// Player mass in kilograms.
///
/// Set explicitly on the main fixture rather than derived from density, so
/// jump tuning does not silently change with the body's dimensions.
pub const PLAYER_MASS_KG: f32 = 1.0;

/// Upward impulse applied to the player's center on a grounded jump (N·s).
/// Tuned for roughly a tile and a half of clearance at default gravity.
pub const JUMP_IMPULSE: f32 = 3.4;

/// Default collectible radius (meters). 8 px at the default pixel ratio.
pub const ITEM_RADIUS_M: f32 = 0.08;

/// Default player spawn point (meters).
pub const PLAYER_SPAWN_M: [f32; 2] = [1.6, 2.0];
