pub mod input;
pub mod player;
pub mod simulation;
pub mod snapshot;

pub use input::TickInput;
pub use player::{PlayerSpec, PlayerState};
pub use simulation::{Simulation, TickError};
pub use snapshot::PlayerSnapshot;
