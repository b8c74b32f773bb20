mod aircraft;
mod controls;
mod dynamics;
mod state;

pub use aircraft::Aircraft;
pub use controls::AircraftControls;
pub use dynamics::KinematicDynamics;
pub use state::AircraftState;
