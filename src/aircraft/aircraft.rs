use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftControls, AircraftState, KinematicDynamics};
use crate::utils::errors::SimError;

/// An aircraft: state plus the model and controls that advance it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Aircraft {
    pub state: AircraftState,
    pub controls: AircraftControls,
    pub model: KinematicDynamics,
}

impl Default for Aircraft {
    fn default() -> Self {
        Self {
            state: AircraftState::default(),
            controls: AircraftControls::default(),
            model: KinematicDynamics::default(),
        }
    }
}

impl Aircraft {
    pub fn new(state: AircraftState) -> Self {
        Self {
            state,
            ..Default::default()
        }
    }

    /// Advance the aircraft by dt seconds under the current controls.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        self.model.step(&mut self.state, &self.controls, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_advances_state() {
        let mut aircraft = Aircraft::default();
        let start = aircraft.state.position;

        for _ in 0..30 {
            aircraft.step(1.0 / 30.0).unwrap();
        }
        assert_ne!(aircraft.state.position, start);
    }
}
