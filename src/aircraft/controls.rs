use serde::{Deserialize, Serialize};

use crate::utils::errors::SimError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AircraftControls {
    pub aileron: f64,
    pub elevator: f64,
    pub rudder: f64,
    pub throttle: f64,
}

impl Default for AircraftControls {
    fn default() -> Self {
        Self {
            aileron: 0.0,
            elevator: 0.0,
            rudder: 0.0,
            throttle: 0.5,
        }
    }
}

impl AircraftControls {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(-1.0..=1.0).contains(&self.aileron)
            || !(-1.0..=1.0).contains(&self.elevator)
            || !(-1.0..=1.0).contains(&self.rudder)
            || !(0.0..=1.0).contains(&self.throttle)
        {
            return Err(SimError::StateError(
                "Control surface deflection out of bounds".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controls_validation() {
        let mut controls = AircraftControls::default();
        assert!(controls.validate().is_ok());

        controls.aileron = 1.5;
        assert!(controls.validate().is_err());

        controls.aileron = 0.0;
        controls.throttle = -0.1;
        assert!(controls.validate().is_err());
    }
}
