use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::constants::{MAX_AIRSPEED, MAX_PITCH_RATE, MAX_ROLL_RATE};
use crate::utils::errors::SimError;
use crate::utils::math::{rad_to_deg, wrap_heading_deg};

/// Aircraft rigid-body state in NED axes (x north, y east, z down).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AircraftState {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
    pub angular_velocity: Vector3<f64>,
}

impl Default for AircraftState {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, -300.0),
            velocity: Vector3::new(50.0, 0.0, 0.0),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl AircraftState {
    pub fn new(position: Vector3<f64>, attitude: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            attitude,
            ..Default::default()
        }
    }

    /// Height above the terrain datum, metres.
    pub fn altitude(&self) -> f64 {
        -self.position.z
    }

    pub fn airspeed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Magnetic-north heading in [0, 360) degrees.
    pub fn heading_deg(&self) -> f64 {
        let (_, _, yaw) = self.attitude.euler_angles();
        wrap_heading_deg(rad_to_deg(yaw))
    }

    pub fn roll(&self) -> f64 {
        self.attitude.euler_angles().0
    }

    pub fn pitch(&self) -> f64 {
        self.attitude.euler_angles().1
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let finite = self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite())
            && self.angular_velocity.iter().all(|v| v.is_finite())
            && self.attitude.coords.iter().all(|v| v.is_finite());
        if !finite {
            return Err(SimError::StateError(
                "Aircraft state contains non-finite values".into(),
            ));
        }

        if self.airspeed() > MAX_AIRSPEED {
            return Err(SimError::StateError(format!(
                "Airspeed {} exceeds envelope limit",
                self.airspeed()
            )));
        }

        if self.angular_velocity.x.abs() > MAX_ROLL_RATE
            || self.angular_velocity.y.abs() > MAX_PITCH_RATE
        {
            return Err(SimError::StateError(
                "Angular rates exceed envelope limits".into(),
            ));
        }

        Ok(())
    }
}
