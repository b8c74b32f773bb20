use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftControls, AircraftState};
use crate::utils::constants::{MAX_TIMESTEP, MIN_TIMESTEP};
use crate::utils::errors::SimError;

/// Kinematic flight model: control deflections command body rates, throttle
/// commands speed through a first-order lag. Good enough to fly the camera;
/// not an aerodynamic simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicDynamics {
    pub max_roll_rate: f64,
    pub max_pitch_rate: f64,
    pub max_yaw_rate: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub speed_tau: f64,
}

impl Default for KinematicDynamics {
    fn default() -> Self {
        Self {
            max_roll_rate: 1.2,
            max_pitch_rate: 0.6,
            max_yaw_rate: 0.4,
            min_speed: 25.0,
            max_speed: 85.0,
            speed_tau: 3.0,
        }
    }
}

impl KinematicDynamics {
    /// Advance the state by dt seconds. dt is clamped to the stable
    /// integration window; a zero or negative dt is a no-op.
    pub fn step(
        &self,
        state: &mut AircraftState,
        controls: &AircraftControls,
        dt: f64,
    ) -> Result<(), SimError> {
        controls.validate()?;
        if dt <= 0.0 {
            return Ok(());
        }
        let dt = dt.clamp(MIN_TIMESTEP, MAX_TIMESTEP);

        let body_rates = Vector3::new(
            controls.aileron * self.max_roll_rate,
            -controls.elevator * self.max_pitch_rate,
            controls.rudder * self.max_yaw_rate,
        );

        let delta = UnitQuaternion::from_scaled_axis(body_rates * dt);
        let attitude = state.attitude * delta;

        let target_speed = self.min_speed + (self.max_speed - self.min_speed) * controls.throttle;
        let speed = state.airspeed() + (target_speed - state.airspeed()) * (dt / self.speed_tau);

        let velocity = attitude * Vector3::new(speed, 0.0, 0.0);

        let mut next = state.clone();
        next.attitude = attitude;
        next.velocity = velocity;
        next.position += velocity * dt;
        next.angular_velocity = body_rates;
        next.validate()?;

        *state = next;
        Ok(())
    }
}
