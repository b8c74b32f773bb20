pub const GRAVITY: f64 = 9.80665; // m/s^2
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_SEA_LEVEL_PRESSURE: f64 = 101325.0; // Pa

pub const MAX_TIMESTEP: f64 = 1.0 / 30.0; // Maximum integration timestep
pub const MIN_TIMESTEP: f64 = 1.0 / 1000.0; // Minimum integration timestep

// Stereo display defaults
pub const DEFAULT_IPD_M: f32 = 0.064; // Interpupillary distance
pub const DEFAULT_FOV_Y_DEG: f32 = 75.0; // Vertical field of view per eye
pub const DEFAULT_NEAR_M: f32 = 0.3;
pub const DEFAULT_FAR_M: f32 = 12_000.0;

// Flight envelope limits used by state validation
pub const MAX_AIRSPEED: f64 = 200.0; // m/s
pub const MAX_PITCH_RATE: f64 = 2.0; // rad/s
pub const MAX_ROLL_RATE: f64 = 3.0; // rad/s
