use glam::{Mat4, Quat};

/// Head pose supplied by the host's tracker, as a head-from-world view
/// rotation. Identity means looking straight ahead along the aircraft's
/// forward axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadTransform {
    view: Mat4,
}

impl Default for HeadTransform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY,
        }
    }
}

impl HeadTransform {
    pub fn new(view: Mat4) -> Self {
        Self { view }
    }

    /// Build from tracker yaw/pitch/roll in radians.
    pub fn from_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let rotation = Quat::from_rotation_y(-yaw)
            * Quat::from_rotation_x(pitch)
            * Quat::from_rotation_z(-roll);
        Self {
            view: Mat4::from_quat(rotation.conjugate()),
        }
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    /// Yaw component of the head pose, radians.
    pub fn yaw(&self) -> f32 {
        let forward = self.view.transpose().transform_vector3(glam::Vec3::NEG_Z);
        forward.x.atan2(-forward.z)
    }

    /// Pitch component of the head pose, radians.
    pub fn pitch(&self) -> f32 {
        let forward = self.view.transpose().transform_vector3(glam::Vec3::NEG_Z);
        forward.y.asin()
    }
}
