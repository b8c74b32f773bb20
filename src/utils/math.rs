use glam::{Mat4, Quat, Vec3};
use nalgebra::{UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / PI
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor.clamp(0.0, 1.0)
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_heading_deg(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Calculate heading from a velocity vector in NED axes
pub fn heading_from_velocity(velocity: &Vector3<f64>) -> f64 {
    velocity.y.atan2(velocity.x)
}

/// Calculate the flight path angle from a velocity vector in NED axes
pub fn flight_path_angle(velocity: &Vector3<f64>) -> f64 {
    -velocity
        .z
        .atan2((velocity.x.powi(2) + velocity.y.powi(2)).sqrt())
}

/// Map a NED position (x north, y east, z down) into the render frame
/// (x east, y up, z south).
#[inline]
pub fn ned_to_render(ned: &Vector3<f64>) -> Vec3 {
    Vec3::new(ned.y as f32, -ned.z as f32, -ned.x as f32)
}

/// Convert an aircraft attitude quaternion (NED body-from-world) into the
/// equivalent render-frame rotation.
pub fn attitude_to_render(attitude: &UnitQuaternion<f64>) -> Quat {
    let (roll, pitch, yaw) = attitude.euler_angles();
    // Render frame: yaw about +y (up), pitch about +x, roll about -z.
    Quat::from_rotation_y(-yaw as f32)
        * Quat::from_rotation_x(pitch as f32)
        * Quat::from_rotation_z(-roll as f32)
}

/// View matrix looking along the render-frame forward axis from an eye
/// position, given a world rotation.
pub fn view_from_pose(position: Vec3, rotation: Quat) -> Mat4 {
    Mat4::from_quat(rotation.conjugate()) * Mat4::from_translation(-position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversions() {
        assert_relative_eq!(deg_to_rad(180.0), PI);
        assert_relative_eq!(rad_to_deg(PI / 2.0), 90.0);
    }

    #[test]
    fn test_wrap_heading() {
        assert_relative_eq!(wrap_heading_deg(-10.0), 350.0);
        assert_relative_eq!(wrap_heading_deg(725.0), 5.0);
    }

    #[test]
    fn test_ned_to_render_axes() {
        // 100 m north, 50 m east, 200 m below sea level datum
        let ned = Vector3::new(100.0, 50.0, -200.0);
        let render = ned_to_render(&ned);
        assert_relative_eq!(render.x, 50.0);
        assert_relative_eq!(render.y, 200.0);
        assert_relative_eq!(render.z, -100.0);
    }

    #[test]
    fn test_heading_from_velocity() {
        let east = Vector3::new(0.0, 30.0, 0.0);
        assert_relative_eq!(heading_from_velocity(&east), PI / 2.0);
    }

    #[test]
    fn test_view_from_pose_inverts_position() {
        let view = view_from_pose(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY);
        let origin = view.transform_point3(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(origin.length(), 0.0, epsilon = 1e-6);
    }
}
