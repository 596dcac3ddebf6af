//! Rotation built from three axis angles.

use nalgebra::{Matrix3, Rotation3, Vector3};

/// Rotation matrix from counterclockwise angles (degrees) about the x, y and z axes.
///
/// The elemental rotations are applied x first, then y, then z, so the result is
/// `Rz × Ry × Rx`. Rotations do not commute; this order is fixed.
///
/// For example `(0, 90, 0)` carries `(1, 0, 0)` to `(0, 0, -1)`.
pub fn rotation_from_angles(theta_x: f64, theta_y: f64, theta_z: f64) -> Matrix3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), theta_x.to_radians());
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), theta_y.to_radians());
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), theta_z.to_radians());

    (rz * ry * rx).into_inner()
}
