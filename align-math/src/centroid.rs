//! Arithmetic mean of a group of positions.

use nalgebra::Vector3;

use crate::MathError;

/// Calculates the geometric centroid (center of mass) of a point set.
///
/// The centroid of a single point is that point's own position.
pub fn calculate_centroid(points: &[Vector3<f64>]) -> Result<Vector3<f64>, MathError> {
    if points.is_empty() {
        return Err(MathError::EmptyPointSet);
    }

    let mut centroid = Vector3::zeros();
    for point in points {
        centroid += point;
    }

    Ok(centroid / points.len() as f64)
}
