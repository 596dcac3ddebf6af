//! Rotation matrices and centroids for aligning 3-D point sets to reference axes.
//!
//! All matrices follow the column-vector convention `p' = R × p`, which is the
//! same as right-multiplying row-vector points by `Rᵗ`.

pub mod angle_rotation;
pub mod centroid;
pub mod vector_rotation;


use thiserror::Error;

pub use angle_rotation::rotation_from_angles;
pub use centroid::calculate_centroid;
pub use vector_rotation::{rotate_points, rotation_between};

/// Errors that can occur in the alignment math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("cannot compute centroid of empty point set")]
    EmptyPointSet,
}
