//! Rotation that carries one direction onto another.
//!
//! Uses the closed form of Rodrigues' rotation formula, which needs no
//! trigonometric calls:
//!
//! ```text
//! v = a × b,  c = a · b,  k = 1 / (1 + c)
//! R = [v0·v0·k + c,  v1·v0·k − v2,  v2·v0·k + v1]
//!     [v0·v1·k + v2, v1·v1·k + c,   v2·v1·k − v0]
//!     [v0·v2·k − v1, v1·v2·k + v0,  v2·v2·k + c ]
//! ```
//!
//! For unit vectors `1 + c = |a + b|² / 2`. `k` is evaluated in that form:
//! computing `1 + c` directly cancels catastrophically when `c` is near −1 and
//! the matrix stops being orthogonal. Exactly anti-parallel directions, where
//! `a + b` vanishes, are handled separately (see [`rotation_between`]).

use log::trace;
use nalgebra::{Matrix3, Vector3};

/// Below this value of `|a + b|² / 2` the directions count as anti-parallel.
const ANTIPARALLEL_TOLERANCE: f64 = f64::EPSILON * f64::EPSILON;

/// Rotation matrix mapping the direction of `source` onto the direction of `target`.
///
/// Neither input needs to be unit length; both are normalized here.
///
/// Anti-parallel inputs have no unique rotation axis. In that case the source is
/// treated as nudged by an infinitesimal amount toward a fixed perpendicular
/// axis `u`, and the limit of the closed form is returned: the half-turn
/// `2·u·uᵀ − I`. This is one of the infinitely many valid 180° rotations, so
/// callers should not rely on where directions perpendicular to `source` end up.
///
/// A zero-length input has no direction and yields the identity.
pub fn rotation_between(source: &Vector3<f64>, target: &Vector3<f64>) -> Matrix3<f64> {
    let (Some(a), Some(b)) = (source.try_normalize(0.0), target.try_normalize(0.0)) else {
        trace!("rotation_between: zero-length input, returning identity");
        return Matrix3::identity();
    };

    let v = a.cross(&b);
    let c = a.dot(&b);
    let one_plus_c = (a + b).norm_squared() / 2.0;

    if one_plus_c <= ANTIPARALLEL_TOLERANCE {
        trace!("rotation_between: anti-parallel input (c = {c}), using half-turn");
        return half_turn(&perpendicular_axis(&a));
    }

    let k = 1.0 / one_plus_c;

    Matrix3::new(
        v[0] * v[0] * k + c,
        v[1] * v[0] * k - v[2],
        v[2] * v[0] * k + v[1],
        v[0] * v[1] * k + v[2],
        v[1] * v[1] * k + c,
        v[2] * v[1] * k - v[0],
        v[0] * v[2] * k - v[1],
        v[1] * v[2] * k + v[0],
        v[2] * v[2] * k + c,
    )
}

/// Rotates every point in place: `p ← R × p`, i.e. row-vector points times `Rᵗ`.
pub fn rotate_points(points: &mut [Vector3<f64>], rotation: &Matrix3<f64>) {
    for p in points.iter_mut() {
        *p = rotation * *p;
    }
}

/// Unit vector perpendicular to the unit vector `a`.
///
/// Crosses `a` with the coordinate axis it is least aligned with, which keeps
/// the cross product well away from zero.
fn perpendicular_axis(a: &Vector3<f64>) -> Vector3<f64> {
    let abs = a.abs();
    let helper = if abs.x <= abs.y && abs.x <= abs.z {
        Vector3::x()
    } else if abs.y <= abs.z {
        Vector3::y()
    } else {
        Vector3::z()
    };

    a.cross(&helper).normalize()
}

/// 180° rotation about the unit axis `u`.
fn half_turn(u: &Vector3<f64>) -> Matrix3<f64> {
    2.0 * u * u.transpose() - Matrix3::identity()
}
