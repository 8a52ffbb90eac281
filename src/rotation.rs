//! Elementary rotation matrices about the principal axes.
//!
//! These follow the passive (frame-rotating) convention used for direction
//! cosine matrices: `m3(angle) * v` expresses `v` in a frame rotated by
//! `angle` about the z axis. A positive rotation of 90 degrees about z
//! therefore takes `[1, 0, 0]` to `[0, -1, 0]`.
//!
//! Each matrix is orthonormal, so its inverse is its transpose, and
//! sequences of rotations compose by multiplication with the rightmost
//! matrix acting first.
//!
//! # Example
//! ```
//! use glam::DVec3;
//! use orbit_conversions::rotation::m3;
//!
//! let rotated = m3(core::f64::consts::FRAC_PI_2) * DVec3::X;
//! assert!((rotated - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-15);
//! ```

use glam::{DMat3, DVec3};

/// Rotation about the first (x) axis.
pub fn m1(angle: f64) -> DMat3 {
    let (s, c) = angle.sin_cos();

    // Rows: [1, 0, 0], [0, c, s], [0, -s, c]
    DMat3::from_cols(DVec3::X, DVec3::new(0.0, c, -s), DVec3::new(0.0, s, c))
}

/// Rotation about the second (y) axis.
pub fn m2(angle: f64) -> DMat3 {
    let (s, c) = angle.sin_cos();

    // Rows: [c, 0, -s], [0, 1, 0], [s, 0, c]
    DMat3::from_cols(DVec3::new(c, 0.0, s), DVec3::Y, DVec3::new(-s, 0.0, c))
}

/// Rotation about the third (z) axis.
pub fn m3(angle: f64) -> DMat3 {
    let (s, c) = angle.sin_cos();

    // Rows: [c, s, 0], [-s, c, 0], [0, 0, 1]
    DMat3::from_cols(DVec3::new(c, -s, 0.0), DVec3::new(s, c, 0.0), DVec3::Z)
}
