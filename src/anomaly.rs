//! Conversions between true, eccentric, hyperbolic, and mean anomaly.
//!
//! All angles are in radians. The elliptic functions expect `0 <= e < 1`
//! and the hyperbolic ones expect `e > 1`; neither range is checked.
//! Parabolic orbits (`e == 1`) are not supported.
//!
//! Most callers only need the two dispatchers, [`true_from_mean`] and
//! [`mean_from_true`], which pick the right pair of conversions based on
//! the eccentricity.
//!
//! # Example
//! ```
//! use orbit_conversions::anomaly;
//!
//! let mean = anomaly::mean_from_eccentric(1.0, 0.5);
//! assert!((mean - 0.5792645075960517).abs() < 1e-12);
//!
//! let ecc = anomaly::eccentric_from_mean(mean, 0.5);
//! assert!((ecc - 1.0).abs() < 1e-10);
//! ```

use core::f64::consts::TAU;

use log::warn;

use crate::solvers::{damped_newton, SolverError, SolverSettings};

/// Moves `angle` by a full turn when its sign disagrees with `reference`,
/// so the result stays on the same winding as the input angle.
#[inline]
fn match_winding(angle: f64, reference: f64) -> f64 {
    if reference < 0.0 && angle > 0.0 {
        angle - TAU
    } else if reference > 0.0 && angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Gets the true anomaly from an eccentric anomaly.
///
/// The result keeps the sign of `eccentric_anomaly`, so a negative input
/// yields a true anomaly in `(-2π, 0]` and a positive one in `[0, 2π)`.
pub fn true_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    // tan(f / 2) = sqrt((1 + e) / (1 - e)) * tan(E / 2)
    let ratio = ((1.0 + eccentricity) / (1.0 - eccentricity)).sqrt();
    let true_anomaly = 2.0 * (ratio * (eccentric_anomaly * 0.5).tan()).atan();

    match_winding(true_anomaly, eccentric_anomaly)
}

/// Gets the eccentric anomaly from a true anomaly.
///
/// Inverse of [`true_from_eccentric`], with the same sign convention.
pub fn eccentric_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    // tan(E / 2) = sqrt((1 - e) / (1 + e)) * tan(f / 2)
    let ratio = ((1.0 - eccentricity) / (1.0 + eccentricity)).sqrt();
    let eccentric_anomaly = 2.0 * (ratio * (true_anomaly * 0.5).tan()).atan();

    match_winding(eccentric_anomaly, true_anomaly)
}

/// Gets the mean anomaly from an eccentric anomaly using Kepler's equation.
///
/// ```text
/// M = E - e sin E
/// ```
#[inline]
pub fn mean_from_eccentric(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// Solves Kepler's equation for the eccentric anomaly.
///
/// The Newton iteration starts from `E = M`.
///
/// # Errors
/// Returns [`SolverError`] if the residual does not fall below the
/// tolerance within the iteration budget, or if an iterate stops being
/// finite.
pub fn try_eccentric_from_mean(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: &SolverSettings,
) -> Result<f64, SolverError> {
    damped_newton(
        mean_anomaly,
        mean_anomaly,
        settings,
        |ecc| mean_from_eccentric(ecc, eccentricity),
        |ecc| 1.0 - eccentricity * ecc.cos(),
    )
}

/// Gets the eccentric anomaly from a mean anomaly.
///
/// This never fails; if the solver does not converge, a warning is logged
/// and the last iterate is returned.
/// Use [`try_eccentric_from_mean`] to detect that case.
pub fn eccentric_from_mean(mean_anomaly: f64, eccentricity: f64) -> f64 {
    try_eccentric_from_mean(mean_anomaly, eccentricity, &SolverSettings::ELLIPTIC).unwrap_or_else(
        |err| {
            warn!("eccentric anomaly solve for M = {mean_anomaly}, e = {eccentricity}: {err}");
            err.last_iterate()
        },
    )
}

/// Gets the true anomaly from a hyperbolic anomaly.
///
/// The result keeps the sign of `hyperbolic_anomaly`.
pub fn true_from_hyperbolic(hyperbolic_anomaly: f64, eccentricity: f64) -> f64 {
    // tan(f / 2) = sqrt((e + 1) / (e - 1)) * tanh(H / 2)
    let ratio = ((1.0 + eccentricity) / (eccentricity - 1.0)).sqrt();
    let true_anomaly = 2.0 * (ratio * (hyperbolic_anomaly * 0.5).tanh()).atan();

    match_winding(true_anomaly, hyperbolic_anomaly)
}

/// Gets the hyperbolic anomaly from a true anomaly.
///
/// Only true anomalies inside the asymptotes give a finite result.
pub fn hyperbolic_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    // tanh(H / 2) = sqrt((e - 1) / (e + 1)) * tan(f / 2)
    let ratio = ((eccentricity - 1.0) / (1.0 + eccentricity)).sqrt();
    2.0 * (ratio * (true_anomaly * 0.5).tan()).atanh()
}

/// Gets the mean anomaly from a hyperbolic anomaly using the hyperbolic
/// Kepler equation.
///
/// ```text
/// M = e sinh H - H
/// ```
#[inline]
pub fn mean_from_hyperbolic(hyperbolic_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * hyperbolic_anomaly.sinh() - hyperbolic_anomaly
}

/// Solves the hyperbolic Kepler equation for the hyperbolic anomaly.
///
/// The Newton iteration starts from `H = atan(M)`; the step cap keeps the
/// fast-growing `cosh` term from throwing the iterate far past the root.
///
/// # Errors
/// Same as [`try_eccentric_from_mean`].
pub fn try_hyperbolic_from_mean(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: &SolverSettings,
) -> Result<f64, SolverError> {
    damped_newton(
        mean_anomaly.atan(),
        mean_anomaly,
        settings,
        |hyp| mean_from_hyperbolic(hyp, eccentricity),
        |hyp| eccentricity * hyp.cosh() - 1.0,
    )
}

/// Gets the hyperbolic anomaly from a mean anomaly.
///
/// This never fails; if the solver does not converge, a warning is logged
/// and the last iterate is returned.
/// Use [`try_hyperbolic_from_mean`] to detect that case.
pub fn hyperbolic_from_mean(mean_anomaly: f64, eccentricity: f64) -> f64 {
    try_hyperbolic_from_mean(mean_anomaly, eccentricity, &SolverSettings::HYPERBOLIC)
        .unwrap_or_else(|err| {
            warn!("hyperbolic anomaly solve for M = {mean_anomaly}, e = {eccentricity}: {err}");
            err.last_iterate()
        })
}

/// Gets the true anomaly from a mean anomaly.
///
/// Goes through the eccentric anomaly for `e < 1` and through the
/// hyperbolic anomaly otherwise.
pub fn true_from_mean(mean_anomaly: f64, eccentricity: f64) -> f64 {
    if eccentricity < 1.0 {
        true_from_eccentric(eccentric_from_mean(mean_anomaly, eccentricity), eccentricity)
    } else {
        true_from_hyperbolic(hyperbolic_from_mean(mean_anomaly, eccentricity), eccentricity)
    }
}

/// Gets the mean anomaly from a true anomaly.
///
/// Goes through the eccentric anomaly for `e < 1` and through the
/// hyperbolic anomaly otherwise.
pub fn mean_from_true(true_anomaly: f64, eccentricity: f64) -> f64 {
    if eccentricity < 1.0 {
        mean_from_eccentric(eccentric_from_true(true_anomaly, eccentricity), eccentricity)
    } else {
        mean_from_hyperbolic(hyperbolic_from_true(true_anomaly, eccentricity), eccentricity)
    }
}
