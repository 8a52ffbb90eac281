//! # Orbit Conversions
//! This library crate converts a spacecraft's two-body state between its
//! two classical representations:
//!
//! - [`CartesianState`]: position and velocity in an inertial frame,
//!   `(x, y, z, vx, vy, vz)`.
//! - [`KeplerianState`]: classical orbital elements,
//!   `(a, e, i, Ω, ω, M0)`, where `M0` is the mean anomaly at epoch.
//!
//! Both elliptic (`e < 1`) and hyperbolic (`e > 1`) orbits are supported.
//! Hyperbolic orbits use a negative semi-major axis. Parabolic orbits
//! (`e == 1`) are not.
//!
//! The anomaly conversions that sit underneath, including the Newton
//! solvers for Kepler's equation, are exposed in [`anomaly`] and can be
//! used on their own.
//!
//! ## Logging
//! The crate logs through the [`log`] facade and never installs a logger.
//! Solver non-convergence is reported as a `warn` record; per-iteration
//! tracing is emitted at `debug` level when [`SolverSettings::verbose`]
//! is set.
//!
//! ## Example
//!
//! ```rust
//! use orbit_conversions::{CartesianState, OrbitalState};
//!
//! # fn main() {
//! let cartesian = CartesianState::new([1.0, 0.2, 0.1, -0.1, 0.9, 0.3], 1.0);
//! let keplerian = cartesian.convert_to_keplerian(0.0);
//! let back = keplerian.convert_to_cartesian(0.0);
//!
//! for (a, b) in cartesian.get_state().iter().zip(back.get_state()) {
//!     assert!((a - b).abs() < 1e-9);
//! }
//! # }
//! ```

#![warn(missing_docs)]

pub mod anomaly;
mod cartesian;
mod keplerian;
pub mod rotation;
mod solvers;

use core::f64::consts::TAU;

pub use cartesian::CartesianState;
pub use keplerian::KeplerianState;
pub use solvers::{
    SolverError, SolverSettings, DEFAULT_TOLERANCE, MAX_RESIDUAL, NUMERIC_MAX_ITERS,
};

/// A six-element state vector.
///
/// For a [`CartesianState`] this is `(x, y, z, vx, vy, vz)`.
/// For a [`KeplerianState`] this is `(a, e, i, Ω, ω, M0)`.
pub type StateVector = [f64; 6];

/// A trait that defines the quantities every orbital state representation
/// must be able to provide.
///
/// This trait is implemented by both [`CartesianState`] and
/// [`KeplerianState`]. The four shape quantities (momentum, energy,
/// semi-major axis, eccentricity) are computed differently by each
/// representation; everything else derives from them.
///
/// # Examples
/// ```
/// use orbit_conversions::{CartesianState, KeplerianState, OrbitalState};
///
/// fn describe(state: &impl OrbitalState) -> f64 {
///     state.get_mean_motion()
/// }
///
/// let cartesian = CartesianState::new([1.0, 0.0, 0.0, 0.0, 1.0, 0.0], 1.0);
/// let keplerian = cartesian.convert_to_keplerian(0.0);
///
/// assert!((describe(&cartesian) - 1.0).abs() < 1e-12);
/// assert!((describe(&keplerian) - 1.0).abs() < 1e-12);
/// ```
pub trait OrbitalState {
    /// Gets the six-element state vector.
    fn get_state(&self) -> StateVector;

    /// Replaces the whole state vector.
    fn set_state(&mut self, state: StateVector);

    /// Gets the gravitational parameter of the central body.
    ///
    /// Mu is equal to `GM`, where `G` is the gravitational constant
    /// and `M` is the mass of the central body.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Standard_gravitational_parameter>
    fn get_mu(&self) -> f64;

    /// Sets the gravitational parameter of the central body.
    ///
    /// The state vector is left untouched.
    fn set_mu(&mut self, mu: f64);

    /// Gets the magnitude of the specific angular momentum.
    fn get_momentum(&self) -> f64;

    /// Gets the specific orbital energy.
    ///
    /// Negative for elliptic orbits, positive for hyperbolic ones.
    fn get_energy(&self) -> f64;

    /// Gets the semi-major axis.
    ///
    /// Negative for hyperbolic orbits.
    fn get_semi_major_axis(&self) -> f64;

    /// Gets the eccentricity.
    fn get_eccentricity(&self) -> f64;

    /// Gets the mean motion, `sqrt(mu / |a|^3)`.
    ///
    /// The absolute value makes this valid for hyperbolic orbits too.
    fn get_mean_motion(&self) -> f64 {
        (self.get_mu() / self.get_semi_major_axis().abs().powi(3)).sqrt()
    }

    /// Gets the semi-latus rectum, `a (1 - e^2)`.
    ///
    /// Since the semi-major axis is signed, this stays positive for
    /// hyperbolic orbits.
    ///
    /// Learn more: <https://en.wikipedia.org/wiki/Conic_section#Conic_parameters>
    fn get_parameter(&self) -> f64 {
        self.get_semi_major_axis() * (1.0 - self.get_eccentricity().powi(2))
    }

    /// Gets the time taken for one full revolution.
    ///
    /// Returns infinity for hyperbolic trajectories, which never repeat.
    fn get_period(&self) -> f64 {
        if self.get_eccentricity() < 1.0 {
            TAU / self.get_mean_motion()
        } else {
            f64::INFINITY
        }
    }
}
