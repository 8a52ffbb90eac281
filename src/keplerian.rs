#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::DVec3;

use crate::{
    anomaly,
    rotation::{m1, m3},
    CartesianState, OrbitalState, StateVector,
};

/// An orbital state described by classical orbital elements.
///
/// # Example
/// ```
/// use orbit_conversions::{KeplerianState, OrbitalState};
///
/// let orbit = KeplerianState::new(
///     [
///         // Semi-major axis (negative for hyperbolic orbits)
///         2.0,
///         // Eccentricity
///         0.5,
///         // Inclination
///         0.3,
///         // Right ascension of the ascending node
///         1.2,
///         // Argument of periapsis
///         0.4,
///         // Mean anomaly at epoch
///         0.0,
///     ],
///     // Gravitational parameter of the central body
///     1.0,
/// );
///
/// // At periapsis, r = a (1 - e)
/// assert!((orbit.get_radius(0.0) - 1.0).abs() < 1e-12);
/// assert!((orbit.get_energy() + 0.25).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeplerianState {
    /// `(a, e, i, Ω, ω, M0)`
    state: StateVector,
    mu: f64,
}

impl KeplerianState {
    /// Creates a new Keplerian state.
    ///
    /// `state` holds, in order:
    /// - the semi-major axis, negative for hyperbolic orbits,
    /// - the eccentricity,
    /// - the inclination, in `[0, π]`,
    /// - the right ascension of the ascending node, in `[0, 2π)`,
    /// - the argument of periapsis, in `[0, 2π)`,
    /// - the mean anomaly at epoch.
    ///
    /// The sign of the semi-major axis must agree with the eccentricity
    /// (`a < 0` if and only if `e > 1`). This is not checked.
    pub fn new(state: StateVector, mu: f64) -> Self {
        Self { state, mu }
    }

    /// Gets the inclination, in radians.
    pub fn get_inclination(&self) -> f64 {
        self.state[2]
    }

    /// Gets the right ascension of the ascending node, in radians.
    pub fn get_raan(&self) -> f64 {
        self.state[3]
    }

    /// Gets the argument of periapsis, in radians.
    pub fn get_arg_periapsis(&self) -> f64 {
        self.state[4]
    }

    /// Gets the mean anomaly at epoch, in radians.
    pub fn get_mean_anomaly_at_epoch(&self) -> f64 {
        self.state[5]
    }

    /// Gets the distance from the central body at a given true anomaly.
    pub fn get_radius(&self, true_anomaly: f64) -> f64 {
        self.get_parameter() / (1.0 + self.get_eccentricity() * true_anomaly.cos())
    }

    /// Gets the speed at a given true anomaly, from the vis-viva equation.
    pub fn get_speed(&self, true_anomaly: f64) -> f64 {
        (self.mu * (2.0 / self.get_radius(true_anomaly) - 1.0 / self.get_semi_major_axis())).sqrt()
    }

    /// Gets the mean anomaly `delta_t` after epoch.
    pub fn get_mean_anomaly_at_time(&self, delta_t: f64) -> f64 {
        self.get_mean_anomaly_at_epoch() + self.get_mean_motion() * delta_t
    }

    /// Gets the true anomaly `delta_t` after epoch.
    ///
    /// # Performance
    /// This solves Kepler's equation numerically.
    pub fn get_true_anomaly_at_time(&self, delta_t: f64) -> f64 {
        anomaly::true_from_mean(
            self.get_mean_anomaly_at_time(delta_t),
            self.get_eccentricity(),
        )
    }

    /// Gets the distance from the central body `delta_t` after epoch.
    pub fn get_radius_at_time(&self, delta_t: f64) -> f64 {
        self.get_radius(self.get_true_anomaly_at_time(delta_t))
    }

    /// Gets the speed `delta_t` after epoch.
    pub fn get_speed_at_time(&self, delta_t: f64) -> f64 {
        self.get_speed(self.get_true_anomaly_at_time(delta_t))
    }

    /// Converts these elements to a position and velocity `delta_t` after
    /// epoch.
    ///
    /// # Example
    /// ```
    /// use orbit_conversions::{KeplerianState, OrbitalState};
    ///
    /// let orbit = KeplerianState::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], 1.0);
    ///
    /// let cartesian = orbit.convert_to_cartesian(0.0);
    /// let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    ///
    /// for (a, b) in cartesian.get_state().iter().zip(expected) {
    ///     assert!((a - b).abs() < 1e-12);
    /// }
    /// ```
    #[must_use]
    pub fn convert_to_cartesian(&self, delta_t: f64) -> CartesianState {
        let eccentricity = self.get_eccentricity();
        let true_anomaly = self.get_true_anomaly_at_time(delta_t);

        let radius = self.get_radius(true_anomaly);
        let momentum = self.get_momentum();
        let radial_speed = momentum / self.get_parameter() * eccentricity * true_anomaly.sin();

        // Inertial to the rotating (radial, transverse, normal) frame
        let dcm = m3(self.get_arg_periapsis() + true_anomaly)
            * m1(self.get_inclination())
            * m3(self.get_raan());
        let to_inertial = dcm.transpose();

        let position = DVec3::new(radius, 0.0, 0.0);
        let angular_velocity = DVec3::new(0.0, 0.0, momentum / radius.powi(2));
        let velocity = DVec3::new(radial_speed, 0.0, 0.0) + angular_velocity.cross(position);

        CartesianState::from_vectors(to_inertial * position, to_inertial * velocity, self.mu)
    }
}

impl OrbitalState for KeplerianState {
    fn get_state(&self) -> StateVector {
        self.state
    }

    fn set_state(&mut self, state: StateVector) {
        self.state = state;
    }

    fn get_mu(&self) -> f64 {
        self.mu
    }

    fn set_mu(&mut self, mu: f64) {
        self.mu = mu;
    }

    fn get_momentum(&self) -> f64 {
        (self.mu * self.get_parameter()).sqrt()
    }

    fn get_energy(&self) -> f64 {
        -self.mu / (2.0 * self.get_semi_major_axis())
    }

    fn get_semi_major_axis(&self) -> f64 {
        self.state[0]
    }

    fn get_eccentricity(&self) -> f64 {
        self.state[1]
    }
}

impl Default for KeplerianState {
    /// Creates a zero state around a central body with `mu = 1`.
    fn default() -> Self {
        Self::new([0.0; 6], 1.0)
    }
}
