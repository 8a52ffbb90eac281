#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use core::f64::consts::TAU;

use glam::{DMat3, DVec3};

use crate::{anomaly, KeplerianState, OrbitalState, StateVector};

/// Below this in-plane component of the unit orbit normal, an orbit is
/// treated as equatorial.
const EQUATORIAL_EPSILON: f64 = 1e-10;

/// An orbital state described by a position and a velocity.
///
/// The state vector is `(x, y, z, vx, vy, vz)`, expressed in an inertial
/// frame centered on the central body. Length and time units only need to
/// be consistent with the gravitational parameter.
///
/// # Example
/// ```
/// use glam::DVec3;
/// use orbit_conversions::{CartesianState, OrbitalState};
///
/// let state = CartesianState::from_vectors(
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     1.0,
/// );
///
/// assert_eq!(state.get_radius(), 1.0);
/// assert_eq!(state.get_speed(), 1.0);
/// assert_eq!(state.get_energy(), -0.5);
/// assert_eq!(state.get_semi_major_axis(), 1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CartesianState {
    state: StateVector,
    mu: f64,
}

impl CartesianState {
    /// Creates a new Cartesian state from `(x, y, z, vx, vy, vz)` and the
    /// gravitational parameter of the central body.
    pub fn new(state: StateVector, mu: f64) -> Self {
        Self { state, mu }
    }

    /// Creates a new Cartesian state from separate position and velocity
    /// vectors.
    pub fn from_vectors(position: DVec3, velocity: DVec3, mu: f64) -> Self {
        let [x, y, z] = position.to_array();
        let [vx, vy, vz] = velocity.to_array();

        Self::new([x, y, z, vx, vy, vz], mu)
    }

    /// Gets the position vector, the first three state components.
    pub fn get_position_vector(&self) -> DVec3 {
        DVec3::from_slice(&self.state[0..3])
    }

    /// Gets the velocity vector, the last three state components.
    pub fn get_velocity_vector(&self) -> DVec3 {
        DVec3::from_slice(&self.state[3..6])
    }

    /// Gets the magnitude of the velocity.
    pub fn get_speed(&self) -> f64 {
        self.get_velocity_vector().length()
    }

    /// Gets the distance from the central body.
    pub fn get_radius(&self) -> f64 {
        self.get_position_vector().length()
    }

    /// Gets the specific angular momentum vector, `r × v`.
    pub fn get_momentum_vector(&self) -> DVec3 {
        self.get_position_vector().cross(self.get_velocity_vector())
    }

    /// Gets the eccentricity vector, `(v × h) / mu - r / |r|`.
    ///
    /// It points from the central body towards periapsis.
    pub fn get_eccentricity_vector(&self) -> DVec3 {
        let position = self.get_position_vector();

        self.get_velocity_vector().cross(self.get_momentum_vector()) / self.mu
            - position / position.length()
    }

    /// Converts this state to classical orbital elements.
    ///
    /// `delta_t` is the time elapsed since epoch at which this state was
    /// observed; the returned mean anomaly is propagated back to epoch.
    ///
    /// # Degenerate orbits
    /// The node line and periapsis direction are undefined for circular
    /// orbits. With an eccentricity of exactly zero the RAAN, argument of
    /// periapsis, and mean anomaly come out as NaN while the semi-major
    /// axis, eccentricity, and inclination stay finite. Small but nonzero
    /// eccentricities produce finite, if poorly conditioned, angles.
    ///
    /// Equatorial orbits have no node line. Their RAAN is reported as zero
    /// and the argument of periapsis is measured from the +x axis,
    /// counterclockwise seen from +z for prograde orbits and clockwise for
    /// retrograde ones, so the elements still convert back to the same
    /// state.
    ///
    /// # Example
    /// ```
    /// use orbit_conversions::{CartesianState, OrbitalState};
    ///
    /// let cartesian = CartesianState::new([1.0, 0.0, 0.0, 0.0, 1.2, 0.0], 1.0);
    /// let keplerian = cartesian.convert_to_keplerian(0.0);
    ///
    /// // Starting at periapsis of a prograde equatorial ellipse.
    /// assert!((keplerian.get_eccentricity() - 0.44).abs() < 1e-12);
    /// assert!(keplerian.get_inclination().abs() < 1e-12);
    /// assert!(keplerian.get_mean_anomaly_at_epoch().abs() < 1e-6);
    /// assert_eq!(keplerian.get_raan(), 0.0);
    ///
    /// let back = keplerian.convert_to_cartesian(0.0);
    /// assert!((back.get_position_vector() - cartesian.get_position_vector()).length() < 1e-9);
    /// ```
    #[must_use]
    pub fn convert_to_keplerian(&self, delta_t: f64) -> KeplerianState {
        let position = self.get_position_vector();
        let velocity = self.get_velocity_vector();

        let semi_major_axis = self.get_semi_major_axis();

        let momentum_dir = self.get_momentum_vector() / self.get_momentum();

        let eccentricity_vector = self.get_eccentricity_vector();
        let eccentricity = eccentricity_vector.length();
        let periapsis_dir = eccentricity_vector / eccentricity;

        // Inertial-to-orbit DCM, rows are (P, Q, W)
        let dcm = DMat3::from_cols(
            periapsis_dir,
            momentum_dir.cross(periapsis_dir),
            momentum_dir,
        )
        .transpose();

        let normal_row = dcm.row(2);
        let out_of_plane = dcm.col(2);

        let inclination = normal_row.z.clamp(-1.0, 1.0).acos();

        let (raan, arg_periapsis) = if normal_row.truncate().length() < EQUATORIAL_EPSILON {
            // No node line: measure periapsis from +x, clockwise when retrograde
            let arg_periapsis = if momentum_dir.z >= 0.0 {
                periapsis_dir.y.atan2(periapsis_dir.x)
            } else {
                (-periapsis_dir.y).atan2(periapsis_dir.x)
            };

            (0.0, arg_periapsis.rem_euclid(TAU))
        } else {
            (
                normal_row.x.atan2(-normal_row.y).rem_euclid(TAU),
                out_of_plane.x.atan2(out_of_plane.y).rem_euclid(TAU),
            )
        };

        let true_anomaly = {
            let cos_f = (self.get_parameter() / self.get_radius() - 1.0) / eccentricity;
            let tmp = cos_f.clamp(-1.0, 1.0).acos();

            // Moving towards the central body: past apoapsis
            if position.dot(velocity) < 0.0 {
                TAU - tmp
            } else {
                tmp
            }
        };

        let mean_anomaly = anomaly::mean_from_true(true_anomaly, eccentricity);
        let mean_anomaly_at_epoch = mean_anomaly - self.get_mean_motion() * delta_t;

        KeplerianState::new(
            [
                semi_major_axis,
                eccentricity,
                inclination,
                raan,
                arg_periapsis,
                mean_anomaly_at_epoch,
            ],
            self.mu,
        )
    }
}

impl OrbitalState for CartesianState {
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
        self.get_momentum_vector().length()
    }

    /// Gets the specific orbital energy from the vis-viva relation,
    /// `v^2 / 2 - mu / r`.
    fn get_energy(&self) -> f64 {
        self.get_speed().powi(2) / 2.0 - self.mu / self.get_radius()
    }

    fn get_semi_major_axis(&self) -> f64 {
        -self.mu / (2.0 * self.get_energy())
    }

    fn get_eccentricity(&self) -> f64 {
        self.get_eccentricity_vector().length()
    }
}

impl Default for CartesianState {
    /// Creates a zero state around a central body with `mu = 1`.
    fn default() -> Self {
        Self::new([0.0; 6], 1.0)
    }
}
