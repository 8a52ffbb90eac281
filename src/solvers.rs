use core::fmt;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The default maximum number of iterations for the numerical approach algorithms.
///
/// This is used to prevent infinite loops in case the method fails to converge.
pub const NUMERIC_MAX_ITERS: u32 = 1000;

/// The default convergence tolerance on the Kepler equation residual.
///
/// The residual is compared against `tolerance * max(1, |M|)`, capped at
/// [`MAX_RESIDUAL`], so large mean anomalies get a relative bound that is
/// never looser than the absolute one.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// The loosest residual any solve accepts, whatever the tolerance and
/// mean anomaly.
pub const MAX_RESIDUAL: f64 = 1e-9;

/// Settings for the damped Newton-Raphson solver used to invert
/// Kepler's equation.
///
/// # Example
/// ```
/// use orbit_conversions::{anomaly, SolverSettings};
///
/// let settings = SolverSettings {
///     verbose: true,
///     ..SolverSettings::ELLIPTIC
/// };
///
/// let ecc = anomaly::try_eccentric_from_mean(0.5, 0.3, &settings).unwrap();
/// assert!((anomaly::mean_from_eccentric(ecc, 0.3) - 0.5).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverSettings {
    /// Residual tolerance, scaled by `max(1, |target|)` and capped at
    /// [`MAX_RESIDUAL`].
    pub tolerance: f64,

    /// Hard cap on the number of Newton steps.
    pub max_iters: u32,

    /// Largest magnitude a single Newton step may take, in radians.
    ///
    /// Steps larger than this are clamped, keeping their sign.
    pub max_step: f64,

    /// Log every iterate and residual at `debug` level.
    pub verbose: bool,
}

impl SolverSettings {
    /// Settings for the elliptic Kepler equation.
    ///
    /// The 0.1 rad step cap keeps near-parabolic ellipses from diverging
    /// where `1 - e cos(E)` approaches zero.
    pub const ELLIPTIC: Self = Self {
        tolerance: DEFAULT_TOLERANCE,
        max_iters: NUMERIC_MAX_ITERS,
        max_step: 0.1,
        verbose: false,
    };

    /// Settings for the hyperbolic Kepler equation.
    pub const HYPERBOLIC: Self = Self {
        tolerance: DEFAULT_TOLERANCE,
        max_iters: NUMERIC_MAX_ITERS,
        max_step: 1.0,
        verbose: false,
    };
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self::ELLIPTIC
    }
}

/// An error to describe why an anomaly solve did not produce a converged value.
///
/// Both variants carry the last iterate, which callers may still use as a
/// best-effort answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverError {
    /// ### The iteration budget ran out.
    /// The residual never dropped below the requested tolerance within
    /// [`SolverSettings::max_iters`] steps.
    NonConvergence {
        /// The iterate after the final step.
        last_iterate: f64,
        /// The absolute residual at `last_iterate`.
        residual: f64,
        /// How many steps were taken.
        iterations: u32,
    },

    /// ### An iterate became NaN or infinite.
    /// This usually means the inputs are outside the supported domain,
    /// for instance an eccentricity of exactly one.
    NonFinite {
        /// The offending iterate.
        last_iterate: f64,
        /// How many steps were taken before the value blew up.
        iterations: u32,
    },
}

impl SolverError {
    /// Returns the best value the solver reached before giving up.
    pub fn last_iterate(&self) -> f64 {
        match *self {
            Self::NonConvergence { last_iterate, .. } | Self::NonFinite { last_iterate, .. } => {
                last_iterate
            }
        }
    }
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonConvergence {
                last_iterate,
                residual,
                iterations,
            } => write!(
                f,
                "no convergence after {iterations} iterations \
                (last iterate {last_iterate}, residual {residual})"
            ),
            Self::NonFinite {
                last_iterate,
                iterations,
            } => write!(
                f,
                "iterate became non-finite ({last_iterate}) after {iterations} iterations"
            ),
        }
    }
}

impl std::error::Error for SolverError {}

/// Finds `x` such that `function(x) = target` with a step-limited
/// Newton-Raphson iteration.
///
/// Each raw Newton step `(function(x) - target) / derivative(x)` is clamped
/// to `settings.max_step` in magnitude while keeping its sign. Converged once
/// the residual is below `settings.tolerance * max(1, |target|)`, and never
/// above [`MAX_RESIDUAL`].
pub(crate) fn damped_newton(
    initial_guess: f64,
    target: f64,
    settings: &SolverSettings,
    function: impl Fn(f64) -> f64,
    derivative: impl Fn(f64) -> f64,
) -> Result<f64, SolverError> {
    let threshold = (settings.tolerance * target.abs().max(1.0)).min(MAX_RESIDUAL);
    let mut x = initial_guess;

    for iteration in 0..settings.max_iters {
        let residual = function(x) - target;

        if settings.verbose {
            debug!("iteration {iteration}: x = {x}, residual = {residual}");
        }

        if residual.abs() < threshold {
            return Ok(x);
        }

        let raw_step = residual / derivative(x);
        let step = raw_step.signum() * raw_step.abs().min(settings.max_step);

        x -= step;

        if !x.is_finite() {
            return Err(SolverError::NonFinite {
                last_iterate: x,
                iterations: iteration + 1,
            });
        }
    }

    let residual = (function(x) - target).abs();

    if residual < threshold {
        Ok(x)
    } else {
        Err(SolverError::NonConvergence {
            last_iterate: x,
            residual,
            iterations: settings.max_iters,
        })
    }
}
