use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

use gauge_solvers::equation::brent;

/// Errors from loading calibration data or from query inputs.
#[derive(Debug, Error)]
pub enum DataError {
    /// Calibration data could not be parsed or is insufficient.
    #[error("malformed calibration data: {reason}")]
    Malformed { reason: String },

    /// Consecutive calibration points do not strictly increase.
    #[error("calibration {column} must strictly increase, but point {index} does not")]
    NonMonotonic { index: usize, column: &'static str },

    /// A query value is NaN or infinite, or overflows to a non-finite result.
    #[error("invalid input {value}: must be finite and give a finite result")]
    InvalidInput { value: f64 },

    /// The interpolation grid was rejected.
    #[error(transparent)]
    Grid(#[from] ValidateError),
}

impl DataError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors from queries that fall outside a profile's domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    /// No height in the profile's domain produces the target volume.
    #[error("volume {target} gal is outside the reachable range [{min}, {max}] gal")]
    OutOfRange { target: f64, min: f64, max: f64 },
}

/// Errors returned by gauge profile operations.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The root finder hit its iteration cap before reaching tolerance.
    #[error(
        "no convergence after {iters} iterations: \
         best height {height} in has residual {residual} gal"
    )]
    Convergence {
        iters: usize,
        height: f64,
        residual: f64,
    },

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),

    #[error("unknown profile `{0}`")]
    UnknownProfile(String),

    #[error("duplicate profile `{0}`")]
    DuplicateProfile(String),

    #[error("invalid solver config: {0}")]
    Config(#[from] brent::ConfigError),

    #[error("invalid catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("root finding failed")]
    Solver(#[source] brent::Error),
}
