use gauge_solvers::equation::brent::Config;

use crate::{CalibrationTable, DataError, GaugeError, PolynomialModel, inverse};

/// The calibration model behind a gauge profile.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Table(CalibrationTable),
    Polynomial(PolynomialModel),
}

/// A named, validated height-to-volume relation for one tank.
///
/// Heights are in inches and volumes in gallons. A profile is built once and
/// then only read, so it can be shared freely between threads.
///
/// # Inversion
///
/// Tables invert by interpolating with the columns swapped. Polynomials invert
/// by bracketed root finding over `[0, max_height]`, which assumes volume
/// increases with height on that interval. When a fit is not monotonic, a
/// volume reached at more than one height resolves to one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeProfile {
    name: String,
    curve: Curve,
    max_height: f64,
    max_volume: f64,
}

impl GaugeProfile {
    /// Creates a profile from a calibration table.
    ///
    /// The domain upper bound is the last sampled height.
    pub fn table(name: impl Into<String>, table: CalibrationTable) -> Self {
        let (max_height, max_volume) = table.last();
        Self {
            name: name.into(),
            curve: Curve::Table(table),
            max_height,
            max_volume,
        }
    }

    /// Creates a profile from a polynomial fit.
    ///
    /// The domain upper bound is the fit's declared `domain_max`.
    pub fn polynomial(name: impl Into<String>, model: PolynomialModel) -> Self {
        let max_height = model.domain_max();
        let max_volume = model.volume_at(max_height);
        Self {
            name: name.into(),
            curve: Curve::Polynomial(model),
            max_height,
            max_volume,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Upper bound of the height domain, in inches.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Volume at [`max_height`](Self::max_height), in gallons.
    #[must_use]
    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    /// Returns the volume in gallons at a height in inches.
    ///
    /// Tables extrapolate past their samples with the boundary slope, and
    /// polynomials are evaluated as is outside their domain.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidInput`] if `height` is not finite, or if it
    /// is so far out of range that the volume overflows.
    pub fn evaluate(&self, height: f64) -> Result<f64, GaugeError> {
        let height = finite(height)?;
        let volume = match &self.curve {
            Curve::Table(table) => table.volume_at(height)?,
            Curve::Polynomial(model) => model.volume_at(height),
        };
        finite_result(height, volume)
    }

    /// Returns the height in inches at a volume in gallons.
    ///
    /// Uses the default solver configuration for polynomial profiles.
    ///
    /// # Errors
    ///
    /// See [`solve_with`](Self::solve_with).
    pub fn solve(&self, volume: f64) -> Result<f64, GaugeError> {
        self.solve_with(volume, &Config::default())
    }

    /// Returns the height in inches at a volume in gallons.
    ///
    /// # Errors
    ///
    /// - [`DataError::InvalidInput`] if `volume` is not finite, or if a table
    ///   extrapolates it to a height that overflows.
    /// - [`DomainError::OutOfRange`](crate::DomainError::OutOfRange) if a
    ///   polynomial does not reach `volume` anywhere on its domain.
    /// - [`GaugeError::Convergence`] if root finding runs out of iterations.
    pub fn solve_with(&self, volume: f64, config: &Config) -> Result<f64, GaugeError> {
        let volume = finite(volume)?;
        match &self.curve {
            Curve::Table(table) => finite_result(volume, table.height_at(volume)?),
            Curve::Polynomial(model) => {
                inverse::solve_polynomial(&self.name, model, volume, config)
            }
        }
    }
}

fn finite(value: f64) -> Result<f64, DataError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DataError::InvalidInput { value })
    }
}

/// Rejects a non-finite result computed from a finite `input`.
fn finite_result(input: f64, result: f64) -> Result<f64, GaugeError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(DataError::InvalidInput { value: input }.into())
    }
}
