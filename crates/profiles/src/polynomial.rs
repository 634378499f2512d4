use std::convert::Infallible;

use gauge_core::Model;

use crate::DataError;

/// Degree of a polynomial gauge fit.
pub const POLYNOMIAL_DEGREE: usize = 5;

/// Number of coefficients in a polynomial gauge fit.
pub const POLYNOMIAL_COEFFICIENTS: usize = POLYNOMIAL_DEGREE + 1;

/// Polynomial fit of volume (gallons) against height (inches).
///
/// Coefficients are ordered highest degree first. The fit is declared valid on
/// `[0, domain_max]`, but it is evaluated wherever it is asked to be.
///
/// Nothing guarantees the fit is monotonic. Inversion assumes that volume
/// increases with height over the domain, so that each reachable volume has
/// exactly one height; a fit that turns over inside the domain yields one of
/// its roots with no indication that others exist.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialModel {
    coefficients: [f64; POLYNOMIAL_COEFFICIENTS],
    domain_max: f64,
}

impl PolynomialModel {
    /// Creates a polynomial model from its coefficients and domain upper bound.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Malformed`] if the coefficient count is not
    /// [`POLYNOMIAL_COEFFICIENTS`], a coefficient is non-finite, or the domain
    /// upper bound is not finite and positive.
    pub fn new(coefficients: &[f64], domain_max: f64) -> Result<Self, DataError> {
        let coefficients: [f64; POLYNOMIAL_COEFFICIENTS] =
            coefficients.try_into().map_err(|_| {
                DataError::malformed(format!(
                    "expected {POLYNOMIAL_COEFFICIENTS} polynomial coefficients, found {}",
                    coefficients.len()
                ))
            })?;

        if let Some(value) = coefficients.iter().find(|value| !value.is_finite()) {
            return Err(DataError::malformed(format!(
                "polynomial coefficient {value} is not finite"
            )));
        }

        if !domain_max.is_finite() || domain_max <= 0.0 {
            return Err(DataError::malformed(format!(
                "domain upper bound {domain_max} must be finite and positive"
            )));
        }

        Ok(Self {
            coefficients,
            domain_max,
        })
    }

    /// Returns the coefficients, highest degree first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64; POLYNOMIAL_COEFFICIENTS] {
        &self.coefficients
    }

    /// Returns the upper bound of the valid height domain, in inches.
    #[must_use]
    pub fn domain_max(&self) -> f64 {
        self.domain_max
    }

    /// Returns the volume at a height using Horner's method.
    #[must_use]
    pub fn volume_at(&self, height: f64) -> f64 {
        self.coefficients
            .iter()
            .fold(0.0, |acc, c| acc.mul_add(height, *c))
    }
}

impl Model for PolynomialModel {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn call(&self, height: &f64) -> Result<f64, Self::Error> {
        Ok(self.volume_at(*height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn evaluates_highest_degree_first() {
        // 2h^5 + 3h + 1
        let model = PolynomialModel::new(&[2.0, 0.0, 0.0, 0.0, 3.0, 1.0], 10.0).expect("valid");
        assert_relative_eq!(model.volume_at(0.0), 1.0);
        assert_relative_eq!(model.volume_at(1.0), 6.0);
        assert_relative_eq!(model.volume_at(2.0), 71.0);
        assert_relative_eq!(model.volume_at(-1.0), -4.0);
    }

    #[test]
    fn matches_direct_power_sum() {
        let coefficients = [-2.0529e-6, 5.5890e-4, -0.074798, 5.6698, 102.1894, -11.6755];
        let model = PolynomialModel::new(&coefficients, 100.0).expect("valid");

        for height in [0.0, 12.5, 47.0, 99.9] {
            let expected: f64 = coefficients
                .iter()
                .rev()
                .enumerate()
                .map(|(power, c)| c * f64::powi(height, i32::try_from(power).expect("small")))
                .sum();
            assert_relative_eq!(model.volume_at(height), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn evaluates_outside_domain() {
        let model = PolynomialModel::new(&[0.0, 0.0, 0.0, 0.0, 100.0, 0.0], 100.0).expect("valid");
        assert_relative_eq!(model.volume_at(150.0), 15_000.0);
        assert_relative_eq!(model.call(&-2.0).expect("infallible"), -200.0);
    }

    #[test]
    fn rejects_wrong_coefficient_count() {
        let err = PolynomialModel::new(&[1.0, 2.0, 3.0], 100.0).expect_err("too few");
        assert!(matches!(err, DataError::Malformed { .. }));

        let err = PolynomialModel::new(&[1.0; 7], 100.0).expect_err("too many");
        assert!(matches!(err, DataError::Malformed { .. }));
    }

    #[test]
    fn rejects_non_finite_coefficient() {
        let err = PolynomialModel::new(&[0.0, 0.0, f64::INFINITY, 0.0, 1.0, 0.0], 100.0)
            .expect_err("infinite coefficient");
        assert!(matches!(err, DataError::Malformed { .. }));
    }

    #[test]
    fn rejects_bad_domain() {
        let coefficients = [0.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for domain_max in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = PolynomialModel::new(&coefficients, domain_max).expect_err("bad domain");
            assert!(matches!(err, DataError::Malformed { .. }));
        }
    }
}
