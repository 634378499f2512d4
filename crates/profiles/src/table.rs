use ndarray::Array1;
use ninterp::{
    error::InterpolateError,
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};

use crate::DataError;

/// Piecewise-linear interpolator that extends its end segments.
type Segments = Interp1DOwned<f64, Linear>;

/// Sampled height-to-volume calibration, in inches and gallons.
///
/// Both columns strictly increase, so the table defines a one-to-one,
/// piecewise-linear relation that can be read in either direction.
/// Outside the sampled range the relation continues with the slope of the
/// nearest boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    heights: Vec<f64>,
    volumes: Vec<f64>,
    forward: Segments,
    inverse: Segments,
}

impl CalibrationTable {
    /// Creates a table from `(height, volume)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::Malformed`] if there are fewer than two points or
    /// any value is non-finite, and [`DataError::NonMonotonic`] if heights or
    /// volumes do not strictly increase.
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, DataError> {
        let (heights, volumes): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        if heights.len() < 2 {
            return Err(DataError::malformed(format!(
                "at least 2 calibration points are required, found {}",
                heights.len()
            )));
        }

        if let Some(value) = heights
            .iter()
            .chain(&volumes)
            .find(|value| !value.is_finite())
        {
            return Err(DataError::malformed(format!(
                "calibration value {value} is not finite"
            )));
        }

        check_increasing(&heights, "heights")?;
        check_increasing(&volumes, "volumes")?;

        let forward = segments(&heights, &volumes)?;
        let inverse = segments(&volumes, &heights)?;

        Ok(Self {
            heights,
            volumes,
            forward,
            inverse,
        })
    }

    /// Returns the number of calibration points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// Always false; a valid table has at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Returns the calibration points as `(height, volume)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.heights.iter().copied().zip(self.volumes.iter().copied())
    }

    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    #[must_use]
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    /// Returns the last sampled point.
    #[must_use]
    pub fn last(&self) -> (f64, f64) {
        let n = self.len() - 1;
        (self.heights[n], self.volumes[n])
    }

    /// Returns the volume at a height, in gallons.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpolateError`] if the height cannot be interpolated.
    pub fn volume_at(&self, height: f64) -> Result<f64, InterpolateError> {
        self.forward.interpolate(&[height])
    }

    /// Returns the height at a volume, in inches.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpolateError`] if the volume cannot be interpolated.
    pub fn height_at(&self, volume: f64) -> Result<f64, InterpolateError> {
        self.inverse.interpolate(&[volume])
    }
}

fn check_increasing(values: &[f64], column: &'static str) -> Result<(), DataError> {
    match values.windows(2).position(|pair| pair[1] <= pair[0]) {
        Some(index) => Err(DataError::NonMonotonic {
            index: index + 1,
            column,
        }),
        None => Ok(()),
    }
}

/// Builds a linear interpolator of `ys` over strictly increasing `xs`.
///
/// A knot returns its sample exactly.
fn segments(xs: &[f64], ys: &[f64]) -> Result<Segments, DataError> {
    Ok(Interp1DOwned::new(
        Array1::from(xs.to_vec()),
        Array1::from(ys.to_vec()),
        Linear,
        Extrapolate::Enable,
    )?)
}
