use std::fmt;

use serde::{Deserialize, Serialize};

use gauge_core::units::{LengthUnit, VolumeUnit};
use gauge_solvers::equation::brent::Config;

use crate::{GaugeError, GaugeProfile};

/// A height or volume reading with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "quantity", rename_all = "lowercase")]
pub enum Measurement {
    Height { value: f64, unit: LengthUnit },
    Volume { value: f64, unit: VolumeUnit },
}

impl Measurement {
    #[must_use]
    pub fn height(value: f64, unit: LengthUnit) -> Self {
        Self::Height { value, unit }
    }

    #[must_use]
    pub fn volume(value: f64, unit: VolumeUnit) -> Self {
        Self::Volume { value, unit }
    }

    /// Returns the numeric value in the measurement's own unit.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Height { value, .. } | Self::Volume { value, .. } => *value,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Height { value, unit } => write!(f, "{value} {unit}"),
            Self::Volume { value, unit } => write!(f, "{value} {unit}"),
        }
    }
}

/// A request to convert one reading on a named profile.
///
/// A height input yields a volume in `volume_unit`, and a volume input yields
/// a height in `length_unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub profile_id: String,
    pub input: Measurement,
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub volume_unit: VolumeUnit,
}

impl Query {
    /// Creates a query that reports in inches and gallons.
    pub fn new(profile_id: impl Into<String>, input: Measurement) -> Self {
        Self {
            profile_id: profile_id.into(),
            input,
            length_unit: LengthUnit::default(),
            volume_unit: VolumeUnit::default(),
        }
    }

    #[must_use]
    pub fn with_length_unit(mut self, unit: LengthUnit) -> Self {
        self.length_unit = unit;
        self
    }

    #[must_use]
    pub fn with_volume_unit(mut self, unit: VolumeUnit) -> Self {
        self.volume_unit = unit;
        self
    }
}

/// A query result in the canonical units.
enum Reading {
    Inches(f64),
    Gallons(f64),
}

/// Evaluates or solves the profile for a reading.
fn resolve(
    profile: &GaugeProfile,
    input: &Measurement,
    config: &Config,
) -> Result<Reading, GaugeError> {
    match *input {
        Measurement::Height { value, unit } => {
            profile.evaluate(unit.to_inches(value)).map(Reading::Gallons)
        }
        Measurement::Volume { value, unit } => profile
            .solve_with(unit.to_gallons(value), config)
            .map(Reading::Inches),
    }
}

/// Runs a query against a resolved profile.
pub(crate) fn run(
    profile: &GaugeProfile,
    query: &Query,
    config: &Config,
) -> Result<Measurement, GaugeError> {
    Ok(match resolve(profile, &query.input, config)? {
        Reading::Gallons(gallons) => Measurement::volume(
            query.volume_unit.from_gallons(gallons),
            query.volume_unit,
        ),
        Reading::Inches(inches) => Measurement::height(
            query.length_unit.from_inches(inches),
            query.length_unit,
        ),
    })
}

/// Converts a reading once and reports the result in every output unit.
pub(crate) fn run_all(
    profile: &GaugeProfile,
    input: &Measurement,
    config: &Config,
) -> Result<Vec<Measurement>, GaugeError> {
    Ok(match resolve(profile, input, config)? {
        Reading::Gallons(gallons) => VolumeUnit::ALL
            .into_iter()
            .map(|unit| Measurement::volume(unit.from_gallons(gallons), unit))
            .collect(),
        Reading::Inches(inches) => LengthUnit::ALL
            .into_iter()
            .map(|unit| Measurement::height(unit.from_inches(inches), unit))
            .collect(),
    })
}
