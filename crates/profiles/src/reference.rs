//! Built-in polynomial profiles for three railcar tanks.

use crate::{GaugeError, RawProfile, Registry};

/// Height domain shared by the reference fits, in inches.
pub const REFERENCE_DOMAIN_MAX: f64 = 100.0;

pub const TANK_A: &str = "Tank A (SKSX117122)";
pub const TANK_B: &str = "Tank B";
pub const TANK_C: &str = "Tank C";

const TANK_A_COEFFICIENTS: [f64; 6] = [
    -2.0529e-6, 5.5890e-4, -0.074798, 5.6698, 102.1894, -11.6755,
];
const TANK_B_COEFFICIENTS: [f64; 6] = [0.0, 0.0, 0.0, 0.0, 100.0, 0.0];
const TANK_C_COEFFICIENTS: [f64; 6] = [1e-6, -2e-4, 0.01, 0.5, 90.0, 5.0];

/// Returns raw data for the reference tanks.
#[must_use]
pub fn reference_profiles() -> Vec<RawProfile> {
    [
        (TANK_A, TANK_A_COEFFICIENTS),
        (TANK_B, TANK_B_COEFFICIENTS),
        (TANK_C, TANK_C_COEFFICIENTS),
    ]
    .into_iter()
    .map(|(name, coefficients)| {
        RawProfile::polynomial(name, &coefficients, REFERENCE_DOMAIN_MAX)
    })
    .collect()
}

impl Registry {
    /// Builds a registry holding the reference tanks.
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in data fails validation.
    pub fn reference() -> Result<Self, GaugeError> {
        let mut registry = Self::new();
        for raw in reference_profiles() {
            registry.load(&raw)?;
        }
        Ok(registry)
    }
}
