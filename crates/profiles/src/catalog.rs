use serde::{Deserialize, Serialize};

use gauge_solvers::equation::brent::{Config, ConfigError};

use crate::{GaugeError, RawProfile};

/// A TOML document describing solver settings and gauge profiles.
///
/// ```toml
/// [solver]
/// max_iters = 100
/// residual_tol = 1e-9
///
/// [[profile]]
/// name = "Tank B"
/// kind = "polynomial"
/// coefficients = [0, 0, 0, 0, 100, 0]
/// domain_max = 100.0
///
/// [[profile]]
/// name = "Sample"
/// kind = "table"
/// data = """
/// 0.25,23
/// 0.50,47
/// """
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub solver: SolverSettings,

    #[serde(default, rename = "profile")]
    pub profiles: Vec<RawProfile>,
}

impl Catalog {
    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Catalog`] if the text is not valid TOML or does
    /// not match the catalog layout.
    pub fn from_toml_str(text: &str) -> Result<Self, GaugeError> {
        Ok(toml::from_str(text)?)
    }
}

/// Root finder settings; omitted fields take the solver defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub max_iters: usize,
    pub x_abs_tol: f64,
    pub x_rel_tol: f64,
    pub residual_tol: f64,
}

impl SolverSettings {
    /// Validates the settings into a solver configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a tolerance is negative or non-finite.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        Config::new(
            self.max_iters,
            self.x_abs_tol,
            self.x_rel_tol,
            self.residual_tol,
        )
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        let config = Config::default();
        Self {
            max_iters: config.max_iters(),
            x_abs_tol: config.x_abs_tol(),
            x_rel_tol: config.x_rel_tol(),
            residual_tol: config.residual_tol(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn empty_catalog_uses_defaults() {
        let catalog = Catalog::from_toml_str("").expect("empty is valid");
        assert!(catalog.profiles.is_empty());
        assert_eq!(catalog.solver.to_config().expect("valid"), Config::default());
    }

    #[test]
    fn partial_solver_section_fills_defaults() {
        let catalog = Catalog::from_toml_str("[solver]\nresidual_tol = 1e-9\n").expect("valid");
        let config = catalog.solver.to_config().expect("valid");
        assert_relative_eq!(config.residual_tol(), 1e-9);
        assert_eq!(config.max_iters(), Config::default().max_iters());
    }

    #[test]
    fn parses_both_profile_kinds() {
        let text = r#"
            [[profile]]
            name = "Tank B"
            kind = "polynomial"
            coefficients = [0, 0, 0, 0, 100, 0]
            domain_max = 100.0

            [[profile]]
            name = "Sample"
            kind = "table"
            data = """
            0.25,23
            0.50,47
            """
        "#;

        let catalog = Catalog::from_toml_str(text).expect("valid catalog");
        assert_eq!(catalog.profiles.len(), 2);
        assert_eq!(
            catalog.profiles[0],
            RawProfile::polynomial("Tank B", &[0.0, 0.0, 0.0, 0.0, 100.0, 0.0], 100.0)
        );
        assert!(matches!(
            &catalog.profiles[1],
            RawProfile::Table { name, data } if name == "Sample" && data.contains("0.50,47")
        ));
    }

    #[test]
    fn rejects_unknown_kind() {
        let text = "[[profile]]\nname = \"X\"\nkind = \"sphere\"\n";
        assert!(matches!(
            Catalog::from_toml_str(text),
            Err(GaugeError::Catalog(_))
        ));
    }

    #[test]
    fn rejects_invalid_tolerance() {
        let catalog = Catalog::from_toml_str("[solver]\nx_abs_tol = -1.0\n").expect("valid toml");
        assert!(catalog.solver.to_config().is_err());
    }
}
