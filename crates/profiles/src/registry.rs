use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use gauge_solvers::equation::brent::Config;

use crate::{
    CalibrationTable, Catalog, DataError, GaugeError, GaugeProfile, Measurement,
    PolynomialModel, Query, query,
};

/// Unvalidated profile data, as supplied by a catalog or a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawProfile {
    /// Calibration samples, one `height, volume` pair per line.
    Table { name: String, data: String },

    /// Degree-5 fit, coefficients highest degree first.
    Polynomial {
        name: String,
        coefficients: Vec<f64>,
        domain_max: f64,
    },
}

impl RawProfile {
    /// Creates table data from text lines.
    pub fn table<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let data = lines.into_iter().fold(String::new(), |mut data, line| {
            data.push_str(line.as_ref());
            data.push('\n');
            data
        });
        Self::Table {
            name: name.into(),
            data,
        }
    }

    pub fn polynomial(name: impl Into<String>, coefficients: &[f64], domain_max: f64) -> Self {
        Self::Polynomial {
            name: name.into(),
            coefficients: coefficients.to_vec(),
            domain_max,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Table { name, .. } | Self::Polynomial { name, .. } => name,
        }
    }
}

/// Validates raw data into a gauge profile.
///
/// # Errors
///
/// Returns a [`DataError`] if table text cannot be parsed, a table is not
/// strictly increasing, or polynomial data is malformed.
pub fn load(raw: &RawProfile) -> Result<GaugeProfile, DataError> {
    let profile = match raw {
        RawProfile::Table { name, data } => {
            GaugeProfile::table(name.as_str(), parse_table(data.lines())?)
        }
        RawProfile::Polynomial {
            name,
            coefficients,
            domain_max,
        } => GaugeProfile::polynomial(
            name.as_str(),
            PolynomialModel::new(coefficients, *domain_max)?,
        ),
    };

    debug!(
        profile = profile.name(),
        max_height = profile.max_height(),
        max_volume = profile.max_volume(),
        "loaded gauge profile"
    );
    Ok(profile)
}

/// Parses `height, volume` lines into a calibration table.
///
/// Blank lines and lines starting with `#` or `//` are skipped. Every other
/// line must hold exactly two finite numbers separated by a comma.
///
/// # Errors
///
/// Returns [`DataError::Malformed`] naming the first bad line (1-based), or
/// any error from [`CalibrationTable::new`].
pub fn parse_table<I, S>(lines: I) -> Result<CalibrationTable, DataError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut points = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let number = index + 1;
        let line = line.as_ref().trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            debug!(line = number, "skipped noise line");
            continue;
        }

        points.push(parse_point(line).map_err(|reason| {
            DataError::malformed(format!("line {number}: {reason}"))
        })?);
    }

    CalibrationTable::new(points)
}

fn parse_point(line: &str) -> Result<(f64, f64), String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [height, volume] = fields.as_slice() else {
        return Err(format!("expected 2 fields, found {}", fields.len()));
    };
    Ok((parse_field(height)?, parse_field(volume)?))
}

fn parse_field(field: &str) -> Result<f64, String> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(value) => Err(format!("value {value} is not finite")),
        Err(_) => Err(format!("`{field}` is not a number")),
    }
}

/// Named gauge profiles and the solver settings used to query them.
///
/// Profiles are kept sorted by name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    profiles: BTreeMap<String, GaugeProfile>,
    solver: Config,
}

impl Registry {
    /// Creates an empty registry with the default solver configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that solves with `solver`.
    #[must_use]
    pub fn with_solver(solver: Config) -> Self {
        Self {
            profiles: BTreeMap::new(),
            solver,
        }
    }

    #[must_use]
    pub fn solver(&self) -> &Config {
        &self.solver
    }

    /// Adds a profile under its name.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::DuplicateProfile`] if the name is taken.
    pub fn insert(&mut self, profile: GaugeProfile) -> Result<(), GaugeError> {
        if self.profiles.contains_key(profile.name()) {
            return Err(GaugeError::DuplicateProfile(profile.name().to_owned()));
        }
        self.profiles.insert(profile.name().to_owned(), profile);
        Ok(())
    }

    /// Validates raw data and adds the resulting profile.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Data`] if the data is invalid, or
    /// [`GaugeError::DuplicateProfile`] if the name is taken.
    pub fn load(&mut self, raw: &RawProfile) -> Result<(), GaugeError> {
        self.insert(load(raw)?)
    }

    /// Looks up a profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::UnknownProfile`] if no profile has this name.
    pub fn get(&self, id: &str) -> Result<&GaugeProfile, GaugeError> {
        self.profiles
            .get(id)
            .ok_or_else(|| GaugeError::UnknownProfile(id.to_owned()))
    }

    /// Returns profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn profiles(&self) -> impl Iterator<Item = &GaugeProfile> {
        self.profiles.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Answers a query with the registry's solver configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::UnknownProfile`] for an unknown profile, or any
    /// error from evaluating or solving the profile.
    pub fn query(&self, query: &Query) -> Result<Measurement, GaugeError> {
        self.query_with(query, &self.solver)
    }

    /// Answers a query with an explicit solver configuration.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub fn query_with(&self, query: &Query, config: &Config) -> Result<Measurement, GaugeError> {
        query::run(self.get(&query.profile_id)?, query, config)
    }

    /// Converts one reading and reports the result in every unit.
    ///
    /// A height yields the volume in gallons and liters, and a volume yields
    /// the height in inches and centimeters. The profile is evaluated or
    /// solved once.
    ///
    /// # Errors
    ///
    /// See [`query`](Self::query).
    pub fn query_all(
        &self,
        profile_id: &str,
        input: Measurement,
    ) -> Result<Vec<Measurement>, GaugeError> {
        query::run_all(self.get(profile_id)?, &input, &self.solver)
    }

    /// Builds a registry from a parsed catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Config`] for invalid solver settings, or any
    /// error from loading a profile.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, GaugeError> {
        let mut registry = Self::with_solver(catalog.solver.to_config()?);
        for raw in &catalog.profiles {
            registry.load(raw)?;
        }
        Ok(registry)
    }

    /// Parses a TOML catalog and builds a registry from it.
    ///
    /// # Errors
    ///
    /// Returns [`GaugeError::Catalog`] if the text is not a valid catalog, or
    /// any error from [`from_catalog`](Self::from_catalog).
    pub fn from_toml_str(text: &str) -> Result<Self, GaugeError> {
        Self::from_catalog(&Catalog::from_toml_str(text)?)
    }
}
