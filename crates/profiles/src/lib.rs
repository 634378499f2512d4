//! Tank gauge profiles: convert between fill height and contained volume.
//!
//! A [`GaugeProfile`] is either a [`CalibrationTable`] of sampled points,
//! read by piecewise-linear interpolation, or a degree-5
//! [`PolynomialModel`], inverted with Brent's method. Profiles are validated
//! once when loaded and then shared read-only.
//!
//! Profiles are collected in a [`Registry`], which can be built from raw
//! data, from a TOML [`Catalog`], or from the built-in
//! [reference tanks](reference). A [`Query`] names a profile and a reading in
//! any supported unit:
//!
//! ```
//! use gauge_core::units::{LengthUnit, VolumeUnit};
//! use gauge_profiles::{Measurement, Query, Registry, reference::TANK_B};
//!
//! let registry = Registry::reference()?;
//! let query = Query::new(TANK_B, Measurement::volume(5_000.0, VolumeUnit::Gallon))
//!     .with_length_unit(LengthUnit::Inch);
//!
//! let height = registry.query(&query)?;
//! assert!((height.value() - 50.0).abs() < 1e-9);
//! # Ok::<(), gauge_profiles::GaugeError>(())
//! ```
//!
//! Heights are handled internally in inches and volumes in gallons.

mod catalog;
mod error;
mod inverse;
mod polynomial;
mod profile;
mod query;
pub mod reference;
mod registry;
mod table;

pub use catalog::{Catalog, SolverSettings};
pub use error::{DataError, DomainError, GaugeError};
pub use polynomial::{POLYNOMIAL_COEFFICIENTS, POLYNOMIAL_DEGREE, PolynomialModel};
pub use profile::{Curve, GaugeProfile};
pub use query::{Measurement, Query};
pub use registry::{RawProfile, Registry, load, parse_table};
pub use table::CalibrationTable;
