//! Core traits and types for tank gauge calibration.
//!
//! This crate defines the shared abstractions that the root-finding solvers
//! and the gauge profiles build on:
//!
//! - [`Model`]: a callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`EquationProblem`]: adapts solver variables to model inputs and
//!   computes residuals from outputs
//! - [`units`]: length and volume conversions between the units a gauge
//!   reading is taken or reported in

mod model;
mod observer;
mod problems;

pub mod units;

pub use observer::Observer;
pub use problems::EquationProblem;
pub use {model::Model, model::Snapshot};
