//! Numerical solvers for gauge problems.
//!
//! - [`equation`]: root finding for [`EquationProblem`]s, used to find the
//!   fill height that produces a target volume
//!
//! [`EquationProblem`]: gauge_core::EquationProblem

pub mod equation;
