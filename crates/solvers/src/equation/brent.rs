//! Brent's method for single-variable root finding.
//!
//! # Algorithm
//!
//! Brent's method finds a root of a continuous function on an interval whose
//! endpoints have residuals of opposite sign. Each iteration tries inverse
//! quadratic interpolation (or a secant step when only two distinct points are
//! known) and falls back to bisection whenever the interpolated step would
//! leave the bracket or fail to shrink it fast enough. The root therefore
//! stays bracketed, and convergence is never slower than bisection.
//!
//! # When to Use
//!
//! Brent's method is appropriate when:
//! - A bracket with a sign change is known
//! - The function is continuous on the bracket
//! - Derivatives are unavailable
//!
//! # Limitations
//!
//! - **Single variable only**: Works with [`EquationProblem<1>`]
//! - **Single root assumption**: If the bracket contains several roots, one of
//!   them is returned and the others are not reported
//! - **Even-multiplicity roots**: Roots that touch zero without a sign change
//!   cannot be bracketed
//!
//! # Convergence
//!
//! The solver stops with [`Status::Converged`] when the residual magnitude is
//! within `residual_tol`, or when half the bracket width is within
//! `x_abs_tol + x_rel_tol·|x|` (plus a few ulps of `x`). Reaching `max_iters`
//! first yields [`Status::MaxIters`] with the best estimate found.
//!
//! # Observer Events
//!
//! The endpoints are evaluated without events. After that the solver emits one
//! [`Event`] per iteration:
//!
//! - [`Event::Evaluated`]: evaluation succeeded
//! - [`Event::ModelFailed`]: model returned an error
//! - [`Event::ProblemFailed`]: problem returned an error (input or residual)
//!
//! Observers can return [`Action::StopEarly`] to halt and take the best
//! estimate so far, including after a failed evaluation.
//!
//! [`EquationProblem<1>`]: gauge_core::EquationProblem

mod action;
mod bracket;
mod config;
mod error;
mod event;
mod point;
mod solution;
mod state;


pub use action::Action;
pub use bracket::BracketError;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use point::Point;
pub use solution::{Solution, Status};

use gauge_core::{EquationProblem, Model, Observer};

use crate::equation::{Evaluation, evaluate};

use bracket::{Bounds, same_side};
use state::State;

/// Finds a root of the equation using Brent's method.
///
/// The observer receives an [`Event`] for each iteration.
/// See the [module docs](self) for details on event timing and observer actions.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if a residual is non-finite, or if the model or problem fails
/// during evaluation and the observer does not stop the solver.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M, P>, Action>,
{
    let bounds = Bounds::new(bracket)?;

    let left = evaluate_endpoint(model, problem, bounds.left)?;
    if left.residuals[0].abs() <= config.residual_tol() {
        return Ok(Solution::from_eval(left, Status::Converged, 0));
    }

    let right = evaluate_endpoint(model, problem, bounds.right)?;
    if right.residuals[0].abs() <= config.residual_tol() {
        return Ok(Solution::from_eval(right, Status::Converged, 0));
    }

    if same_side(left.residuals[0], right.residuals[0]) {
        return Err(Error::NoSignChange {
            left: bounds.left,
            right: bounds.right,
            left_residual: left.residuals[0],
            right_residual: right.residuals[0],
        });
    }

    let mut state = State::new(left, right);

    for iter in 1..=config.max_iters() {
        if state.is_converged(config) {
            return Ok(state.into_solution(Status::Converged, iter - 1));
        }

        let bracket = state.bracket();
        let x = state.next_x(config);

        match evaluate(model, problem, [x]) {
            Ok(eval) => {
                let residual = eval.residuals[0];
                if !residual.is_finite() {
                    return Err(Error::NonFiniteResidual { x, residual });
                }

                let event = Event::Evaluated {
                    point: Point::from(&eval),
                    bracket,
                    input: &eval.snapshot.input,
                    output: &eval.snapshot.output,
                };
                let action = observer.observe(&event);

                state.advance(eval);

                if let Some(Action::StopEarly) = action {
                    return Ok(state.into_solution(Status::StoppedByObserver, iter));
                }
            }
            Err(error) => {
                return match Event::<M, P>::emit_failure(x, bracket, &error, &mut observer) {
                    Some(Action::StopEarly) => {
                        Ok(state.into_solution(Status::StoppedByObserver, iter))
                    }
                    None => Err(error.into()),
                };
            }
        }
    }

    let status = if state.is_converged(config) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(state.into_solution(status, config.max_iters()))
}

/// Finds a root of the equation without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the bracket is invalid or does not contain a sign
/// change, if a residual is non-finite, or if the model or problem fails.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    bracket: [f64; 2],
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, bracket, config, ())
}

/// Evaluates a bracket endpoint and checks that its residual is finite.
fn evaluate_endpoint<M, P>(
    model: &M,
    problem: &P,
    x: f64,
) -> Result<Evaluation<M::Input, M::Output, 1>, Error>
where
    M: Model,
    P: EquationProblem<1, Input = M::Input, Output = M::Output>,
{
    let eval = evaluate(model, problem, [x])?;
    let residual = eval.residuals[0];
    if !residual.is_finite() {
        return Err(Error::NonFiniteResidual { x, residual });
    }
    Ok(eval)
}
