use std::convert::Infallible;

use gauge_core::EquationProblem;
use gauge_solvers::equation::brent::{self, Action, Config, Event, Status};
use tracing::{debug, trace};

use crate::{DomainError, GaugeError, PolynomialModel};

/// Drives a polynomial's volume to a target, with height as the unknown.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FillTarget {
    pub(crate) volume: f64,
}

impl EquationProblem<1> for FillTarget {
    type Input = f64;
    type Output = f64;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(&self, _height: &f64, volume: &f64) -> Result<[f64; 1], Self::Error> {
        Ok([volume - self.volume])
    }
}

/// Finds the height on `[0, domain_max]` at which the model holds `volume`.
pub(crate) fn solve_polynomial(
    name: &str,
    model: &PolynomialModel,
    volume: f64,
    config: &Config,
) -> Result<f64, GaugeError> {
    let problem = FillTarget { volume };
    let bracket = [0.0, model.domain_max()];

    let observer = |event: &Event<'_, PolynomialModel, FillTarget>| -> Option<Action> {
        if let Event::Evaluated { point, bracket, .. } = event {
            trace!(
                profile = name,
                height = point.x,
                residual = point.residual,
                left = bracket[0],
                right = bracket[1],
                "brent iteration"
            );
        }
        None
    };

    match brent::solve(model, &problem, bracket, config, observer) {
        Ok(solution) if solution.status == Status::Converged => {
            trace!(
                profile = name,
                volume,
                height = solution.x,
                iters = solution.iters,
                "solved fill height"
            );
            Ok(solution.x)
        }
        Ok(solution) => {
            debug!(
                profile = name,
                volume,
                iters = solution.iters,
                height = solution.x,
                residual = solution.residual,
                "fill height did not converge"
            );
            Err(GaugeError::Convergence {
                iters: solution.iters,
                height: solution.x,
                residual: solution.residual,
            })
        }
        Err(brent::Error::NoSignChange {
            left_residual,
            right_residual,
            ..
        }) => {
            let (low, high) = (left_residual + volume, right_residual + volume);
            debug!(profile = name, volume, low, high, "volume outside reachable range");
            Err(DomainError::OutOfRange {
                target: volume,
                min: low.min(high),
                max: low.max(high),
            }
            .into())
        }
        Err(error) => {
            debug!(profile = name, volume, %error, "fill height solve failed");
            Err(GaugeError::Solver(error))
        }
    }
}
