use std::mem;

use crate::equation::Evaluation;

use super::{Config, Point, Solution, Status, bracket::same_side};

/// Iteration state for Brent's method.
///
/// Uses the classic three-point layout:
/// - `best` is the current root estimate, with the smallest residual magnitude
///   of the bracket endpoints;
/// - `contra` is the opposite bracket endpoint, whose residual has the other
///   sign, so the root always lies between `best.x` and `contra.x`;
/// - `prev` is the previous estimate, used for inverse quadratic interpolation.
pub(super) struct State<I, O> {
    prev: Point,
    best: Evaluation<I, O, 1>,
    contra: Evaluation<I, O, 1>,
    /// Step taken on the last iteration.
    step: f64,
    /// Step taken on the iteration before that.
    prev_step: f64,
}

impl<I, O> State<I, O> {
    /// Creates a state from two endpoint evaluations with opposite residual signs.
    pub(super) fn new(left: Evaluation<I, O, 1>, right: Evaluation<I, O, 1>) -> Self {
        let step = right.x[0] - left.x[0];
        let mut state = Self {
            prev: Point::from(&left),
            best: right,
            contra: left,
            step,
            prev_step: step,
        };
        state.orient();
        state
    }

    /// Returns the current bracket as an ordered array.
    pub(super) fn bracket(&self) -> [f64; 2] {
        let (b, c) = (self.best.x[0], self.contra.x[0]);
        if b <= c { [b, c] } else { [c, b] }
    }

    /// Returns the x tolerance at the current estimate.
    fn x_tol(&self, config: &Config) -> f64 {
        let b = self.best.x[0];
        2.0 * f64::EPSILON * b.abs() + 0.5 * (config.x_abs_tol() + config.x_rel_tol() * b.abs())
    }

    /// Returns half the signed distance from the estimate to the contrapoint.
    fn half_width(&self) -> f64 {
        0.5 * (self.contra.x[0] - self.best.x[0])
    }

    pub(super) fn is_converged(&self, config: &Config) -> bool {
        self.best.residuals[0].abs() <= config.residual_tol()
            || self.half_width().abs() <= self.x_tol(config)
    }

    /// Chooses the next x to evaluate.
    ///
    /// Tries inverse quadratic interpolation (or the secant step when only two
    /// distinct points are known) and falls back to bisection when the
    /// interpolated step would leave the bracket or shrink it too slowly.
    pub(super) fn next_x(&mut self, config: &Config) -> f64 {
        let tol = self.x_tol(config);
        let half = self.half_width();

        let a = self.prev;
        let b = Point::from(&self.best);
        let c = Point::from(&self.contra);

        if self.prev_step.abs() >= tol && a.residual.abs() > b.residual.abs() {
            let s = b.residual / a.residual;

            #[allow(clippy::float_cmp)]
            let (mut p, mut q) = if a.x == c.x {
                (2.0 * half * s, 1.0 - s)
            } else {
                let q = a.residual / c.residual;
                let r = b.residual / c.residual;
                (
                    s * (2.0 * half * q * (q - r) - (b.x - a.x) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let limit = (3.0 * half * q - (tol * q).abs()).min((self.prev_step * q).abs());
            if 2.0 * p < limit {
                self.prev_step = self.step;
                self.step = p / q;
            } else {
                self.step = half;
                self.prev_step = half;
            }
        } else {
            self.step = half;
            self.prev_step = half;
        }

        if self.step.abs() > tol {
            b.x + self.step
        } else {
            b.x + tol.copysign(half)
        }
    }

    /// Accepts a new evaluation as the current estimate.
    pub(super) fn advance(&mut self, eval: Evaluation<I, O, 1>) {
        let old_best = mem::replace(&mut self.best, eval);
        self.prev = Point::from(&old_best);

        if same_side(self.best.residuals[0], self.contra.residuals[0]) {
            self.contra = old_best;
            self.step = self.best.x[0] - self.prev.x;
            self.prev_step = self.step;
        }

        self.orient();
    }

    /// Swaps estimate and contrapoint so the estimate has the smaller residual.
    fn orient(&mut self) {
        if self.contra.residuals[0].abs() < self.best.residuals[0].abs() {
            mem::swap(&mut self.best, &mut self.contra);
            self.prev = Point::from(&self.contra);
        }
    }

    pub(super) fn into_solution(self, status: Status, iters: usize) -> Solution<I, O> {
        Solution::from_eval(self.best, status, iters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use gauge_core::Snapshot;

    fn eval(x: f64, residual: f64) -> Evaluation<(), (), 1> {
        Evaluation {
            x: [x],
            residuals: [residual],
            snapshot: Snapshot::new((), ()),
        }
    }

    #[test]
    fn new_keeps_smaller_residual_as_estimate() {
        let state = State::new(eval(0.0, -1.0), eval(4.0, 8.0));

        assert_eq!(state.bracket(), [0.0, 4.0]);
        let solution = state.into_solution(Status::MaxIters, 0);
        assert_relative_eq!(solution.x, 0.0);
        assert_relative_eq!(solution.residual, -1.0);
    }

    #[test]
    fn secant_step_on_linear_residual_lands_on_root() {
        // Residual is x - 1 on [0, 4].
        let mut state = State::new(eval(0.0, -1.0), eval(4.0, 3.0));
        let x = state.next_x(&Config::default());
        assert_relative_eq!(x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn advance_keeps_root_bracketed() {
        let mut state = State::new(eval(0.0, -1.0), eval(4.0, 3.0));

        state.advance(eval(2.0, 1.0));
        assert_eq!(state.bracket(), [0.0, 2.0]);

        state.advance(eval(0.5, -0.5));
        assert_eq!(state.bracket(), [0.5, 2.0]);
    }

    #[test]
    fn converges_on_exact_zero_residual() {
        let mut state = State::new(eval(0.0, -1.0), eval(4.0, 3.0));
        let config = Config::new(10, 0.0, 0.0, 0.0).expect("valid config");

        assert!(!state.is_converged(&config));
        state.advance(eval(1.0, 0.0));
        assert!(state.is_converged(&config));
    }
}
