use crate::equation::Evaluation;

/// An evaluated point: solver variable and its residual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub residual: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, residual: f64) -> Self {
        Self { x, residual }
    }
}

impl<I, O> From<&Evaluation<I, O, 1>> for Point {
    fn from(eval: &Evaluation<I, O, 1>) -> Self {
        Self::new(eval.x[0], eval.residuals[0])
    }
}
