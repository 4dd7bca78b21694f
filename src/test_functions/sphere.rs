use crate::{core::Interval, traits::CostFunction, DVector, Float};

/// A generalized spherical function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n} x_i^2
/// ```
/// where $`x_i \in [-500, 500]`$. The global minimum is at $`f(\vec{0}) = 0`$.
pub struct Sphere;
impl Sphere {
    /// The feasible region of the function.
    pub const INTERVAL: Interval = Interval {
        start: -500.0,
        end: 500.0,
    };
}
impl CostFunction for Sphere {
    fn name(&self) -> &str {
        "sphere"
    }
    fn interval(&self) -> Interval {
        Self::INTERVAL
    }
    fn cost(&self, x: &DVector<Float>) -> Float {
        x.iter().map(|xi| xi.powi(2)).sum()
    }
}
