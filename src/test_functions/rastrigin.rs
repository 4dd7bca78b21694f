use crate::{core::Interval, traits::CostFunction, DVector, Float, PI};

/// The Rastrigin function, a non-convex function with a single minimum but many local minima.
///
/// ```math
/// f(\vec{x}) = 10n + \sum_{i=1}^n (x_i^2 - 10cos(2\pi x_i))
/// ```
/// where $`x_i \in [-5.12, 5.12]`$. The global minimum is $`f(\vec{0}) = 0`$.
pub struct Rastrigin;
impl Rastrigin {
    /// The feasible region of the function.
    pub const INTERVAL: Interval = Interval {
        start: -5.12,
        end: 5.12,
    };
}
impl CostFunction for Rastrigin {
    fn name(&self) -> &str {
        "rastrigin"
    }
    fn interval(&self) -> Interval {
        Self::INTERVAL
    }
    #[allow(clippy::suboptimal_flops)]
    fn cost(&self, x: &DVector<Float>) -> Float {
        10.0 * x.len() as Float
            + x.iter()
                .map(|&xi| xi.powi(2) - 10.0 * Float::cos(2.0 * PI * xi))
                .sum::<Float>()
    }
}
