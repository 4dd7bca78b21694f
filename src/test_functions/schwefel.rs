use crate::{core::Interval, traits::CostFunction, DVector, Float};

/// The Schwefel function, a deceptive function whose global minimum lies far from the next-best
/// local minima.
///
/// ```math
/// f(\vec{x}) = -\sum_{i=1}^n x_i \sin\left(\sqrt{|x_i|}\right)
/// ```
/// where $`x_i \in [-500, 500]`$. The global minimum is near $`x_i = 420.9687`$ with
/// $`f \approx -418.9829 n`$.
pub struct Schwefel;
impl Schwefel {
    /// The feasible region of the function.
    pub const INTERVAL: Interval = Interval {
        start: -500.0,
        end: 500.0,
    };
}
impl CostFunction for Schwefel {
    fn name(&self) -> &str {
        "schwefel"
    }
    fn interval(&self) -> Interval {
        Self::INTERVAL
    }
    fn cost(&self, x: &DVector<Float>) -> Float {
        x.iter().map(|&xi| -xi * xi.abs().sqrt().sin()).sum()
    }
}
