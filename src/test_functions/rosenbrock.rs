use crate::{core::Interval, traits::CostFunction, DVector, Float};

/// The Rosenbrock function, a non-convex function with a single minimum.
///
/// ```math
/// f(\vec{x}) = \sum_{i=1}^{n-1} \left[100(x_{i+1} - x_i^2)^2 + (1 - x_i)^2 \right]
/// ```
/// where $`x_i \in [-30, 30]`$. This function has a minimum at $`f(\vec{1}) = 0`$. Each term
/// couples neighbouring dimensions, so a one-dimensional input has no terms and costs `0`.
pub struct Rosenbrock;
impl Rosenbrock {
    /// The feasible region of the function.
    pub const INTERVAL: Interval = Interval {
        start: -30.0,
        end: 30.0,
    };
}
impl CostFunction for Rosenbrock {
    fn name(&self) -> &str {
        "rosenbrock"
    }
    fn interval(&self) -> Interval {
        Self::INTERVAL
    }
    #[allow(clippy::suboptimal_flops)]
    fn cost(&self, x: &DVector<Float>) -> Float {
        x.as_slice()
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0].powi(2)).powi(2) + (1.0 - w[0]).powi(2))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    #[test]
    fn test_rosenbrock() {
        assert_eq!(Rosenbrock.evaluate(&dvector![1.0, 1.0, 1.0]), 0.0);
        assert_eq!(Rosenbrock.evaluate(&dvector![0.0, 0.0]), 1.0);
        assert_relative_eq!(Rosenbrock.evaluate(&dvector![-1.0, 2.0]), 104.0);
        assert_eq!(Rosenbrock.evaluate(&dvector![5.0]), 0.0);
    }

    #[test]
    fn test_rosenbrock_infeasible() {
        assert_eq!(
            Rosenbrock.evaluate(&dvector![1.0, 31.0]),
            Float::INFINITY
        );
        assert_eq!(Rosenbrock.evaluate(&dvector![-30.5]), Float::INFINITY);
    }
}
