use crate::{core::Interval, DVector, Float};

/// A trait which describes a function $`f(\mathbb{R}^n) \to \mathbb{R}`$ restricted to a box.
///
/// Implementors supply the raw formula in [`CostFunction::cost`] and the feasible region in
/// [`CostFunction::interval`]. The swarm only ever calls [`CostFunction::evaluate`], which returns
/// `+inf` as soon as any component of `x` falls outside the interval. Since `+inf` never compares
/// as strictly less than anything, an infeasible position can never become a personal or global
/// best.
///
/// The function is shared by every worker thread, so it must be [`Sync`].
pub trait CostFunction: Sync {
    /// A short name used to identify the function in logs.
    fn name(&self) -> &str {
        "custom"
    }
    /// The closed interval that bounds every dimension of the search space.
    fn interval(&self) -> Interval;
    /// The value of the function at `x`, which is assumed to lie inside [`CostFunction::interval`].
    fn cost(&self, x: &DVector<Float>) -> Float;
    /// The value of the function at `x`, or `+inf` if any component of `x` is infeasible.
    fn evaluate(&self, x: &DVector<Float>) -> Float {
        if self.interval().contains_all(x) {
            self.cost(x)
        } else {
            Float::INFINITY
        }
    }
}
