use crate::{traits::CostFunction, DVector, Float};
use std::fmt::Display;

/// Describes a point in parameter space together with its cost.
///
/// A freshly constructed point carries a cost of `+inf`, which is the sentinel for "never
/// evaluated" as well as for "infeasible". Every real evaluation compares as less than or equal to
/// it.
#[derive(Clone, Debug)]
pub struct Point {
    /// the point's position
    pub x: DVector<Float>,
    /// the point's evaluation (`+inf` if the point has not yet been evaluated or is infeasible)
    pub fx: Float,
}
impl Point {
    /// Create an unevaluated point at `x`.
    pub fn new(x: DVector<Float>) -> Self {
        Self {
            x,
            fx: Float::INFINITY,
        }
    }
    /// The number of dimensions of the point's position.
    pub fn dimension(&self) -> usize {
        self.x.len()
    }
    /// Overwrite this point with the contents of `other`, reusing the existing allocation when the
    /// dimensions agree.
    pub fn copy_from(&mut self, other: &Self) {
        if self.x.len() == other.x.len() {
            self.x.copy_from(&other.x);
        } else {
            self.x = other.x.clone();
        }
        self.fx = other.fx;
    }
    /// Evaluate the given function at the point's coordinate and set the `fx` value to the result.
    pub fn evaluate<F: CostFunction + ?Sized>(&mut self, func: &F) {
        self.fx = func.evaluate(&self.x);
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(DVector::zeros(0))
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.fx, VectorDisplay(&self.x))
    }
}

/// Displays a vector as `{x0, x1, ...}`.
pub struct VectorDisplay<'a>(pub &'a DVector<Float>);
impl Display for VectorDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, xi) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", xi)?;
        }
        write!(f, "}}")
    }
}

impl From<&[Float]> for Point {
    fn from(value: &[Float]) -> Self {
        Self::new(DVector::from_column_slice(value))
    }
}
impl From<Vec<Float>> for Point {
    fn from(value: Vec<Float>) -> Self {
        Self::new(DVector::from_vec(value))
    }
}
impl From<DVector<Float>> for Point {
    fn from(value: DVector<Float>) -> Self {
        Self::new(value)
    }
}
