use std::fmt::Display;

use crate::{
    core::Interval,
    error::PsoError,
    test_functions::{Rastrigin, Rosenbrock, Schwefel, Sphere},
    traits::CostFunction,
    DVector, Float,
};

/// The fixed catalog of optimization problems.
///
/// Each problem pairs a name, a feasible [`Interval`] and one of the functions in
/// [`test_functions`](crate::test_functions). Problems are selected by their catalog index:
///
/// | index | problem | interval |
/// |---|---|---|
/// | 0 | sphere | `[-500, 500]` |
/// | 1 | rosenbrock | `[-30, 30]` |
/// | 2 | rastrigin | `[-5.12, 5.12]` |
/// | 3 | schwefel | `[-500, 500]` |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Problem {
    /// See [`Sphere`]
    #[default]
    Sphere,
    /// See [`Rosenbrock`]
    Rosenbrock,
    /// See [`Rastrigin`]
    Rastrigin,
    /// See [`Schwefel`]
    Schwefel,
}

impl Problem {
    /// Every problem in catalog order.
    pub const ALL: [Self; 4] = [
        Self::Sphere,
        Self::Rosenbrock,
        Self::Rastrigin,
        Self::Schwefel,
    ];

    /// Look up a problem by its catalog index.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::UnknownProblem`] if `index` is not below [`Problem::ALL`]'s length.
    pub fn from_index(index: usize) -> Result<Self, PsoError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(PsoError::UnknownProblem {
                index,
                count: Self::ALL.len(),
            })
    }

    fn function(&self) -> &'static dyn CostFunction {
        match self {
            Self::Sphere => &Sphere,
            Self::Rosenbrock => &Rosenbrock,
            Self::Rastrigin => &Rastrigin,
            Self::Schwefel => &Schwefel,
        }
    }
}

impl TryFrom<usize> for Problem {
    type Error = PsoError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value)
    }
}

impl CostFunction for Problem {
    fn name(&self) -> &str {
        self.function().name()
    }
    fn interval(&self) -> Interval {
        self.function().interval()
    }
    fn cost(&self, x: &DVector<Float>) -> Float {
        self.function().cost(x)
    }
    fn evaluate(&self, x: &DVector<Float>) -> Float {
        self.function().evaluate(x)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(CostFunction::name(self))
    }
}
