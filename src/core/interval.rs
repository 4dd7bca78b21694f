use crate::{error::PsoError, DVector, Float};
use std::fmt::Display;

/// A closed range `[start, end]` attached to a problem.
///
/// The same interval applies to every dimension. It is both the domain from which initial
/// particle positions are sampled and the feasible region: a [`CostFunction`](crate::traits::CostFunction)
/// evaluates to `+inf` anywhere outside of it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    /// The lower end of the interval
    pub start: Float,
    /// The upper end of the interval
    pub end: Float,
}

impl Interval {
    /// Construct a new [`Interval`].
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InvalidInterval`] if `start > end` or either end is NaN.
    pub fn new(start: Float, end: Float) -> Result<Self, PsoError> {
        if start <= end {
            Ok(Self { start, end })
        } else {
            Err(PsoError::InvalidInterval { start, end })
        }
    }
    /// The length of the interval.
    pub fn width(&self) -> Float {
        self.end - self.start
    }
    /// Checks whether `value` lies inside the interval (both ends included).
    pub fn contains(&self, value: Float) -> bool {
        value >= self.start && value <= self.end
    }
    /// Checks whether every component of `x` lies inside the interval.
    pub fn contains_all(&self, x: &DVector<Float>) -> bool {
        x.iter().all(|&xi| self.contains(xi))
    }
    /// Maps a unit sample `u` in `[0, 1)` onto the interval as `start + (end - start) * u`.
    pub fn lerp(&self, u: Float) -> Float {
        self.start + self.width() * u
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl From<(Float, Float)> for Interval {
    /// # Panics
    ///
    /// Panics if the first element is greater than the second.
    fn from(value: (Float, Float)) -> Self {
        assert!(value.0 <= value.1);
        Self {
            start: value.0,
            end: value.1,
        }
    }
}
