use fastrand::Rng;

use crate::{core::utils::SampleFloat, error::PsoError, DVector, Float};

use super::Interval;

/// Checked elementwise arithmetic on [`DVector`]s.
///
/// `nalgebra` panics when the operands of an elementwise operation differ in length; these
/// methods report a [`PsoError::DimensionMismatch`] instead. The `*_assign` forms write the result
/// back into `self`, which is how the velocity and position of a particle are accumulated without
/// reallocating.
pub trait ElementwiseOps: Sized {
    /// `c[i] = self[i] + other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn checked_sum(&self, other: &Self) -> Result<Self, PsoError>;
    /// `c[i] = self[i] - other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn checked_difference(&self, other: &Self) -> Result<Self, PsoError>;
    /// `c[i] = self[i] * other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn checked_product(&self, other: &Self) -> Result<Self, PsoError>;
    /// `c[i] = self[i] * k`
    fn scaled(&self, k: Float) -> Self;
    /// `self[i] += other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn sum_assign(&mut self, other: &Self) -> Result<(), PsoError>;
    /// `self[i] -= other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn difference_assign(&mut self, other: &Self) -> Result<(), PsoError>;
    /// `self[i] *= other[i]`
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if the lengths differ.
    fn product_assign(&mut self, other: &Self) -> Result<(), PsoError>;
    /// `self[i] *= k`
    fn scale_assign(&mut self, k: Float);
}

impl ElementwiseOps for DVector<Float> {
    fn checked_sum(&self, other: &Self) -> Result<Self, PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        Ok(self + other)
    }
    fn checked_difference(&self, other: &Self) -> Result<Self, PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        Ok(self - other)
    }
    fn checked_product(&self, other: &Self) -> Result<Self, PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        Ok(self.component_mul(other))
    }
    fn scaled(&self, k: Float) -> Self {
        self.scale(k)
    }
    fn sum_assign(&mut self, other: &Self) -> Result<(), PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        *self += other;
        Ok(())
    }
    fn difference_assign(&mut self, other: &Self) -> Result<(), PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        *self -= other;
        Ok(())
    }
    fn product_assign(&mut self, other: &Self) -> Result<(), PsoError> {
        PsoError::check_dimensions(self.len(), other.len())?;
        self.component_mul_assign(other);
        Ok(())
    }
    fn scale_assign(&mut self, k: Float) {
        self.scale_mut(k);
    }
}

/// Overwrite every component of `v` with an independent draw from the standard uniform
/// distribution on `[0, 1)`.
pub fn fill_uniform(v: &mut DVector<Float>, rng: &mut Rng) {
    v.iter_mut().for_each(|vi| *vi = rng.float());
}

/// Generate a vector of `dimension` independent draws from the standard uniform distribution on
/// `[0, 1)`.
pub fn uniform_random(dimension: usize, rng: &mut Rng) -> DVector<Float> {
    DVector::from_iterator(dimension, (0..dimension).map(|_| rng.float()))
}

/// Generate a vector whose components are uniformly distributed over `interval`, computed as
/// `v[i] = start + (end - start) * u[i]` with `u` drawn by [`uniform_random`].
pub fn uniform_random_in_interval(
    dimension: usize,
    interval: &Interval,
    rng: &mut Rng,
) -> DVector<Float> {
    uniform_random(dimension, rng).map(|u| interval.lerp(u))
}
