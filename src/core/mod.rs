/// [`Interval`] type for the feasible region of a problem.
pub mod interval;
/// [`Point`] type for defining a point in the parameter space.
pub mod point;
/// Random sampling helpers.
pub mod utils;
/// Elementwise vector arithmetic and random vector generation.
pub mod vector;

pub use interval::Interval;
pub use point::{Point, VectorDisplay};
pub use vector::{fill_uniform, uniform_random, uniform_random_in_interval, ElementwiseOps};
