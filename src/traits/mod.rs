/// Module containing the [`CostFunction`] trait.
pub mod cost_function;
/// Module containing the [`Observer`] trait.
pub mod observer;

pub use cost_function::CostFunction;
pub use observer::Observer;
