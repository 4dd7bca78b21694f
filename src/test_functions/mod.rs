/// Module containing the sphere test function.
pub mod sphere;
pub use sphere::Sphere;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the Rastrigin test function.
pub mod rastrigin;
pub use rastrigin::Rastrigin;

/// Module containing the Schwefel test function.
pub mod schwefel;
pub use schwefel::Schwefel;
