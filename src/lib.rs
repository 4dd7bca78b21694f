//! `pswarm` is a multithreaded Particle Swarm Optimizer (PSO). A swarm of particles searches a
//! bounded real vector space for the minimum of a scalar [`CostFunction`](traits::CostFunction);
//! each particle is pulled toward its own best-known position and toward the best position found
//! by the whole swarm, with randomized weighting.
//!
//! # Table of Contents
//! - [Key Features](#key-features)
//! - [Quick Start](#quick-start)
//! - [Threading Model](#threading-model)
//! - [Bounds](#bounds)
//!
//! # Key Features
//! * The "constriction coefficient" PSO variant with sensible defaults.
//! * A fixed pool of worker threads that run in lock-step, one iteration at a time, using two
//!   reusable barriers per iteration.
//! * Four classic benchmark problems (sphere, Rosenbrock, Rastrigin and Schwefel) selectable by
//!   index, plus a small trait for plugging in your own.
//! * Reproducible runs: a fixed seed gives each particle its own random stream, so results do not
//!   depend on how many threads share the work.
//!
//! # Quick Start
//!
//! ```rust
//! use pswarm::prelude::*;
//!
//! fn main() -> Result<(), PsoError> {
//!     let pso = PSO::default().setup(|c| {
//!         c.with_n_particles(40)
//!             .with_n_threads(4)
//!             .with_iterations(200)
//!             .with_dimension(2)
//!             .with_seed(0)
//!     });
//!     let status = pso.run(&Problem::Sphere)?;
//!     println!("{}", status);
//!     assert!(status.gbest.fx < 1.0);
//!     Ok(())
//! }
//! ```
//!
//! # Threading Model
//!
//! [`PSO::run`](algorithms::particles::PSO::run) partitions the swarm into equal, contiguous
//! slices, one per worker. Every iteration, each worker moves and evaluates the particles in its
//! slice, then waits at a first barrier. Worker `0` scans the *whole* swarm for the lowest
//! personal best and publishes it as the new global best, then every worker waits at a second
//! barrier before reading it. The particle count must therefore be divisible by the thread count.
//!
//! # Bounds
//!
//! Each problem carries a closed [`Interval`](core::Interval) which is used both to sample the
//! initial positions and as the feasible region. Particles are never clamped; a particle that
//! drifts outside the interval simply evaluates to `+inf`, which can never become a personal or
//! global best.
#![warn(
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::doc_markdown,
    clippy::doc_link_with_quotes,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::perf,
    clippy::style,
    missing_docs
)]

/// Module containing the particle swarm machinery
pub mod algorithms;
/// Module containing the basic value types used throughout the crate
pub mod core;
/// Module containing the crate's error type
pub mod error;
/// Module containing standard [`Observer`](traits::Observer)s
pub mod observers;
/// Module containing the fixed catalog of benchmark problems
pub mod problems;
/// Module containing standard functions for testing algorithms
pub mod test_functions;
/// Module containing the traits which act as extension points
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use nalgebra::DVector;

/// The floating-point type used for positions and costs.
#[cfg(not(feature = "f32"))]
pub type Float = f64;
/// The floating-point type used for positions and costs.
#[cfg(feature = "f32")]
pub type Float = f32;

/// The mathematical constant $`\pi`$ at [`Float`] precision.
#[cfg(not(feature = "f32"))]
pub const PI: Float = std::f64::consts::PI;
/// The mathematical constant $`\pi`$ at [`Float`] precision.
#[cfg(feature = "f32")]
pub const PI: Float = std::f32::consts::PI;

/// Prelude module containing everything someone should need to use this crate for non-development
/// purposes
pub mod prelude {
    pub use crate::{
        algorithms::particles::{PSOConfig, SwarmPositionInitializer, SwarmSeed, SwarmStatus, PSO},
        core::{Interval, Point},
        error::PsoError,
        problems::Problem,
        traits::{CostFunction, Observer},
        DVector, Float,
    };
}
