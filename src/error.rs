use thiserror::Error;

use crate::Float;

/// Errors which can stop a particle swarm run.
///
/// Every variant is fatal for the run that produced it. Configuration problems are reported by
/// [`PSO::run`](crate::algorithms::particles::PSO::run) before any worker thread is started.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsoError {
    /// Two vectors which must share a length do not.
    #[error("dimension mismatch: expected a vector of length {expected}, found {found}")]
    DimensionMismatch {
        /// The length of the left-hand operand
        expected: usize,
        /// The length of the offending operand
        found: usize,
    },

    /// The run was configured with zero worker threads.
    #[error("the number of threads must be at least 1")]
    ZeroThreads,

    /// The run was configured with zero particles, or a reduction was asked of an empty swarm.
    #[error("the swarm must contain at least one particle")]
    EmptySwarm,

    /// The search space was configured with zero dimensions.
    #[error("the search space must have at least one dimension")]
    ZeroDimensions,

    /// The particles cannot be split evenly across the worker threads.
    #[error("{n_particles} particles cannot be divided evenly across {n_threads} threads")]
    IndivisibleSwarm {
        /// The configured number of particles
        n_particles: usize,
        /// The configured number of threads
        n_threads: usize,
    },

    /// A problem index outside of the catalog was requested.
    #[error("unknown problem index {index} (expected a value below {count})")]
    UnknownProblem {
        /// The requested index
        index: usize,
        /// The number of problems in the catalog
        count: usize,
    },

    /// The number of custom initial positions does not match the number of particles.
    #[error("expected {expected} initial positions, found {found}")]
    InitialPositions {
        /// The configured number of particles
        expected: usize,
        /// The number of positions supplied
        found: usize,
    },

    /// An interval whose start lies above its end.
    #[error("invalid interval [{start}, {end}]")]
    InvalidInterval {
        /// The lower end of the interval
        start: Float,
        /// The upper end of the interval
        end: Float,
    },
}

impl PsoError {
    /// Returns `Ok(())` if the two lengths agree and a [`PsoError::DimensionMismatch`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if `expected != found`.
    pub const fn check_dimensions(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, found })
        }
    }
}
