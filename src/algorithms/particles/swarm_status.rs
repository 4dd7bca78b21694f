use std::fmt::Display;

use crate::{algorithms::particles::SwarmParticle, core::Point};

/// The result of a particle swarm run.
#[derive(Clone, Debug, Default)]
pub struct SwarmStatus {
    /// The global best position found by all particles
    pub gbest: Point,
    /// The swarm as it stood after the final iteration
    pub particles: Vec<SwarmParticle>,
    /// The number of iterations performed
    pub n_steps: usize,
    /// The number of objective function evaluations
    pub n_f_evals: usize,
}

impl Display for SwarmStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Found optimum {} after step {}", self.gbest, self.n_steps)
    }
}
