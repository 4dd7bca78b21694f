/// Implementation of the Particle Swarm Optimization (PSO) driver
pub mod pso;
pub use pso::{PSOConfig, SwarmSeed, PSO};

/// [`SwarmParticle`] type and the per-particle update rules.
pub mod swarm;
pub use swarm::{find_global_min, Coefficients, SwarmParticle, SwarmPositionInitializer};

/// [`SwarmState`] type shared by the worker threads of a run.
pub mod swarm_state;
pub use swarm_state::SwarmState;

/// [`SwarmStatus`] type reported at the end of a run.
pub mod swarm_status;
pub use swarm_status::SwarmStatus;
