use std::{
    ops::Range,
    panic::{self, AssertUnwindSafe},
    process,
    sync::Arc,
    thread,
};

use fastrand::Rng;
use parking_lot::RwLock;
use tracing::{debug, error, info, trace};

use crate::{
    algorithms::particles::{Coefficients, SwarmPositionInitializer, SwarmState, SwarmStatus},
    core::{utils::stream_seed, VectorDisplay},
    error::PsoError,
    traits::{CostFunction, Observer},
    Float,
};

/// Where a run gets its randomness from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SwarmSeed {
    /// Every worker seeds its own generator from entropy when it starts. Runs are not
    /// reproducible.
    #[default]
    Entropy,
    /// The initial positions are drawn from a generator seeded with the given value, and every
    /// particle draws its step randomness from its own stream derived from the seed and the
    /// particle's index. The result of a run then depends only on the seed and the configuration,
    /// not on how many threads share the swarm.
    Fixed(u64),
}

/// The configuration struct for the [`PSO`] algorithm.
#[derive(Clone, Debug)]
pub struct PSOConfig {
    n_particles: usize,
    iterations: usize,
    n_threads: usize,
    dimension: usize,
    coefficients: Coefficients,
    seed: SwarmSeed,
    position_initializer: SwarmPositionInitializer,
}
impl PSOConfig {
    /// Sets the number of particles in the swarm (default = `100`).
    pub fn with_n_particles(&mut self, value: usize) -> &mut Self {
        self.n_particles = value;
        self
    }
    /// Sets the fixed number of iterations to run (default = `100`).
    pub fn with_iterations(&mut self, value: usize) -> &mut Self {
        self.iterations = value;
        self
    }
    /// Sets the number of worker threads (default = `1`).
    pub fn with_n_threads(&mut self, value: usize) -> &mut Self {
        self.n_threads = value;
        self
    }
    /// Sets the dimension of the search space (default = `2`).
    pub fn with_dimension(&mut self, value: usize) -> &mut Self {
        self.dimension = value;
        self
    }
    /// Sets the inertia weight $`a`$ (default = `0.72984`).
    pub fn with_a(&mut self, value: Float) -> &mut Self {
        self.coefficients.a = value;
        self
    }
    /// Sets both attraction coefficients $`b_\text{loc}`$ and $`b_\text{glob}`$ to the same
    /// value.
    pub fn with_b(&mut self, value: Float) -> &mut Self {
        self.coefficients.b_loc = value;
        self.coefficients.b_glob = value;
        self
    }
    /// Sets the local attraction coefficient $`b_\text{loc}`$ which scales a particle's pull
    /// toward its personal best (default = `1.496172`).
    pub fn with_b_loc(&mut self, value: Float) -> &mut Self {
        self.coefficients.b_loc = value;
        self
    }
    /// Sets the global attraction coefficient $`b_\text{glob}`$ which scales a particle's pull
    /// toward the swarm's global best (default = `1.496172`).
    pub fn with_b_glob(&mut self, value: Float) -> &mut Self {
        self.coefficients.b_glob = value;
        self
    }
    /// Makes the run reproducible. See [`SwarmSeed::Fixed`].
    pub fn with_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = SwarmSeed::Fixed(seed);
        self
    }
    /// Sets the [`SwarmPositionInitializer`] used to place the particles (default =
    /// [`SwarmPositionInitializer::RandomInInterval`]).
    pub fn with_position_initializer(
        &mut self,
        position_initializer: SwarmPositionInitializer,
    ) -> &mut Self {
        self.position_initializer = position_initializer;
        self
    }
    /// The number of particles in the swarm.
    pub const fn n_particles(&self) -> usize {
        self.n_particles
    }
    /// The number of iterations a run performs.
    pub const fn iterations(&self) -> usize {
        self.iterations
    }
    /// The number of worker threads.
    pub const fn n_threads(&self) -> usize {
        self.n_threads
    }
    /// The dimension of the search space.
    pub const fn dimension(&self) -> usize {
        self.dimension
    }
    /// The coefficients of the velocity update.
    pub const fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }
    /// The randomness policy.
    pub const fn seed(&self) -> SwarmSeed {
        self.seed
    }
    /// Check the configuration before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::ZeroThreads`], [`PsoError::EmptySwarm`] or
    /// [`PsoError::ZeroDimensions`] if the corresponding setting is zero,
    /// [`PsoError::IndivisibleSwarm`] if the particles cannot be split evenly across the threads,
    /// and any error from [`SwarmPositionInitializer::validate`].
    pub fn validate(&self) -> Result<(), PsoError> {
        if self.n_threads == 0 {
            return Err(PsoError::ZeroThreads);
        }
        if self.n_particles == 0 {
            return Err(PsoError::EmptySwarm);
        }
        if self.dimension == 0 {
            return Err(PsoError::ZeroDimensions);
        }
        if self.n_particles % self.n_threads != 0 {
            return Err(PsoError::IndivisibleSwarm {
                n_particles: self.n_particles,
                n_threads: self.n_threads,
            });
        }
        self.position_initializer
            .validate(self.n_particles, self.dimension)
    }
}
impl Default for PSOConfig {
    fn default() -> Self {
        Self {
            n_particles: 100,
            iterations: 100,
            n_threads: 1,
            dimension: 2,
            coefficients: Coefficients::default(),
            seed: SwarmSeed::default(),
            position_initializer: SwarmPositionInitializer::default(),
        }
    }
}

/// Particle Swarm Optimizer
///
/// The swarm is split into equal, contiguous slices, one per worker thread. Each iteration, every
/// worker moves its particles with
///
/// ```math
/// v_i^{t+1} = a v_i^t + b_\text{loc} r_{\text{loc},i}^{t+1} \odot (p_i^t - x_i^t) + b_\text{glob} r_{\text{glob},i}^{t+1} \odot (g^t - x_i^t)
/// ```
/// ```math
/// x_i^{t+1} = x_i^t + v_i^{t+1}
/// ```
/// where $`r_\text{loc}`$ and $`r_\text{glob}`$ are uniformly distributed random vectors in
/// $`[0,1)`$, $`p_i^t`$ is the particle's personal best position and $`g^t`$ is the swarm's
/// global best position. It then evaluates them and waits for the other workers. Worker `0`
/// reduces the whole swarm to a new global best, notifies the [`Observer`]s, and every worker
/// waits once more before starting the next iteration.
///
/// The default coefficients are the "constriction coefficient" values from [^1].
///
/// [^1]: [Clerc, M., & Kennedy, J. (2002). The particle swarm - explosion, stability, and convergence in a multidimensional complex space. In IEEE Transactions on Evolutionary Computation (Vol. 6, Issue 1, pp. 58–73).](https://doi.org/10.1109/4235.985692)
#[derive(Clone, Default)]
pub struct PSO {
    config: PSOConfig,
    observers: Vec<Arc<RwLock<dyn Observer>>>,
}

impl PSO {
    /// Construct a new particle swarm optimizer with the default [`PSOConfig`].
    pub fn new() -> Self {
        Self::default()
    }
    /// Edit the [`PSOConfig`] of the optimizer.
    ///
    /// ```rust
    /// use pswarm::prelude::*;
    /// let pso = PSO::new().setup(|c| c.with_n_particles(20).with_n_threads(4).with_b(1.2));
    /// assert_eq!(pso.config().n_threads(), 4);
    /// ```
    pub fn setup<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut PSOConfig) -> &mut PSOConfig,
    {
        f(&mut self.config);
        self
    }
    /// Register an [`Observer`] which is called after the global best is published each
    /// iteration.
    pub fn with_observer<O: Observer + 'static>(mut self, observer: Arc<RwLock<O>>) -> Self {
        self.observers.push(observer);
        self
    }
    /// The optimizer's configuration.
    pub const fn config(&self) -> &PSOConfig {
        &self.config
    }
    /// Minimize `func` over its interval.
    ///
    /// Every configuration error is reported before any particle is created or any thread is
    /// started.
    ///
    /// # Errors
    ///
    /// Returns an error if [`PSOConfig::validate`] fails.
    ///
    /// # Aborts
    ///
    /// A failure once the workers are running (a thread which cannot be spawned, a panic in the
    /// cost function, or a dimension mismatch) would leave the other workers waiting at a barrier
    /// forever, so it is logged and the process is aborted.
    pub fn run<F: CostFunction + ?Sized>(&self, func: &F) -> Result<SwarmStatus, PsoError> {
        let config = &self.config;
        config.validate()?;
        let interval = func.interval();
        info!(
            problem = %func.name(),
            threads = config.n_threads,
            particles = config.n_particles,
            iterations = config.iterations,
            dimension = config.dimension,
            %interval,
            a = config.coefficients.a,
            b_loc = config.coefficients.b_loc,
            b_glob = config.coefficients.b_glob,
            "starting particle swarm"
        );
        let mut rng = match config.seed {
            SwarmSeed::Entropy => Rng::new(),
            SwarmSeed::Fixed(seed) => Rng::with_seed(seed),
        };
        let particles = config.position_initializer.init_particles(
            &mut rng,
            config.dimension,
            config.n_particles,
            &interval,
        )?;
        let state = SwarmState::new(particles, config.n_threads)?;
        let slice_len = config.n_particles / config.n_threads;

        thread::scope(|s| {
            for id in 0..config.n_threads {
                let worker = Worker {
                    id,
                    slice: (id * slice_len)..((id + 1) * slice_len),
                    state: &state,
                    func,
                    coefficients: config.coefficients,
                    iterations: config.iterations,
                    observers: &self.observers,
                };
                let seed = config.seed;
                let spawned = thread::Builder::new()
                    .name(format!("pswarm-worker-{id}"))
                    .spawn_scoped(s, move || {
                        let rng = WorkerRng::new(seed, worker.slice.clone());
                        match panic::catch_unwind(AssertUnwindSafe(|| worker.run(rng))) {
                            Ok(Ok(())) => {}
                            Ok(Err(err)) => abort_run(&err),
                            Err(_) => {
                                error!(worker = id, "worker panicked");
                                process::abort()
                            }
                        }
                    });
                if let Err(err) = spawned {
                    error!(worker = id, %err, "failed to spawn worker thread");
                    process::abort();
                }
            }
        });

        let status = state.into_status(config.iterations);
        debug!(n_f_evals = status.n_f_evals, "particle swarm finished");
        Ok(status)
    }
}

fn abort_run(err: &PsoError) -> ! {
    error!(%err, "fatal error in particle swarm worker");
    process::abort()
}

/// The random state a worker draws its step randomness from.
enum WorkerRng {
    /// One generator for the whole slice
    Shared(Rng),
    /// One generator per particle in the slice
    PerParticle(Vec<Rng>),
}
impl WorkerRng {
    fn new(seed: SwarmSeed, slice: Range<usize>) -> Self {
        match seed {
            SwarmSeed::Entropy => Self::Shared(Rng::new()),
            SwarmSeed::Fixed(seed) => Self::PerParticle(
                slice
                    .map(|index| Rng::with_seed(stream_seed(seed, index)))
                    .collect(),
            ),
        }
    }
    /// The generator for the particle at `offset` within the slice.
    fn for_particle(&mut self, offset: usize) -> &mut Rng {
        match self {
            Self::Shared(rng) => rng,
            Self::PerParticle(rngs) => &mut rngs[offset],
        }
    }
}

struct Worker<'a, F: ?Sized> {
    id: usize,
    slice: Range<usize>,
    state: &'a SwarmState,
    func: &'a F,
    coefficients: Coefficients,
    iterations: usize,
    observers: &'a [Arc<RwLock<dyn Observer>>],
}

impl<F: CostFunction + ?Sized> Worker<'_, F> {
    const fn is_leader(&self) -> bool {
        self.id == 0
    }

    fn run(&self, mut rng: WorkerRng) -> Result<(), PsoError> {
        debug!(
            worker = self.id,
            first = self.slice.start,
            last = self.slice.end,
            "worker started"
        );
        for iteration in 0..self.iterations {
            self.update(&mut rng)?;
            self.state.wait_for_updates();
            if self.is_leader() {
                self.publish(iteration + 1)?;
            }
            self.state.wait_for_publish();
        }
        debug!(worker = self.id, "worker finished");
        Ok(())
    }

    /// Step and evaluate every particle in the slice against the current global best.
    fn update(&self, rng: &mut WorkerRng) -> Result<(), PsoError> {
        let global_best = self.state.global_best();
        for (offset, index) in self.slice.clone().enumerate() {
            let mut particle = self.state.particle_mut(index);
            particle.step(&self.coefficients, &global_best.x, rng.for_particle(offset))?;
            particle.evaluate(self.func);
        }
        self.state.record_evaluations(self.slice.len());
        Ok(())
    }

    fn publish(&self, step: usize) -> Result<(), PsoError> {
        let global_best = self.state.publish_global_best()?;
        trace!(
            step,
            fx = global_best.fx,
            x = %VectorDisplay(&global_best.x),
            "published global best"
        );
        for observer in self.observers {
            observer.write().callback(step, &global_best);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        observers::TrackingObserver, problems::Problem, test_functions::Sphere,
        test_utils::CapturedLogs,
    };
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn still(pso: PSO) -> PSO {
        pso.setup(|c| c.with_a(0.0).with_b(0.0))
    }

    #[test]
    fn test_single_still_particle() {
        let pso = still(PSO::new()).setup(|c| {
            c.with_n_threads(1)
                .with_n_particles(1)
                .with_iterations(1)
                .with_dimension(1)
                .with_position_initializer(SwarmPositionInitializer::Custom(vec![dvector![3.0]]))
        });
        let status = pso.run(&Sphere).unwrap();
        assert_eq!(status.gbest.fx, 9.0);
        assert_eq!(status.gbest.x, dvector![3.0]);
        assert_eq!(status.particles[0].velocity, dvector![0.0]);
        assert_eq!(status.particles[0].position, dvector![3.0]);
        assert_eq!(status.n_steps, 1);
        assert_eq!(status.to_string(), "Found optimum 9 at {3} after step 1");
    }

    #[test]
    fn test_reduction_covers_every_slice() {
        let positions = vec![dvector![10.0], dvector![20.0], dvector![1.0], dvector![30.0]];
        let pso = still(PSO::new()).setup(|c| {
            c.with_n_threads(2)
                .with_n_particles(4)
                .with_iterations(1)
                .with_dimension(1)
                .with_position_initializer(SwarmPositionInitializer::Custom(positions))
        });
        let status = pso.run(&Sphere).unwrap();
        assert_eq!(status.gbest.fx, 1.0);
        assert_eq!(status.gbest.x, dvector![1.0]);
    }

    fn run(f: fn(&mut PSOConfig) -> &mut PSOConfig) -> Result<SwarmStatus, PsoError> {
        PSO::new().setup(f).run(&Sphere)
    }

    #[test]
    fn test_configuration_errors() {
        assert_eq!(
            run(|c| c.with_n_particles(10).with_n_threads(3)).unwrap_err(),
            PsoError::IndivisibleSwarm {
                n_particles: 10,
                n_threads: 3
            }
        );
        assert_eq!(
            run(|c| c.with_n_threads(0)).unwrap_err(),
            PsoError::ZeroThreads
        );
        assert_eq!(
            run(|c| c.with_n_particles(0)).unwrap_err(),
            PsoError::EmptySwarm
        );
        assert_eq!(
            run(|c| c.with_dimension(0)).unwrap_err(),
            PsoError::ZeroDimensions
        );
        assert_eq!(
            run(|c| c
                .with_n_particles(2)
                .with_position_initializer(SwarmPositionInitializer::Custom(vec![dvector![
                    1.0, 1.0
                ]])))
            .unwrap_err(),
            PsoError::InitialPositions {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_setters() {
        let pso = PSO::new().setup(|c| c.with_b(1.0).with_b_glob(2.0).with_a(0.5).with_seed(9));
        let config = pso.config();
        assert_eq!(config.coefficients().a, 0.5);
        assert_eq!(config.coefficients().b_loc, 1.0);
        assert_eq!(config.coefficients().b_glob, 2.0);
        assert_eq!(config.seed(), SwarmSeed::Fixed(9));
        assert_eq!(config.n_particles(), 100);
        assert_eq!(config.iterations(), 100);
        assert_eq!(config.n_threads(), 1);
        assert_eq!(config.dimension(), 2);
    }

    #[test]
    fn test_result_independent_of_thread_count() {
        let run = |n_threads: usize| {
            PSO::new()
                .setup(|c| {
                    c.with_n_particles(8)
                        .with_n_threads(n_threads)
                        .with_iterations(50)
                        .with_dimension(3)
                        .with_seed(1234)
                })
                .run(&Problem::Rastrigin)
                .unwrap()
        };
        let reference = run(1);
        for n_threads in [2, 4, 8] {
            let status = run(n_threads);
            assert_relative_eq!(status.gbest.fx, reference.gbest.fx, epsilon = 1e-12);
            for i in 0..3 {
                assert_relative_eq!(status.gbest.x[i], reference.gbest.x[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_converges_on_sphere() {
        let status = PSO::new()
            .setup(|c| {
                c.with_n_particles(40)
                    .with_n_threads(4)
                    .with_iterations(300)
                    .with_dimension(2)
                    .with_seed(0)
            })
            .run(&Sphere)
            .unwrap();
        assert!(status.gbest.fx < 1e-3);
        assert!(status.gbest.x.iter().all(|xi| xi.abs() < 0.1));
    }

    #[test]
    fn test_observer_sees_every_iteration() {
        let tracker = TrackingObserver::build();
        let pso = PSO::new()
            .setup(|c| {
                c.with_n_particles(12)
                    .with_n_threads(3)
                    .with_iterations(25)
                    .with_seed(7)
            })
            .with_observer(tracker.clone());
        let status = pso.run(&Problem::Schwefel).unwrap();
        let tracker = tracker.read();
        let history = &tracker.best_history;
        assert_eq!(history.len(), 25);
        for pair in history.windows(2) {
            assert!(pair[1].fx <= pair[0].fx);
        }
        assert_eq!(history[24].fx, status.gbest.fx);
        assert_eq!(status.n_f_evals, 12 * 25);
    }

    #[test]
    fn test_run_header_names_problem() {
        let logs = CapturedLogs::default();
        logs.capture(|| {
            PSO::new()
                .setup(|c| c.with_n_particles(4).with_iterations(1).with_seed(0))
                .run(&Problem::Rastrigin)
                .unwrap()
        });
        let contents = logs.contents();
        assert!(contents.contains("starting particle swarm"));
        assert!(contents.contains("problem=rastrigin"));
        assert!(contents.contains("particles=4"));
    }

    #[test]
    fn test_zero_iterations() {
        let pso = PSO::new().setup(|c| c.with_n_particles(4).with_iterations(0).with_seed(3));
        let status = pso.run(&Sphere).unwrap();
        assert_eq!(status.n_steps, 0);
        assert_eq!(status.n_f_evals, 0);
        assert_eq!(status.gbest.fx, Float::INFINITY);
        assert_eq!(status.gbest.x, status.particles[0].position);
    }

    #[test]
    fn test_entropy_seeded_run() {
        let status = PSO::new()
            .setup(|c| c.with_n_particles(20).with_n_threads(2).with_iterations(20))
            .run(&Problem::Rosenbrock)
            .unwrap();
        assert!(status.gbest.fx.is_finite());
        assert!(Problem::Rosenbrock.interval().contains_all(&status.gbest.x));
    }
}
