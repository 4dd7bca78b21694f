use crate::{
    core::{
        fill_uniform, uniform_random_in_interval, ElementwiseOps, Interval, Point, VectorDisplay,
    },
    error::PsoError,
    traits::CostFunction,
    DVector, Float,
};
use fastrand::Rng;
use std::fmt::Display;

/// The run-wide constants of the velocity update.
///
/// The defaults are the "constriction coefficient" values `a = 0.72984` and
/// `b_loc = b_glob = 1.496172`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coefficients {
    /// The inertia weight, which scales the velocity a particle retains from the previous step
    pub a: Float,
    /// The local attraction coefficient, which scales the randomized pull toward a particle's
    /// personal best
    pub b_loc: Float,
    /// The global attraction coefficient, which scales the randomized pull toward the swarm's
    /// global best
    pub b_glob: Float,
}
impl Default for Coefficients {
    fn default() -> Self {
        Self {
            a: 0.72984,
            b_loc: 1.496172,
            b_glob: 1.496172,
        }
    }
}

/// Methods to initialize the positions of particles in a swarm.
#[derive(Debug, Clone, Default)]
pub enum SwarmPositionInitializer {
    /// Uniform random distribution over the problem's interval in each dimension
    #[default]
    RandomInInterval,
    /// Custom distribution from a given vector of positions (one per particle)
    Custom(Vec<DVector<Float>>),
}
impl SwarmPositionInitializer {
    /// Check that the initializer can produce `n_particles` positions of the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::InitialPositions`] if a custom initializer holds the wrong number of
    /// positions, or [`PsoError::DimensionMismatch`] if one of them has the wrong length.
    pub fn validate(&self, n_particles: usize, dimension: usize) -> Result<(), PsoError> {
        match self {
            Self::RandomInInterval => Ok(()),
            Self::Custom(positions) => {
                if positions.len() != n_particles {
                    return Err(PsoError::InitialPositions {
                        expected: n_particles,
                        found: positions.len(),
                    });
                }
                positions
                    .iter()
                    .try_for_each(|p| PsoError::check_dimensions(dimension, p.len()))
            }
        }
    }
    /// Create the particles of a swarm, drawing any randomness from `rng`.
    ///
    /// # Errors
    ///
    /// See [`SwarmPositionInitializer::validate`].
    pub fn init_particles(
        &self,
        rng: &mut Rng,
        dimension: usize,
        n_particles: usize,
        interval: &Interval,
    ) -> Result<Vec<SwarmParticle>, PsoError> {
        self.validate(n_particles, dimension)?;
        Ok(match self {
            Self::RandomInInterval => (0..n_particles)
                .map(|_| SwarmParticle::new(dimension, interval, rng))
                .collect(),
            Self::Custom(positions) => positions.iter().cloned().map(SwarmParticle::at).collect(),
        })
    }
}

/// A particle with a position, velocity, and best known position
#[derive(Clone, Debug)]
pub struct SwarmParticle {
    /// The position of the particle
    pub position: DVector<Float>,
    /// The velocity of the particle
    pub velocity: DVector<Float>,
    /// The best position of the particle (as measured by the minimum value of `fx`)
    pub best: Point,
    r_loc: DVector<Float>,
    r_glob: DVector<Float>,
}
impl SwarmParticle {
    /// Create a particle at rest at a uniformly random position inside `interval`.
    pub fn new(dimension: usize, interval: &Interval, rng: &mut Rng) -> Self {
        Self::at(uniform_random_in_interval(dimension, interval, rng))
    }
    /// Create a particle at rest at `position`.
    ///
    /// The personal best starts at `position` with a value of `+inf`, so the first call to
    /// [`SwarmParticle::evaluate`] always records it.
    pub fn at(position: DVector<Float>) -> Self {
        let dimension = position.len();
        Self {
            velocity: DVector::zeros(dimension),
            best: Point::new(position.clone()),
            position,
            r_loc: DVector::zeros(dimension),
            r_glob: DVector::zeros(dimension),
        }
    }
    /// The number of dimensions the particle lives in.
    pub fn dimension(&self) -> usize {
        self.position.len()
    }
    /// Evaluate `func` at the particle's position and return the cost.
    ///
    /// The personal best is replaced when the cost is strictly lower than the current personal
    /// best value, or when the personal best has never held a finite value. The personal best
    /// value therefore never increases.
    pub fn evaluate<F: CostFunction + ?Sized>(&mut self, func: &F) -> Float {
        let fx = func.evaluate(&self.position);
        if self.best.fx == Float::INFINITY || fx < self.best.fx {
            self.best.x.copy_from(&self.position);
            self.best.fx = fx;
        }
        fx
    }
    /// Advance the particle by one step toward its personal best and `global_best`:
    ///
    /// ```math
    /// v \leftarrow a v + (b_\text{loc} r_\text{loc}) \odot (p - x) + (b_\text{glob} r_\text{glob}) \odot (g - x)
    /// ```
    /// ```math
    /// x \leftarrow x + v
    /// ```
    /// where $`r_\text{loc}`$ and $`r_\text{glob}`$ are fresh draws from the standard uniform
    /// distribution. Neither the velocity nor the position is clamped.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::DimensionMismatch`] if `global_best` does not have the particle's
    /// dimension. The particle is left untouched in that case.
    pub fn step(
        &mut self,
        coefficients: &Coefficients,
        global_best: &DVector<Float>,
        rng: &mut Rng,
    ) -> Result<(), PsoError> {
        PsoError::check_dimensions(self.dimension(), global_best.len())?;

        fill_uniform(&mut self.r_loc, rng);
        fill_uniform(&mut self.r_glob, rng);
        self.r_loc.scale_assign(coefficients.b_loc);
        self.r_glob.scale_assign(coefficients.b_glob);

        self.velocity.scale_assign(coefficients.a);
        self.r_loc
            .product_assign(&self.best.x.checked_difference(&self.position)?)?;
        self.velocity.sum_assign(&self.r_loc)?;
        self.r_glob
            .product_assign(&global_best.checked_difference(&self.position)?)?;
        self.velocity.sum_assign(&self.r_glob)?;

        self.position.sum_assign(&self.velocity)
    }
}

impl Display for SwarmParticle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Particle at: {} with v: {} and local best {}",
            VectorDisplay(&self.position),
            VectorDisplay(&self.velocity),
            self.best
        )
    }
}

/// Find the particle with the lowest personal best value.
///
/// The scan uses a strict less-than comparison, so ties resolve to the earliest particle in
/// iteration order. The returned [`Point`] borrows the winning particle's personal best; copy it
/// out before the particle is mutated again.
///
/// # Errors
///
/// Returns [`PsoError::EmptySwarm`] if `particles` yields nothing.
pub fn find_global_min<'a, I>(particles: I) -> Result<&'a Point, PsoError>
where
    I: IntoIterator<Item = &'a SwarmParticle>,
{
    let mut particles = particles.into_iter();
    let mut best = &particles.next().ok_or(PsoError::EmptySwarm)?.best;
    for particle in particles {
        if particle.best.fx < best.fx {
            best = &particle.best;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::uniform_random, test_functions::Sphere};
    use approx::assert_relative_eq;
    use nalgebra::dvector;

    fn with_best(x: Float, fx: Float) -> SwarmParticle {
        let mut particle = SwarmParticle::at(dvector![x]);
        particle.best.fx = fx;
        particle
    }

    #[test]
    fn test_new_particle() {
        let mut rng = Rng::with_seed(0);
        let interval = Interval::from((-5.0, 5.0));
        let particle = SwarmParticle::new(3, &interval, &mut rng);
        assert_eq!(particle.dimension(), 3);
        assert!(interval.contains_all(&particle.position));
        assert_eq!(particle.velocity, DVector::zeros(3));
        assert_eq!(particle.best.x, particle.position);
        assert_eq!(particle.best.fx, Float::INFINITY);
    }

    #[test]
    fn test_first_evaluation_records_best() {
        let mut particle = SwarmParticle::at(dvector![1.0, 2.0]);
        assert_eq!(particle.evaluate(&Sphere), 5.0);
        assert_eq!(particle.best.fx, 5.0);
        assert_eq!(particle.best.x, dvector![1.0, 2.0]);
    }

    #[test]
    fn test_evaluate_only_improves() {
        let mut particle = SwarmParticle::at(dvector![1.0, 2.0]);
        particle.evaluate(&Sphere);
        particle.position = dvector![3.0, 0.0];
        assert_eq!(particle.evaluate(&Sphere), 9.0);
        assert_eq!(particle.best.fx, 5.0);
        assert_eq!(particle.best.x, dvector![1.0, 2.0]);
        // repeated non-improving evaluations change nothing
        for _ in 0..3 {
            particle.evaluate(&Sphere);
            assert_eq!(particle.best.fx, 5.0);
            assert_eq!(particle.best.x, dvector![1.0, 2.0]);
        }
        particle.position = dvector![0.0, 1.0];
        particle.evaluate(&Sphere);
        assert_eq!(particle.best.fx, 1.0);
        assert_eq!(particle.best.x, dvector![0.0, 1.0]);
    }

    #[test]
    fn test_equal_cost_is_not_an_improvement() {
        let mut particle = SwarmParticle::at(dvector![1.0, 2.0]);
        particle.evaluate(&Sphere);
        particle.position = dvector![2.0, 1.0];
        particle.evaluate(&Sphere);
        assert_eq!(particle.best.x, dvector![1.0, 2.0]);
    }

    #[test]
    fn test_infeasible_position_never_replaces_finite_best() {
        let mut particle = SwarmParticle::at(dvector![1.0]);
        particle.evaluate(&Sphere);
        particle.position = dvector![1000.0];
        assert_eq!(particle.evaluate(&Sphere), Float::INFINITY);
        assert_eq!(particle.best.fx, 1.0);
        assert_eq!(particle.best.x, dvector![1.0]);
    }

    #[test]
    fn test_best_is_monotone_along_random_walk() {
        let mut rng = Rng::with_seed(3);
        let mut particle = SwarmParticle::at(dvector![0.0, 0.0]);
        let mut last = Float::INFINITY;
        for _ in 0..200 {
            particle.position = uniform_random(2, &mut rng).map(|u| 20.0 * u - 10.0);
            particle.evaluate(&Sphere);
            assert!(particle.best.fx <= last);
            last = particle.best.fx;
        }
    }

    #[test]
    fn test_step_with_zero_coefficients_is_still() {
        let mut rng = Rng::with_seed(0);
        let mut particle = SwarmParticle::at(dvector![3.0]);
        let coefficients = Coefficients {
            a: 0.0,
            b_loc: 0.0,
            b_glob: 0.0,
        };
        particle.step(&coefficients, &dvector![-7.0], &mut rng).unwrap();
        assert_eq!(particle.velocity, dvector![0.0]);
        assert_eq!(particle.position, dvector![3.0]);
    }

    #[test]
    fn test_step_recurrence() {
        let coefficients = Coefficients::default();
        let mut particle = SwarmParticle::at(dvector![1.0, -2.0]);
        particle.velocity = dvector![0.5, 0.25];
        particle.best = Point {
            x: dvector![0.0, 0.0],
            fx: 0.0,
        };
        let global_best = dvector![2.0, 2.0];

        let mut rng = Rng::with_seed(11);
        let mut replay = rng.clone();
        let r_loc = uniform_random(2, &mut replay).scale(coefficients.b_loc);
        let r_glob = uniform_random(2, &mut replay).scale(coefficients.b_glob);
        let x = particle.position.clone();
        let v = particle.velocity.scale(coefficients.a)
            + r_loc.component_mul(&(&particle.best.x - &x))
            + r_glob.component_mul(&(&global_best - &x));

        particle.step(&coefficients, &global_best, &mut rng).unwrap();
        for i in 0..2 {
            assert_relative_eq!(particle.velocity[i], v[i], epsilon = 1e-12);
            assert_relative_eq!(particle.position[i], x[i] + v[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_step_dimension_mismatch() {
        let mut rng = Rng::with_seed(0);
        let mut particle = SwarmParticle::at(dvector![1.0, 1.0]);
        assert_eq!(
            particle.step(&Coefficients::default(), &dvector![0.0], &mut rng),
            Err(PsoError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(particle.position, dvector![1.0, 1.0]);
    }

    #[test]
    fn test_find_global_min_first_tie_wins() {
        let particles = vec![with_best(0.0, 5.0), with_best(1.0, 2.0), with_best(2.0, 2.0)];
        let best = find_global_min(&particles).unwrap();
        assert_eq!(best.fx, 2.0);
        assert_eq!(best.x, dvector![1.0]);
    }

    #[test]
    fn test_find_global_min_all_unevaluated() {
        let particles = vec![
            with_best(4.0, Float::INFINITY),
            with_best(5.0, Float::INFINITY),
        ];
        let best = find_global_min(&particles).unwrap();
        assert_eq!(best.x, dvector![4.0]);
        assert_eq!(best.fx, Float::INFINITY);
    }

    #[test]
    fn test_find_global_min_empty() {
        let particles: Vec<SwarmParticle> = vec![];
        assert_eq!(find_global_min(&particles).unwrap_err(), PsoError::EmptySwarm);
    }

    #[test]
    fn test_custom_initializer() {
        let mut rng = Rng::with_seed(0);
        let interval = Interval::from((-1.0, 1.0));
        let init = SwarmPositionInitializer::Custom(vec![dvector![3.0], dvector![-3.0]]);
        let particles = init.init_particles(&mut rng, 1, 2, &interval).unwrap();
        assert_eq!(particles[0].position, dvector![3.0]);
        assert_eq!(particles[1].best.x, dvector![-3.0]);
        assert_eq!(
            init.validate(3, 1),
            Err(PsoError::InitialPositions {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            init.validate(2, 2),
            Err(PsoError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_random_initializer_is_seeded() {
        let interval = Interval::from((-30.0, 30.0));
        let a = SwarmPositionInitializer::RandomInInterval
            .init_particles(&mut Rng::with_seed(5), 4, 10, &interval)
            .unwrap();
        let b = SwarmPositionInitializer::RandomInInterval
            .init_particles(&mut Rng::with_seed(5), 4, 10, &interval)
            .unwrap();
        assert_eq!(a.len(), 10);
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.position, pb.position);
            assert!(interval.contains_all(&pa.position));
        }
    }

    #[test]
    fn test_display() {
        let mut particle = SwarmParticle::at(dvector![1.0, 2.0]);
        particle.evaluate(&Sphere);
        let s = format!("{}", particle);
        assert_eq!(
            s,
            "Particle at: {1, 2} with v: {0, 0} and local best 5 at {1, 2}"
        );
    }
}
