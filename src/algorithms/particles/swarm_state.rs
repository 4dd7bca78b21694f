use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Barrier,
};

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{
    algorithms::particles::{find_global_min, SwarmParticle, SwarmStatus},
    core::Point,
    error::PsoError,
};

/// The state shared by every worker thread of a single run.
///
/// Each particle sits behind its own lock, but the run never contends for them: a worker only
/// writes the particles in its own slice, and the whole-swarm reduction happens while every other
/// worker is parked at a barrier. The two barriers order the phases of an iteration:
///
/// 1. every worker updates its slice, then calls [`SwarmState::wait_for_updates`];
/// 2. the leader calls [`SwarmState::publish_global_best`];
/// 3. every worker calls [`SwarmState::wait_for_publish`] before reading the new global best.
#[derive(Debug)]
pub struct SwarmState {
    particles: Vec<RwLock<SwarmParticle>>,
    global_best: RwLock<Point>,
    update_barrier: Barrier,
    publish_barrier: Barrier,
    n_f_evals: AtomicUsize,
}

impl SwarmState {
    /// Wrap `particles` for a run with `n_threads` workers.
    ///
    /// The global best starts as the result of a reduction over the particles as given, so a
    /// swarm which has not been evaluated yet starts from the first particle's position with a
    /// value of `+inf`.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::ZeroThreads`] if `n_threads` is zero and [`PsoError::EmptySwarm`] if
    /// there are no particles.
    pub fn new(particles: Vec<SwarmParticle>, n_threads: usize) -> Result<Self, PsoError> {
        if n_threads == 0 {
            return Err(PsoError::ZeroThreads);
        }
        let global_best = find_global_min(&particles)?.clone();
        Ok(Self {
            particles: particles.into_iter().map(RwLock::new).collect(),
            global_best: RwLock::new(global_best),
            update_barrier: Barrier::new(n_threads),
            publish_barrier: Barrier::new(n_threads),
            n_f_evals: AtomicUsize::new(0),
        })
    }

    /// The number of particles in the swarm.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Always `false` for a constructed state.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Lock the particle at `index` for writing.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn particle_mut(&self, index: usize) -> RwLockWriteGuard<'_, SwarmParticle> {
        self.particles[index].write()
    }

    /// Read the current global best.
    pub fn global_best(&self) -> RwLockReadGuard<'_, Point> {
        self.global_best.read()
    }

    /// Add `n` to the count of objective evaluations.
    pub fn record_evaluations(&self, n: usize) {
        self.n_f_evals.fetch_add(n, Ordering::Relaxed);
    }

    /// Block until every worker has finished updating its slice for this iteration.
    pub fn wait_for_updates(&self) {
        self.update_barrier.wait();
    }

    /// Block until the leader has published this iteration's global best.
    pub fn wait_for_publish(&self) {
        self.publish_barrier.wait();
    }

    /// Reduce the whole swarm to its lowest personal best and store it as the global best.
    ///
    /// Only the leader calls this, between [`SwarmState::wait_for_updates`] and
    /// [`SwarmState::wait_for_publish`]. The returned guard lets the leader hand the freshly
    /// published value to observers without giving up the lock in between; drop it before
    /// waiting on the publish barrier.
    ///
    /// # Errors
    ///
    /// Returns [`PsoError::EmptySwarm`] if the swarm is empty.
    pub fn publish_global_best(&self) -> Result<RwLockReadGuard<'_, Point>, PsoError> {
        let guards: Vec<RwLockReadGuard<'_, SwarmParticle>> =
            self.particles.iter().map(|p| p.read()).collect();
        let best = find_global_min(guards.iter().map(|g| &**g))?;
        let mut global_best = self.global_best.write();
        global_best.copy_from(best);
        Ok(RwLockWriteGuard::downgrade(global_best))
    }

    /// Consume the state once every worker has joined.
    pub fn into_status(self, n_steps: usize) -> SwarmStatus {
        SwarmStatus {
            gbest: self.global_best.into_inner(),
            particles: self
                .particles
                .into_iter()
                .map(RwLock::into_inner)
                .collect(),
            n_steps,
            n_f_evals: self.n_f_evals.into_inner(),
        }
    }
}
