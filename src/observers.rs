use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::{
    core::{Point, VectorDisplay},
    traits::Observer,
};

/// An [`Observer`] which stores the history of global best positions.
///
/// # Usage:
///
/// ```rust
/// use pswarm::prelude::*;
/// use pswarm::observers::TrackingObserver;
///
/// let tracker = TrackingObserver::build();
/// let pso = PSO::new()
///     .setup(|c| c.with_n_particles(10).with_iterations(15).with_seed(0))
///     .with_observer(tracker.clone());
/// pso.run(&Problem::Sphere).unwrap();
/// assert_eq!(tracker.read().best_history.len(), 15);
/// ```
#[derive(Default, Clone, Debug)]
pub struct TrackingObserver {
    /// The global best after each iteration
    pub best_history: Vec<Point>,
}

impl TrackingObserver {
    /// Finalize the [`TrackingObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self::default()))
    }
}

impl Observer for TrackingObserver {
    fn callback(&mut self, _step: usize, global_best: &Point) {
        self.best_history.push(global_best.clone());
    }
}

/// An [`Observer`] which emits a `tracing` event at the `DEBUG` level for every iteration.
#[derive(Default, Clone, Copy, Debug)]
pub struct TracingObserver;

impl TracingObserver {
    /// Finalize the [`TracingObserver`] by wrapping it in an [`Arc`] and [`RwLock`]
    pub fn build() -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(Self))
    }
}

impl Observer for TracingObserver {
    fn callback(&mut self, step: usize, global_best: &Point) {
        debug!(
            step,
            fx = global_best.fx,
            x = %VectorDisplay(&global_best.x),
            "global best"
        );
    }
}
