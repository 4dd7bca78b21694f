use crate::core::Point;

/// A trait which holds a [`callback`](`Observer::callback`) function that can be used to watch the
/// swarm's global best as a run progresses.
///
/// Observers are called by the leading worker thread right after it publishes a new global best,
/// while every other worker is parked at the iteration barrier. They are called once per
/// iteration, in iteration order, and cannot stop the run.
pub trait Observer: Send + Sync {
    /// A function that is called after every iteration of the swarm. `step` counts from `1`.
    fn callback(&mut self, step: usize, global_best: &Point);
}
