/// Module containing the particle swarm optimizer and its parallel coordinator
pub mod particles;
