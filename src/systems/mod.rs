//! Simulation driving systems

mod simulation;

pub use simulation::FixedStepDriver;
