//! Real-time 2D SPH fluid engine.
//!
//! [`solver::Solver`] owns a fixed population of particles and advances it
//! one host frame at a time with [`solver::Solver::run_frame`]. Each substep
//! predicts positions, rebuilds the [`grid::SpatialHashGrid`], recomputes
//! densities, and integrates pressure, viscosity and external forces.

pub mod config;
pub mod fluids;
pub mod forces;
pub mod grid;
pub mod kernels;
pub mod particle;
pub mod quality;
pub mod random;
pub mod solver;

pub use config::{Bounds, FluidConfig};
pub use forces::pointer::InteractionForce;
pub use solver::{SimState, Solver};
