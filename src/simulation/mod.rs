// src/simulation/mod.rs
//! Simulation system
//!
//! GPU-resident Game of Life: the compute kernels, the images they run on, and
//! the host-side orchestration that sequences them.

pub mod cadence;
pub mod images;
pub mod kernels;
pub mod life;
pub mod manager;
pub mod traits;

pub use cadence::StepCadence;
pub use images::{CellImage, DisplayImage};
pub use kernels::{GridParams, GridParamsUBO, Kernel, LifeKernels};
pub use life::{ActiveBuffer, LifeSimulation};
pub use manager::SimulationManager;
pub use traits::Simulation;
