// src/lib.rs
//! Toroid Life
//!
//! Conway's Game of Life on a fixed-size toroidal grid, initialized, stepped and
//! presented entirely by wgpu compute kernels.

pub mod config;
pub mod error;
pub mod gpu;
pub mod grid;
pub mod simulation;
pub mod snapshot;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use gpu::GpuContext;
pub use grid::GridSize;
pub use simulation::{ActiveBuffer, LifeSimulation, SimulationManager};

/// Creates a headless GPU context and a simulation with the default configuration
pub fn default() -> Result<(GpuContext, LifeSimulation)> {
    let gpu = GpuContext::headless()?;
    let simulation = LifeSimulation::new(gpu.device(), LifeConfig::default())?;
    Ok((gpu, simulation))
}
