//! Core simulation trait
//!
//! Defines the lifecycle a frame loop drives. The loop owns the device and
//! queue and passes them in on every call.

use crate::error::Result;
use wgpu::{Device, Queue};

/// A GPU simulation advanced one generation at a time
pub trait Simulation {
    /// Write the initial state. Called once when attached and again on reset.
    fn initialize(&mut self, device: &Device, queue: &Queue) -> Result<()>;

    /// Advance by exactly one generation
    fn advance(&mut self, device: &Device, queue: &Queue) -> Result<()>;

    /// Refresh the display image from the current generation
    fn present(&mut self, device: &Device, queue: &Queue) -> Result<()>;

    /// Get simulation name for logging
    fn name(&self) -> &str;

    /// Generations completed since the last initialization
    fn generation(&self) -> u64;

    /// Rendered frames between two generations
    fn frames_per_generation(&self) -> u32 {
        1
    }

    /// Reset simulation to initial state
    fn reset(&mut self, device: &Device, queue: &Queue) -> Result<()> {
        self.initialize(device, queue)
    }
}
