//! Simulation configuration
//!
//! Grid dimensions are fixed for the lifetime of a [`crate::LifeSimulation`];
//! changing them means building a new one.

use crate::error::ConfigError;
use crate::grid::{GridSize, DEFAULT_SEED_HALF_WIDTH};

/// Parameters for one simulation instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    /// Half-width of the centered live square written by the initializer
    pub seed_half_width: u32,
    /// Rendered frames between two generations when driven by a frame loop
    pub frames_per_generation: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            seed_half_width: DEFAULT_SEED_HALF_WIDTH,
            frames_per_generation: 11,
        }
    }
}

impl LifeConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_seed_half_width(mut self, seed_half_width: u32) -> Self {
        self.seed_half_width = seed_half_width;
        self
    }

    pub fn with_frames_per_generation(mut self, frames: u32) -> Self {
        self.frames_per_generation = frames;
        self
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Checks the configuration against the limits of the device it will run on.
    ///
    /// Each axis is bounded by the largest 2D texture and by the largest
    /// dispatch, since every cell gets its own workgroup.
    pub fn validate(&self, limits: &wgpu::Limits) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }

        let limit = limits
            .max_texture_dimension_2d
            .min(limits.max_compute_workgroups_per_dimension);
        for value in [self.width, self.height] {
            if value > limit {
                return Err(ConfigError::TooLarge { value, limit });
            }
        }

        if self.frames_per_generation == 0 {
            return Err(ConfigError::ZeroCadence);
        }

        Ok(())
    }
}
