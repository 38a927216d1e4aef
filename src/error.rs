//! Error types for the host side of the simulation
//!
//! The compute kernels have no error paths of their own. Everything that can go
//! wrong (bad dimensions, mismatched images, device loss during readback) is
//! detected here, at the boundary where the host binds resources.

use crate::grid::GridSize;

pub type Result<T> = std::result::Result<T, LifeError>;

/// Rejected configuration values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    #[error("grid dimension {value} exceeds the device limit of {limit}")]
    TooLarge { value: u32, limit: u32 },

    #[error("frames per generation must be at least 1")]
    ZeroCadence,
}

#[derive(Debug, thiserror::Error)]
pub enum LifeError {
    #[error("no suitable GPU adapter: {0}")]
    NoAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("{role} image is {actual}, expected {expected}")]
    DimensionMismatch {
        role: &'static str,
        expected: GridSize,
        actual: GridSize,
    },

    #[error("{role} image has format {actual:?}, expected {expected:?}")]
    FormatMismatch {
        role: &'static str,
        expected: wgpu::TextureFormat,
        actual: wgpu::TextureFormat,
    },

    #[error("{role} image is missing usage {missing:?}")]
    MissingUsage {
        role: &'static str,
        missing: wgpu::TextureUsages,
    },

    #[error("{role} image is unsupported: {reason}")]
    UnsupportedTexture {
        role: &'static str,
        reason: String,
    },

    #[error("step input and output must be different images")]
    AliasedImages,

    #[error("cell pattern has {actual} values, grid holds {expected}")]
    PatternLength { expected: usize, actual: usize },

    #[error("GPU readback failed: {0}")]
    Readback(String),

    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}
