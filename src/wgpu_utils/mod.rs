// src/wgpu_utils/mod.rs
//! WGPU utility functions and helpers
//!
//! Small wrappers for the bind group, uniform and readback plumbing the
//! kernels share.

pub mod binding_builder;
pub mod binding_types;
pub mod readback;
pub mod uniform_buffer;

// Re-export main types
pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use readback::ReadbackBuffer;
pub use uniform_buffer::UniformBuffer;
