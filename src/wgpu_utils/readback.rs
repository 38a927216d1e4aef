// src/wgpu_utils/readback.rs
//! Copying 2D textures back to host memory
//!
//! Texture-to-buffer copies need every row aligned to
//! [`wgpu::COPY_BYTES_PER_ROW_ALIGNMENT`], so the staging buffer holds padded
//! rows and [`ReadbackBuffer::read`] strips the padding again.

use crate::error::{LifeError, Result};

/// Row length in bytes after padding to the copy alignment
pub fn padded_bytes_per_row(unpadded: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drops the per-row padding from a mapped staging buffer
pub fn strip_row_padding(padded: &[u8], unpadded_row: usize, padded_row: usize, rows: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(unpadded_row * rows);
    for row in padded.chunks(padded_row).take(rows) {
        out.extend_from_slice(&row[..unpadded_row]);
    }
    out
}

/// Staging buffer sized for one texture
pub struct ReadbackBuffer {
    buffer: wgpu::Buffer,
    extent: wgpu::Extent3d,
    unpadded_bytes_per_row: u32,
    padded_bytes_per_row: u32,
}

impl ReadbackBuffer {
    pub fn new(device: &wgpu::Device, extent: wgpu::Extent3d, bytes_per_texel: u32, label: &str) -> Self {
        let unpadded_bytes_per_row = extent.width * bytes_per_texel;
        let padded_bytes_per_row = padded_bytes_per_row(unpadded_bytes_per_row);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: padded_bytes_per_row as u64 * extent.height as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            extent,
            unpadded_bytes_per_row,
            padded_bytes_per_row,
        }
    }

    /// Records a copy of the whole texture into the staging buffer
    pub fn copy_from(&self, encoder: &mut wgpu::CommandEncoder, texture: &wgpu::Texture) {
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(self.padded_bytes_per_row),
                    rows_per_image: Some(self.extent.height),
                },
            },
            self.extent,
        );
    }

    /// Maps the buffer, blocking until the GPU has finished, and returns tightly packed rows
    pub fn read(&self, device: &wgpu::Device) -> Result<Vec<u8>> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = futures::channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        device
            .poll(wgpu::PollType::Wait)
            .map_err(|e| LifeError::Readback(e.to_string()))?;

        match futures::executor::block_on(rx) {
            Ok(Ok(())) => {
                let mapped = slice.get_mapped_range();
                let bytes = strip_row_padding(
                    &mapped,
                    self.unpadded_bytes_per_row as usize,
                    self.padded_bytes_per_row as usize,
                    self.extent.height as usize,
                );
                drop(mapped);
                self.buffer.unmap();
                Ok(bytes)
            }
            Ok(Err(e)) => Err(LifeError::Readback(e.to_string())),
            Err(_) => Err(LifeError::Readback("map callback dropped".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_bytes_per_row() {
        assert_eq!(padded_bytes_per_row(4), 256);
        assert_eq!(padded_bytes_per_row(256), 256);
        assert_eq!(padded_bytes_per_row(1000 * 4), 4096);
    }

    #[test]
    fn test_strip_row_padding() {
        // Two rows of 3 bytes, each padded to 5
        let padded = [1, 2, 3, 0, 0, 4, 5, 6, 0, 0];
        assert_eq!(strip_row_padding(&padded, 3, 5, 2), vec![1, 2, 3, 4, 5, 6]);
    }
}
