//! Cell-state and display images
//!
//! Both are plain 2D textures with one texel per cell. The host allocates them
//! once; the kernels only ever see their views.

use crate::error::{LifeError, Result};
use crate::grid::{GridSize, ALIVE, CELL_FORMAT, DEAD, DISPLAY_FORMAT};
use crate::wgpu_utils::ReadbackBuffer;

fn texture_size(texture: &wgpu::Texture) -> GridSize {
    GridSize::new(texture.width(), texture.height())
}

/// Rejects textures the kernels cannot bind
fn check_texture(
    role: &'static str,
    texture: &wgpu::Texture,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> Result<()> {
    let unsupported = |reason: String| LifeError::UnsupportedTexture { role, reason };
    if texture.dimension() != wgpu::TextureDimension::D2 {
        return Err(unsupported(format!(
            "dimension is {:?}, expected D2",
            texture.dimension()
        )));
    }
    if texture.depth_or_array_layers() != 1 {
        return Err(unsupported(format!(
            "{} array layers, expected 1",
            texture.depth_or_array_layers()
        )));
    }
    if texture.mip_level_count() != 1 {
        return Err(unsupported(format!(
            "{} mip levels, expected 1",
            texture.mip_level_count()
        )));
    }
    if texture.sample_count() != 1 {
        return Err(unsupported(format!(
            "sample count {}, expected 1",
            texture.sample_count()
        )));
    }
    if texture.format() != format {
        return Err(LifeError::FormatMismatch {
            role,
            expected: format,
            actual: texture.format(),
        });
    }
    if !texture.usage().contains(usage) {
        return Err(LifeError::MissingUsage {
            role,
            missing: usage - texture.usage(),
        });
    }
    Ok(())
}

fn create_texture(
    device: &wgpu::Device,
    size: GridSize,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
    label: &str,
) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: size.extent(),
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    })
}

/// One generation of cell states (`R32Uint`, values 0 or 1)
pub struct CellImage {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: GridSize,
}

impl CellImage {
    /// Read as a sampled texture, written as a storage image, copied both ways
    pub const USAGE: wgpu::TextureUsages = wgpu::TextureUsages::TEXTURE_BINDING
        .union(wgpu::TextureUsages::STORAGE_BINDING)
        .union(wgpu::TextureUsages::COPY_SRC)
        .union(wgpu::TextureUsages::COPY_DST);

    pub fn new(device: &wgpu::Device, size: GridSize, label: &str) -> Self {
        let texture = create_texture(device, size, CELL_FORMAT, Self::USAGE, label);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    /// Wraps a texture allocated by the host, checking format and usage
    pub fn from_texture(texture: wgpu::Texture) -> Result<Self> {
        check_texture("cell", &texture, CELL_FORMAT, Self::USAGE)?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let size = texture_size(&texture);
        Ok(Self {
            texture,
            view,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Writes a row-major pattern; any non-zero value is stored as alive
    pub fn upload(&self, queue: &wgpu::Queue, cells: &[u32]) -> Result<()> {
        if cells.len() != self.size.cell_count() {
            return Err(LifeError::PatternLength {
                expected: self.size.cell_count(),
                actual: cells.len(),
            });
        }

        let normalized: Vec<u32> = cells
            .iter()
            .map(|&cell| if cell == DEAD { DEAD } else { ALIVE })
            .collect();

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&normalized),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(self.size.width * std::mem::size_of::<u32>() as u32),
                rows_per_image: Some(self.size.height),
            },
            self.size.extent(),
        );
        Ok(())
    }

    /// Copies the image back to the host as row-major cell states
    pub fn read(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u32>> {
        let staging = ReadbackBuffer::new(device, self.size.extent(), 4, "Cell Readback Buffer");
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Cell Readback Encoder"),
        });
        staging.copy_from(&mut encoder, &self.texture);
        queue.submit(std::iter::once(encoder.finish()));

        let bytes = staging.read(device)?;
        Ok(bytes
            .chunks_exact(std::mem::size_of::<u32>())
            .map(bytemuck::pod_read_unaligned::<u32>)
            .collect())
    }
}

/// Display-ready color image (`Rgba8Unorm`) written by the presenter
pub struct DisplayImage {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    size: GridSize,
}

impl DisplayImage {
    /// Written as a storage image, sampled by the front end, copied out for snapshots
    pub const USAGE: wgpu::TextureUsages = wgpu::TextureUsages::STORAGE_BINDING
        .union(wgpu::TextureUsages::TEXTURE_BINDING)
        .union(wgpu::TextureUsages::COPY_SRC);

    pub fn new(device: &wgpu::Device, size: GridSize, label: &str) -> Self {
        let texture = create_texture(device, size, DISPLAY_FORMAT, Self::USAGE, label);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size,
        }
    }

    /// Wraps a texture owned by the rendering front end
    pub fn from_texture(texture: wgpu::Texture) -> Result<Self> {
        check_texture("display", &texture, DISPLAY_FORMAT, Self::USAGE)?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let size = texture_size(&texture);
        Ok(Self {
            texture,
            view,
            size,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn texture(&self) -> &wgpu::Texture {
        &self.texture
    }

    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Copies the image back as tightly packed RGBA bytes
    pub fn read(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u8>> {
        let staging = ReadbackBuffer::new(device, self.size.extent(), 4, "Display Readback Buffer");
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Display Readback Encoder"),
        });
        staging.copy_from(&mut encoder, &self.texture);
        queue.submit(std::iter::once(encoder.finish()));

        staging.read(device)
    }
}
