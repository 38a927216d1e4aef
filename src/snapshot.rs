//! Display image snapshots
//!
//! The read-back display image becomes an [`image::RgbaImage`] and is saved in
//! the format named by the path's extension, TGA when there is none.

use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};
use image::{ImageError, ImageFormat, RgbaImage};

use crate::error::Result;
use crate::grid::GridSize;

/// Wraps tightly packed RGBA rows as an image buffer
pub fn to_image(size: GridSize, rgba: Vec<u8>) -> Result<RgbaImage> {
    RgbaImage::from_raw(size.width, size.height, rgba).ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
        .into()
    })
}

/// Snapshot format for `path`
pub fn format_for(path: &Path) -> ImageFormat {
    ImageFormat::from_path(path).unwrap_or(ImageFormat::Tga)
}

pub fn save(path: &Path, size: GridSize, rgba: Vec<u8>) -> Result<()> {
    let image = to_image(size, rgba)?;
    image.save_with_format(path, format_for(path))?;
    Ok(())
}
