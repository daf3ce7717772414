use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

use crate::render::pipeline::PixelGrid;

pub fn to_image(grid: PixelGrid) -> Result<RgbImage> {
    let (width, height) = (grid.width(), grid.height());
    RgbImage::from_raw(width, height, grid.into_bytes())
        .with_context(|| format!("Pixel buffer does not match {}x{}", width, height))
}

/// Encode `grid` as PNG at `path`.
///
/// The image is written to a sibling `.part` file first and renamed into
/// place, so a failed write never leaves a truncated PNG at `path`.
pub fn write_png(grid: PixelGrid, path: &Path) -> Result<()> {
    let (width, height) = (grid.width(), grid.height());
    let image = to_image(grid)?;

    let partial = partial_path(path);
    if let Err(err) = image.save_with_format(&partial, ImageFormat::Png) {
        let _ = std::fs::remove_file(&partial);
        return Err(err).with_context(|| format!("Failed to encode PNG: {}", partial.display()));
    }

    if let Err(err) = std::fs::rename(&partial, path) {
        let _ = std::fs::remove_file(&partial);
        return Err(err).with_context(|| format!("Failed to write {}", path.display()));
    }

    log::info!("Wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "spectrogram.png".into());
    name.push(".part");
    path.with_file_name(name)
}
