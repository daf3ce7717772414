use rayon::prelude::*;

use super::palette::{Color, ColorScheme, Gradient, GradientMode};
use super::scale::{bucket, normalize};
use crate::audio::spectrogram::MasterSpectrogram;
use crate::error::{ConfigError, RenderError};

/// Output image parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub color_scheme: ColorScheme,
    /// Span below the global peak mapped onto the palette; anything quieter
    /// renders as the palette floor.
    pub dynamic_range_db: f32,
    pub gradient_mode: GradientMode,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            color_scheme: ColorScheme::default(),
            dynamic_range_db: 110.0,
            gradient_mode: GradientMode::default(),
        }
    }

    pub fn with_color_scheme(mut self, color_scheme: ColorScheme) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    pub fn with_dynamic_range(mut self, dynamic_range_db: f32) -> Self {
        self.dynamic_range_db = dynamic_range_db;
        self
    }

    pub fn with_gradient_mode(mut self, gradient_mode: GradientMode) -> Self {
        self.gradient_mode = gradient_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroImageDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !self.dynamic_range_db.is_finite() || self.dynamic_range_db <= 0.0 {
            return Err(ConfigError::InvalidDynamicRange(self.dynamic_range_db));
        }
        Ok(())
    }
}

/// Row-major RGB pixels, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelGrid {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let i = (y as usize * self.width as usize + x as usize) * 3;
        Color::new(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    pub fn pixels(&self) -> impl Iterator<Item = Color> + '_ {
        self.data
            .chunks_exact(3)
            .map(|p| Color::new(p[0], p[1], p[2]))
    }

    /// Packed `RGBRGB...` bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Fit `spectrogram` into a `width x height` image.
///
/// Frames are bucketed onto columns and bins onto rows (highest frequencies
/// in row 0). Each pixel takes the *maximum* magnitude in its cell, so short
/// transients survive heavy downscaling. The level in dB relative to the
/// global peak, clamped to the dynamic range, picks the palette color.
pub fn render(
    spectrogram: &MasterSpectrogram,
    config: &RenderConfig,
) -> Result<PixelGrid, RenderError> {
    config.validate()?;
    if spectrogram.frame_count() == 0 {
        return Err(RenderError::EmptySpectrogram);
    }

    let width = config.width as usize;
    let height = config.height as usize;
    let frames = spectrogram.frame_count();
    let bins = spectrogram.bin_count();
    let peak = spectrogram.peak();
    let range = config.dynamic_range_db;
    let gradient = Gradient::for_scheme(config.color_scheme, config.gradient_mode);

    log::debug!(
        "Rendering {}x{} matrix into {}x{} ({:?}, {} dB, peak {:.4})",
        frames,
        bins,
        width,
        height,
        config.color_scheme,
        range,
        peak
    );

    let columns: Vec<_> = (0..width).map(|x| bucket(x, width, frames)).collect();

    let mut data = vec![0u8; width * height * 3];
    data.par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let bin_range = bucket(height - 1 - y, height, bins);
            for (x, frame_range) in columns.iter().enumerate() {
                let mut max = 0.0f32;
                for frame in frame_range.clone() {
                    for bin in bin_range.clone() {
                        max = max.max(spectrogram.magnitude(frame, bin));
                    }
                }
                let color = gradient.color_at(normalize(max, peak, range));
                row[x * 3..x * 3 + 3].copy_from_slice(&color.to_array());
            }
        });

    Ok(PixelGrid {
        width: config.width,
        height: config.height,
        data,
    })
}
