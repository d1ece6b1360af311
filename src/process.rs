//! The full processing pipeline from source pixels to segments.
use crate::buffer::PixelBuffer;
use crate::color::{ColorUsageMap, PaletteColor};
use crate::error::PbnError;
use crate::quantize::quantize;
use crate::segment::{segment, Segment};
use crate::simplify::simplify;

/// Processing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Minimum number of pixels a region needs to become a segment.
    pub segment_size: u32,
    /// Label font size in pixels.
    pub font_size: u32,
    /// Number of leading palette colors used for quantization.
    pub color_count: u32,
    /// Block-average intensity, `0` disables simplification.
    pub simplification: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            segment_size: 20,
            font_size: 14,
            color_count: 50,
            simplification: 10,
        }
    }
}

impl Settings {
    /// Check every setting against its minimum.
    pub fn validate(&self) -> Result<(), PbnError> {
        if self.segment_size == 0 {
            return Err(PbnError::InvalidSettings("segment size must be at least 1"));
        }
        if self.font_size == 0 {
            return Err(PbnError::InvalidSettings("font size must be at least 1"));
        }
        if self.color_count == 0 {
            return Err(PbnError::InvalidSettings("color count must be at least 1"));
        }
        Ok(())
    }
}

/// Result of running the pipeline on one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// The quantized image; every pixel is one of the colors in `colors`.
    pub quantized: PixelBuffer,
    /// Segments in discovery order.
    pub segments: Vec<Segment>,
    /// Palette colors present in `quantized`.
    pub colors: ColorUsageMap,
}

/// Simplify, quantize and segment `image`.
///
/// Only the first `settings.color_count` colors of `palette` are used.
/// Simplification is skipped when `settings.simplification` is `0`.
pub fn process(
    image: &PixelBuffer,
    palette: &[PaletteColor],
    settings: &Settings,
) -> Result<ProcessedImage, PbnError> {
    settings.validate()?;
    if palette.is_empty() {
        return Err(PbnError::InvalidPalette);
    }

    let color_count = usize::try_from(settings.color_count).unwrap_or(usize::MAX);
    let palette = palette.get(..color_count).unwrap_or(palette);

    let _span = tracing::debug_span!(
        "process",
        width = image.width(),
        height = image.height(),
        colors = palette.len()
    )
    .entered();

    let simplified;
    let source = if settings.simplification > 0 {
        simplified = simplify(image, settings.simplification)?;
        &simplified
    } else {
        image
    };

    let (quantized, colors) = quantize(source, palette)?;
    let segments = segment(&quantized, settings.segment_size)?;

    tracing::debug!(
        segments = segments.len(),
        colors = colors.len(),
        "processed image"
    );

    Ok(ProcessedImage {
        width: quantized.width(),
        height: quantized.height(),
        quantized,
        segments,
        colors,
    })
}
