//! Nearest-color palette quantization.
use crate::buffer::PixelBuffer;
use crate::color::{ColorUsageMap, PaletteColor};
use crate::error::PbnError;

use fxhash::FxHashMap;

/// Squared Euclidean distance between two RGB colors.
#[inline]
fn distance_rgb(lhs: [u8; 3], rhs: [u8; 3]) -> u32 {
    lhs.iter()
        .zip(rhs.iter())
        .map(|(&a, &b)| {
            let d = u32::from(a.abs_diff(b));
            d * d
        })
        .sum()
}

/// Find the palette entry closest to `rgb` by Euclidean RGB distance.
///
/// Ties go to the entry that appears first in `palette`. Returns `None` only
/// for an empty palette.
pub fn nearest_color(rgb: [u8; 3], palette: &[PaletteColor]) -> Option<&PaletteColor> {
    nearest_index(rgb, palette).and_then(|i| palette.get(i))
}

fn nearest_index(rgb: [u8; 3], palette: &[PaletteColor]) -> Option<usize> {
    let mut min = u32::MAX;
    let mut closest = None;
    for (i, color) in palette.iter().enumerate() {
        let distance = distance_rgb(rgb, color.channels());
        if distance < min {
            min = distance;
            closest = Some(i);
        }
    }
    closest
}

/// Map every pixel of `image` to its nearest palette color.
///
/// Returns the quantized image, whose alpha channel is always `255`, together
/// with the map of palette colors that occur in it.
pub fn quantize(
    image: &PixelBuffer,
    palette: &[PaletteColor],
) -> Result<(PixelBuffer, ColorUsageMap), PbnError> {
    if palette.is_empty() {
        return Err(PbnError::InvalidPalette);
    }

    let mut output = Vec::new();
    output.try_reserve_exact(image.as_raw().len())?;

    // Photographs repeat colors heavily, so remember each source color's match
    let mut matches = FxHashMap::<[u8; 3], usize>::default();
    let mut usage = ColorUsageMap::new();

    for px in image.pixels() {
        let rgb = [px[0], px[1], px[2]];
        let idx = if let Some(&idx) = matches.get(&rgb) {
            idx
        } else {
            let idx = nearest_index(rgb, palette).ok_or(PbnError::InvalidPalette)?;
            let _ = matches.insert(rgb, idx);
            idx
        };
        let color = palette.get(idx).ok_or("Palette index out of bounds")?;

        output.extend_from_slice(&color.rgba());
        usage.insert(*color);
    }

    tracing::debug!(
        colors = usage.len(),
        distinct_inputs = matches.len(),
        "quantized image"
    );

    Ok((
        PixelBuffer::from_raw(image.width(), image.height(), output)?,
        usage,
    ))
}
