//! Palette colors, the color usage map and palette construction.
use crate::error::{ParseColorError, PbnError};
use fxhash::FxHashMap;
use palette::{encoding, FromColor, Hsl, Srgb};
use std::str::FromStr;

/// Number of colors in the built-in application palette.
pub const DEFAULT_PALETTE_SIZE: u32 = 258;

/// Encode an RGB triple as `r * 1_000_000 + g * 1_000 + b`.
///
/// The encoding is only injective because every component is at most `255`,
/// which keeps each component inside its own group of three decimal digits.
#[inline]
pub fn color_key(rgb: [u8; 3]) -> u32 {
    u32::from(rgb[0]) * 1_000_000 + u32::from(rgb[1]) * 1_000 + u32::from(rgb[2])
}

/// Perceptual brightness approximation `0.299 R + 0.587 G + 0.114 B`.
#[inline]
pub fn luminance(rgb: [u8; 3]) -> f64 {
    0.299 * f64::from(rgb[0]) + 0.587 * f64::from(rgb[1]) + 0.114 * f64::from(rgb[2])
}

/// A palette entry with a stable, one-based identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColor {
    /// One-based palette number.
    pub number: u32,
    /// Color value.
    pub rgb: Srgb<u8>,
}

impl PaletteColor {
    /// Create a [`PaletteColor`].
    #[inline]
    #[must_use]
    pub fn new(number: u32, red: u8, green: u8, blue: u8) -> Self {
        Self {
            number,
            rgb: Srgb::new(red, green, blue),
        }
    }

    /// The color as an `[r, g, b]` array.
    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.rgb.red, self.rgb.green, self.rgb.blue]
    }

    /// The color as an opaque RGBA sample.
    #[inline]
    pub fn rgba(&self) -> [u8; 4] {
        [self.rgb.red, self.rgb.green, self.rgb.blue, 255]
    }

    /// Integer key of the color, see [`color_key`].
    #[inline]
    pub fn key(&self) -> u32 {
        color_key(self.channels())
    }

    /// Lowercase `#rrggbb` form of the color.
    pub fn hex(&self) -> String {
        format!(
            "#{:02x}{:02x}{:02x}",
            self.rgb.red, self.rgb.green, self.rgb.blue
        )
    }

    /// Luminance of the color, see [`luminance`].
    #[inline]
    pub fn luminance(&self) -> f64 {
        luminance(self.channels())
    }
}

/// Palette colors that were actually produced by quantization, keyed by
/// [`color_key`].
///
/// Iteration follows the order in which each color was first inserted.
/// Inserting a color whose key is already present replaces the stored value
/// without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorUsageMap {
    colors: Vec<PaletteColor>,
    index: FxHashMap<u32, usize>,
}

impl ColorUsageMap {
    /// Create an empty [`ColorUsageMap`].
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `color` under its RGB key.
    pub fn insert(&mut self, color: PaletteColor) {
        let key = color.key();
        if let Some(stored) = self
            .index
            .get(&key)
            .copied()
            .and_then(|i| self.colors.get_mut(i))
        {
            *stored = color;
        } else {
            let _ = self.index.insert(key, self.colors.len());
            self.colors.push(color);
        }
    }

    /// Look up the color stored under `key`.
    pub fn get(&self, key: u32) -> Option<&PaletteColor> {
        self.index.get(&key).and_then(|&i| self.colors.get(i))
    }

    /// Whether a color is stored under `key`.
    #[inline]
    pub fn contains_key(&self, key: u32) -> bool {
        self.index.contains_key(&key)
    }

    /// Number of distinct colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether no color has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate over the colors in first-insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PaletteColor> {
        self.colors.iter()
    }
}

impl<'a> IntoIterator for &'a ColorUsageMap {
    type Item = &'a PaletteColor;
    type IntoIter = std::slice::Iter<'a, PaletteColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Generate `count` colors with evenly spaced hues.
///
/// Saturation cycles through 70, 80 and 90 percent and lightness through 40,
/// 55, 70 and 85 percent so that neighboring hues stay distinguishable.
pub fn default_palette(count: u32) -> Vec<PaletteColor> {
    (0..count)
        .map(|i| {
            let hue = f64::from(i) * 360.0 / f64::from(count);
            let saturation = f64::from(70 + (i % 3) * 10) / 100.0;
            let lightness = f64::from(40 + (i % 4) * 15) / 100.0;
            let hsl: Hsl<encoding::Srgb, f64> = Hsl::new(hue, saturation, lightness);
            let rgb: Srgb<u8> = Srgb::<f64>::from_color(hsl).into_format();

            PaletteColor {
                number: i + 1,
                rgb,
            }
        })
        .collect()
}

/// Parse a palette from text holding one hexadecimal color per line.
///
/// The leading `#` is optional and both the 3 and 6 digit forms are accepted.
/// Blank lines and lines starting with `//` are skipped. Colors are numbered
/// from `1` in the order they appear.
pub fn parse_palette(text: &str) -> Result<Vec<PaletteColor>, PbnError> {
    let mut palette = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        let rgb = Srgb::<u8>::from_str(line).or(Err(ParseColorError {
            line: line_idx.saturating_add(1),
        }))?;
        let number = u32::try_from(palette.len().saturating_add(1))
            .or(Err("Palette has too many colors"))?;
        palette.push(PaletteColor { number, rgb });
    }

    if palette.is_empty() {
        return Err(PbnError::InvalidPalette);
    }

    Ok(palette)
}
