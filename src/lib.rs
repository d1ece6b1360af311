//! Paint-by-numbers scheme generation.
//!
//! A photograph is reduced to a fixed palette, split into 4-connected regions
//! of identical color, and every region large enough to hold a legible label
//! is annotated with a number from a luminance-ordered color table. The crate
//! also produces a printable sticker sheet and a plain-text color table from
//! the same data.
//!
//! Each stage is a free function that takes its input by reference and
//! returns a newly allocated result, so stages can be run and tested in
//! isolation:
//!
//! 1. [`simplify::simplify`] – optional block-average denoise.
//! 2. [`quantize::quantize`] – nearest palette color per pixel.
//! 3. [`segment::segment`] – connected region extraction.
//! 4. [`render::render`] – color or line-art scheme with numeric labels.
//! 5. [`table`] – color table, sticker sheet and text export.
//!
//! The color math uses the `palette` crate for hex parsing and HSL conversion.
//!
//! ## Usage
//!
//! [`process`] runs stages 1 to 3 and returns a [`ProcessedImage`] that the
//! rendering and table functions consume.
//!
//! ```
//! use paint_by_numbers::color::default_palette;
//! use paint_by_numbers::{process, PixelBuffer, Settings};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let (width, height) = (2, 2);
//! # let rgba = vec![255u8; 16];
//! let buffer = PixelBuffer::from_raw(width, height, rgba)?;
//! let palette = default_palette(12);
//! let settings = Settings {
//!     segment_size: 1,
//!     simplification: 0,
//!     ..Settings::default()
//! };
//! let processed = process(&buffer, &palette, &settings)?;
//! assert_eq!(processed.segments.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ### Rendering and export
//!
//! ```
//! # use paint_by_numbers::color::default_palette;
//! # use paint_by_numbers::{process, PixelBuffer, Settings};
//! use paint_by_numbers::render::render;
//! use paint_by_numbers::table::{color_table, sticker_sheet, text_table};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let buffer = PixelBuffer::from_raw(2, 2, vec![255u8; 16])?;
//! # let processed = process(&buffer, &default_palette(12), &Settings::default())?;
//! let line_art = render(&processed, 14, false)?;
//! let colored = render(&processed, 14, true)?;
//! let table = color_table(&processed);
//! let stickers = sticker_sheet(&table)?;
//! let text = text_table(&table);
//! # assert_eq!(line_art.width(), colored.width());
//! # assert_eq!(stickers.width(), 900);
//! # assert!(text.starts_with("Color table"));
//! # Ok(())
//! # }
//! ```
#![forbid(
    absolute_paths_not_starting_with_crate,
    missing_docs,
    non_ascii_idents,
    noop_method_call,
    unsafe_code,
    unused_results
)]
#![warn(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

pub mod buffer;
pub mod canvas;
pub mod color;
pub mod error;
mod font;
mod process;
pub mod quantize;
pub mod render;
pub mod segment;
pub mod simplify;
pub mod table;

pub use buffer::PixelBuffer;
pub use process::{process, ProcessedImage, Settings};

/// Returns the linear index of `(x, y)` in a row-major image, or `None` if the
/// point lies outside of the image.
#[inline]
fn index_in_bounds(width: i64, height: i64, x: i64, y: i64) -> Option<usize> {
    if (0..width).contains(&x) && (0..height).contains(&y) {
        u64::try_from(y)
            .ok()?
            .checked_mul(u64::try_from(width).ok()?)?
            .checked_add(u64::try_from(x).ok()?)
            .and_then(|i| usize::try_from(i).ok())
    } else {
        None
    }
}

/// Checks if the index is in bounds and returns a reference to the data at that
/// point if it exists.
#[inline]
fn get_in_bounds<T>(width: i64, height: i64, x: i64, y: i64, image: &[T]) -> Option<&T> {
    image.get(index_in_bounds(width, height, x, y)?)
}

/// Checks if the index is in bounds and returns a mutable reference to the
/// data at that point if it exists.
#[inline]
fn get_mut_in_bounds<T>(
    width: i64,
    height: i64,
    x: i64,
    y: i64,
    image: &mut [T],
) -> Option<&mut T> {
    image.get_mut(index_in_bounds(width, height, x, y)?)
}

/// Calculates the quotient of `lhs` and `rhs` rounded half up.
///
/// `rhs` must not be `0`.
#[inline]
fn div_round(lhs: u64, rhs: u64) -> u64 {
    (lhs.saturating_mul(2).saturating_add(rhs)) / rhs.saturating_mul(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_rejects_points_outside_the_image() {
        assert_eq!(index_in_bounds(3, 2, 0, 0), Some(0));
        assert_eq!(index_in_bounds(3, 2, 2, 1), Some(5));
        assert_eq!(index_in_bounds(3, 2, 3, 0), None);
        assert_eq!(index_in_bounds(3, 2, 0, 2), None);
        assert_eq!(index_in_bounds(3, 2, -1, 0), None);
        assert_eq!(get_in_bounds(3, 2, 1, 1, &[0, 1, 2, 3, 4, 5]), Some(&4));
    }

    #[test]
    fn mutable_lookup_writes_through() {
        let mut data = [0_u8; 6];
        if let Some(v) = get_mut_in_bounds(3, 2, 2, 0, &mut data) {
            *v = 9;
        }
        assert_eq!(data, [0, 0, 9, 0, 0, 0]);
    }

    #[test]
    fn rounding_division_rounds_halves_up() {
        assert_eq!(div_round(9, 2), 5);
        assert_eq!(div_round(7, 3), 2);
        assert_eq!(div_round(8, 3), 3);
        assert_eq!(div_round(0, 4), 0);
    }
}
