//! A minimal raster drawing surface for schemes and sticker sheets.
//!
//! The canvas wraps an [`RgbaImage`] and draws rectangles with `imageproc`.
//! Drawing is aliased: every primitive either fully covers a pixel or leaves
//! it untouched. Coordinates outside the surface are clipped.
use crate::buffer::PixelBuffer;
use crate::error::PbnError;
use crate::font;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

/// Stroke thickness of text set in [`Weight::Bold`], in font units.
const BOLD_EXTRA: u32 = 1;

/// Font weight used by [`Canvas::draw_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    /// Single-unit strokes.
    Regular,
    /// Strokes widened by one font unit to the right.
    Bold,
}

/// Horizontal anchoring of text relative to the given point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// The point marks the left edge of the text.
    Left,
    /// The point marks the horizontal middle of the text.
    Center,
}

/// Appearance of drawn text. Text is always centered vertically on the
/// anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Font size in pixels; the glyph height is the nearest multiple of seven.
    pub size: u32,
    /// Font weight.
    pub weight: Weight,
    /// Horizontal anchoring.
    pub align: Align,
    /// Glyph fill color.
    pub fill: [u8; 4],
    /// Optional outline color and its total stroke width in pixels.
    pub outline: Option<([u8; 4], u32)>,
}

impl TextStyle {
    /// Width and height in pixels of `text` drawn in this style.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        let scale = font::scale(self.size);
        let count = u32::try_from(font::glyphs(text).count()).unwrap_or(u32::MAX);
        if count == 0 {
            return (0, 0);
        }

        let glyph_units = font::GLYPH_WIDTH + self.bold_extra();
        // One unit of spacing between glyphs
        let units = count
            .saturating_mul(glyph_units + 1)
            .saturating_sub(1);
        (
            units.saturating_mul(scale),
            font::GLYPH_HEIGHT.saturating_mul(scale),
        )
    }

    #[inline]
    fn bold_extra(&self) -> u32 {
        match self.weight {
            Weight::Regular => 0,
            Weight::Bold => BOLD_EXTRA,
        }
    }
}

/// A drawing surface that owns the pixels it draws on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: [u8; 4]) -> Result<Self, PbnError> {
        Self::from_buffer(PixelBuffer::filled(width, height, background)?)
    }

    /// Draw on top of an existing image.
    pub fn from_buffer(buffer: PixelBuffer) -> Result<Self, PbnError> {
        let (width, height) = (buffer.width(), buffer.height());
        let image = RgbaImage::from_raw(width, height, buffer.into_raw())
            .ok_or(PbnError::MismatchedBuffer)?;
        Ok(Self { image })
    }

    /// Finish drawing and return the image.
    pub fn into_buffer(self) -> Result<PixelBuffer, PbnError> {
        let (width, height) = self.image.dimensions();
        PixelBuffer::from_raw(width, height, self.image.into_raw())
    }

    /// Set a single pixel.
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
            if x < self.image.width() && y < self.image.height() {
                self.image.put_pixel(x, y, Rgba(color));
            }
        }
    }

    /// Fill the rectangle with top-left corner `(x, y)`.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: [u8; 4]) {
        if let Some(rect) = to_rect(x, y, width, height) {
            draw_filled_rect_mut(&mut self.image, rect, Rgba(color));
        }
    }

    /// Outline the rectangle with top-left corner `(x, y)`.
    ///
    /// The stroke is centered on the rectangle's edge, so `line_width / 2`
    /// pixels fall outside of it.
    pub fn stroke_rect(
        &mut self,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        line_width: u32,
        color: [u8; 4],
    ) {
        let outside = i64::from(line_width / 2);
        let outer_w = width.saturating_add(line_width);
        let outer_h = height.saturating_add(line_width);

        // One single-pixel ring per unit of stroke width, outermost first
        for ring in 0..line_width {
            let inset = ring.saturating_mul(2);
            let ring_rect = to_rect(
                x - outside + i64::from(ring),
                y - outside + i64::from(ring),
                outer_w.saturating_sub(inset),
                outer_h.saturating_sub(inset),
            );
            match ring_rect {
                Some(rect) => draw_hollow_rect_mut(&mut self.image, rect, Rgba(color)),
                None => break,
            }
        }
    }

    /// Draw `text` anchored at `(x, y)`.
    ///
    /// When the style has an outline, it is drawn first as a square
    /// dilation of the glyphs by half its width, rounded down, and the fill is
    /// drawn over it.
    pub fn draw_text(&mut self, text: &str, x: i64, y: i64, style: &TextStyle) {
        let (text_w, text_h) = style.measure(text);
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - i64::from(text_w / 2),
        };
        let top = y - i64::from(text_h / 2);

        let scale = i64::from(font::scale(style.size));
        let advance = i64::from(font::GLYPH_WIDTH + style.bold_extra() + 1) * scale;
        let extra = i64::from(style.bold_extra());

        // Top-left corners of every lit font cell
        let mut cells = Vec::new();
        for (glyph_idx, glyph) in (0_i64..).zip(font::glyphs(text)) {
            let origin = left + glyph_idx * advance;
            for (col, row) in font::cells(glyph) {
                for shift in 0..=extra {
                    cells.push((
                        origin + (i64::from(col) + shift) * scale,
                        top + i64::from(row) * scale,
                    ));
                }
            }
        }

        let cell = u32::try_from(scale).unwrap_or(1);
        if let Some((outline, line_width)) = style.outline {
            let radius = line_width / 2;
            let r = i64::from(radius);
            for &(cx, cy) in &cells {
                self.fill_rect(cx - r, cy - r, cell + 2 * radius, cell + 2 * radius, outline);
            }
        }
        for &(cx, cy) in &cells {
            self.fill_rect(cx, cy, cell, cell, style.fill);
        }
    }
}

/// The rectangle at `(x, y)`, or `None` if it is empty or any of its edges
/// lies beyond the `i32` coordinate range.
fn to_rect(x: i64, y: i64, width: u32, height: u32) -> Option<Rect> {
    let (left, top) = (i32::try_from(x).ok()?, i32::try_from(y).ok()?);
    let fits = |start: i32, len: u32| i32::try_from(i64::from(start) + i64::from(len)).is_ok();
    if width == 0 || height == 0 || !fits(left, width) || !fits(top, height) {
        return None;
    }
    Some(Rect::at(left, top).of_size(width, height))
}
