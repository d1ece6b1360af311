//! Drawing numbered schemes from a [`ProcessedImage`].
use crate::buffer::{PixelBuffer, WHITE};
use crate::canvas::{Align, Canvas, TextStyle, Weight};
use crate::color::{color_key, luminance};
use crate::error::PbnError;
use crate::segment::Segment;
use crate::table::{color_table, display_numbers};
use crate::ProcessedImage;

/// Color of region borders in line-art mode.
pub const BORDER_COLOR: [u8; 4] = [0xcc, 0xcc, 0xcc, 255];

/// Total outline width around label glyphs.
const LABEL_OUTLINE: u32 = 3;

/// Luminance above which a pixel counts as light.
const LIGHT_THRESHOLD: f64 = 128.0;

const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Render a numbered scheme.
///
/// With `show_colors` the quantized image is used as the background,
/// otherwise a white image with light gray borders between regions of
/// different color. Every segment whose bounding box is wider and taller than
/// `1.5 * font_size` is labeled with its display number at its center.
pub fn render(
    processed: &ProcessedImage,
    font_size: u32,
    show_colors: bool,
) -> Result<PixelBuffer, PbnError> {
    let mut canvas = if show_colors {
        Canvas::from_buffer(processed.quantized.clone())?
    } else {
        Canvas::from_buffer(line_art(&processed.quantized)?)?
    };

    let numbers = display_numbers(&color_table(processed));
    let min_extent = f64::from(font_size) * 1.5;
    let mut labeled = 0_usize;

    for segment in processed
        .segments
        .iter()
        .filter(|s| fits_label(s, min_extent))
    {
        // Every segment color comes from the usage map
        let number = numbers.get(&segment.color_key).copied().unwrap_or(0);
        let (x, y) = (i64::from(segment.center_x), i64::from(segment.center_y));
        let (fill, outline) = if show_colors {
            label_colors(&processed.quantized, x, y)
        } else {
            (BLACK, WHITE)
        };

        let style = TextStyle {
            size: font_size,
            weight: Weight::Bold,
            align: Align::Center,
            fill,
            outline: Some((outline, LABEL_OUTLINE)),
        };
        canvas.draw_text(&number.to_string(), x, y, &style);
        labeled += 1;
    }

    tracing::debug!(
        labeled,
        segments = processed.segments.len(),
        show_colors,
        "rendered scheme"
    );

    canvas.into_buffer()
}

/// Whether `segment` is large enough to carry a label.
#[inline]
fn fits_label(segment: &Segment, min_extent: f64) -> bool {
    f64::from(segment.bounds.width()) > min_extent && f64::from(segment.bounds.height()) > min_extent
}

/// Fill and outline colors contrasting with the pixel at `(x, y)`.
fn label_colors(image: &PixelBuffer, x: i64, y: i64) -> ([u8; 4], [u8; 4]) {
    match image.rgb(x, y) {
        Some(rgb) if luminance(rgb) > LIGHT_THRESHOLD => (BLACK, WHITE),
        _ => (WHITE, BLACK),
    }
}

/// A white image with borders wherever horizontally or vertically adjacent
/// pixels of `quantized` differ in color.
///
/// The border between a pixel and its right or bottom neighbor is drawn on
/// the pixel itself; the image's outer edge gets no border.
pub fn line_art(quantized: &PixelBuffer) -> Result<PixelBuffer, PbnError> {
    let width = i64::from(quantized.width());
    let height = i64::from(quantized.height());
    let mut canvas = Canvas::new(quantized.width(), quantized.height(), WHITE)?;

    for y in 0..height {
        for x in 0..width {
            let here = quantized.rgb(x, y).map(color_key);
            let right = quantized.rgb(x + 1, y).map(color_key);
            let below = quantized.rgb(x, y + 1).map(color_key);

            let right_edge = right.is_some() && right != here;
            let bottom_edge = below.is_some() && below != here;
            if right_edge || bottom_edge {
                canvas.put_pixel(x, y, BORDER_COLOR);
            }
        }
    }

    canvas.into_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PaletteColor;
    use crate::{process, Settings};

    const DARK: [u8; 4] = [20, 20, 20, 255];
    const LIGHT: [u8; 4] = [230, 230, 230, 255];

    fn processed(image: &PixelBuffer, segment_size: u32) -> ProcessedImage {
        let palette = [
            PaletteColor::new(1, 230, 230, 230),
            PaletteColor::new(2, 20, 20, 20),
        ];
        let settings = Settings {
            segment_size,
            simplification: 0,
            ..Settings::default()
        };
        process(image, &palette, &settings).unwrap()
    }

    fn split(width: u32, height: u32, boundary: u32) -> PixelBuffer {
        let data = (0..height)
            .flat_map(|_| (0..width).map(move |x| if x < boundary { DARK } else { LIGHT }))
            .flatten()
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn line_art_marks_discontinuities_once() {
        let image = split(4, 3, 2);
        let art = line_art(&image).unwrap();

        for y in 0..3 {
            for x in 0..4 {
                let expected = if x == 1 { BORDER_COLOR } else { WHITE };
                assert_eq!(art.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn line_art_bottom_edges() {
        let data = [DARK, DARK, LIGHT, LIGHT].concat();
        let image = PixelBuffer::from_raw(2, 2, data).unwrap();
        let art = line_art(&image).unwrap();

        assert_eq!(art.get(0, 0), Some(BORDER_COLOR));
        assert_eq!(art.get(1, 0), Some(BORDER_COLOR));
        assert_eq!(art.get(0, 1), Some(WHITE));
        assert_eq!(art.get(1, 1), Some(WHITE));
    }

    #[test]
    fn uniform_line_art_is_blank() {
        let image = PixelBuffer::filled(5, 5, DARK).unwrap();
        let art = line_art(&image).unwrap();
        assert!(art.pixels().all(|px| px == WHITE));
    }

    #[test]
    fn small_segments_are_not_labeled() {
        // Bounding box extent 9 is not larger than 1.5 * 7 = 10.5
        let image = PixelBuffer::filled(10, 10, DARK).unwrap();
        let processed = processed(&image, 1);
        let colored = render(&processed, 7, true).unwrap();
        assert_eq!(colored, processed.quantized);

        let art = render(&processed, 7, false).unwrap();
        assert!(art.pixels().all(|px| px == WHITE));
    }

    #[test]
    fn labels_contrast_with_background() {
        let image = split(60, 30, 30);
        let processed = processed(&image, 1);
        let colored = render(&processed, 7, true).unwrap();

        // Dark half gets the number 1 in white, light half 2 in black
        let left = &processed.segments[0];
        let right = &processed.segments[1];
        let count_in = |seg: &crate::segment::Segment, color: [u8; 4]| {
            seg.pixels
                .iter()
                .filter(|&&(x, y)| colored.get(i64::from(x), i64::from(y)) == Some(color))
                .count()
        };
        assert!(count_in(left, WHITE) > 0);
        assert!(count_in(right, BLACK) > 0);
        // Outlines use the opposite color
        assert!(count_in(left, BLACK) > 0);
    }

    #[test]
    fn line_art_labels_are_black_on_white() {
        let image = split(60, 30, 30);
        let processed = processed(&image, 1);
        let art = render(&processed, 7, false).unwrap();

        let black = art.pixels().filter(|px| *px == BLACK).count();
        assert!(black > 0);
        assert!(art
            .pixels()
            .all(|px| px == BLACK || px == WHITE || px == BORDER_COLOR));
    }

    fn label(
        canvas: &mut Canvas,
        text: &str,
        center: (u32, u32),
        fill: [u8; 4],
        outline: [u8; 4],
    ) {
        let style = TextStyle {
            size: 7,
            weight: Weight::Bold,
            align: Align::Center,
            fill,
            outline: Some((outline, LABEL_OUTLINE)),
        };
        canvas.draw_text(text, i64::from(center.0), i64::from(center.1), &style);
    }

    #[test]
    fn labels_carry_luminance_rank() {
        // The dark half is palette entry 2 but ranks first by luminance
        let image = split(60, 30, 30);
        let processed = processed(&image, 1);
        let dark = &processed.segments[0];
        let light = &processed.segments[1];
        assert_eq!((dark.center_x, dark.center_y), (15, 15));
        assert_eq!((light.center_x, light.center_y), (45, 15));

        let colored = render(&processed, 7, true).unwrap();
        let mut expected = Canvas::from_buffer(processed.quantized.clone()).unwrap();
        label(&mut expected, "1", (15, 15), WHITE, BLACK);
        label(&mut expected, "2", (45, 15), BLACK, WHITE);
        assert_eq!(colored, expected.into_buffer().unwrap());

        let mut swapped = Canvas::from_buffer(processed.quantized.clone()).unwrap();
        label(&mut swapped, "2", (15, 15), WHITE, BLACK);
        label(&mut swapped, "1", (45, 15), BLACK, WHITE);
        assert_ne!(colored, swapped.into_buffer().unwrap());

        let art = render(&processed, 7, false).unwrap();
        let mut expected = Canvas::from_buffer(line_art(&processed.quantized).unwrap()).unwrap();
        label(&mut expected, "1", (15, 15), BLACK, WHITE);
        label(&mut expected, "2", (45, 15), BLACK, WHITE);
        assert_eq!(art, expected.into_buffer().unwrap());
    }
}
