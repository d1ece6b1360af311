//! Color table, sticker sheet and text export.
//!
//! Display numbers are assigned by sorting the used colors from darkest to
//! lightest, so they are independent of [`PaletteColor::number`].
use crate::buffer::{PixelBuffer, WHITE};
use crate::canvas::{Align, Canvas, TextStyle, Weight};
use crate::color::{ColorUsageMap, PaletteColor};
use crate::error::PbnError;
use crate::ProcessedImage;

use fxhash::FxHashMap;

/// Number of sticker columns.
pub const STICKER_COLUMNS: u32 = 4;
/// Width of a sticker cell.
pub const STICKER_WIDTH: u32 = 200;
/// Height of a sticker cell.
pub const STICKER_HEIGHT: u32 = 80;
/// Gap between and around sticker cells.
pub const STICKER_PADDING: u32 = 20;

const STICKER_BACKGROUND: [u8; 4] = [0xf0, 0xf0, 0xf0, 255];
const STICKER_INK: [u8; 4] = [0x33, 0x33, 0x33, 255];
const SWATCH_OFFSET: i64 = 10;
const SWATCH_SIZE: u32 = 60;
const SWATCH_BORDER: u32 = 2;
const TEXT_OFFSET_X: i64 = 85;
const NUMBER_OFFSET_Y: i64 = 30;
const NUMBER_SIZE: u32 = 32;
const HEX_OFFSET_Y: i64 = 55;
const HEX_SIZE: u32 = 14;

/// A used color and its display number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTableEntry {
    /// One-based position in luminance order.
    pub number: u32,
    /// The palette color.
    pub color: PaletteColor,
}

/// Number the colors of `colors` from darkest to lightest.
///
/// Colors of equal luminance keep their order in the map.
pub fn number_colors(colors: &ColorUsageMap) -> Vec<ColorTableEntry> {
    let mut sorted: Vec<PaletteColor> = colors.iter().copied().collect();
    sorted.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));

    (1..)
        .zip(sorted)
        .map(|(number, color)| ColorTableEntry { number, color })
        .collect()
}

/// The color table of a processed image.
#[inline]
pub fn color_table(processed: &ProcessedImage) -> Vec<ColorTableEntry> {
    number_colors(&processed.colors)
}

/// Map from color key to display number.
pub(crate) fn display_numbers(table: &[ColorTableEntry]) -> FxHashMap<u32, u32> {
    table
        .iter()
        .map(|entry| (entry.color.key(), entry.number))
        .collect()
}

/// Dimensions of the sticker sheet for `count` colors.
pub fn sticker_sheet_size(count: usize) -> Result<(u32, u32), PbnError> {
    let count = u32::try_from(count).or(Err("Too many colors for a sticker sheet"))?;
    let rows = count.div_ceil(STICKER_COLUMNS);
    let width = STICKER_COLUMNS * (STICKER_WIDTH + STICKER_PADDING) + STICKER_PADDING;
    let height = rows
        .checked_mul(STICKER_HEIGHT + STICKER_PADDING)
        .and_then(|h| h.checked_add(STICKER_PADDING))
        .ok_or("Sticker sheet too tall")?;
    Ok((width, height))
}

/// Render a printable sheet with one sticker per table entry.
///
/// Stickers are laid out row by row in table order. Each shows a swatch of
/// the color, its display number and its hexadecimal code.
pub fn sticker_sheet(table: &[ColorTableEntry]) -> Result<PixelBuffer, PbnError> {
    let (width, height) = sticker_sheet_size(table.len())?;
    let mut canvas = Canvas::new(width, height, WHITE)?;

    let number_style = TextStyle {
        size: NUMBER_SIZE,
        weight: Weight::Bold,
        align: Align::Left,
        fill: STICKER_INK,
        outline: None,
    };
    let hex_style = TextStyle {
        size: HEX_SIZE,
        weight: Weight::Regular,
        ..number_style
    };

    for (idx, entry) in (0_u32..).zip(table) {
        let col = idx % STICKER_COLUMNS;
        let row = idx / STICKER_COLUMNS;
        let x = i64::from(col) * i64::from(STICKER_WIDTH + STICKER_PADDING)
            + i64::from(STICKER_PADDING);
        let y = i64::from(row) * i64::from(STICKER_HEIGHT + STICKER_PADDING)
            + i64::from(STICKER_PADDING);

        canvas.fill_rect(x, y, STICKER_WIDTH, STICKER_HEIGHT, STICKER_BACKGROUND);
        canvas.fill_rect(
            x + SWATCH_OFFSET,
            y + SWATCH_OFFSET,
            SWATCH_SIZE,
            SWATCH_SIZE,
            entry.color.rgba(),
        );
        canvas.stroke_rect(
            x + SWATCH_OFFSET,
            y + SWATCH_OFFSET,
            SWATCH_SIZE,
            SWATCH_SIZE,
            SWATCH_BORDER,
            STICKER_INK,
        );
        canvas.draw_text(
            &format!("№{}", entry.number),
            x + TEXT_OFFSET_X,
            y + NUMBER_OFFSET_Y,
            &number_style,
        );
        canvas.draw_text(
            &entry.color.hex().to_uppercase(),
            x + TEXT_OFFSET_X,
            y + HEX_OFFSET_Y,
            &hex_style,
        );
    }

    canvas.into_buffer()
}

/// Format the table as plain text, one color per line in table order.
pub fn text_table(table: &[ColorTableEntry]) -> String {
    let mut text = String::from("Color table\n\n");
    text.push_str("Number | HEX code | RGB\n");
    text.push_str("-------|----------|-----\n");

    for entry in table {
        let [r, g, b] = entry.color.channels();
        text.push_str(&format!(
            "{:>3} | {} | RGB({}, {}, {})\n",
            entry.number,
            entry.color.hex(),
            r,
            g,
            b
        ));
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(colors: &[PaletteColor]) -> ColorUsageMap {
        let mut map = ColorUsageMap::new();
        for &c in colors {
            map.insert(c);
        }
        map
    }

    #[test]
    fn numbers_follow_luminance() {
        let white = PaletteColor::new(1, 255, 255, 255);
        let blue = PaletteColor::new(2, 0, 0, 255);
        let green = PaletteColor::new(3, 0, 255, 0);
        let black = PaletteColor::new(4, 0, 0, 0);
        let table = number_colors(&usage(&[white, blue, green, black]));

        let order: Vec<_> = table.iter().map(|e| (e.number, e.color.number)).collect();
        assert_eq!(order, [(1, 4), (2, 2), (3, 3), (4, 1)]);
        assert!(table
            .windows(2)
            .all(|w| w[0].color.luminance() <= w[1].color.luminance()));
    }

    #[test]
    fn equal_luminance_keeps_map_order() {
        let navy = PaletteColor::new(1, 0, 0, 38);
        let brown = PaletteColor::new(2, 11, 1, 4);
        let black = PaletteColor::new(3, 0, 0, 0);
        assert_eq!(navy.luminance(), brown.luminance());

        let table = number_colors(&usage(&[navy, brown, black]));
        let order: Vec<_> = table.iter().map(|e| e.color.number).collect();
        assert_eq!(order, [3, 1, 2]);

        let table = number_colors(&usage(&[brown, black, navy]));
        let order: Vec<_> = table.iter().map(|e| e.color.number).collect();
        assert_eq!(order, [3, 2, 1]);
    }

    #[test]
    fn display_numbers_by_key() {
        let table = number_colors(&usage(&[
            PaletteColor::new(1, 200, 200, 200),
            PaletteColor::new(2, 20, 20, 20),
        ]));
        let numbers = display_numbers(&table);
        assert_eq!(numbers.get(&20_020_020), Some(&1));
        assert_eq!(numbers.get(&200_200_200), Some(&2));
    }

    #[test]
    fn text_table_layout() {
        let table = [
            ColorTableEntry {
                number: 1,
                color: PaletteColor::new(5, 0, 10, 255),
            },
            ColorTableEntry {
                number: 12,
                color: PaletteColor::new(6, 255, 255, 255),
            },
        ];
        assert_eq!(
            text_table(&table),
            "Color table\n\n\
             Number | HEX code | RGB\n\
             -------|----------|-----\n  \
             1 | #000aff | RGB(0, 10, 255)\n \
             12 | #ffffff | RGB(255, 255, 255)\n"
        );
    }

    #[test]
    fn sheet_geometry() {
        assert_eq!(sticker_sheet_size(0).unwrap(), (900, 20));
        assert_eq!(sticker_sheet_size(4).unwrap(), (900, 120));
        assert_eq!(sticker_sheet_size(5).unwrap(), (900, 220));
    }

    #[test]
    fn stickers_show_swatch_and_background() {
        let red = PaletteColor::new(1, 255, 0, 0);
        let table: Vec<_> = (1..=5)
            .map(|number| ColorTableEntry { number, color: red })
            .collect();
        let sheet = sticker_sheet(&table).unwrap();
        assert_eq!((sheet.width(), sheet.height()), (900, 220));

        // Outer padding stays white
        assert_eq!(sheet.get(5, 5), Some(WHITE));
        // Cell background
        assert_eq!(sheet.get(20 + 195, 20 + 75), Some(STICKER_BACKGROUND));
        // Swatch interior and border of the fifth sticker (second row)
        assert_eq!(sheet.get(20 + 40, 120 + 40), Some([255, 0, 0, 255]));
        assert_eq!(sheet.get(20 + 10, 120 + 40), Some(STICKER_INK));
        // Unused cells of the last row stay white
        assert_eq!(sheet.get(240 + 100, 120 + 40), Some(WHITE));
        // Number label is inked
        let label_ink = (105..200)
            .flat_map(|x| (20..60).map(move |y| (x, y)))
            .filter(|&(x, y)| sheet.get(x, y) == Some(STICKER_INK))
            .count();
        assert!(label_ink > 0);
    }
}
