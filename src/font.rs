//! Built-in 5x7 bitmap face for labels and sticker captions.
//!
//! Each glyph is seven rows of five bits, most significant bit on the left.

/// Glyph width in font units.
pub(crate) const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font units.
pub(crate) const GLYPH_HEIGHT: u32 = 7;

type Glyph = [u8; 7];

const BLANK: Glyph = [0; 7];

fn glyph(c: char) -> Glyph {
    if c == 'o' {
        return [0x00, 0x00, 0x0E, 0x11, 0x11, 0x11, 0x0E];
    }

    match c.to_ascii_uppercase() {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        '#' => [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A],
        _ => BLANK,
    }
}

/// Glyphs for `text` in drawing order. The numero sign is spelled `No`.
pub(crate) fn glyphs(text: &str) -> impl Iterator<Item = Glyph> + '_ {
    text.chars().flat_map(|c| {
        let pair = if c == '№' { ['N', 'o'] } else { [c, '\0'] };
        pair.into_iter().filter(|&c| c != '\0').map(glyph)
    })
}

/// Pixels per font unit for a font `size` in pixels, at least `1`.
#[inline]
pub(crate) fn scale(size: u32) -> u32 {
    ((size + GLYPH_HEIGHT / 2) / GLYPH_HEIGHT).max(1)
}

/// Lit `(column, row)` cells of a glyph in font units.
pub(crate) fn cells(glyph: Glyph) -> impl Iterator<Item = (u32, u32)> {
    (0..GLYPH_HEIGHT).flat_map(move |row| {
        let bits = usize::try_from(row)
            .ok()
            .and_then(|i| glyph.get(i))
            .copied()
            .unwrap_or(0);
        (0..GLYPH_WIDTH).filter_map(move |col| {
            if bits & (0x10 >> col) != 0 {
                Some((col, row))
            } else {
                None
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numero_expands_to_two_glyphs() {
        assert_eq!(glyphs("№12").count(), 4);
        assert_eq!(glyphs("#A0B1C2").count(), 7);
    }

    #[test]
    fn unknown_characters_are_blank() {
        assert_eq!(glyphs("?").next(), Some(BLANK));
        assert_eq!(glyph('a'), glyph('A'));
        assert_ne!(glyph('o'), glyph('O'));
    }

    #[test]
    fn scale_rounds_to_nearest_unit() {
        assert_eq!(scale(1), 1);
        assert_eq!(scale(7), 1);
        assert_eq!(scale(14), 2);
        assert_eq!(scale(32), 5);
    }

    #[test]
    fn one_has_a_centered_stem() {
        let lit: Vec<_> = cells(glyph('1')).collect();
        assert!(lit.contains(&(2, 0)));
        assert!(lit.contains(&(2, 6)));
        assert_eq!(lit.len(), 10);
    }
}
