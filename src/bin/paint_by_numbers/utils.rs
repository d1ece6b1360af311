use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use paint_by_numbers::color::{default_palette, parse_palette, PaletteColor, DEFAULT_PALETTE_SIZE};
use paint_by_numbers::PixelBuffer;

/// Line-art scheme with numbers.
pub const LINE_ART_FILE: &str = "scheme-numbers.png";
/// Quantized scheme with numbers.
pub const COLORED_FILE: &str = "scheme-colored.png";
/// Printable color stickers.
pub const STICKERS_FILE: &str = "color-stickers.png";
/// Plain-text color table.
pub const TABLE_FILE: &str = "color-table.txt";

// Reads the palette file if one was given, otherwise builds the default.
pub fn load_palette(opt: &crate::args::Opt) -> Result<Vec<PaletteColor>, Box<dyn std::error::Error>> {
    match &opt.palette {
        Some(path) => Ok(parse_palette(&std::fs::read_to_string(path)?)?),
        None => Ok(default_palette(DEFAULT_PALETTE_SIZE)),
    }
}

// Saves image buffer to a PNG file.
pub fn save_image(
    output: &std::path::Path,
    image: &PixelBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let w = std::io::BufWriter::new(std::fs::File::create(output)?);

    // Sub filter seemed to result in better filesize compared to Adaptive
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, FilterType::Sub);

    // Clean up if file is created but there's a problem writing to it
    if let Err(err) = encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    ) {
        std::fs::remove_file(output)?;
        return Err(err.into());
    }

    Ok(())
}
