mod args;
mod utils;

use crate::args::Opt;
use crate::utils::{
    load_palette, save_image, COLORED_FILE, LINE_ART_FILE, STICKERS_FILE, TABLE_FILE,
};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paint_by_numbers::render::render;
use paint_by_numbers::table::{color_table, sticker_sheet, text_table};
use paint_by_numbers::{process, PixelBuffer, Settings};
use std::fmt::Write;

fn main() {
    if let Err(e) = try_main() {
        eprintln!("paint_by_numbers: {}", e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let opt = Opt::parse();

    if opt.verbose {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "paint_by_numbers=debug".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    let settings = Settings {
        segment_size: opt.segment_size,
        font_size: opt.font_size,
        color_count: opt.colors,
        simplification: opt.simplification,
    };
    settings.validate()?;
    let palette = load_palette(&opt)?;

    let input_image = image::open(&opt.input)?.into_rgba8();
    let (width, height) = input_image.dimensions();
    let input_buffer = PixelBuffer::from_raw(width, height, input_image.into_raw())?;

    let mut display_string = String::new();

    let t0 = std::time::Instant::now();
    let processed = process(&input_buffer, &palette, &settings)?;
    if opt.verbose {
        write!(&mut display_string, "Processing: {:?}", t0.elapsed())?;
    }

    let t0 = std::time::Instant::now();
    let line_art = render(&processed, settings.font_size, false)?;
    let colored = render(&processed, settings.font_size, true)?;
    if opt.verbose {
        write!(&mut display_string, ", rendering: {:?}", t0.elapsed())?;
    }

    std::fs::create_dir_all(&opt.output)?;
    save_image(&opt.output.join(LINE_ART_FILE), &line_art)?;
    save_image(&opt.output.join(COLORED_FILE), &colored)?;

    if !opt.no_table {
        let table = color_table(&processed);
        save_image(&opt.output.join(STICKERS_FILE), &sticker_sheet(&table)?)?;
        std::fs::write(opt.output.join(TABLE_FILE), text_table(&table))?;
    }

    if opt.verbose {
        write!(
            &mut display_string,
            ", {} segments, {} colors",
            processed.segments.len(),
            processed.colors.len()
        )?;
        println!("{display_string}");
    }

    Ok(())
}
