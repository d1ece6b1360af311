use clap::Parser;

#[derive(Debug, Parser)]
#[clap(version, about, long_about = None)]
pub struct Opt {
    /// Input image file.
    #[clap(short, long, parse(from_os_str))]
    pub input: std::path::PathBuf,

    /// Directory the schemes, sticker sheet and color table are written to.
    #[clap(short, long, parse(from_os_str), default_value = ".")]
    pub output: std::path::PathBuf,

    /// Minimum number of pixels in a region that receives a number.
    #[clap(short, long, default_value_t = 20)]
    pub segment_size: u32,

    /// Font size of the region numbers in pixels.
    #[clap(short, long, default_value_t = 14)]
    pub font_size: u32,

    /// Number of palette colors to use.
    #[clap(short = 'n', long, default_value_t = 50)]
    pub colors: u32,

    /// Block-average simplification level, 0 disables it.
    #[clap(long, default_value_t = 10)]
    pub simplification: u32,

    /// Palette file with one hexadecimal RGB color per line. Defaults to the
    /// built-in palette of 258 colors.
    #[clap(short, long, parse(from_os_str))]
    pub palette: Option<std::path::PathBuf>,

    /// Skip the sticker sheet and text color table.
    #[clap(long)]
    pub no_table: bool,

    /// Print the number of segments and colors found and time taken.
    #[clap(short, long)]
    pub verbose: bool,
}
