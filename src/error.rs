//! Pipeline error enums.
use std::collections::TryReserveError;

/// Error for paint-by-numbers processing.
#[derive(Clone, Debug)]
pub enum PbnError {
    /// The palette contains no colors.
    InvalidPalette,
    /// The image `width` and/or `height` is equal to `0`.
    InvalidDimensions,
    /// The pixel buffer length does not equal `width * height * 4`.
    MismatchedBuffer,
    /// A processing setting is outside its allowed range.
    InvalidSettings(&'static str),
    /// A palette color could not be parsed from its hexadecimal form.
    ParseColor(ParseColorError),
    /// Space could not be reserved for a collection required during
    /// processing.
    Reserve(TryReserveError),
    /// A general error occurred.
    General(&'static str),
}

impl std::fmt::Display for PbnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPalette => write!(f, "Palette must contain at least one color"),
            Self::InvalidDimensions => write!(f, "Image dimension cannot be 0"),
            Self::MismatchedBuffer => {
                write!(f, "Pixel buffer length does not equal image dimensions")
            }
            Self::InvalidSettings(e) => write!(f, "Invalid settings: {e}"),
            Self::ParseColor(e) => write!(f, "{e}"),
            Self::Reserve(e) => write!(f, "{e}"),
            Self::General(e) => write!(f, "{e}"),
        }
    }
}

/// Errors that can occur while reading a palette description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseColorError {
    /// One-based line number of the offending entry.
    pub line: usize,
}

impl std::fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid hex color on palette line {}", self.line)
    }
}

impl std::error::Error for PbnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reserve(e) => e.source(),
            Self::InvalidPalette
            | Self::InvalidDimensions
            | Self::MismatchedBuffer
            | Self::InvalidSettings(_)
            | Self::ParseColor(_)
            | Self::General(_) => None,
        }
    }
}

impl std::convert::From<TryReserveError> for PbnError {
    fn from(error: TryReserveError) -> Self {
        Self::Reserve(error)
    }
}

impl std::convert::From<ParseColorError> for PbnError {
    fn from(error: ParseColorError) -> Self {
        Self::ParseColor(error)
    }
}

impl std::convert::From<&'static str> for PbnError {
    fn from(error: &'static str) -> Self {
        Self::General(error)
    }
}
