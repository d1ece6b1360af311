//! Row-major RGBA8 pixel buffers shared by every pipeline stage.
use crate::error::PbnError;
use crate::index_in_bounds;

/// Number of byte samples per pixel.
pub const CHANNELS: usize = 4;

/// Fully opaque white.
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// An owned RGBA8 image in row-major order.
///
/// The length of the sample data always equals `width * height * 4`, and both
/// dimensions are non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 samples, validating them against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PbnError> {
        if Some(data.len()) != sample_len(width, height)? {
            return Err(PbnError::MismatchedBuffer);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Result<Self, PbnError> {
        let len = sample_len(width, height)?.ok_or(PbnError::InvalidDimensions)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.extend(color.iter().copied().cycle().take(len));

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the image.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// The raw RGBA8 samples.
    #[inline]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its raw RGBA8 samples.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over the pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// The RGBA sample at `(x, y)` if it lies inside the image.
    pub fn get(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let i = self.sample_index(x, y)?;
        let px = self.data.get(i..i + CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// The RGB components at `(x, y)` if it lies inside the image.
    pub fn rgb(&self, x: i64, y: i64) -> Option<[u8; 3]> {
        self.get(x, y).map(|[r, g, b, _]| [r, g, b])
    }

    /// Overwrite the pixel at `(x, y)`. Points outside the image are ignored.
    pub fn put(&mut self, x: i64, y: i64, color: [u8; 4]) {
        if let Some(i) = self.sample_index(x, y) {
            if let Some(px) = self.data.get_mut(i..i + CHANNELS) {
                px.copy_from_slice(&color);
            }
        }
    }

    #[inline]
    fn sample_index(&self, x: i64, y: i64) -> Option<usize> {
        index_in_bounds(i64::from(self.width), i64::from(self.height), x, y)?.checked_mul(CHANNELS)
    }
}

/// The expected sample count for an image of the given dimensions, or `None`
/// if it does not fit in memory.
fn sample_len(width: u32, height: u32) -> Result<Option<usize>, PbnError> {
    if width == 0 || height == 0 {
        return Err(PbnError::InvalidDimensions);
    }

    Ok(usize::try_from(u64::from(width) * u64::from(height))
        .ok()
        .and_then(|n| n.checked_mul(CHANNELS)))
}
