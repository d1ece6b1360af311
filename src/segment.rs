//! Connected same-color region extraction.
use crate::buffer::PixelBuffer;
use crate::color::color_key;
use crate::error::PbnError;
use crate::{div_round, get_in_bounds, get_mut_in_bounds};

/// Axis-aligned bounding box of a segment, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest X-coordinate.
    pub min_x: u32,
    /// Largest X-coordinate.
    pub max_x: u32,
    /// Smallest Y-coordinate.
    pub min_y: u32,
    /// Largest Y-coordinate.
    pub max_y: u32,
}

impl Bounds {
    /// Horizontal extent, `max_x - min_x`.
    #[inline]
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Vertical extent, `max_y - min_y`.
    #[inline]
    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }
}

/// A maximal 4-connected region of pixels sharing one quantized color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// [`color_key`] of the region's color.
    pub color_key: u32,
    /// Member pixel coordinates as `(x, y)` pairs.
    pub pixels: Vec<(u32, u32)>,
    /// Rounded mean X-coordinate of the member pixels.
    pub center_x: u32,
    /// Rounded mean Y-coordinate of the member pixels.
    pub center_y: u32,
    /// Extremal coordinates of the member pixels.
    pub bounds: Bounds,
}

impl Segment {
    /// Build a segment from a non-empty list of member pixels.
    fn from_pixels(color_key: u32, pixels: Vec<(u32, u32)>) -> Result<Self, PbnError> {
        let &(first_x, first_y) = pixels.first().ok_or("Segment has no pixels")?;
        let mut bounds = Bounds {
            min_x: first_x,
            max_x: first_x,
            min_y: first_y,
            max_y: first_y,
        };
        let (mut sum_x, mut sum_y) = (0_u64, 0_u64);

        for &(x, y) in &pixels {
            sum_x += u64::from(x);
            sum_y += u64::from(y);
            bounds.min_x = bounds.min_x.min(x);
            bounds.max_x = bounds.max_x.max(x);
            bounds.min_y = bounds.min_y.min(y);
            bounds.max_y = bounds.max_y.max(y);
        }

        let count = u64::try_from(pixels.len()).or(Err("Invalid segment size"))?;
        let center_x = u32::try_from(div_round(sum_x, count)).or(Err("Invalid center x"))?;
        let center_y = u32::try_from(div_round(sum_y, count)).or(Err("Invalid center y"))?;

        Ok(Self {
            color_key,
            pixels,
            center_x,
            center_y,
            bounds,
        })
    }

    /// Number of member pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

/// Find the 4-connected regions of identical RGB color in `image`.
///
/// Regions are discovered in row-major order of their first pixel. Regions
/// with fewer than `min_segment_size` pixels are dropped and their pixels
/// belong to no segment.
pub fn segment(image: &PixelBuffer, min_segment_size: u32) -> Result<Vec<Segment>, PbnError> {
    let width = i64::from(image.width());
    let height = i64::from(image.height());
    let min_pixels = usize::try_from(min_segment_size).or(Err("Invalid segment size"))?;

    let mut visited = Vec::new();
    visited.try_reserve_exact(image.pixel_count())?;
    visited.extend((0..image.pixel_count()).map(|_| false));

    // Reused across regions; holds pixels that are marked but not expanded
    let mut stack = Vec::new();
    let mut segments = Vec::new();
    let mut discarded = 0_usize;

    for y in 0..height {
        for x in 0..width {
            if *get_in_bounds(width, height, x, y, &visited).ok_or("Seed out of bounds")? {
                continue;
            }

            let target = image.rgb(x, y).ok_or("Seed color out of bounds")?;
            let pixels = flood_fill(image, (x, y), target, &mut visited, &mut stack)?;

            if pixels.len() >= min_pixels {
                segments.push(Segment::from_pixels(color_key(target), pixels)?);
            } else {
                discarded += 1;
            }
        }
    }

    tracing::debug!(
        segments = segments.len(),
        discarded,
        "segmented image"
    );

    Ok(segments)
}

/// Collect every pixel 4-connected to `seed` whose color equals `target`,
/// marking each as visited.
fn flood_fill(
    image: &PixelBuffer,
    seed: (i64, i64),
    target: [u8; 3],
    visited: &mut [bool],
    stack: &mut Vec<(i64, i64)>,
) -> Result<Vec<(u32, u32)>, PbnError> {
    let width = i64::from(image.width());
    let height = i64::from(image.height());
    let neighbors = [(1, 0), (-1, 0), (0, 1), (0, -1)];

    let mut pixels = Vec::new();
    stack.clear();
    *get_mut_in_bounds(width, height, seed.0, seed.1, visited).ok_or("Seed out of bounds")? = true;
    stack.push(seed);

    while let Some((x, y)) = stack.pop() {
        pixels.push((
            u32::try_from(x).or(Err("Invalid fill x"))?,
            u32::try_from(y).or(Err("Invalid fill y"))?,
        ));

        for &(dx, dy) in &neighbors {
            let (n_x, n_y) = (x + dx, y + dy);
            if let Some(seen) = get_mut_in_bounds(width, height, n_x, n_y, visited) {
                if !*seen && image.rgb(n_x, n_y) == Some(target) {
                    *seen = true;
                    stack.push((n_x, n_y));
                }
            }
        }
    }

    Ok(pixels)
}
