//! Block-average denoising applied before quantization.
use crate::buffer::{PixelBuffer, CHANNELS};
use crate::div_round;
use crate::error::PbnError;

/// Intensity units per pixel of block side length.
const LEVEL_PER_BLOCK: u32 = 20;

/// Side length of the averaging tiles for a simplification `level`.
#[inline]
pub fn block_size(level: u32) -> u32 {
    (level / LEVEL_PER_BLOCK).max(1)
}

/// Replace the color of every `block_size(level)` square tile with the tile's
/// mean color.
///
/// Tiles on the right and bottom edges are clipped to the image. The alpha
/// channel of the output is always `255`. A `level` of `0` returns an
/// unchanged copy of `image`.
pub fn simplify(image: &PixelBuffer, level: u32) -> Result<PixelBuffer, PbnError> {
    if level == 0 {
        return Ok(image.clone());
    }

    let block = block_size(level);
    let step = usize::try_from(block).or(Err("Invalid simplification block size"))?;
    let width = image.width();
    let height = image.height();
    let width_us = usize::try_from(width).or(Err("Invalid image width"))?;
    let source = image.as_raw();

    let mut output = Vec::new();
    output.try_reserve_exact(source.len())?;
    output.extend(source.iter().copied());

    for tile_y in (0..height).step_by(step) {
        let rows = tile_y..height.min(tile_y.saturating_add(block));
        for tile_x in (0..width).step_by(step) {
            let cols = tile_x..width.min(tile_x.saturating_add(block));

            let mut sum = [0_u64; 3];
            let mut count = 0_u64;
            for y in rows.clone() {
                for x in cols.clone() {
                    let i = sample_index(width_us, x, y)?;
                    let px = source.get(i..i + 3).ok_or("Tile sample out of bounds")?;
                    for (acc, &c) in sum.iter_mut().zip(px) {
                        *acc += u64::from(c);
                    }
                    count += 1;
                }
            }

            let mut mean = [0_u8, 0, 0, 255];
            for (m, &acc) in mean.iter_mut().zip(sum.iter()) {
                *m = u8::try_from(div_round(acc, count)).or(Err("Tile mean out of range"))?;
            }

            for y in rows.clone() {
                for x in cols.clone() {
                    let i = sample_index(width_us, x, y)?;
                    output
                        .get_mut(i..i + CHANNELS)
                        .ok_or("Tile sample out of bounds")?
                        .copy_from_slice(&mean);
                }
            }
        }
    }

    PixelBuffer::from_raw(width, height, output)
}

#[inline]
fn sample_index(width: usize, x: u32, y: u32) -> Result<usize, PbnError> {
    let x = usize::try_from(x).or(Err("Invalid tile x"))?;
    let y = usize::try_from(y).or(Err("Invalid tile y"))?;
    y.checked_mul(width)
        .and_then(|i| i.checked_add(x))
        .and_then(|i| i.checked_mul(CHANNELS))
        .ok_or(PbnError::General("Tile index overflow"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height)
            .flat_map(|i| {
                let v = u8::try_from(i * 7 % 256).unwrap();
                [v, 255 - v, v / 2, 100]
            })
            .collect();
        PixelBuffer::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn level_zero_is_identity() {
        let image = gradient(5, 4);
        assert_eq!(simplify(&image, 0).unwrap(), image);
    }

    #[test]
    fn block_size_follows_level() {
        assert_eq!(block_size(1), 1);
        assert_eq!(block_size(19), 1);
        assert_eq!(block_size(20), 1);
        assert_eq!(block_size(40), 2);
        assert_eq!(block_size(65), 3);
    }

    #[test]
    fn block_size_one_only_forces_alpha() {
        let image = gradient(3, 3);
        let out = simplify(&image, 10).unwrap();
        for (a, b) in image.pixels().zip(out.pixels()) {
            assert_eq!(&a[..3], &b[..3]);
            assert_eq!(b[3], 255);
        }
    }

    #[test]
    fn tiles_are_averaged_and_clipped() {
        // 3x1 image with block size 2: tile [0, 1] and clipped tile [2].
        let data = vec![10, 0, 0, 0, 21, 0, 255, 0, 7, 7, 7, 7];
        let image = PixelBuffer::from_raw(3, 1, data).unwrap();
        let out = simplify(&image, 40).unwrap();
        assert_eq!(
            out.as_raw(),
            &[16, 0, 128, 255, 16, 0, 128, 255, 7, 7, 7, 255]
        );
    }

    #[test]
    fn mean_stays_within_tile_extremes() {
        let image = gradient(7, 5);
        let level = 60;
        let block = block_size(level);
        let out = simplify(&image, level).unwrap();

        for y in 0..5_u32 {
            for x in 0..7_u32 {
                let (tx, ty) = (x / block * block, y / block * block);
                let px = out.get(i64::from(x), i64::from(y)).unwrap();
                for c in 0..3 {
                    let tile: Vec<u8> = (ty..(ty + block).min(5))
                        .flat_map(|sy| (tx..(tx + block).min(7)).map(move |sx| (sx, sy)))
                        .map(|(sx, sy)| image.get(i64::from(sx), i64::from(sy)).unwrap()[c])
                        .collect();
                    let min = *tile.iter().min().unwrap();
                    let max = *tile.iter().max().unwrap();
                    assert!(min <= px[c] && px[c] <= max);
                }
            }
        }
    }
}
