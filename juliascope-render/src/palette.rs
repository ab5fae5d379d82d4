use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::iteration_buffer::IterationBuffer;

/// Packed color for an escape count: `n | (n << 21)`.
///
/// Bits shifted past 32 are dropped, and only the low 24 bits are used as
/// `0xRRGGBB`, so counts above 2047 wrap into the blue and green channels
/// instead of saturating. That wrap is part of the expected output.
#[inline]
pub fn packed_color(iterations: u32) -> u32 {
    iterations | (iterations << 21)
}

/// RGBA bytes for an escape count, always opaque.
#[inline]
pub fn color(iterations: u32) -> [u8; 4] {
    let rgb = packed_color(iterations);
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255]
}

/// Colorize an entire iteration buffer into an RGBA pixel buffer.
pub fn colorize(iter_buf: &IterationBuffer) -> RenderBuffer {
    let len = iter_buf.data.len();
    let mut pixels = vec![0u8; len * 4];
    pixels
        .par_chunks_mut(4)
        .zip(iter_buf.data.par_iter())
        .for_each(|(pixel, &n)| pixel.copy_from_slice(&color(n)));
    RenderBuffer {
        width: iter_buf.width,
        height: iter_buf.height,
        pixels,
    }
}
