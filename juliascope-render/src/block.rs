/// Spacing in pixels between coarse-pass samples on both axes.
pub const COARSE_STEP: u32 = 8;

/// A coarse-pass block: one sample point and the clipped square it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Pixel x of the sample point (may lie past the right edge).
    pub sample_x: u32,
    /// Pixel y of the sample point (may lie past the bottom edge).
    pub sample_y: u32,
    /// Pixel x of the top-left corner of the filled area.
    pub x: u32,
    /// Pixel y of the top-left corner of the filled area.
    pub y: u32,
    /// Filled width (smaller than the step at the edges).
    pub width: u32,
    /// Filled height (smaller than the step at the edges).
    pub height: u32,
}

impl Block {
    /// Number of pixels this block fills.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Build the coarse grid for a `width × height` buffer, one `Vec` per block row.
///
/// Samples sit at `0, 8, 16, …` while below `dim + 4`; each fills the
/// `8 × 8` square centred on it, clipped to the buffer, so the blocks tile
/// the buffer exactly.
pub fn build_block_rows(width: u32, height: u32) -> Vec<Vec<Block>> {
    let half = COARSE_STEP / 2;
    let spans = |dim: u32| -> Vec<(u32, u32, u32)> {
        (0..dim + half)
            .step_by(COARSE_STEP as usize)
            .map(|s| {
                let start = s.saturating_sub(half);
                let end = (s + half).min(dim);
                (s, start, end - start)
            })
            .collect()
    };

    let columns = spans(width);
    spans(height)
        .into_iter()
        .map(|(sample_y, y, h)| {
            columns
                .iter()
                .map(|&(sample_x, x, w)| Block {
                    sample_x,
                    sample_y,
                    x,
                    y,
                    width: w,
                    height: h,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_grid_covers_buffer() {
        let rows = build_block_rows(200, 150);
        let total_pixels: usize = rows.iter().flatten().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 200 * 150);
    }

    #[test]
    fn block_grid_no_overlap() {
        let (w, h) = (37u32, 21u32);
        let mut covered = vec![false; (w * h) as usize];
        for block in build_block_rows(w, h).iter().flatten() {
            for py in block.y..block.y + block.height {
                for px in block.x..block.x + block.width {
                    let idx = (py * w + px) as usize;
                    assert!(!covered[idx], "pixel ({px}, {py}) covered twice");
                    covered[idx] = true;
                }
            }
        }
        assert!(covered.iter().all(|&c| c), "all pixels must be covered");
    }

    #[test]
    fn samples_every_eighth_pixel() {
        let rows = build_block_rows(20, 9);
        let xs: Vec<u32> = rows[0].iter().map(|b| b.sample_x).collect();
        let ys: Vec<u32> = rows.iter().map(|r| r[0].sample_y).collect();
        assert_eq!(xs, vec![0, 8, 16]);
        assert_eq!(ys, vec![0, 8]);
    }

    #[test]
    fn edge_blocks_are_clipped() {
        let rows = build_block_rows(20, 9);
        let first = rows[0][0];
        assert_eq!((first.x, first.y, first.width, first.height), (0, 0, 4, 4));
        let last = *rows[1].last().unwrap();
        assert_eq!((last.x, last.y, last.width, last.height), (12, 4, 8, 5));
    }

    #[test]
    fn block_size_respects_step() {
        for block in build_block_rows(256, 100).iter().flatten() {
            assert!(block.width <= COARSE_STEP && block.width > 0);
            assert!(block.height <= COARSE_STEP && block.height > 0);
        }
    }
}
