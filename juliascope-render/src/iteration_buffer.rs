use crate::block::Block;

/// Stores per-pixel escape counts for a full frame.
///
/// This is the raw output of the renderer before coloring. Keeping counts
/// separate from colored pixels lets a frontend recolor without
/// re-computing iterations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationBuffer {
    pub width: u32,
    pub height: u32,
    pub max_iterations: u32,
    pub data: Vec<u32>,
}

impl IterationBuffer {
    pub fn new(width: u32, height: u32, max_iterations: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            max_iterations,
            data: vec![0; size],
        }
    }

    /// Count at pixel `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    pub fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.width as usize;
        &mut self.data[start..start + self.width as usize]
    }

    /// Fill a coarse block with a single count.
    pub fn fill_block(&mut self, block: &Block, value: u32) {
        for py in block.y..block.y + block.height {
            let start = (py * self.width + block.x) as usize;
            self.data[start..start + block.width as usize].fill(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = IterationBuffer::new(5, 3, 100);
        assert_eq!(buf.data.len(), 15);
        assert!(buf.data.iter().all(|&n| n == 0));
        assert_eq!(buf.get(5, 0), None);
        assert_eq!(buf.get(0, 3), None);
    }

    #[test]
    fn fill_block_writes_only_its_region() {
        let mut buf = IterationBuffer::new(8, 8, 10);
        let block = Block {
            sample_x: 4,
            sample_y: 4,
            x: 2,
            y: 1,
            width: 3,
            height: 2,
        };
        buf.fill_block(&block, 7);

        assert_eq!(buf.get(2, 1), Some(7));
        assert_eq!(buf.get(4, 2), Some(7));
        assert_eq!(buf.get(5, 1), Some(0));
        assert_eq!(buf.get(2, 3), Some(0));
        assert_eq!(buf.data.iter().filter(|&&n| n == 7).count(), 6);
    }

    #[test]
    fn rows_are_row_major() {
        let mut buf = IterationBuffer::new(3, 2, 10);
        buf.row_mut(1).copy_from_slice(&[4, 5, 6]);
        assert_eq!(buf.row(0), &[0, 0, 0]);
        assert_eq!(buf.row(1), &[4, 5, 6]);
        assert_eq!(buf.get(2, 1), Some(6));
    }
}
