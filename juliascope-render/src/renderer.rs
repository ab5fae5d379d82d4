use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use juliascope_core::{Fractal, Viewport};

use crate::block::build_block_rows;
use crate::iteration_buffer::IterationBuffer;

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// A pass remembers the generation it was started for and stops at the next
/// row boundary once the generation has moved on. The progress counter lets
/// a frontend poll the percentage without consuming the event stream.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    progress: AtomicU32,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            progress: AtomicU32::new(0),
        }
    }

    /// Cancel the current render by advancing the generation.
    ///
    /// Returns the new generation.
    pub fn cancel(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Whether a pass started for `generation` has been superseded.
    #[inline]
    pub fn is_cancelled(&self, generation: u64) -> bool {
        self.generation() != generation
    }

    fn set_progress(&self, percent: u32) {
        self.progress.store(percent, Ordering::Relaxed);
    }

    /// Percent reported by the most recent row of the running pass.
    pub fn progress(&self) -> u32 {
        self.progress.load(Ordering::Relaxed)
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Phases and progress events
// ---------------------------------------------------------------------------

/// Where a view's render currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    CoarsePass,
    FinePass,
    Complete,
    Cancelled,
}

impl RenderPhase {
    /// `true` while a pass is running.
    pub fn is_rendering(self) -> bool {
        matches!(self, Self::CoarsePass | Self::FinePass)
    }
}

/// One progress event: emitted after each coarse block row, after each fine
/// row, and once more when the pass completes.
#[derive(Debug, Clone)]
pub struct RenderProgress {
    pub phase: RenderPhase,
    pub percent: u32,
    /// Snapshot of the buffer as of this event. Never mutated afterwards.
    pub buffer: Arc<IterationBuffer>,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// The result of a two-pass render.
#[derive(Debug)]
pub struct RenderResult {
    pub iterations: Arc<IterationBuffer>,
    pub elapsed: Duration,
    pub cancelled: bool,
    pub blocks_rendered: usize,
    pub rows_rendered: u32,
}

/// `ceil(100 · done / total)` without going through floating point.
fn percent(done: u64, total: u64) -> u32 {
    if total == 0 {
        return 100;
    }
    (100 * done).div_ceil(total) as u32
}

// ---------------------------------------------------------------------------
// Two-pass render
// ---------------------------------------------------------------------------

/// Render a frame as a coarse preview followed by a full-resolution pass.
///
/// The coarse pass evaluates one sample per 8×8 block; the fine pass
/// evaluates every pixel in row-major order, spreading each row across the
/// Rayon pool. `on_progress` is called on the calling thread after every
/// block row and every fine row, top to bottom, then once with
/// [`RenderPhase::Complete`]. Cancellation is checked before each row: once
/// `cancel` has moved past `generation` the pass returns with
/// `cancelled = true` and emits nothing further.
pub fn render<F, P>(
    fractal: &F,
    viewport: &Viewport,
    cancel: &RenderCancel,
    generation: u64,
    mut on_progress: P,
) -> RenderResult
where
    F: Fractal + Sync,
    P: FnMut(RenderProgress),
{
    let start = Instant::now();
    let (width, height) = (viewport.width(), viewport.height());
    let max_iter = fractal.params().max_iterations;
    let mut buffer = Arc::new(IterationBuffer::new(width, height, max_iter));

    let block_rows = build_block_rows(width, height);
    debug!(
        width,
        height,
        max_iter,
        block_rows = block_rows.len(),
        mode = fractal.mode().label(),
        "Starting two-pass render"
    );

    let mut blocks_rendered = 0;
    let mut rows_rendered = 0;
    let cancelled = |blocks_rendered: usize, rows_rendered: u32, buffer: Arc<IterationBuffer>| {
        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis(),
            blocks_rendered, rows_rendered, "Render cancelled"
        );
        RenderResult {
            iterations: buffer,
            elapsed,
            cancelled: true,
            blocks_rendered,
            rows_rendered,
        }
    };

    cancel.set_progress(0);
    let total_block_rows = block_rows.len() as u64;
    for (i, row) in block_rows.iter().enumerate() {
        if cancel.is_cancelled(generation) {
            return cancelled(blocks_rendered, rows_rendered, buffer);
        }
        let counts: Vec<u32> = row
            .par_iter()
            .map(|b| {
                fractal.escape_count(
                    viewport.pixel_to_complex(b.sample_x as f64, b.sample_y as f64),
                )
            })
            .collect();

        // Copy-on-write: only clones if the frontend still holds a snapshot.
        let buf = Arc::make_mut(&mut buffer);
        for (block, n) in row.iter().zip(counts) {
            buf.fill_block(block, n);
        }
        blocks_rendered += row.len();

        let pct = percent(i as u64 + 1, total_block_rows);
        cancel.set_progress(pct);
        on_progress(RenderProgress {
            phase: RenderPhase::CoarsePass,
            percent: pct,
            buffer: Arc::clone(&buffer),
        });
    }

    cancel.set_progress(0);
    for y in 0..height {
        if cancel.is_cancelled(generation) {
            return cancelled(blocks_rendered, rows_rendered, buffer);
        }
        Arc::make_mut(&mut buffer)
            .row_mut(y)
            .par_iter_mut()
            .enumerate()
            .for_each(|(x, slot)| {
                *slot = fractal.escape_count(viewport.pixel_to_complex(x as f64, y as f64));
            });
        rows_rendered += 1;

        let pct = percent(y as u64, height as u64);
        cancel.set_progress(pct);
        on_progress(RenderProgress {
            phase: RenderPhase::FinePass,
            percent: pct,
            buffer: Arc::clone(&buffer),
        });
    }

    cancel.set_progress(100);
    on_progress(RenderProgress {
        phase: RenderPhase::Complete,
        percent: 100,
        buffer: Arc::clone(&buffer),
    });

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        blocks_rendered, rows_rendered, "Render complete"
    );

    RenderResult {
        iterations: buffer,
        elapsed,
        cancelled: false,
        blocks_rendered,
        rows_rendered,
    }
}
