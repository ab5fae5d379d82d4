use tracing::debug;

use juliascope_core::{Bounds, Viewport};

/// Pixel rectangle, normalised so `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl SelectionRect {
    fn spanning(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// Drag-to-zoom selection: press, drag, release.
#[derive(Debug, Clone, Default)]
pub struct ZoomSelector {
    press: Option<(i32, i32)>,
    current: Option<(i32, i32)>,
}

impl ZoomSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: i32, y: i32) {
        self.press = Some((x, y));
        self.current = Some((x, y));
    }

    /// Track the live pointer position. Ignored without a prior press.
    pub fn drag(&mut self, x: i32, y: i32) {
        if self.press.is_some() {
            self.current = Some((x, y));
        }
    }

    /// Abort the selection; the next release does nothing.
    pub fn cancel(&mut self) {
        if self.press.take().is_some() {
            debug!("Zoom selection cancelled");
        }
        self.current = None;
    }

    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    /// Box to draw while dragging.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        Some(SelectionRect::spanning(self.press?, self.current?))
    }

    /// Finish the drag at `(x, y)` and return the selected rectangle on the
    /// complex plane, converted through `target`.
    ///
    /// `None` when there was no press, the selection was cancelled, or the
    /// release maps to the same complex point as the press. A drag that
    /// collapses only one axis is also `None`, since it has no area.
    pub fn release(&mut self, x: i32, y: i32, target: &Viewport) -> Option<Bounds> {
        let (px, py) = self.press.take()?;
        self.current = None;

        let a = target.pixel_to_complex(px as f64, py as f64);
        let b = target.pixel_to_complex(x as f64, y as f64);
        if a == b {
            return None;
        }
        match Bounds::from_corners(a, b) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                debug!("Ignoring zoom selection: {e}");
                None
            }
        }
    }
}
