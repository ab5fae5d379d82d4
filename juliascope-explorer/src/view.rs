use std::sync::Arc;

use tracing::{debug, info};

use juliascope_core::{Bounds, Complex, FractalMode, FractalParams, Viewport};
use juliascope_render::{
    colorize, IterationBuffer, RenderBuffer, RenderPhase, RenderProgress, RenderRequest,
    RenderScheduler, RenderStream,
};

/// One fractal window's state: the live viewport, iteration cap, mode and
/// Julia constant, plus the render worker that draws it.
///
/// Every mutation that changes the picture starts a fresh pass, preempting
/// the one in flight. Pixel-to-complex conversions go through the render
/// target, the viewport the current pass was started with.
pub struct FractalView {
    viewport: Viewport,
    params: FractalParams,
    mode: FractalMode,
    julia_c: Complex,
    render_target: Viewport,
    latest: Option<RenderProgress>,
    stream: Option<RenderStream>,
    scheduler: RenderScheduler,
}

impl FractalView {
    /// Mandelbrot view over the default bounds, equalized and rendering.
    pub fn mandelbrot(width: u32, height: u32, params: FractalParams) -> crate::Result<Self> {
        let viewport = Viewport::with_default_bounds(width, height)?;
        Self::spawn(FractalMode::Mandelbrot, viewport, params, Complex::ZERO)
    }

    /// Julia view for the constant `c` over the default bounds.
    pub fn julia(width: u32, height: u32, c: Complex, params: FractalParams) -> crate::Result<Self> {
        let viewport = Viewport::with_default_bounds(width, height)?;
        Self::spawn(FractalMode::Julia, viewport, params, c)
    }

    /// View over an explicit viewport.
    pub fn spawn(
        mode: FractalMode,
        mut viewport: Viewport,
        params: FractalParams,
        julia_c: Complex,
    ) -> crate::Result<Self> {
        let name = match mode {
            FractalMode::Mandelbrot => "mandelbrot-render",
            FractalMode::Julia => "julia-render",
        };
        let scheduler = RenderScheduler::spawn(name)?;
        viewport.equalize_axis();
        let mut view = Self {
            viewport,
            params,
            mode,
            julia_c,
            render_target: viewport,
            latest: None,
            stream: None,
            scheduler,
        };
        view.request_render()?;
        Ok(view)
    }

    // -- Accessors --------------------------------------------------------

    pub fn mode(&self) -> FractalMode {
        self.mode
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Viewport snapshot of the pass currently on screen.
    pub fn render_target(&self) -> &Viewport {
        &self.render_target
    }

    pub fn params(&self) -> FractalParams {
        self.params
    }

    pub fn max_iterations(&self) -> u32 {
        self.params.max_iterations
    }

    pub fn julia_constant(&self) -> Complex {
        self.julia_c
    }

    pub fn phase(&self) -> RenderPhase {
        self.scheduler.phase()
    }

    /// Percent of the running pass.
    pub fn progress(&self) -> u32 {
        self.scheduler.progress()
    }

    /// `true` once the fine pass for the current parameters has finished.
    pub fn is_complete(&self) -> bool {
        self.scheduler.is_complete()
    }

    // -- Coordinates ------------------------------------------------------

    pub fn pixel_to_complex(&self, x: f64, y: f64) -> Complex {
        self.render_target.pixel_to_complex(x, y)
    }

    pub fn complex_to_pixel(&self, c: Complex) -> (f64, f64) {
        self.render_target.complex_to_pixel(c)
    }

    /// Complex coordinate under a pointer at pixel `(x, y)`.
    pub fn pointer_coordinates(&self, x: i32, y: i32) -> Complex {
        self.pixel_to_complex(x as f64, y as f64)
    }

    // -- Mutations --------------------------------------------------------

    /// Apply bounds and iteration cap from a parameter panel.
    ///
    /// Inverted pairs are swapped. Degenerate or non-finite bounds and a zero
    /// cap are rejected without touching the view. The new bounds are
    /// equalized before rendering.
    pub fn update_values(
        &mut self,
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        max_iterations: u32,
    ) -> crate::Result<()> {
        let bounds = Bounds::new(re_min, re_max, im_min, im_max)?;
        let params = FractalParams::new(max_iterations)?;
        self.params = params;
        self.viewport.set_bounds(bounds);
        self.equalize_axis()
    }

    /// Zoom to `bounds` as chosen by a drag selection.
    pub fn zoom(&mut self, bounds: Bounds) -> crate::Result<()> {
        debug!(
            re_min = bounds.re_min(),
            re_max = bounds.re_max(),
            im_min = bounds.im_min(),
            im_max = bounds.im_max(),
            "Zoom"
        );
        self.viewport.set_bounds(bounds);
        self.equalize_axis()
    }

    /// Match the plane's aspect ratio to the pixel grid and re-render.
    pub fn equalize_axis(&mut self) -> crate::Result<()> {
        self.viewport.equalize_axis();
        self.request_render()
    }

    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        if (width, height) == (self.viewport.width(), self.viewport.height()) {
            return Ok(());
        }
        self.viewport.resize(width, height)?;
        self.request_render()
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> crate::Result<()> {
        let params = FractalParams::new(max_iterations)?;
        if params == self.params {
            return Ok(());
        }
        self.params = params;
        self.request_render()
    }

    /// Replace the Julia constant and re-render.
    pub fn set_julia_constant(&mut self, c: Complex) -> crate::Result<()> {
        self.julia_c = c;
        self.request_render()
    }

    /// Back to the default bounds.
    pub fn reset_view(&mut self) -> crate::Result<()> {
        self.viewport.set_bounds(Bounds::DEFAULT);
        self.equalize_axis()
    }

    /// Start a fresh pass for the current state, preempting any pass in flight.
    pub fn request_render(&mut self) -> crate::Result<()> {
        let request = RenderRequest {
            viewport: self.viewport,
            params: self.params,
            mode: self.mode,
            julia_c: self.julia_c,
        };
        // Drop the old stream first so nothing from it can be polled later.
        self.stream = None;
        let stream = self.scheduler.submit(request)?;
        // The old buffer no longer matches the render target.
        self.latest = None;
        self.render_target = self.viewport;
        self.stream = Some(stream);
        Ok(())
    }

    /// Stop the pass in flight. The last buffer received for the current
    /// render target stays available.
    pub fn cancel(&mut self) {
        self.scheduler.cancel();
        self.stream = None;
        info!(mode = self.mode.label(), "View render cancelled");
    }

    // -- Output -----------------------------------------------------------

    /// Take every event that has arrived without blocking and return the
    /// newest, if any. The newest is also kept as [`latest`](Self::latest).
    pub fn poll(&mut self) -> Option<&RenderProgress> {
        let stream = self.stream.as_ref()?;
        let mut received = false;
        while let Some(event) = stream.try_next() {
            self.latest = Some(event);
            received = true;
        }
        if received {
            self.latest.as_ref()
        } else {
            None
        }
    }

    /// Block until the current pass ends and return its last buffer.
    pub fn wait_for_render(&mut self) -> Option<Arc<IterationBuffer>> {
        if let Some(stream) = self.stream.take() {
            for event in stream {
                self.latest = Some(event);
            }
        }
        self.latest.as_ref().map(|e| Arc::clone(&e.buffer))
    }

    /// Most recent event of the current pass.
    ///
    /// `None` between a parameter change and the first event of the pass it
    /// started, so the buffer always matches [`render_target`](Self::render_target).
    pub fn latest(&self) -> Option<&RenderProgress> {
        self.latest.as_ref()
    }

    /// RGBA image of the most recent buffer.
    pub fn image(&self) -> Option<RenderBuffer> {
        self.latest.as_ref().map(|e| colorize(&e.buffer))
    }
}

impl std::fmt::Debug for FractalView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FractalView")
            .field("mode", &self.mode)
            .field("viewport", &self.viewport)
            .field("params", &self.params)
            .field("julia_c", &self.julia_c)
            .field("phase", &self.scheduler.phase())
            .finish_non_exhaustive()
    }
}
