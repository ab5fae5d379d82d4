use tracing::{debug, info, warn};

use juliascope_core::{Bounds, Complex, FractalParams};

use crate::error::ExplorerError;
use crate::favorites::{Favorites, FileFavoriteStore};
use crate::preferences::ExplorerPreferences;
use crate::view::FractalView;
use crate::zoom::{SelectionRect, ZoomSelector};

/// The Mandelbrot view, its dependent Julia view and the selection point
/// tying them together.
///
/// Pointer events are in Mandelbrot-view pixels. The selection point is owned
/// here and pushed to the Julia view whenever it changes.
#[derive(Debug)]
pub struct Explorer {
    mandelbrot: FractalView,
    julia: Option<FractalView>,
    julia_visible: bool,
    julia_size: (u32, u32),
    selection: Complex,
    zoom: ZoomSelector,
    favorites: Favorites,
}

impl Explorer {
    /// Build the explorer from preferences, with favorites read from the
    /// file the preferences name.
    pub fn from_preferences(prefs: &ExplorerPreferences) -> crate::Result<Self> {
        let favorites = Favorites::load(FileFavoriteStore::new(prefs.favorites_path()))?;
        Self::new(prefs, favorites)
    }

    pub fn new(prefs: &ExplorerPreferences, favorites: Favorites) -> crate::Result<Self> {
        let params = prefs.fractal_params();
        let mut mandelbrot = FractalView::mandelbrot(prefs.window_width, prefs.window_height, params)?;
        if let Some(bounds) = prefs.last_bounds {
            mandelbrot.zoom(bounds)?;
        }
        info!(
            width = prefs.window_width,
            height = prefs.window_height,
            max_iter = params.max_iterations,
            favorites = favorites.len(),
            "Explorer ready"
        );
        Ok(Self {
            mandelbrot,
            julia: None,
            julia_visible: false,
            julia_size: (prefs.julia_width, prefs.julia_height),
            selection: Complex::ZERO,
            zoom: ZoomSelector::new(),
            favorites,
        })
    }

    // -- Accessors --------------------------------------------------------

    pub fn mandelbrot(&self) -> &FractalView {
        &self.mandelbrot
    }

    pub fn mandelbrot_mut(&mut self) -> &mut FractalView {
        &mut self.mandelbrot
    }

    /// The Julia view, if it has been opened at least once.
    pub fn julia(&self) -> Option<&FractalView> {
        self.julia.as_ref()
    }

    pub fn julia_mut(&mut self) -> Option<&mut FractalView> {
        self.julia.as_mut()
    }

    pub fn is_julia_visible(&self) -> bool {
        self.julia_visible && self.julia.is_some()
    }

    /// Current Julia constant.
    pub fn selection(&self) -> Complex {
        self.selection
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Zoom box to draw over the Mandelbrot view while dragging.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.zoom.selection_rect()
    }

    // -- Pointer events ---------------------------------------------------

    /// Pointer moved without a button held. Returns the complex coordinate
    /// under the pointer for display.
    ///
    /// While the Julia view is visible the coordinate also becomes the
    /// selection point.
    pub fn pointer_moved(&mut self, x: i32, y: i32) -> crate::Result<Complex> {
        let point = self.mandelbrot.pointer_coordinates(x, y);
        if self.is_julia_visible() {
            self.set_selection(point)?;
        }
        Ok(point)
    }

    /// A click commits the point under the pointer and opens the Julia view.
    pub fn click(&mut self, x: i32, y: i32) -> crate::Result<()> {
        self.selection = self.mandelbrot.pointer_coordinates(x, y);
        self.open_julia()
    }

    pub fn pointer_pressed(&mut self, x: i32, y: i32) {
        self.zoom.press(x, y);
    }

    pub fn pointer_dragged(&mut self, x: i32, y: i32) {
        self.zoom.drag(x, y);
    }

    /// Abort the drag in progress; the release will not zoom.
    pub fn cancel_zoom(&mut self) {
        self.zoom.cancel();
    }

    /// End of a drag. Zooms the Mandelbrot view if the drag selected an area,
    /// returning the new bounds.
    pub fn pointer_released(&mut self, x: i32, y: i32) -> crate::Result<Option<Bounds>> {
        let Some(bounds) = self.zoom.release(x, y, self.mandelbrot.render_target()) else {
            return Ok(None);
        };
        self.mandelbrot.zoom(bounds)?;
        Ok(Some(self.mandelbrot.viewport().bounds()))
    }

    // -- Parameters -------------------------------------------------------

    /// Apply bounds and iteration cap to the Mandelbrot view. The Julia view
    /// follows the new cap.
    pub fn update_values(
        &mut self,
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
        max_iterations: u32,
    ) -> crate::Result<()> {
        self.mandelbrot
            .update_values(re_min, re_max, im_min, im_max, max_iterations)?;
        if let Some(julia) = self.julia.as_mut() {
            julia.set_max_iterations(max_iterations)?;
        }
        Ok(())
    }

    /// Push a new selection point to the Julia view, if one is open.
    pub fn set_selection(&mut self, point: Complex) -> crate::Result<()> {
        self.selection = point;
        if let Some(julia) = self.julia.as_mut() {
            julia.set_julia_constant(point)?;
        }
        Ok(())
    }

    // -- Julia view -------------------------------------------------------

    /// Show the Julia view for the current selection, creating it on first
    /// use and reusing it afterwards.
    ///
    /// Creation failure leaves the Mandelbrot view untouched.
    pub fn open_julia(&mut self) -> crate::Result<()> {
        match self.julia.as_mut() {
            Some(julia) => julia.set_julia_constant(self.selection)?,
            None => {
                let (width, height) = self.julia_size;
                let params = self.mandelbrot.params();
                let view = FractalView::julia(width, height, self.selection, params).map_err(
                    |e| match e {
                        ExplorerError::Render(e) => ExplorerError::JuliaUnavailable(e),
                        other => other,
                    },
                )?;
                debug!(width, height, "Julia view created");
                self.julia = Some(view);
            }
        }
        self.julia_visible = true;
        info!(c = %self.selection, "Julia view open");
        Ok(())
    }

    /// Hide the Julia view. Its worker and last image are kept for reopening.
    pub fn hide_julia(&mut self) {
        if let Some(julia) = self.julia.as_mut() {
            julia.cancel();
        }
        self.julia_visible = false;
    }

    // -- Favorites --------------------------------------------------------

    /// Save the current selection point as a favorite and return its index.
    pub fn save_favorite(&mut self) -> crate::Result<u32> {
        self.favorites.add(self.selection)
    }

    /// Make favorite `index` the selection point and show it in the Julia view.
    pub fn select_favorite(&mut self, index: u32) -> crate::Result<Complex> {
        let point = self.favorites.get(index).inspect_err(|_| {
            warn!(index, "No such favorite");
        })?;
        self.selection = point;
        self.open_julia()?;
        Ok(point)
    }

    /// State worth restoring next session.
    pub fn store_preferences(&self, prefs: &mut ExplorerPreferences) {
        let viewport = self.mandelbrot.viewport();
        prefs.window_width = viewport.width();
        prefs.window_height = viewport.height();
        prefs.max_iterations = self.mandelbrot.max_iterations();
        prefs.last_bounds = Some(viewport.bounds());
        if let Some(julia) = self.julia.as_ref() {
            prefs.julia_width = julia.viewport().width();
            prefs.julia_height = julia.viewport().height();
        }
    }

    /// Iteration cap shared by both views.
    pub fn params(&self) -> FractalParams {
        self.mandelbrot.params()
    }
}
