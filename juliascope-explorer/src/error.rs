use juliascope_core::CoreError;
use juliascope_render::RenderError;

/// Errors surfaced by the explorer's views and favorites.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The Julia view could not be created. The Mandelbrot view is unaffected.
    #[error("julia view unavailable: {0}")]
    JuliaUnavailable(#[source] RenderError),

    #[error("favorites storage failed: {0}")]
    Favorites(#[from] std::io::Error),

    #[error("no favorite with index {0}")]
    UnknownFavorite(u32),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
