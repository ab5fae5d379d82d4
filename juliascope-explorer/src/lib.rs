//! Interactive state for a Mandelbrot window with a dependent Julia window.
//!
//! Frontends feed pixel dimensions and pointer events in, and poll
//! [`FractalView`]s for iteration buffers to display. Nothing here depends on
//! a GUI toolkit.

pub mod error;
pub mod explorer;
pub mod favorites;
pub mod logging;
pub mod preferences;
pub mod view;
pub mod zoom;

pub use error::ExplorerError;
pub use explorer::Explorer;
pub use favorites::{
    format_favorite, parse_favorite, Favorite, FavoriteStore, Favorites, FileFavoriteStore,
    MemoryFavoriteStore,
};
pub use preferences::ExplorerPreferences;
pub use view::FractalView;
pub use zoom::{SelectionRect, ZoomSelector};

/// Convenience result type for the explorer crate.
pub type Result<T> = std::result::Result<T, ExplorerError>;
