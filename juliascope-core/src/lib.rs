pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::{AngleUnit, Complex};
pub use error::CoreError;
pub use fractal::{escape_time, Fractal, FractalMode, FractalParams, ESCAPE_RADIUS_SQ};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use viewport::{Bounds, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
