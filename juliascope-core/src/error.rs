use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid bounds: re [{re_min}, {re_max}], im [{im_min}, {im_max}]")]
    InvalidBounds {
        re_min: f64,
        re_max: f64,
        im_min: f64,
        im_max: f64,
    },

    #[error("invalid dimensions: {width}×{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },
}
