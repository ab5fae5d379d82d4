use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// `|z|²` at or above which an orbit counts as escaped (`|z| ≥ 2`).
pub const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// Which operand of the recurrence the pixel supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalMode {
    /// Pixel is the constant, iteration starts at zero.
    Mandelbrot,
    /// Pixel is the starting value, the selection point is the constant.
    Julia,
}

impl FractalMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
        }
    }
}

/// Parameters controlling fractal iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Maximum number of iterations before a point counts as non-escaping.
    pub max_iterations: u32,
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 190;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Escape-time count of `z_{n+1} = z_n² + constant` with `z_0 = start`.
///
/// Iterates while `|z_n| < 2` and `n < max_iterations`, returning `n`. A point
/// that never escapes returns `max_iterations`. Mandelbrot and Julia share this
/// loop and differ only in which operand comes from the pixel.
#[inline]
pub fn escape_time(start: Complex, constant: Complex, max_iterations: u32) -> u32 {
    let mut z = start;
    let mut count = 0;
    while z.modulus_squared() < ESCAPE_RADIUS_SQ && count < max_iterations {
        z = z.square() + constant;
        count += 1;
    }
    count
}

/// Trait implemented by both fractal modes.
///
/// Designed for **static dispatch**: renderers are generic over
/// `F: Fractal` rather than using `dyn Fractal`, so the compiler can inline
/// the iteration loop.
pub trait Fractal {
    /// Escape count for the point `point` of the complex plane.
    fn escape_count(&self, point: Complex) -> u32;

    /// Access the iteration parameters.
    fn params(&self) -> &FractalParams;

    fn mode(&self) -> FractalMode;
}
