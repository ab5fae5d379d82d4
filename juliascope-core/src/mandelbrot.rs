use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalMode, FractalParams};

/// The Mandelbrot set: `z_{n+1} = z_n² + c`, starting from `z₀ = 0`.
///
/// The point `c` is the coordinate on the complex plane.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

/// Returns `true` if `c` lies inside the main cardioid.
///
/// Closed-form check that avoids iterating a large share of the points
/// visible at the default zoom level.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) < 0.25 * im2
}

/// Returns `true` if `c` lies inside the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im < 0.0625
}

impl Fractal for Mandelbrot {
    fn escape_count(&self, c: Complex) -> u32 {
        // Points strictly inside the cardioid or the bulb never escape.
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return self.params.max_iterations;
        }
        escape_time(Complex::ZERO, c, self.params.max_iterations)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }

    fn mode(&self) -> FractalMode {
        FractalMode::Mandelbrot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb() -> Mandelbrot {
        Mandelbrot::new(FractalParams::new(100).unwrap())
    }

    #[test]
    fn origin_is_interior() {
        assert_eq!(mb().escape_count(Complex::ZERO), 100);
    }

    #[test]
    fn two_escapes_at_first_iteration() {
        assert_eq!(mb().escape_count(Complex::new(2.0, 0.0)), 1);
    }

    #[test]
    fn far_point_escapes_immediately() {
        assert_eq!(mb().escape_count(Complex::new(10.0, 0.0)), 1);
    }

    #[test]
    fn minus_one_is_interior() {
        // c = -1 gives the orbit 0 → -1 → 0 → -1 … (period 2)
        assert_eq!(mb().escape_count(Complex::new(-1.0, 0.0)), 100);
    }

    #[test]
    fn shortcut_agrees_with_iteration() {
        let m = Mandelbrot::new(FractalParams::new(500).unwrap());
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(0.2, 0.1),
            Complex::new(-0.5, 0.3),
            Complex::new(-1.05, 0.05),
            Complex::new(-0.1, 0.6),
        ];
        for c in points {
            assert_eq!(m.escape_count(c), escape_time(Complex::ZERO, c, 500), "{c}");
        }
    }

    #[test]
    fn positive_real_axis_escapes() {
        let n = mb().escape_count(Complex::new(0.5, 0.0));
        assert!(n < 100, "0.5 + 0i should escape, got {n}");
    }
}
