use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal, FractalMode, FractalParams};

/// A Julia set: `z_{n+1} = z_n² + c`, where `c` is a fixed constant
/// and `z₀` is the point on the complex plane.
#[derive(Debug, Clone)]
pub struct Julia {
    params: FractalParams,

    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex, params: FractalParams) -> Self {
        Self { params, c }
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Fractal for Julia {
    fn escape_count(&self, point: Complex) -> u32 {
        escape_time(point, self.c, self.params.max_iterations)
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }

    fn mode(&self) -> FractalMode {
        FractalMode::Julia
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_zero_unit_disc_is_interior() {
        // c = 0: z ↦ z², so |z₀| < 1 never escapes.
        let j = Julia::new(Complex::ZERO, FractalParams::new(64).unwrap());
        assert_eq!(j.escape_count(Complex::new(0.5, -0.5)), 64);
        assert_eq!(j.escape_count(Complex::ZERO), 64);
    }

    #[test]
    fn c_zero_outside_unit_circle_escapes() {
        // 1.5 → 2.25 stops after one step.
        let j = Julia::new(Complex::ZERO, FractalParams::default());
        assert_eq!(j.escape_count(Complex::new(1.5, 0.0)), 1);
    }

    #[test]
    fn start_beyond_radius_is_zero() {
        let j = Julia::new(Complex::new(-0.7, 0.27015), FractalParams::default());
        assert_eq!(j.escape_count(Complex::new(10.0, 0.0)), 0);
    }

    #[test]
    fn mandelbrot_origin_matches_julia_at_same_constant() {
        // z₀ = 0 in the Julia set for c is the Mandelbrot orbit of c.
        let c = Complex::new(-0.12, 0.75);
        let params = FractalParams::new(300).unwrap();
        let j = Julia::new(c, params);
        assert_eq!(j.escape_count(Complex::ZERO), escape_time(Complex::ZERO, c, 300));
        assert_eq!(j.c(), c);
    }
}
