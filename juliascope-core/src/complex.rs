use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Unit of the angle passed to [`Complex::from_polar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

/// A complex number represented as two `f64` components.
///
/// This is a lightweight, `Copy` type for the tight iteration loop. Equality
/// is exact on both components; there is no tolerance, so two values that
/// differ only by rounding compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Build a value from its modulus and argument.
    ///
    /// With [`AngleUnit::Degrees`] the argument is converted to radians first.
    pub fn from_polar(modulus: f64, argument: f64, unit: AngleUnit) -> Self {
        let theta = match unit {
            AngleUnit::Radians => argument,
            AngleUnit::Degrees => argument.to_radians(),
        };
        Self {
            re: modulus * theta.cos(),
            im: modulus * theta.sin(),
        }
    }

    /// `z²` expanded algebraically: `(re² − im²) + (2·re·im)i`.
    #[inline]
    pub fn square(self) -> Self {
        Self {
            re: self.re * self.re - self.im * self.im,
            im: 2.0 * self.re * self.im,
        }
    }

    /// Returns `re² + im²` without taking the square root.
    #[inline]
    pub fn modulus_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Returns `√(re² + im²)`.
    #[inline]
    pub fn modulus(self) -> f64 {
        self.modulus_squared().sqrt()
    }

    /// Angle to the positive real axis in radians, in `(−π, π]`.
    #[inline]
    pub fn argument(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Polar form, e.g. `1.41 cis(45.0)` with the angle in degrees.
    pub fn polar_string(self) -> String {
        format!(
            "{:.2} cis({:.1})",
            self.modulus(),
            self.argument().to_degrees()
        )
    }
}

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{} + {}i", self.re, self.im)
        } else {
            write!(f, "{} - {}i", self.re, -self.im)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    const EPSILON: f64 = 1e-12;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn zero_constant() {
        let z = Complex::ZERO;
        assert_eq!(z.re, 0.0);
        assert_eq!(z.im, 0.0);
    }

    #[test]
    fn addition() {
        let c = Complex::new(1.0, 2.0) + Complex::new(3.0, 4.0);
        assert!(approx_eq(c.re, 4.0));
        assert!(approx_eq(c.im, 6.0));
    }

    #[test]
    fn multiplication() {
        // (1 + 2i)(3 + 4i) = 3 + 4i + 6i + 8i² = -5 + 10i
        let c = Complex::new(1.0, 2.0) * Complex::new(3.0, 4.0);
        assert!(approx_eq(c.re, -5.0));
        assert!(approx_eq(c.im, 10.0));
    }

    #[test]
    fn squaring() {
        // (1 + i)² = 1 + 2i - 1 = 2i
        let z2 = Complex::new(1.0, 1.0).square();
        assert!(approx_eq(z2.re, 0.0));
        assert!(approx_eq(z2.im, 2.0));
    }

    #[test]
    fn square_matches_self_multiplication() {
        let samples = [
            Complex::new(0.0, 0.0),
            Complex::new(1.5, -2.25),
            Complex::new(-0.7, 0.27015),
            Complex::new(-3.0, 4.0),
            Complex::new(1e-8, 1e8),
        ];
        for z in samples {
            let sq = z.square();
            let mul = z * z;
            let scale = 1.0 + z.modulus_squared();
            assert!((sq.re - mul.re).abs() <= EPSILON * scale, "{z}");
            assert!((sq.im - mul.im).abs() <= EPSILON * scale, "{z}");
        }
    }

    #[test]
    fn modulus_and_its_square() {
        let a = Complex::new(3.0, 4.0);
        assert!(approx_eq(a.modulus_squared(), 25.0));
        assert!(approx_eq(a.modulus(), 5.0));
    }

    #[test]
    fn argument_quadrants() {
        assert!(approx_eq(Complex::new(1.0, 1.0).argument(), FRAC_PI_4));
        assert!(approx_eq(Complex::new(0.0, 2.0).argument(), FRAC_PI_2));
        assert!(approx_eq(Complex::new(-1.0, 0.0).argument(), PI));
        assert!(Complex::new(-1.0, -1e-9).argument() < 0.0);
    }

    #[test]
    fn polar_construction_radians() {
        let z = Complex::from_polar(2.0, FRAC_PI_2, AngleUnit::Radians);
        assert!(approx_eq(z.re, 0.0));
        assert!(approx_eq(z.im, 2.0));
    }

    #[test]
    fn polar_construction_degrees() {
        let z = Complex::from_polar(2.0_f64.sqrt(), 45.0, AngleUnit::Degrees);
        assert!(approx_eq(z.re, 1.0));
        assert!(approx_eq(z.im, 1.0));
        assert!(approx_eq(z.modulus(), 2.0_f64.sqrt()));
    }

    #[test]
    fn equality_is_exact() {
        let a = Complex::new(0.1 + 0.2, 0.0);
        let b = Complex::new(0.3, 0.0);
        assert_ne!(a, b);
        assert_eq!(Complex::new(1.5, -2.25), Complex::new(1.5, -2.25));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Complex::new(1.5, -2.25).to_string(), "1.5 - 2.25i");
        assert_eq!(Complex::new(0.0, 1.0).to_string(), "0 + 1i");
        assert_eq!(Complex::new(1.0, 1.0).polar_string(), "1.41 cis(45.0)");
    }
}
