use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;

/// An axis-aligned rectangle of the complex plane.
///
/// Always ordered (`re_min < re_max`, `im_min < im_max`) and finite; the
/// constructors swap inverted pairs and reject zero-area rectangles.
/// Deserialization goes through the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    re_min: f64,
    re_max: f64,
    im_min: f64,
    im_max: f64,
}

impl Bounds {
    /// Initial view: `re ∈ [-2, 2]`, `im ∈ [-1.6, 1.6]`.
    pub const DEFAULT: Self = Self {
        re_min: -2.0,
        re_max: 2.0,
        im_min: -1.6,
        im_max: 1.6,
    };

    pub fn new(re_min: f64, re_max: f64, im_min: f64, im_max: f64) -> crate::Result<Self> {
        let invalid = || CoreError::InvalidBounds {
            re_min,
            re_max,
            im_min,
            im_max,
        };
        if ![re_min, re_max, im_min, im_max].iter().all(|v| v.is_finite()) {
            return Err(invalid());
        }
        if re_min == re_max || im_min == im_max {
            return Err(invalid());
        }
        if re_min > re_max || im_min > im_max {
            debug!(re_min, re_max, im_min, im_max, "Swapping inverted bounds");
        }
        Ok(Self {
            re_min: re_min.min(re_max),
            re_max: re_min.max(re_max),
            im_min: im_min.min(im_max),
            im_max: im_min.max(im_max),
        })
    }

    /// The rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: Complex, b: Complex) -> crate::Result<Self> {
        Self::new(a.re, b.re, a.im, b.im)
    }

    pub fn re_min(&self) -> f64 {
        self.re_min
    }

    pub fn re_max(&self) -> f64 {
        self.re_max
    }

    pub fn im_min(&self) -> f64 {
        self.im_min
    }

    pub fn im_max(&self) -> f64 {
        self.im_max
    }

    /// Width of the rectangle along the real axis.
    pub fn re_extent(&self) -> f64 {
        self.re_max - self.re_min
    }

    /// Height of the rectangle along the imaginary axis.
    pub fn im_extent(&self) -> f64 {
        self.im_max - self.im_min
    }

    pub fn contains(&self, c: Complex) -> bool {
        (self.re_min..=self.re_max).contains(&c.re) && (self.im_min..=self.im_max).contains(&c.im)
    }
}

impl<'de> Deserialize<'de> for Bounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            re_min: f64,
            re_max: f64,
            im_min: f64,
            im_max: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.re_min, raw.re_max, raw.im_min, raw.im_max).map_err(serde::de::Error::custom)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Defines the visible region of the complex plane and the pixel grid it
/// is sampled on.
///
/// Pixel `(0, 0)` is the top-left corner of the grid and maps to
/// `(re_min, im_max)`; pixel `(width, height)` maps to `(re_max, im_min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    width: u32,
    height: u32,
}

impl Viewport {
    /// Create a viewport with explicit bounds.
    pub fn new(bounds: Bounds, width: u32, height: u32) -> crate::Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            bounds,
            width,
            height,
        })
    }

    /// Viewport over [`Bounds::DEFAULT`], used by both Mandelbrot and Julia views.
    pub fn with_default_bounds(width: u32, height: u32) -> crate::Result<Self> {
        Self::new(Bounds::DEFAULT, width, height)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replace the visible rectangle. The pixel grid is unchanged.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Change the pixel grid. The visible rectangle is unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// The aspect ratio of the pixel grid (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Map a (possibly fractional) pixel coordinate to the complex plane.
    ///
    /// The y-axis is flipped: pixel rows grow downward while the imaginary
    /// axis grows upward.
    #[inline]
    pub fn pixel_to_complex(&self, x: f64, y: f64) -> Complex {
        let b = &self.bounds;
        Complex::new(
            (x / self.width as f64) * b.re_extent() + b.re_min,
            (y / -(self.height as f64)) * b.im_extent() + b.im_max,
        )
    }

    /// Inverse of [`pixel_to_complex`](Self::pixel_to_complex).
    #[inline]
    pub fn complex_to_pixel(&self, c: Complex) -> (f64, f64) {
        let b = &self.bounds;
        (
            self.width as f64 / b.re_extent() * (c.re - b.re_min),
            -(self.height as f64) / b.im_extent() * (c.im - b.im_max),
        )
    }

    /// Grow the shorter complex axis so the plane's aspect ratio matches the
    /// pixel grid's.
    ///
    /// Extents only ever grow, symmetrically about the current centre, so a
    /// selected region stays fully visible.
    pub fn equalize_axis(&mut self) {
        let window_ratio = self.aspect_ratio();
        let b = &mut self.bounds;
        let plane_width = b.re_extent();
        let plane_height = b.im_extent();
        let plane_ratio = plane_width / plane_height;

        if window_ratio > plane_ratio {
            let grow = ((plane_height * window_ratio - plane_width) / 2.0).max(0.0);
            b.re_min -= grow;
            b.re_max += grow;
        } else {
            let grow = ((plane_width / window_ratio - plane_height) / 2.0).max(0.0);
            b.im_min -= grow;
            b.im_max += grow;
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> crate::Result<()> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn vp(width: u32, height: u32) -> Viewport {
        Viewport::with_default_bounds(width, height).unwrap()
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::DEFAULT;
        assert!(b.contains(Complex::ZERO));
        assert!(b.contains(Complex::new(-2.0, 1.6)));
        assert!(b.contains(Complex::new(2.0, -1.6)));
        assert!(!b.contains(Complex::new(2.5, 0.0)));
        assert!(!b.contains(Complex::new(0.0, -1.7)));
    }

    #[test]
    fn default_bounds() {
        let b = Bounds::default();
        assert_eq!(b.re_min(), -2.0);
        assert_eq!(b.re_max(), 2.0);
        assert_eq!(b.im_min(), -1.6);
        assert_eq!(b.im_max(), 1.6);
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let b = Bounds::new(1.0, -1.0, 0.5, -0.5).unwrap();
        assert_eq!((b.re_min(), b.re_max()), (-1.0, 1.0));
        assert_eq!((b.im_min(), b.im_max()), (-0.5, 0.5));
    }

    #[test]
    fn degenerate_bounds_rejected() {
        assert!(matches!(
            Bounds::new(1.0, 1.0, -1.0, 1.0),
            Err(CoreError::InvalidBounds { .. })
        ));
        assert!(Bounds::new(-1.0, 1.0, 0.3, 0.3).is_err());
        assert!(Bounds::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
        assert!(Bounds::new(-1.0, f64::INFINITY, -1.0, 1.0).is_err());
    }

    #[test]
    fn invalid_dimensions() {
        assert!(Viewport::with_default_bounds(0, 100).is_err());
        assert!(Viewport::with_default_bounds(100, 0).is_err());
        let mut v = vp(10, 10);
        assert!(v.resize(0, 5).is_err());
        assert_eq!((v.width(), v.height()), (10, 10));
    }

    #[test]
    fn pixel_to_complex_corners() {
        let v = vp(400, 320);

        let tl = v.pixel_to_complex(0.0, 0.0);
        assert!((tl.re - (-2.0)).abs() < EPSILON);
        assert!((tl.im - 1.6).abs() < EPSILON);

        let br = v.pixel_to_complex(400.0, 320.0);
        assert!((br.re - 2.0).abs() < EPSILON);
        assert!((br.im - (-1.6)).abs() < EPSILON);

        let centre = v.pixel_to_complex(200.0, 160.0);
        assert!(centre.re.abs() < EPSILON);
        assert!(centre.im.abs() < EPSILON);
    }

    #[test]
    fn pixel_round_trip() {
        let v = Viewport::new(Bounds::new(-0.75, -0.7, 0.1, 0.13).unwrap(), 640, 480).unwrap();
        for y in (0..=480).step_by(37) {
            for x in (0..=640).step_by(41) {
                let (px, py) = v.complex_to_pixel(v.pixel_to_complex(x as f64, y as f64));
                assert!((px - x as f64).abs() < 1e-6, "x {x} -> {px}");
                assert!((py - y as f64).abs() < 1e-6, "y {y} -> {py}");
            }
        }
    }

    #[test]
    fn equalize_wide_window_grows_real_axis() {
        // 2:1 window over a 4 × 3.2 plane → real extent becomes 6.4.
        let mut v = vp(800, 400);
        v.equalize_axis();
        let b = v.bounds();
        assert!((b.re_extent() - 6.4).abs() < EPSILON);
        assert!((b.im_extent() - 3.2).abs() < EPSILON);
        assert!((b.re_min() + b.re_max()).abs() < EPSILON, "stays centred");
    }

    #[test]
    fn equalize_tall_window_grows_imaginary_axis() {
        let mut v = vp(400, 800);
        v.equalize_axis();
        let b = v.bounds();
        assert!((b.re_extent() - 4.0).abs() < EPSILON);
        assert!((b.im_extent() - 8.0).abs() < EPSILON);
        assert!((v.aspect_ratio() - b.re_extent() / b.im_extent()).abs() < EPSILON);
    }

    #[test]
    fn equalize_never_shrinks() {
        let shapes = [(800, 400), (400, 800), (500, 400), (1, 1), (1920, 1080), (3, 700)];
        let rects = [
            Bounds::DEFAULT,
            Bounds::new(-0.1, 0.1, -1.0, 1.0).unwrap(),
            Bounds::new(-5.0, 5.0, -0.01, 0.01).unwrap(),
        ];
        for (w, h) in shapes {
            for bounds in rects {
                let mut v = Viewport::new(bounds, w, h).unwrap();
                v.equalize_axis();
                let after = v.bounds();
                assert!(after.re_extent() >= bounds.re_extent());
                assert!(after.im_extent() >= bounds.im_extent());
                assert!(after.re_min() <= bounds.re_min() && after.re_max() >= bounds.re_max());
                assert!(after.im_min() <= bounds.im_min() && after.im_max() >= bounds.im_max());
            }
        }
    }

    #[test]
    fn equalize_is_idempotent_on_matching_ratio() {
        // 500 × 400 matches 4 × 3.2 exactly.
        let mut v = vp(500, 400);
        v.equalize_axis();
        assert_eq!(v.bounds(), Bounds::DEFAULT);
    }

    #[test]
    fn bounds_serde_round_trip() {
        let b = Bounds::new(-0.5, 0.25, -0.125, 0.75).unwrap();
        let json = serde_json::to_string(&b).unwrap();
        let back: Bounds = serde_json::from_str(&json).unwrap();
        assert_eq!(b, back);
    }

    #[test]
    fn degenerate_bounds_fail_to_deserialize() {
        let json = r#"{"re_min":1.0,"re_max":1.0,"im_min":-1.0,"im_max":1.0}"#;
        assert!(serde_json::from_str::<Bounds>(json).is_err());
    }
}
