//! Relates the integral pixel grid to the window of the complex plane
//! being rendered.  Pixel (0, 0) sits on the leftlower corner of the
//! window; column steps move along the real axis and row steps along
//! the imaginary axis, and the last column and row land exactly on the
//! rightupper corner.

use num::Complex;

use errors::Error;

/// Column and row of one pixel on the integral grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of a `width x height` grid onto a rectangle of the
/// complex plane.  Construction validates the grid and the window once
/// so that the per-pixel mapping can stay total and pure.
#[derive(Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    leftlower: Complex<f64>,
    increments: (f64, f64),
}

impl PlaneMapper {
    /// Builds a mapper for a grid of at least one pixel per axis over a
    /// non-empty window.  The rightupper corner must lie strictly above
    /// and to the right of the leftlower corner.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, Error> {
        if width < 1 || height < 1 {
            return Err(Error::EmptyGrid);
        }
        if rightupper.re <= leftlower.re || rightupper.im <= leftlower.im {
            return Err(Error::InvertedRegion);
        }
        if width.checked_mul(height).is_none() {
            return Err(Error::ImageTooLarge { width, height });
        }

        // A one-pixel axis collapses onto the low edge of the window;
        // the divisor is clamped so the mapper stays total.
        let increments = (
            (rightupper.re - leftlower.re) / ((width - 1).max(1) as f64),
            (rightupper.im - leftlower.im) / ((height - 1).max(1) as f64),
        );

        Ok(PlaneMapper {
            width,
            height,
            leftlower,
            increments,
        })
    }

    /// Width of the grid in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the whole grid.  Used to size the output
    /// buffer.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid holds no pixels.  `new` refuses such grids,
    /// so a constructed mapper always answers false.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-axis step between adjacent pixels, real axis first.
    pub fn increments(&self) -> (f64, f64) {
        self.increments
    }

    /// The complex point under the given pixel.  Pure; every pixel is
    /// mapped independently of any other, so the grid can be walked in
    /// any order by any number of workers.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.leftlower.re + (pixel.0 as f64) * self.increments.0,
            self.leftlower.im + (pixel.1 as f64) * self.increments.1,
        )
    }
}
