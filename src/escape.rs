//! The escape-time kernel: how fast does the orbit of a point under
//! z := z^2 + c leave the circle of radius 2?

use num::Complex;

/// Iterates z := z^2 + c from zero and returns `Some(i)` for the first
/// iteration at which |z|^2 exceeds 4, or `None` if the orbit is still
/// bounded after `depth` iterations.  The squares of both components
/// are computed once per iteration and shared by the escape test and
/// the update.
#[inline]
pub fn escape_iterations(c: Complex<f64>, depth: usize) -> Option<usize> {
    let mut x = 0.0;
    let mut y = 0.0;
    for i in 0..depth {
        let x2 = x * x;
        let y2 = y * y;
        if x2 + y2 > 4.0 {
            return Some(i);
        }
        let t = x;
        x = x2 - y2 + c.re;
        y = 2.0 * t * y + c.im;
    }
    None
}

/// Escape speed of a point as an intensity byte: 255 for points that
/// never escaped within `depth` iterations, otherwise the iteration
/// count wrapped into 0..255.  The wrap is deliberate; escape counts
/// that differ by a multiple of 255 land on the same byte, which shows
/// up as banding around very deep zooms.
pub fn escape_time(c: Complex<f64>, depth: usize) -> u8 {
    match escape_iterations(c, depth) {
        Some(i) => (i % 255) as u8,
        None => 255,
    }
}
