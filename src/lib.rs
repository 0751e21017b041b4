#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot raster renderer
//!
//! Renders the Mandelbrot set over a rectangular window of the complex
//! plane and writes the result as a legacy Sun rasterfile: an 8-bit
//! indexed image with a 768-byte RGB colormap and a big-endian header.
//! Every pixel holds an escape speed, the number of iterations of
//! z := z^2 + c it took for the orbit of that point to leave the
//! circle of radius 2, wrapped into a byte, or 255 for points whose
//! orbit never left.
//!
//! Rows of the image are spread across a pool of worker threads.  The
//! distribution policy (static, dynamic or guided, with an optional
//! chunk size) is read from the `MANDEL_SCHEDULE` environment variable
//! at render time, so the same binary can be measured under different
//! load-balancing strategies.  Points inside the set cost the full
//! iteration depth while points far outside escape almost instantly,
//! which is what makes the choice of policy interesting.  Whatever the
//! policy and worker count, the output buffer is bit-identical to a
//! sequential traversal.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod errors;
pub mod escape;
pub mod palette;
pub mod pi;
pub mod planes;
pub mod raster;
pub mod render;
pub mod schedule;

pub use errors::Error;
pub use palette::{ColorScheme, Palette};
pub use planes::{Pixel, PlaneMapper};
pub use render::{render, RenderOptions};
pub use schedule::SchedulePolicy;
