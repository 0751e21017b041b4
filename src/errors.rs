//! Error type shared by the library.  Every failure here is terminal
//! for the operation that produced it; the one silently-defaulted case
//! in the crate, an unrecognized scheduling policy, never reaches this
//! type.

use std::io;

/// Failures surfaced by plane construction, rendering and raster
/// serialization.
#[derive(Debug, Fail)]
pub enum Error {
    /// The pixel grid must be at least one pixel on each axis.
    #[fail(display = "image dimensions must be at least 1x1 pixel")]
    EmptyGrid,
    /// The rightupper corner must lie strictly above and to the right
    /// of the leftlower corner.
    #[fail(display = "complex window is inverted or empty")]
    InvertedRegion,
    /// The requested image does not fit in an addressable buffer.
    #[fail(display = "an image of {}x{} pixels cannot be allocated", width, height)]
    ImageTooLarge {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },
    /// The pixel buffer disagrees with the stated dimensions.
    #[fail(display = "pixel buffer holds {} bytes where {} were expected", got, want)]
    BufferMismatch {
        /// Bytes actually present.
        got: usize,
        /// Bytes implied by width and height.
        want: usize,
    },
    /// The output file could not be created or written.
    #[fail(display = "{}: {}", path, cause)]
    Io {
        /// Path of the file being written.
        path: String,
        /// Underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },
}
