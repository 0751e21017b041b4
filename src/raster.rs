// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Serialization of the legacy Sun raster format: a 32-byte header of
//! eight big-endian fields, a 768-byte RGB colormap, then one byte per
//! pixel in row-major order.  The format predates little-endian
//! producers, so every multi-byte field goes through an explicit
//! byte-sequence conversion; nothing here depends on host byte order.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use errors::Error;
use palette::Palette;

/// Magic number opening every raster file.
pub const RAS_MAGIC: u32 = 0x59a6_6a95;
/// Pixel data stored uncompressed, row-major.
pub const RT_STANDARD: u32 = 1;
/// Colormap of three equal-length blocks: red, then green, then blue.
pub const RMT_EQUAL_RGB: u32 = 1;

const RAS_DEPTH: u32 = 8;
const HEADER_LEN: usize = 32;

/// The eight header fields, in file order.  Reordering or omitting any
/// of them produces a file no raster viewer will accept.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterHeader {
    /// Always `RAS_MAGIC`.
    pub magic: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per pixel; always 8 here.
    pub depth: u32,
    /// Total pixel count, width times height.
    pub length: u32,
    /// Pixel encoding; always `RT_STANDARD`.
    pub kind: u32,
    /// Colormap layout; always `RMT_EQUAL_RGB`.
    pub maptype: u32,
    /// Colormap size in bytes; always 768 (3 x 256).
    pub maplength: u32,
}

impl RasterHeader {
    /// Header for an 8-bit colormapped image of the given dimensions.
    /// The product of the dimensions must fit in 32 bits.
    pub fn new(width: u32, height: u32) -> RasterHeader {
        RasterHeader {
            magic: RAS_MAGIC,
            width,
            height,
            depth: RAS_DEPTH,
            length: width * height,
            kind: RT_STANDARD,
            maptype: RMT_EQUAL_RGB,
            maplength: 3 * 256,
        }
    }

    fn fields(&self) -> [u32; 8] {
        [
            self.magic,
            self.width,
            self.height,
            self.depth,
            self.length,
            self.kind,
            self.maptype,
            self.maplength,
        ]
    }

    /// Encodes the header as 32 bytes, each field big-endian.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; HEADER_LEN];
        for (field, out) in self.fields().iter().zip(bytes.chunks_mut(4)) {
            out.copy_from_slice(&field.to_be_bytes());
        }
        bytes
    }

    /// Decodes a header from the first 32 bytes of a raster file, or
    /// `None` if the buffer is too short.
    pub fn from_bytes(bytes: &[u8]) -> Option<RasterHeader> {
        if bytes.len() < HEADER_LEN {
            return None;
        }
        let mut fields = [0u32; 8];
        for (field, chunk) in fields.iter_mut().zip(bytes.chunks(4)) {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            *field = u32::from_be_bytes(word);
        }
        Some(RasterHeader {
            magic: fields[0],
            width: fields[1],
            height: fields[2],
            depth: fields[3],
            length: fields[4],
            kind: fields[5],
            maptype: fields[6],
            maplength: fields[7],
        })
    }
}

/// Writes a complete raster image to any byte sink: the header, the
/// three colormap blocks, then the pixel buffer as-is.
pub fn write_raster<W: Write>(
    out: &mut W,
    header: &RasterHeader,
    palette: &Palette,
    pixels: &[u8],
) -> io::Result<()> {
    out.write_all(&header.to_bytes())?;
    out.write_all(&palette.red)?;
    out.write_all(&palette.green)?;
    out.write_all(&palette.blue)?;
    out.write_all(pixels)
}

/// Creates `path` and writes the raster image into it.  The pixel
/// buffer must hold exactly `width * height` bytes, and both
/// dimensions must fit the 32-bit header fields.
pub fn save_raster<P: AsRef<Path>>(
    path: P,
    width: usize,
    height: usize,
    palette: &Palette,
    pixels: &[u8],
) -> Result<(), Error> {
    let want = width
        .checked_mul(height)
        .ok_or(Error::ImageTooLarge { width, height })?;
    if pixels.len() != want {
        return Err(Error::BufferMismatch {
            got: pixels.len(),
            want,
        });
    }
    if want > u32::max_value() as usize {
        return Err(Error::ImageTooLarge { width, height });
    }

    let path = path.as_ref();
    let header = RasterHeader::new(width as u32, height as u32);
    let mut file = File::create(path).map_err(|cause| Error::Io {
        path: path.display().to_string(),
        cause,
    })?;
    write_raster(&mut file, &header, palette, pixels).map_err(|cause| Error::Io {
        path: path.display().to_string(),
        cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::ColorScheme;

    #[test]
    fn header_fields_encode_big_endian_at_fixed_offsets() {
        let bytes = RasterHeader::new(800, 800).to_bytes();
        assert_eq!(&bytes[0..4], &[0x59, 0xa6, 0x6a, 0x95]);
        assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x03, 0x20]);
        assert_eq!(&bytes[8..12], &[0x00, 0x00, 0x03, 0x20]);
        assert_eq!(&bytes[12..16], &[0x00, 0x00, 0x00, 0x08]);
        assert_eq!(&bytes[16..20], &[0x00, 0x09, 0xc4, 0x00]);
        assert_eq!(&bytes[20..24], &[0x00, 0x00, 0x00, 0x01]);
        assert_eq!(&bytes[24..28], &[0x00, 0x00, 0x00, 0x01]);
        assert_eq!(&bytes[28..32], &[0x00, 0x00, 0x03, 0x00]);
    }

    #[test]
    fn headers_round_trip_through_their_byte_form() {
        let header = RasterHeader::new(640, 480);
        let decoded = RasterHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded.length, 640 * 480);
    }

    #[test]
    fn short_buffers_do_not_decode() {
        assert!(RasterHeader::from_bytes(&[0u8; 31]).is_none());
    }

    #[test]
    fn files_lay_out_header_colormap_then_pixels() {
        let palette = Palette::build(ColorScheme::Banded);
        let pixels: Vec<u8> = (0..12).map(|v| v as u8).collect();
        let mut out = Vec::new();
        write_raster(&mut out, &RasterHeader::new(4, 3), &palette, &pixels).unwrap();
        assert_eq!(out.len(), 800 + 12);
        assert_eq!(&out[32..288], &palette.red[..]);
        assert_eq!(&out[288..544], &palette.green[..]);
        assert_eq!(&out[544..800], &palette.blue[..]);
        assert_eq!(&out[800..], &pixels[..]);
    }

    #[test]
    fn mismatched_buffers_are_refused() {
        let palette = Palette::build(ColorScheme::Banded);
        let result = save_raster("/nonexistent/never-created.ras", 4, 4, &palette, &[0u8; 3]);
        assert!(result.is_err());
    }
}
