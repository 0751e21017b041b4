//! Colormap synthesis.  A raster file carries a 768-byte colormap, one
//! 256-entry block per channel, and the pixel byte indexes into it.
//! Two flavours are provided and chosen at run time: a smooth cosine
//! palette and the plain banded palette of early producers.

use std::f64::consts::PI;

/// Maps a byte index to its three color components.  Both variants are
/// pure functions of the index, so a palette can be rebuilt at any
/// time and compares equal to any other built from the same scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Periodic cosine waves with a distinct frequency per channel.
    /// The blue channel is evaluated ten indices ahead to shift its
    /// phase away from the red and green waves.
    Cosine,
    /// Integer ramps and modular wraps, no floating point.
    Banded,
}

impl Default for ColorScheme {
    fn default() -> ColorScheme {
        ColorScheme::Cosine
    }
}

impl ColorScheme {
    /// Recognizes the command-line names of the two schemes.
    pub fn parse(name: &str) -> Option<ColorScheme> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cos" | "cosine" => Some(ColorScheme::Cosine),
            "banded" => Some(ColorScheme::Banded),
            _ => None,
        }
    }

    /// Red component for a palette index.
    pub fn red(&self, i: usize) -> u8 {
        match *self {
            ColorScheme::Cosine => cos_component(i, 13.0),
            ColorScheme::Banded => (i / 2) as u8,
        }
    }

    /// Green component for a palette index.
    pub fn green(&self, i: usize) -> u8 {
        match *self {
            ColorScheme::Cosine => cos_component(i, 5.0),
            ColorScheme::Banded => (i % 190) as u8,
        }
    }

    /// Blue component for a palette index.
    pub fn blue(&self, i: usize) -> u8 {
        match *self {
            ColorScheme::Cosine => cos_component(i + 10, 7.0),
            ColorScheme::Banded => ((i % 120) * 2) as u8,
        }
    }
}

/// One cosine wave over the palette index, scaled into a byte.  The
/// exact peaks compute to 256 and saturate at 255.
fn cos_component(i: usize, freq: f64) -> u8 {
    let wave = ((i as f64) / 255.0 * 2.0 * PI * freq).cos();
    ((wave + 1.0) * 128.0) as u8
}

/// The three channel blocks of the colormap, in the byte layout they
/// take in the file.  Slots run from palette index 255 down to 0, the
/// order legacy producers filled them in; files written here match
/// theirs byte for byte.
pub struct Palette {
    /// Red channel block.
    pub red: [u8; 256],
    /// Green channel block.
    pub green: [u8; 256],
    /// Blue channel block.
    pub blue: [u8; 256],
}

impl Palette {
    /// Evaluates the scheme over every palette index.
    pub fn build(scheme: ColorScheme) -> Palette {
        let mut palette = Palette {
            red: [0; 256],
            green: [0; 256],
            blue: [0; 256],
        };
        for (slot, i) in (0..256).rev().enumerate() {
            palette.red[slot] = scheme.red(i);
            palette.green[slot] = scheme.green(i);
            palette.blue[slot] = scheme.blue(i);
        }
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_are_deterministic() {
        let a = Palette::build(ColorScheme::Cosine);
        let b = Palette::build(ColorScheme::Cosine);
        assert_eq!(a.red[..], b.red[..]);
        assert_eq!(a.green[..], b.green[..]);
        assert_eq!(a.blue[..], b.blue[..]);
    }

    #[test]
    fn banded_components_follow_their_formulas() {
        let scheme = ColorScheme::Banded;
        assert_eq!(scheme.red(100), 50);
        assert_eq!(scheme.green(200), 10);
        assert_eq!(scheme.blue(130), 20);
        assert_eq!(scheme.red(255), 127);
    }

    #[test]
    fn cosine_peaks_saturate() {
        let scheme = ColorScheme::Cosine;
        assert_eq!(scheme.red(0), 255);
        assert_eq!(scheme.red(255), 255);
    }

    #[test]
    fn slots_run_from_high_indices_down() {
        let scheme = ColorScheme::Banded;
        let palette = Palette::build(scheme);
        assert_eq!(palette.red[0], scheme.red(255));
        assert_eq!(palette.red[255], scheme.red(0));
        assert_eq!(palette.green[55], scheme.green(200));
    }

    #[test]
    fn the_two_schemes_differ() {
        let cos = Palette::build(ColorScheme::Cosine);
        let banded = Palette::build(ColorScheme::Banded);
        assert_ne!(cos.red[..], banded.red[..]);
    }

    #[test]
    fn scheme_names_parse() {
        assert_eq!(ColorScheme::parse("cos"), Some(ColorScheme::Cosine));
        assert_eq!(ColorScheme::parse("Banded"), Some(ColorScheme::Banded));
        assert_eq!(ColorScheme::parse("rainbow"), None);
    }
}
