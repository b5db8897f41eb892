// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use colors_transform::{Color, Hsl};
use image::Rgb;

// Sampled from matplotlib's `nipy_spectral`, which starts at black.
const SPECTRAL_PALETTE: [Rgb<u8>; 16] = [
    Rgb([0, 0, 0]),
    Rgb([110, 0, 126]),
    Rgb([129, 0, 148]),
    Rgb([0, 0, 170]),
    Rgb([0, 0, 221]),
    Rgb([0, 119, 221]),
    Rgb([0, 153, 208]),
    Rgb([0, 170, 153]),
    Rgb([0, 156, 46]),
    Rgb([0, 196, 0]),
    Rgb([0, 240, 0]),
    Rgb([196, 255, 0]),
    Rgb([244, 227, 0]),
    Rgb([255, 153, 0]),
    Rgb([229, 0, 0]),
    Rgb([204, 204, 204]),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMap {
    /// Banded palette, with black for the points in the set.
    #[default]
    Spectral,
    /// Full sweep of the HSL hue circle, with black for the points in the set.
    Hue,
}

impl FromStr for ColorMap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spectral" => Ok(ColorMap::Spectral),
            "hue" => Ok(ColorMap::Hue),
            _ => Err(format!("unknown colormap '{}' (expected 'spectral' or 'hue')", s)),
        }
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match *self {
            ColorMap::Spectral => "spectral",
            ColorMap::Hue => "hue",
        })
    }
}

/// Determine the color for a normalized level *c* in [0, 1].
fn get_hue_color(c: f64) -> Rgb<u8> {
    let n = c.clamp(0.0, 1.0);

    // NOTE: in HSL, we have that H in [0, 360], S in [0, 100] and L in [0, 100]
    let hue = (n * 300.0).round() as f32;
    let saturation = 100.0;
    let lightness = if n > 0.0 { 50.0 } else { 0.0 };

    let (r, g, b) = Hsl::from(hue, saturation, lightness).to_rgb().as_tuple();
    Rgb([r as u8, g as u8, b as u8])
}

/// Determine the color of *band* out of *nbands* for the given colormap.
///
/// Band 0 is always drawn black.
pub fn get_band_color(band: usize, nbands: usize, colormap: ColorMap) -> Rgb<u8> {
    let t = if nbands > 1 {
        (band.min(nbands - 1) as f64) / ((nbands - 1) as f64)
    } else {
        0.0
    };

    match colormap {
        ColorMap::Spectral => {
            let last = SPECTRAL_PALETTE.len() - 1;
            SPECTRAL_PALETTE[(t * last as f64).round() as usize]
        }
        ColorMap::Hue => get_hue_color(t),
    }
}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_band_is_black() {
        assert_eq!(get_band_color(0, 8, ColorMap::Spectral), Rgb([0, 0, 0]));
        assert_eq!(get_band_color(0, 8, ColorMap::Hue), Rgb([0, 0, 0]));
        assert_eq!(get_band_color(5, 1, ColorMap::Spectral), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_band_colors_are_distinct() {
        let colors: Vec<Rgb<u8>> = (0..8)
            .map(|b| get_band_color(b, 8, ColorMap::Spectral))
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }

        assert_eq!(get_band_color(7, 8, ColorMap::Spectral), Rgb([204, 204, 204]));
        assert_eq!(get_band_color(100, 8, ColorMap::Spectral), Rgb([204, 204, 204]));
        assert_ne!(get_band_color(3, 8, ColorMap::Hue), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_colormap_from_str() {
        assert_eq!("spectral".parse::<ColorMap>(), Ok(ColorMap::Spectral));
        assert_eq!("Hue".parse::<ColorMap>(), Ok(ColorMap::Hue));
        assert!("viridis".parse::<ColorMap>().is_err());
        assert_eq!(ColorMap::Hue.to_string(), "hue");
    }
}

// }}}
