// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::path::Path;

use image::{Rgb, RgbImage};
use rayon::prelude::*;
use thiserror::Error;

use crate::colorschemes::{get_band_color, ColorMap};
use crate::config::Viewport;
use crate::plot::{ShadedField, NEVER_ESCAPED};

pub const DEFAULT_BANDS: usize = 8;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

// {{{ coordinates

/// Translate a point `(re, im)` of the complex plane to the nearest
/// `(column, row)` pixel of a `resolution x resolution` grid whose corner
/// pixels sit exactly on the corners of *viewport*.
///
/// Returns `None` for points outside of *viewport*.
pub fn point_to_pixel(
    viewport: &Viewport,
    resolution: usize,
    point: (f64, f64),
) -> Option<(usize, usize)> {
    match resolution {
        0 => return None,
        // a single sample sits on the lower bounds, like `linspace`
        1 => return Some((0, 0)),
        _ => {}
    }

    let steps = (resolution - 1) as f64;
    // Why subtraction here? rows increase as we go down,
    // but the imaginary component increases as we go up.
    let col = ((point.0 - viewport.real.lower) / viewport.real.width() * steps).round();
    let row = ((viewport.imag.upper - point.1) / viewport.imag.width() * steps).round();

    if (0.0..=steps).contains(&col) && (0.0..=steps).contains(&row) {
        Some((col as usize, row as usize))
    } else {
        None
    }
}

// }}}

// {{{ render shaded

/// Band of a level in a filled contour with *nbands* bands.
///
/// Band 0 is reserved for [`NEVER_ESCAPED`], the remaining ones split the
/// escape iterations `[lo, hi]` evenly.
fn level_to_band(level: i64, lo: i64, hi: i64, nbands: usize) -> usize {
    if level == NEVER_ESCAPED || nbands < 2 {
        return 0;
    }

    let span = (hi - lo + 1) as f64;
    let t = ((level - lo) as f64) / span;
    1 + ((t * (nbands - 1) as f64) as usize).min(nbands - 2)
}

pub fn render_shaded(field: &ShadedField, colormap: ColorMap, nbands: usize) -> RgbImage {
    let (nrows, ncols) = field.z.shape();

    // smallest escape iteration, ignoring the points in the set
    let lo = field
        .z
        .iter()
        .copied()
        .filter(|&l| l != NEVER_ESCAPED)
        .min()
        .unwrap_or(1);
    let (_, hi) = field.levels();

    let mut pixels = RgbImage::new(ncols as u32, nrows as u32);
    pixels
        .par_chunks_mut(3 * ncols.max(1))
        .enumerate()
        .for_each(|(row, band)| {
            for col in 0..ncols {
                let level = field.z[(row, col)];
                let color = get_band_color(level_to_band(level, lo, hi, nbands), nbands, colormap);

                let index = 3 * col;
                band[index] = color[0];
                band[index + 1] = color[1];
                band[index + 2] = color[2];
            }
        });

    pixels
}

// }}}

// {{{ render scatter

/// Draw the `(re, im)` points of the set in black on a white background.
pub fn render_scatter(points: &[(f64, f64)], viewport: &Viewport, resolution: usize) -> RgbImage {
    let mut pixels = RgbImage::from_pixel(resolution as u32, resolution as u32, Rgb([255, 255, 255]));

    let mut skipped = 0;
    for &point in points {
        match point_to_pixel(viewport, resolution, point) {
            Some((col, row)) => pixels.put_pixel(col as u32, row as u32, Rgb([0, 0, 0])),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("{} points fall outside of the viewport and were not drawn", skipped);
    }

    pixels
}

// }}}

pub fn save(pixels: &RgbImage, path: &Path) -> Result<(), RenderError> {
    pixels.save(path)?;
    log::info!("Wrote {}x{} image to '{}'", pixels.width(), pixels.height(), path.display());

    Ok(())
}

// {{{ tests


// }}}
