// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use nalgebra::DMatrix;
use num::complex::{c64, Complex64};

use crate::config::Viewport;

/// Return *n* evenly spaced samples over the closed interval `[lower, upper]`.
///
/// The last sample is exactly *upper*. For `n == 1` the only sample is *lower*.
pub fn linspace(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let step = (upper - lower) / ((n - 1) as f64);
            let mut samples: Vec<f64> = (0..n).map(|k| lower + (k as f64) * step).collect();
            samples[n - 1] = upper;
            samples
        }
    }
}

/// Uniform sampling of a rectangle of the complex plane.
///
/// Points are stored row-major, so that `points()[row * resolution + col]` is
/// `real_axis[col] + i imag_axis[row]`. The imaginary axis is descending, so
/// row 0 is the top of the plot.
#[derive(Clone, Debug)]
pub struct SampleGrid {
    pub resolution: usize,
    pub real_axis: Vec<f64>,
    pub imag_axis: Vec<f64>,
    points: Vec<Complex64>,
}

impl SampleGrid {
    pub fn new(resolution: usize, viewport: &Viewport) -> Self {
        let real_axis = linspace(viewport.real.lower, viewport.real.upper, resolution);
        let mut imag_axis = linspace(viewport.imag.lower, viewport.imag.upper, resolution);
        imag_axis.reverse();

        let points = imag_axis
            .iter()
            .flat_map(|&im| real_axis.iter().map(move |&re| c64(re, im)))
            .collect();

        SampleGrid {
            resolution,
            real_axis,
            imag_axis,
            points,
        }
    }

    /// Flattened starting points in row-major order.
    pub fn points(&self) -> &[Complex64] {
        &self.points
    }

    pub fn at(&self, row: usize, col: usize) -> Complex64 {
        self.points[row * self.resolution + col]
    }

    pub fn meshgrid(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        meshgrid(&self.real_axis, &self.imag_axis)
    }
}

/// Coordinate matrices `(X, Y)` with `X[(row, col)] = real_axis[col]` and
/// `Y[(row, col)] = imag_axis[row]`.
pub fn meshgrid(real_axis: &[f64], imag_axis: &[f64]) -> (DMatrix<f64>, DMatrix<f64>) {
    let (nrows, ncols) = (imag_axis.len(), real_axis.len());
    let x = DMatrix::from_fn(nrows, ncols, |_, col| real_axis[col]);
    let y = DMatrix::from_fn(nrows, ncols, |row, _| imag_axis[row]);

    (x, y)
}

// {{{ tests


// }}}
