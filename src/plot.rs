// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use nalgebra::DMatrix;
use num::complex::Complex64;

use crate::sampler::{meshgrid, SampleGrid};

/// Level given to points that never escaped, so that they get their own band.
pub const NEVER_ESCAPED: i64 = -1;

/// Data for a filled contour plot of the escape iterations.
///
/// Only the axes are stored. The full coordinate matrices are built on demand
/// by [`ShadedField::meshgrid`] for consumers that need them.
#[derive(Clone, Debug)]
pub struct ShadedField {
    /// Ascending real axis (columns).
    pub real_axis: Vec<f64>,
    /// Descending imaginary axis (rows).
    pub imag_axis: Vec<f64>,
    /// Escape iteration of every grid point, with 0 replaced by [`NEVER_ESCAPED`].
    pub z: DMatrix<i64>,
}

impl ShadedField {
    pub fn new(grid: &SampleGrid, record: &[usize]) -> Self {
        let n = grid.resolution;
        assert_eq!(record.len(), n * n, "escape record does not match the grid");

        let z = DMatrix::from_fn(n, n, |row, col| match record[row * n + col] {
            0 => NEVER_ESCAPED,
            k => k as i64,
        });

        ShadedField {
            real_axis: grid.real_axis.clone(),
            imag_axis: grid.imag_axis.clone(),
            z,
        }
    }

    /// Coordinate matrices `(X, Y)` matching the cells of `z`.
    pub fn meshgrid(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        meshgrid(&self.real_axis, &self.imag_axis)
    }

    /// Smallest and largest level in the field.
    pub fn levels(&self) -> (i64, i64) {
        let lo = self.z.iter().copied().min().unwrap_or(NEVER_ESCAPED);
        let hi = self.z.iter().copied().max().unwrap_or(NEVER_ESCAPED);
        (lo, hi)
    }
}

/// Coordinates `(re, im)` for a scatter plot of the points in the set.
pub fn scatter_points(surviving: &[Complex64]) -> Vec<(f64, f64)> {
    surviving.iter().map(|c| (c.re, c.im)).collect()
}

// {{{ tests


// }}}
