// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(rust_2018_idioms)]

pub mod colorschemes;
pub mod config;
pub mod mandelbrot;
pub mod plot;
pub mod render;
pub mod sampler;

use std::path::Path;
use std::time::Instant;

use image::RgbImage;
use thiserror::Error;

use crate::colorschemes::ColorMap;
use crate::config::{Config, ConfigError, PlotMode};
use crate::mandelbrot::{EscapeResult, Mandelbrot};
use crate::plot::{scatter_points, ShadedField};
use crate::render::RenderError;
use crate::sampler::SampleGrid;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Sample the viewport and run the escape-time iteration on every point.
pub fn compute(config: &Config) -> (SampleGrid, EscapeResult) {
    let grid = SampleGrid::new(config.resolution, &config.viewport);
    log::info!(
        "Sampling {} points on [{}, {}] x [{}, {}]",
        grid.points().len(),
        config.viewport.real.lower,
        config.viewport.real.upper,
        config.viewport.imag.lower,
        config.viewport.imag.upper
    );

    let now = Instant::now();
    let result = Mandelbrot::new(config.maxit)
        .with_progress(config.progress_every, |p| {
            log::info!("On iteration {} ({} points active)", p.iteration, p.active)
        })
        .run(grid.points());
    log::debug!("Escape iteration took {:.3}s", now.elapsed().as_secs_f32());

    (grid, result)
}

/// Rasterize the result according to the plot mode of *config*.
pub fn plot(
    config: &Config,
    grid: &SampleGrid,
    result: &EscapeResult,
    colormap: ColorMap,
    nbands: usize,
) -> RgbImage {
    match config.mode {
        PlotMode::Shaded => {
            let field = ShadedField::new(grid, &result.record);
            render::render_shaded(&field, colormap, nbands)
        }
        PlotMode::Binary => {
            let points = scatter_points(&result.surviving);
            render::render_scatter(&points, &config.viewport, config.resolution)
        }
    }
}

/// Compute, plot and save in one go.
pub fn run(config: &Config, colormap: ColorMap, nbands: usize, output: &Path) -> Result<(), Error> {
    let (grid, result) = compute(config);
    log::info!(
        "{} of {} points did not escape after {} iterations",
        result.surviving.len(),
        result.record.len(),
        config.maxit
    );

    let pixels = plot(config, &grid, &result, colormap, nbands);
    render::save(&pixels, output)?;

    Ok(())
}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Viewport;

    #[test]
    fn test_run_writes_both_modes() {
        let dir = tempfile::tempdir().unwrap();
        let viewport = Viewport::new((-2.0, 0.5), (-1.25, 1.25)).unwrap();

        for mode in [PlotMode::Shaded, PlotMode::Binary] {
            let config = Config::new(24, viewport, 16).unwrap().with_mode(mode);
            let path = dir.path().join(format!("{:?}.png", mode));

            run(&config, ColorMap::Spectral, 8, &path).unwrap();

            let loaded = image::open(&path).unwrap();
            assert_eq!((loaded.width(), loaded.height()), (24, 24));
        }
    }

    #[test]
    fn test_binary_plot_draws_scatter_points() {
        let viewport = Viewport::new((-2.0, 1.0), (-1.0, 1.0)).unwrap();
        let config = Config::new(3, viewport, 3)
            .unwrap()
            .with_mode(PlotMode::Binary)
            .with_progress_every(0);
        let (grid, result) = compute(&config);

        let pixels = plot(&config, &grid, &result, ColorMap::Spectral, 8);
        let black: Vec<(u32, u32)> = pixels
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == image::Rgb([0, 0, 0]))
            .map(|(col, row, _)| (col, row))
            .collect();

        // -2 and -0.5 on the real axis
        assert_eq!(black, vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_compute_conservation() {
        let config = Config::new(16, Viewport::default(), 20).unwrap();
        let (grid, result) = compute(&config);

        assert_eq!(grid.points().len(), 256);
        assert_eq!(result.record.len(), 256);
        assert_eq!(result.interior_count(), result.surviving.len());
    }
}

// }}}
