// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(rust_2018_idioms)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use shadebrot::colorschemes::ColorMap;
use shadebrot::config::{
    parse_pair, Config, ConfigError, PlotMode, Viewport, DEFAULT_ITERATIONS,
    DEFAULT_PROGRESS_EVERY, DEFAULT_RESOLUTION,
};
use shadebrot::render::DEFAULT_BANDS;
use shadebrot::Error;

/// Plot the Mandelbrot set by escape-time iteration.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of samples along each axis.
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: usize,

    /// Bounds of the real axis as LO,HI.
    #[arg(long, default_value = "-1.8,0.5", allow_hyphen_values = true)]
    real: String,

    /// Bounds of the imaginary axis as LO,HI.
    #[arg(long, default_value = "-1.2,1.2", allow_hyphen_values = true)]
    imag: String,

    /// Maximum number of iterations (negative values perform none).
    #[arg(long, default_value_t = DEFAULT_ITERATIONS as i64, allow_hyphen_values = true)]
    iterations: i64,

    /// Only plot the points in the set instead of the shaded escape times.
    #[arg(long)]
    binary: bool,

    /// Log progress every this many iterations (0 disables).
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: usize,

    /// Colormap for the shaded plot: 'spectral' or 'hue'.
    #[arg(long, default_value_t = ColorMap::Spectral)]
    colormap: ColorMap,

    /// Number of color bands in the shaded plot.
    #[arg(long, default_value_t = DEFAULT_BANDS)]
    bands: usize,

    /// Output image.
    #[arg(short, long, default_value = "mandelbrot.png")]
    output: PathBuf,

    /// Increase logging verbosity (can be repeated).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn to_config(&self) -> Result<Config, Error> {
        let real = parse_pair::<f64>(&self.real, ',').ok_or_else(|| ConfigError::InvalidPair {
            flag: "real",
            value: self.real.clone(),
        })?;
        let imag = parse_pair::<f64>(&self.imag, ',').ok_or_else(|| ConfigError::InvalidPair {
            flag: "imag",
            value: self.imag.clone(),
        })?;

        let mode = if self.binary {
            PlotMode::Binary
        } else {
            PlotMode::Shaded
        };

        let viewport = Viewport::new(real, imag)?;
        let config = Config::new(self.resolution, viewport, self.iterations)?
            .with_mode(mode)
            .with_progress_every(self.progress_every);

        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.to_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Executing...");
    let now = Instant::now();
    if let Err(err) = shadebrot::run(&config, cli.colormap, cli.bands, &cli.output) {
        log::error!("{}", err);
        return ExitCode::FAILURE;
    }

    let elapsed = now.elapsed().as_millis() as f32 / 1000.0;
    log::info!("Elapsed {}s!", elapsed);

    ExitCode::SUCCESS
}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["shadebrot"]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
        assert_eq!(config.maxit, DEFAULT_ITERATIONS);
        assert_eq!(config.viewport, Viewport::default());
        assert_eq!(config.mode, PlotMode::Shaded);
        assert_eq!(cli.colormap, ColorMap::Spectral);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::parse_from([
            "shadebrot",
            "--resolution",
            "3",
            "--real",
            "-2,1",
            "--imag",
            "-1,1",
            "--iterations",
            "-4",
            "--binary",
            "--colormap",
            "hue",
        ]);
        let config = cli.to_config().unwrap();

        assert_eq!(config.resolution, 3);
        assert_eq!(config.viewport, Viewport::new((-2.0, 1.0), (-1.0, 1.0)).unwrap());
        assert_eq!(config.maxit, 0);
        assert_eq!(config.mode, PlotMode::Binary);
        assert_eq!(cli.colormap, ColorMap::Hue);
    }

    #[test]
    fn test_cli_invalid_values() {
        let cli = Cli::parse_from(["shadebrot", "--real", "1,-2"]);
        assert!(matches!(
            cli.to_config(),
            Err(Error::Config(ConfigError::InvalidRange { .. }))
        ));

        let cli = Cli::parse_from(["shadebrot", "--imag", "-1;1"]);
        assert!(matches!(
            cli.to_config(),
            Err(Error::Config(ConfigError::InvalidPair { flag: "imag", .. }))
        ));

        let cli = Cli::parse_from(["shadebrot", "--resolution", "0"]);
        assert!(matches!(
            cli.to_config(),
            Err(Error::Config(ConfigError::InvalidResolution { resolution: 0 }))
        ));
    }
}

// }}}
