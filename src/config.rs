// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_RESOLUTION: usize = 5000;
pub const DEFAULT_REAL_BOUNDS: (f64, f64) = (-1.8, 0.5);
pub const DEFAULT_IMAG_BOUNDS: (f64, f64) = (-1.2, 1.2);
pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_PROGRESS_EVERY: usize = 5;

// {{{ Error

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {axis} range [{lower}, {upper}]: lower bound must be finite and strictly below the upper bound")]
    InvalidRange {
        axis: Axis,
        lower: f64,
        upper: f64,
    },
    #[error("invalid resolution {resolution}: the number of samples per axis must be positive")]
    InvalidResolution { resolution: usize },
    #[error("invalid value '{value}' for '--{flag}': expected a pair like 'LO,HI'")]
    InvalidPair { flag: &'static str, value: String },
}

// }}}

// {{{ Axis

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Real,
    Imag,
}

impl fmt::Display for Axis {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(match *self {
            Axis::Real => "real",
            Axis::Imag => "imaginary",
        })
    }
}

/// A closed interval `[lower, upper]` along one axis of the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    pub fn new(axis: Axis, lower: f64, upper: f64) -> Result<Self, ConfigError> {
        // NOTE: written so that NaN bounds also fail the check
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(ConfigError::InvalidRange { axis, lower, upper });
        }

        Ok(AxisRange { lower, upper })
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

// }}}

// {{{ Viewport

/// Axis-aligned rectangle of the complex plane that gets sampled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub real: AxisRange,
    pub imag: AxisRange,
}

impl Viewport {
    pub fn new(real: (f64, f64), imag: (f64, f64)) -> Result<Self, ConfigError> {
        Ok(Viewport {
            real: AxisRange::new(Axis::Real, real.0, real.1)?,
            imag: AxisRange::new(Axis::Imag, imag.0, imag.1)?,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            real: AxisRange {
                lower: DEFAULT_REAL_BOUNDS.0,
                upper: DEFAULT_REAL_BOUNDS.1,
            },
            imag: AxisRange {
                lower: DEFAULT_IMAG_BOUNDS.0,
                upper: DEFAULT_IMAG_BOUNDS.1,
            },
        }
    }
}

// }}}

// {{{ Config

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlotMode {
    /// Filled contour of the escape iterations.
    #[default]
    Shaded,
    /// Black scatter of the points that never escaped.
    Binary,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Number of samples along each axis.
    pub resolution: usize,
    /// Region of the complex plane to sample.
    pub viewport: Viewport,
    /// Maximum number of iterations before a point is considered in the set.
    pub maxit: usize,
    /// Output type.
    pub mode: PlotMode,
    /// Report progress every this many iterations (0 disables reporting).
    pub progress_every: usize,
}

impl Config {
    /// Validate the run parameters.
    ///
    /// A negative iteration budget is not an error: no iterations are
    /// performed and every point is reported as never escaping.
    pub fn new(resolution: usize, viewport: Viewport, iterations: i64) -> Result<Self, ConfigError> {
        if resolution == 0 {
            return Err(ConfigError::InvalidResolution { resolution });
        }

        let maxit = if iterations < 0 {
            log::warn!("Negative iteration budget {} treated as 0", iterations);
            0
        } else {
            iterations as usize
        };

        Ok(Config {
            resolution,
            viewport,
            maxit,
            mode: PlotMode::default(),
            progress_every: DEFAULT_PROGRESS_EVERY,
        })
    }

    pub fn with_mode(mut self, mode: PlotMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolution: DEFAULT_RESOLUTION,
            viewport: Viewport::default(),
            maxit: DEFAULT_ITERATIONS,
            mode: PlotMode::default(),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

// }}}

// {{{ parse_pair

/// Parse the string *s* as a pair like `"400x600"` or `"-1.8,0.5"`.
///
/// *s* should have the form `<left><sep><right>`, where both sides can be
/// parsed by `T::from_str`. Returns `None` if it does not.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let (left, right) = s.split_once(separator)?;
    match (T::from_str(left.trim()), T::from_str(right.trim())) {
        (Ok(l), Ok(r)) => Some((l, r)),
        _ => None,
    }
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair::<i32>("", ','), None);
        assert_eq!(parse_pair::<i32>("10,", ','), None);
        assert_eq!(parse_pair::<i32>(",10", ','), None);
        assert_eq!(parse_pair::<i32>("10,20", ','), Some((10, 20)));
        assert_eq!(parse_pair::<i32>("10,20xy", ','), None);
        assert_eq!(parse_pair::<f64>("-1.8,0.5", ','), Some((-1.8, 0.5)));
        assert_eq!(parse_pair::<f64>("0.5x1.5", 'x'), Some((0.5, 1.5)));
    }

    #[test]
    fn test_axis_range_rejects_inverted_bounds() {
        assert_eq!(
            AxisRange::new(Axis::Real, 1.0, -2.0),
            Err(ConfigError::InvalidRange {
                axis: Axis::Real,
                lower: 1.0,
                upper: -2.0
            })
        );
        assert!(AxisRange::new(Axis::Imag, 0.5, 0.5).is_err());
        assert!(AxisRange::new(Axis::Imag, f64::NAN, 1.0).is_err());
        assert!(AxisRange::new(Axis::Real, -1.0, f64::INFINITY).is_err());
        assert!(AxisRange::new(Axis::Real, -2.0, 1.0).is_ok());
    }

    #[test]
    fn test_error_names_parameter() {
        let err = Viewport::new((-2.0, 1.0), (1.0, -1.0)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("imaginary"), "{}", msg);
        assert!(msg.contains("strictly below"), "{}", msg);

        let err = Config::new(0, Viewport::default(), 10).unwrap_err();
        assert_eq!(err, ConfigError::InvalidResolution { resolution: 0 });
        assert!(err.to_string().contains("resolution"));
    }

    #[test]
    fn test_negative_budget_is_zero() {
        let config = Config::new(3, Viewport::default(), -7).unwrap();
        assert_eq!(config.maxit, 0);

        let config = Config::new(3, Viewport::default(), 42).unwrap();
        assert_eq!(config.maxit, 42);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.resolution, DEFAULT_RESOLUTION);
        assert_eq!(config.maxit, DEFAULT_ITERATIONS);
        assert_eq!(config.mode, PlotMode::Shaded);
        assert_eq!(config.viewport.real.lower, -1.8);
        assert_eq!(config.viewport.imag.upper, 1.2);

        let config = config.with_mode(PlotMode::Binary).with_progress_every(0);
        assert_eq!(config.mode, PlotMode::Binary);
        assert_eq!(config.progress_every, 0);
    }
}

// }}}
