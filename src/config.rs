// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Run configuration: validated image dimensions, iteration limit, and
//! color mode.  Every bound is checked exactly once, here, before any
//! computation starts; the rest of the crate takes these invariants for
//! granted.

use std::str::FromStr;

/// Largest supported image width, in pixels.
pub const MAX_WIDTH: usize = 1024;
/// Largest supported image height, in pixels.
pub const MAX_HEIGHT: usize = 768;
/// Largest supported iteration limit per point.
pub const MAX_ITERATIONS: usize = 1000;
/// Largest supported worker count for the striped mode.
pub const MAX_WORKERS: usize = 100;

/// Everything that can be wrong with a run configuration.  All of these
/// are detected synchronously, before a single pixel is computed.
#[derive(Debug, Fail, PartialEq)]
pub enum ConfigError {
    /// Width out of range.
    #[fail(display = "width must be between 1 and 1024, got {}", _0)]
    BadWidth(usize),
    /// Height out of range.
    #[fail(display = "height must be between 1 and 768, got {}", _0)]
    BadHeight(usize),
    /// Iteration limit out of range.  Zero is rejected here so the color
    /// table never has to divide by it.
    #[fail(display = "iterations must be between 1 and 1000, got {}", _0)]
    BadIterations(usize),
    /// Color mode was not one of the two known encodings.
    #[fail(display = "color mode must be 0 (grayscale) or 1 (colored), got {}", _0)]
    BadColorMode(String),
    /// Band width outside [1, width].
    #[fail(display = "band width must be between 1 and the image width {}, got {}", width, band_width)]
    BadBandWidth {
        /// The rejected band width.
        band_width: usize,
        /// The image width it was checked against.
        width: usize,
    },
    /// Worker count outside [1, 100].
    #[fail(display = "worker count must be between 1 and 100, got {}", _0)]
    BadWorkerCount(usize),
    /// Viewport bounds are not ascending on the named axis.
    #[fail(display = "viewport {} bounds must be ascending", _0)]
    EmptyViewport(&'static str),
}

/// How escape counts map to colors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorMode {
    /// Linear gray ramp.
    Grayscale,
    /// The original three-channel ramp, wraparound and all.
    Colored,
}

impl FromStr for ColorMode {
    type Err = ConfigError;

    /// The command line encodes the mode as `0` (grayscale) or `1`
    /// (colored).
    fn from_str(s: &str) -> Result<ColorMode, ConfigError> {
        match s {
            "0" => Ok(ColorMode::Grayscale),
            "1" => Ok(ColorMode::Colored),
            other => Err(ConfigError::BadColorMode(other.to_string())),
        }
    }
}

/// A validated set of run parameters.  Constructing one is the only way
/// to get dimensions and an iteration limit into the renderer, so the
/// bounds above hold everywhere downstream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComputeParameters {
    width: usize,
    height: usize,
    iterations: usize,
    mode: ColorMode,
}

impl ComputeParameters {
    /// Validates and builds.  Rejects zero or oversized dimensions, and
    /// an iteration limit of zero or more than [`MAX_ITERATIONS`].
    pub fn new(
        width: usize,
        height: usize,
        iterations: usize,
        mode: ColorMode,
    ) -> Result<ComputeParameters, ConfigError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(ConfigError::BadWidth(width));
        }
        if height == 0 || height > MAX_HEIGHT {
            return Err(ConfigError::BadHeight(height));
        }
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(ConfigError::BadIterations(iterations));
        }
        Ok(ComputeParameters {
            width,
            height,
            iterations,
            mode,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Per-point iteration limit.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Color mode.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }
}
