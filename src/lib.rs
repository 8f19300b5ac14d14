#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer core
//!
//! Computes the Mandelbrot escape-time fractal into a shared packed-ARGB
//! pixel buffer.  The image is split into vertical column bands which are
//! dealt round-robin to a pool of worker threads; each worker writes only
//! its own bands, so the buffer needs no locking, and a presentation loop
//! (an SDL window, a file exporter, whoever owns the surface) may read the
//! buffer at any moment and simply sees whatever has been computed so far.
//!
//! The color ramps reproduce the original renderer bit-for-bit, including
//! two quirks that are deliberately preserved rather than fixed: grayscale
//! banding when the iteration limit exceeds 255 (truncating integer
//! division), and 8-bit channel wraparound in colored mode.  Interior
//! points ("never escaped") render as transparent black, the untouched
//! sentinel entry at the end of the color table.

extern crate crossbeam;
extern crate itertools;
extern crate num;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[cfg(test)]
extern crate rand;

pub mod config;
pub mod engine;
pub mod escape;
pub mod palette;
pub mod partition;
pub mod planes;
pub mod render;
pub mod surface;

pub use config::{ColorMode, ComputeParameters, ConfigError};
pub use engine::{CancelToken, Engine, EngineHandle, RenderJob};
pub use palette::ColorTable;
pub use partition::StripePlan;
pub use planes::{PlaneMapper, Viewport};
pub use surface::PixelSurface;
