// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The color table: one packed-ARGB entry per possible escape count.
//!
//! The ramps replicate the original renderer's integer arithmetic
//! exactly, which brings two quirks along.  The per-step increment is
//! `255 / limit` with truncating division, so a limit above 255 yields
//! an increment of zero for early bands (visible banding, and with a
//! limit over 255 a fully black grayscale ramp).  In colored mode the
//! three channel formulas overflow 8 bits and wrap.  Both are defined,
//! test-pinned behavior here, not bugs to fix.

use config::{ColorMode, ComputeParameters, ConfigError};

#[inline]
fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// An immutable table of `limit + 1` packed-ARGB colors indexed by
/// escape count.  The final entry, index `limit`, is never written by
/// the ramp loop and stays at its zero initialization: transparent
/// black, the sentinel for interior points.  Built once per run and
/// shared read-only across all workers.
#[derive(Clone, Debug)]
pub struct ColorTable {
    entries: Vec<u32>,
}

impl ColorTable {
    /// Builds the table for a parameter set.  The iteration limit is
    /// already validated nonzero by `ComputeParameters`, but the guard
    /// is repeated here so this type alone can never divide by zero.
    pub fn build(params: &ComputeParameters) -> Result<ColorTable, ConfigError> {
        Self::with_limit(params.iterations(), params.mode())
    }

    /// Builds a table from a bare limit and mode.
    pub fn with_limit(limit: usize, mode: ColorMode) -> Result<ColorTable, ConfigError> {
        if limit == 0 {
            return Err(ConfigError::BadIterations(0));
        }
        let step = 255 / limit;
        let mut entries = vec![0u32; limit + 1];
        for (i, entry) in entries.iter_mut().enumerate().take(limit) {
            *entry = match mode {
                ColorMode::Grayscale => {
                    let gray = (i * step) as u8;
                    pack_argb(255, gray, gray, gray)
                }
                ColorMode::Colored => pack_argb(
                    255,
                    (212 + 2 * i * step) as u8,
                    (149 + 3 * i * step) as u8,
                    (97 + i * step) as u8,
                ),
            };
        }
        Ok(ColorTable { entries })
    }

    /// The color for an escape count.  Counts come from `escape_count`
    /// with the same limit, so they are always in range.
    #[inline]
    pub fn color(&self, count: usize) -> u32 {
        self.entries[count]
    }

    /// Number of entries: iteration limit plus the sentinel.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A table is never empty; this exists to keep clippy company with
    /// `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The interior sentinel color (always the last entry).
    pub fn interior(&self) -> u32 {
        self.entries[self.entries.len() - 1]
    }
}
