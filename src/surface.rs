//! The shared pixel buffer.
//!
//! One `u32` per pixel, packed ARGB, row-major, `y * width + x`.  The
//! cells are relaxed atomics: workers store into their own disjoint
//! column bands while a presenter reads the whole buffer on its own
//! cadence, without any synchronization against the writers.  A
//! presented frame may therefore be torn — part old pass, part new —
//! which is exactly the live-fill look the renderer is after.

use std::sync::atomic::{AtomicU32, Ordering};

/// A width x height buffer of packed-ARGB pixels, zero-initialized
/// (i.e. all interior-sentinel) at allocation.  Cheap to share behind
/// an `Arc`; writers and readers never block each other.
pub struct PixelSurface {
    width: usize,
    height: usize,
    cells: Vec<AtomicU32>,
}

impl PixelSurface {
    /// Allocates a zeroed surface.  Dimensions come from a validated
    /// `ComputeParameters`.
    pub fn new(width: usize, height: usize) -> PixelSurface {
        let mut cells = Vec::with_capacity(width * height);
        for _ in 0..width * height {
            cells.push(AtomicU32::new(0));
        }
        PixelSurface {
            width,
            height,
            cells,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True for a zero-area surface.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Stores one pixel.  Callers stay inside their assigned column
    /// band; the partition makes concurrent stores to the same cell
    /// impossible by construction.
    #[inline]
    pub fn store(&self, x: usize, y: usize, argb: u32) {
        self.cells[y * self.width + x].store(argb, Ordering::Relaxed);
    }

    /// Loads one pixel.
    #[inline]
    pub fn load(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x].load(Ordering::Relaxed)
    }

    /// Copies the whole buffer out as plain values, in buffer order.
    /// This is what tests and exporters compare and encode.
    pub fn snapshot(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }

    /// Copies the buffer into a byte slice as native-endian ARGB
    /// words, the layout SDL's `ARGB8888` texture format expects.
    /// `out` must be exactly `4 * len()` bytes.
    pub fn copy_bytes(&self, out: &mut [u8]) {
        assert_eq!(out.len(), 4 * self.cells.len());
        for (cell, chunk) in self.cells.iter().zip(out.chunks_exact_mut(4)) {
            chunk.copy_from_slice(&cell.load(Ordering::Relaxed).to_ne_bytes());
        }
    }
}
