//! Contains the Viewport and PlaneMapper types, which describe the
//! relationship between the integral pixel plane, origin at the upper
//! left, and the rectangle of the complex plane being rendered.

use num::Complex;

use config::ConfigError;

/// The rectangle of the complex plane mapped onto the image.  Real
/// bounds run left to right, imaginary bounds top to bottom.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Real coordinate of the left edge.
    pub min_re: f32,
    /// Real coordinate of the right edge.
    pub max_re: f32,
    /// Imaginary coordinate of the top edge.
    pub min_im: f32,
    /// Imaginary coordinate of the bottom edge.
    pub max_im: f32,
}

/// The fixed view of the reference renderer: the whole set with a
/// little margin, in a 16:10-ish aspect.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    min_re: -2.4,
    max_re: 2.4,
    min_im: -1.5,
    max_im: 1.5,
};

impl Viewport {
    /// Validates that both axes are ascending.
    pub fn new(min_re: f32, max_re: f32, min_im: f32, max_im: f32) -> Result<Viewport, ConfigError> {
        if min_re >= max_re {
            return Err(ConfigError::EmptyViewport("real"));
        }
        if min_im >= max_im {
            return Err(ConfigError::EmptyViewport("imaginary"));
        }
        Ok(Viewport {
            min_re,
            max_re,
            min_im,
            max_im,
        })
    }
}

impl Default for Viewport {
    fn default() -> Viewport {
        DEFAULT_VIEWPORT
    }
}

/// Maps pixel coordinates to points on the complex plane.  The mapping
/// is the linear interpolation `min + span / extent * pixel` on each
/// axis, with the per-pixel step computed once at construction.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    viewport: Viewport,
    re_step: f32,
    im_step: f32,
}

impl PlaneMapper {
    /// Builds a mapper for an image of the given pixel dimensions.
    /// Dimensions are trusted here; they come from a validated
    /// `ComputeParameters`.
    pub fn new(viewport: Viewport, width: usize, height: usize) -> PlaneMapper {
        PlaneMapper {
            viewport,
            re_step: (viewport.max_re - viewport.min_re) / (width as f32),
            im_step: (viewport.max_im - viewport.min_im) / (height as f32),
        }
    }

    /// Given the column and row of a pixel, return the complex number
    /// at the equivalent location on the complex plane.
    pub fn pixel_to_point(&self, x: usize, y: usize) -> Complex<f32> {
        Complex {
            re: self.viewport.min_re + self.re_step * (x as f32),
            im: self.viewport.min_im + self.im_step * (y as f32),
        }
    }
}
