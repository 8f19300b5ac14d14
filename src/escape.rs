//! The escape-time evaluator.  This is the cost center of the whole
//! renderer: one call per pixel, up to the iteration limit of complex
//! multiply-adds per call.

use num::Complex;

/// Iterates `z = z^2 + c` from zero and returns the 1-indexed step at
/// which `|z|^2` first reaches 4.0 (escape radius 2), or `limit` if the
/// orbit never escapes within the limit.  The result is always in
/// `[0, limit]`, and doubles as an index into the color table.
///
/// Single precision is deliberate: it matches the reference renderer
/// and this viewport never zooms deep enough for f32 to run out of
/// mantissa.
pub fn escape_count(c: Complex<f32>, limit: usize) -> usize {
    let mut z = Complex { re: 0.0f32, im: 0.0f32 };
    for i in 0..limit {
        z = z * z + c;
        if z.norm_sqr() >= 4.0 {
            return i + 1;
        }
    }
    limit
}
