//! The frame computer: fills one column band of the shared surface.

use std::thread;
use std::time::Duration;

use itertools::iproduct;

use engine::CancelToken;
use escape::escape_count;
use palette::ColorTable;
use partition::ColumnBand;
use planes::PlaneMapper;
use surface::PixelSurface;

/// Computes every pixel of `band`: maps `(x, y)` to its complex point,
/// evaluates the escape count, and stores the table color into the
/// surface.  Column-major over the band, all rows per column.
///
/// Deterministic: the same inputs always produce the same stores, so a
/// band computed twice, or by a different worker on a different run,
/// is byte-identical.
///
/// The cancel token is checked before every pixel and the function
/// returns `false` as soon as it trips, with no store in flight.
/// `delay` is the optional cosmetic visualization throttle, a sleep
/// after each pixel; `None` runs flat out.
pub fn fill_region(
    surface: &PixelSurface,
    table: &ColorTable,
    mapper: &PlaneMapper,
    limit: usize,
    band: ColumnBand,
    cancel: &CancelToken,
    delay: Option<Duration>,
) -> bool {
    for (x, y) in iproduct!(band.start..band.end, 0..surface.height()) {
        if cancel.is_cancelled() {
            return false;
        }
        let c = mapper.pixel_to_point(x, y);
        surface.store(x, y, table.color(escape_count(c, limit)));
        if let Some(pause) = delay {
            thread::sleep(pause);
        }
    }
    true
}
