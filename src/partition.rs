// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Work partitioning: how image columns are dealt out to workers.
//!
//! The image is cut into vertical bands of `band_width` columns and the
//! bands are dealt round-robin, so worker `k` of `n` owns the bands
//! starting at columns `k*bw, (k+n)*bw, (k+2n)*bw, ...`, the last one
//! clipped to the image width.  One sweep over all workers covers
//! `[0, width)` exactly once with no overlap, which is the entire
//! data-race story for the shared buffer: disjointness by construction,
//! no locks.  The single-threaded mode is just the degenerate plan of
//! one band as wide as the image.

use config::{ConfigError, MAX_WORKERS};

/// A half-open range of pixel columns assigned to one worker.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnBand {
    /// First column in the band.
    pub start: usize,
    /// One past the last column.
    pub end: usize,
}

impl ColumnBand {
    /// Number of columns covered.
    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// A validated striping plan: image width, band width, worker count.
#[derive(Copy, Clone, Debug)]
pub struct StripePlan {
    width: usize,
    band_width: usize,
    worker_count: usize,
}

impl StripePlan {
    /// Validates and builds a plan.  `band_width` must lie in
    /// `[1, width]` and `worker_count` in `[1, 100]`; `width` comes
    /// from an already validated parameter set.
    pub fn new(width: usize, band_width: usize, worker_count: usize) -> Result<StripePlan, ConfigError> {
        if band_width == 0 || band_width > width {
            return Err(ConfigError::BadBandWidth { band_width, width });
        }
        if worker_count == 0 || worker_count > MAX_WORKERS {
            return Err(ConfigError::BadWorkerCount(worker_count));
        }
        Ok(StripePlan {
            width,
            band_width,
            worker_count,
        })
    }

    /// The degenerate plan: one worker, one band spanning the image.
    pub fn single(width: usize) -> StripePlan {
        StripePlan {
            width,
            band_width: width,
            worker_count: 1,
        }
    }

    /// Number of workers the plan deals bands to.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Image width the plan partitions.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The bands owned by worker `worker` (zero-indexed), in sweep
    /// order.  The final band is clipped to the image width rather
    /// than overflowing it.
    pub fn bands(&self, worker: usize) -> impl Iterator<Item = ColumnBand> {
        let band_width = self.band_width;
        let width = self.width;
        let stride = self.band_width * self.worker_count;
        (0..)
            .map(move |cycle| worker * band_width + cycle * stride)
            .take_while(move |&start| start < width)
            .map(move |start| ColumnBand {
                start,
                end: (start + band_width).min(width),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    /// Collects one full sweep of every worker's bands and checks the
    /// partition property: each column in [0, width) covered exactly
    /// once.
    fn assert_exact_cover(plan: &StripePlan) {
        let mut hits = vec![0u8; plan.width()];
        for worker in 0..plan.worker_count() {
            for band in plan.bands(worker) {
                assert!(band.start < band.end, "empty band {:?}", band);
                assert!(band.end <= plan.width(), "band {:?} overran", band);
                for column in band.start..band.end {
                    hits[column] += 1;
                }
            }
        }
        assert!(
            hits.iter().all(|&h| h == 1),
            "cover is not exact for {:?}",
            plan
        );
    }

    #[test]
    fn rejects_bad_band_width() {
        assert!(StripePlan::new(100, 0, 4).is_err());
        assert!(StripePlan::new(100, 101, 4).is_err());
        assert!(StripePlan::new(100, 100, 4).is_ok());
    }

    #[test]
    fn rejects_bad_worker_count() {
        assert!(StripePlan::new(100, 10, 0).is_err());
        assert!(StripePlan::new(100, 10, 101).is_err());
        assert!(StripePlan::new(100, 10, 100).is_ok());
    }

    #[test]
    fn single_plan_is_one_full_band() {
        let plan = StripePlan::single(640);
        let bands: Vec<ColumnBand> = plan.bands(0).collect();
        assert_eq!(bands, vec![ColumnBand { start: 0, end: 640 }]);
        assert_exact_cover(&plan);
    }

    #[test]
    fn uneven_final_band_is_clipped() {
        // width 37, band 5, workers 4: bands at 0,5,10,15 then 20,25,
        // 30,35; the band at 35 is clipped to [35, 37).
        let plan = StripePlan::new(37, 5, 4).unwrap();
        let last: ColumnBand = plan.bands(3).last().unwrap();
        assert_eq!(last, ColumnBand { start: 35, end: 37 });
        assert_eq!(last.width(), 2);
        assert_exact_cover(&plan);
    }

    #[test]
    fn workers_past_the_width_get_nothing() {
        // width 8, band 4, 4 workers: workers 2 and 3 start past the
        // right edge and own no bands at all.
        let plan = StripePlan::new(8, 4, 4).unwrap();
        assert_eq!(plan.bands(0).count(), 1);
        assert_eq!(plan.bands(1).count(), 1);
        assert_eq!(plan.bands(2).count(), 0);
        assert_eq!(plan.bands(3).count(), 0);
        assert_exact_cover(&plan);
    }

    #[test]
    fn random_valid_plans_cover_exactly_once() {
        let mut rng = StdRng::seed_from_u64(0x6d61_6e64);
        for _ in 0..500 {
            let width = rng.gen_range(1, 1025);
            let band_width = rng.gen_range(1, width + 1);
            let worker_count = rng.gen_range(1, 101);
            let plan = StripePlan::new(width, band_width, worker_count).unwrap();
            assert_exact_cover(&plan);
        }
    }
}
