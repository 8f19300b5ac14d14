// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The worker pool driver.
//!
//! A controller thread owns a crossbeam scope of compute workers, one
//! per plan slot.  Each worker sweeps its assigned bands; in continuous
//! mode it starts over from its first band when it runs out, forever,
//! so the window shows a live recomputation.  Cancellation is strictly
//! cooperative: a shared flag the workers poll at every pixel.  Nobody
//! is ever terminated from outside, so shutdown cannot strand a write
//! into a buffer that is being torn down — `shutdown` trips the flag
//! and then joins the controller, which in turn joins every worker,
//! before it returns.

use std::io;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam;

use config::{ComputeParameters, ConfigError};
use palette::ColorTable;
use partition::StripePlan;
use planes::{PlaneMapper, Viewport};
use render::fill_region;
use surface::PixelSurface;

/// A cloneable cooperative cancellation flag.  Workers poll it at
/// pixel granularity; anyone holding a clone may trip it.
#[derive(Clone)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A fresh, untripped token.
    pub fn new() -> CancelToken {
        CancelToken(Arc::new(AtomicBool::new(false)))
    }

    /// Trips the token.  Irrevocable.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// True once any clone has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for CancelToken {
    fn default() -> CancelToken {
        CancelToken::new()
    }
}

/// Everything a render run needs: validated parameters, the viewport,
/// the striping plan, whether to recompute continuously, and the
/// optional cosmetic per-pixel delay.
#[derive(Copy, Clone, Debug)]
pub struct RenderJob {
    params: ComputeParameters,
    viewport: Viewport,
    plan: StripePlan,
    continuous: bool,
    delay: Option<Duration>,
}

impl RenderJob {
    /// The single-threaded job: one worker computes the whole image
    /// once, then the buffer is stable.
    pub fn single(params: ComputeParameters) -> RenderJob {
        RenderJob {
            params,
            viewport: Viewport::default(),
            plan: StripePlan::single(params.width()),
            continuous: false,
            delay: None,
        }
    }

    /// The striped job: `worker_count` workers deal `band_width`-column
    /// bands round-robin and recompute continuously until cancelled.
    pub fn striped(
        params: ComputeParameters,
        band_width: usize,
        worker_count: usize,
    ) -> Result<RenderJob, ConfigError> {
        let plan = StripePlan::new(params.width(), band_width, worker_count)?;
        Ok(RenderJob {
            params,
            viewport: Viewport::default(),
            plan,
            continuous: true,
            delay: None,
        })
    }

    /// Replaces the default viewport.
    pub fn with_viewport(mut self, viewport: Viewport) -> RenderJob {
        self.viewport = viewport;
        self
    }

    /// Sets the per-pixel visualization throttle.
    pub fn with_delay(mut self, delay: Duration) -> RenderJob {
        self.delay = Some(delay);
        self
    }

    /// Turns continuous recomputation on or off, overriding the mode's
    /// default.
    pub fn with_continuous(mut self, continuous: bool) -> RenderJob {
        self.continuous = continuous;
        self
    }

    /// The job's parameter set.
    pub fn params(&self) -> &ComputeParameters {
        &self.params
    }
}

/// Launches render jobs.
pub struct Engine;

impl Engine {
    /// Spawns the controller thread for `job` and returns its handle.
    /// The color table and surface are shared read-only and
    /// write-disjoint respectively, so both just ride behind `Arc`s.
    ///
    /// Fails only if the controller thread cannot be spawned; a worker
    /// failure after that is fatal to the process (there is no
    /// degraded partial-pool mode).
    pub fn start(
        job: RenderJob,
        table: Arc<ColorTable>,
        surface: Arc<PixelSurface>,
    ) -> io::Result<EngineHandle> {
        assert_eq!(surface.width(), job.params.width());
        assert_eq!(surface.height(), job.params.height());
        let cancel = CancelToken::new();
        let pool_cancel = cancel.clone();
        let controller = thread::Builder::new()
            .name("mandel-pool".to_string())
            .spawn(move || run_pool(&job, &table, &surface, &pool_cancel))?;
        Ok(EngineHandle {
            cancel,
            controller: Some(controller),
        })
    }
}

fn run_pool(job: &RenderJob, table: &ColorTable, surface: &PixelSurface, cancel: &CancelToken) {
    let plan = job.plan;
    let mapper = PlaneMapper::new(job.viewport, surface.width(), surface.height());
    let limit = job.params.iterations();
    info!(
        "starting {} worker(s), {} columns, {} mode",
        plan.worker_count(),
        plan.width(),
        if job.continuous {
            "continuous"
        } else {
            "single-pass"
        }
    );
    let result = crossbeam::scope(|scope| {
        for worker in 0..plan.worker_count() {
            scope.spawn(move |_| loop {
                for band in plan.bands(worker) {
                    if !fill_region(surface, table, &mapper, limit, band, cancel, job.delay) {
                        debug!("worker {} cancelled mid-band", worker);
                        return;
                    }
                }
                debug!("worker {} completed a sweep", worker);
                if !job.continuous || cancel.is_cancelled() {
                    return;
                }
            });
        }
    });
    if result.is_err() {
        // A worker panic would leave a hole in the partition; there is
        // no sensible way to keep presenting a half-pool image.
        error!("a compute worker panicked; aborting");
        process::abort();
    }
    info!("worker pool stopped");
}

/// Handle to a running engine.  Dropping it without calling `wait` or
/// `shutdown` cancels and joins, so the pool can never outlive the
/// handle's owner.
pub struct EngineHandle {
    cancel: CancelToken,
    controller: Option<thread::JoinHandle<()>>,
}

impl EngineHandle {
    /// A clone of the pool's cancellation token.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Blocks until the pool finishes of its own accord.  Only
    /// meaningful for single-pass jobs; a continuous job never
    /// finishes without cancellation.
    pub fn wait(mut self) {
        if let Some(controller) = self.controller.take() {
            if controller.join().is_err() {
                error!("controller thread panicked during wait");
            }
        }
    }

    /// Trips the cancellation token and blocks until every worker has
    /// reached its check point and exited.  When this returns, no
    /// write to the surface is in flight anywhere.
    pub fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(controller) = self.controller.take() {
            if controller.join().is_err() {
                error!("controller thread panicked during shutdown");
            }
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(controller) = self.controller.take() {
            let _ = controller.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ColorMode;
    use partition::ColumnBand;

    fn params(width: usize, height: usize, iterations: usize) -> ComputeParameters {
        ComputeParameters::new(width, height, iterations, ColorMode::Colored).unwrap()
    }

    fn reference_fill(params: &ComputeParameters) -> Vec<u32> {
        let surface = PixelSurface::new(params.width(), params.height());
        let table = ColorTable::build(params).unwrap();
        let mapper = PlaneMapper::new(Viewport::default(), params.width(), params.height());
        fill_region(
            &surface,
            &table,
            &mapper,
            params.iterations(),
            ColumnBand {
                start: 0,
                end: params.width(),
            },
            &CancelToken::new(),
            None,
        );
        surface.snapshot()
    }

    #[test]
    fn single_pass_engine_matches_a_direct_fill() {
        let params = params(80, 60, 25);
        let surface = Arc::new(PixelSurface::new(80, 60));
        let table = Arc::new(ColorTable::build(&params).unwrap());
        let handle = Engine::start(RenderJob::single(params), table, surface.clone()).unwrap();
        handle.wait();
        assert_eq!(surface.snapshot(), reference_fill(&params));
    }

    #[test]
    fn striped_single_pass_matches_a_direct_fill() {
        // Same image, four workers on 7-column bands, one sweep: the
        // partition must be invisible in the output.
        let params = params(80, 60, 25);
        let surface = Arc::new(PixelSurface::new(80, 60));
        let table = Arc::new(ColorTable::build(&params).unwrap());
        let job = RenderJob::striped(params, 7, 4)
            .unwrap()
            .with_continuous(false);
        let handle = Engine::start(job, table, surface.clone()).unwrap();
        handle.wait();
        assert_eq!(surface.snapshot(), reference_fill(&params));
    }

    #[test]
    fn continuous_engine_shuts_down_cleanly() {
        let params = params(64, 48, 40);
        let surface = Arc::new(PixelSurface::new(64, 48));
        let table = Arc::new(ColorTable::build(&params).unwrap());
        let job = RenderJob::striped(params, 4, 3).unwrap();
        let handle = Engine::start(job, table, surface.clone()).unwrap();
        thread::sleep(Duration::from_millis(20));
        handle.shutdown();
        // After shutdown no worker is alive; the snapshot is stable.
        let a = surface.snapshot();
        thread::sleep(Duration::from_millis(10));
        assert_eq!(a, surface.snapshot());
    }

    #[test]
    fn dropping_the_handle_cancels_the_pool() {
        let params = params(64, 48, 40);
        let surface = Arc::new(PixelSurface::new(64, 48));
        let table = Arc::new(ColorTable::build(&params).unwrap());
        let job = RenderJob::striped(params, 4, 3).unwrap();
        let handle = Engine::start(job, table, surface.clone()).unwrap();
        let token = handle.cancel_token();
        drop(handle);
        assert!(token.is_cancelled());
    }

    #[test]
    fn throttled_job_still_completes() {
        let params = params(8, 8, 10);
        let surface = Arc::new(PixelSurface::new(8, 8));
        let table = Arc::new(ColorTable::build(&params).unwrap());
        let job = RenderJob::single(params).with_delay(Duration::from_micros(10));
        let handle = Engine::start(job, table, surface.clone()).unwrap();
        handle.wait();
        assert_eq!(surface.snapshot(), reference_fill(&params));
    }
}
