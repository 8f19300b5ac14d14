// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The windowed viewer.  Parses the fixed positional command line,
//! starts the worker pool, then sits in the present loop until the
//! window is closed, at which point the pool is cancelled and joined
//! before SDL tears anything down.

extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelview;
extern crate sdl2;

use std::env;
use std::process;
use std::sync::Arc;

use sdl2::event::Event;
use sdl2::pixels::PixelFormatEnum;

use mandelview::{ColorMode, ColorTable, ComputeParameters, Engine, PixelSurface, RenderJob};

const USAGE: &str = "Usage: mandelview WIDTH HEIGHT ITERATIONS COLORMODE [BANDWIDTH WORKERS]
  WIDTH       image width in pixels, 1..=1024
  HEIGHT      image height in pixels, 1..=768
  ITERATIONS  escape iteration limit, 1..=1000
  COLORMODE   0 for grayscale, 1 for colored
  BANDWIDTH   striped mode: columns per band, 1..=WIDTH
  WORKERS     striped mode: worker threads, 1..=100";

/// How long the present loop waits for an event before refreshing the
/// window from the buffer anyway.
const PRESENT_TIMEOUT_MS: u32 = 5;

fn parse_number(s: &str, what: &str) -> Result<usize, String> {
    s.parse::<usize>()
        .map_err(|_| format!("could not parse {}: {}", what, s))
}

/// Builds a render job from the positional arguments (program name
/// already stripped).  Four arguments select the single-threaded
/// single-pass mode; six select the striped continuous mode.
fn parse_job(args: &[String]) -> Result<RenderJob, String> {
    let width = parse_number(&args[0], "width")?;
    let height = parse_number(&args[1], "height")?;
    let iterations = parse_number(&args[2], "iterations")?;
    let mode: ColorMode = args[3].parse().map_err(|e| format!("{}", e))?;
    let params =
        ComputeParameters::new(width, height, iterations, mode).map_err(|e| format!("{}", e))?;
    if args.len() == 6 {
        let band_width = parse_number(&args[4], "band width")?;
        let workers = parse_number(&args[5], "worker count")?;
        RenderJob::striped(params, band_width, workers).map_err(|e| format!("{}", e))
    } else {
        Ok(RenderJob::single(params))
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 4 && args.len() != 6 {
        eprintln!("{}", USAGE);
        process::exit(1);
    }
    let job = match parse_job(&args) {
        Ok(job) => job,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };
    let params = *job.params();
    let table = Arc::new(ColorTable::build(&params).map_err(|e| format!("{}", e))?);
    let surface = Arc::new(PixelSurface::new(params.width(), params.height()));

    // All of the display plumbing comes up before the engine starts;
    // if any of it fails, no worker was ever launched.
    let sdl = sdl2::init()?;
    let video = sdl.video()?;
    let window = video
        .window("Mandelbrot", params.width() as u32, params.height() as u32)
        .position(200, 200)
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window
        .into_canvas()
        .accelerated()
        .present_vsync()
        .build()
        .map_err(|e| e.to_string())?;
    let creator = canvas.texture_creator();
    let mut texture = creator
        .create_texture_static(
            PixelFormatEnum::ARGB8888,
            params.width() as u32,
            params.height() as u32,
        )
        .map_err(|e| e.to_string())?;
    let mut pump = sdl.event_pump()?;

    let engine = Engine::start(job, table, surface.clone()).map_err(|e| e.to_string())?;
    info!("window up, re-presenting every {} ms", PRESENT_TIMEOUT_MS);

    let mut frame = vec![0u8; surface.len() * 4];
    'running: loop {
        if let Some(event) = pump.wait_event_timeout(PRESENT_TIMEOUT_MS) {
            if let Event::Quit { .. } = event {
                break 'running;
            }
        }
        // Whatever the workers have written so far; torn frames are
        // fine, the next present repairs them.
        surface.copy_bytes(&mut frame);
        texture
            .update(None, &frame, params.width() * 4)
            .map_err(|e| e.to_string())?;
        canvas.copy(&texture, None, None)?;
        canvas.present();
    }

    info!("quit requested, stopping workers");
    engine.shutdown();
    Ok(())
}
