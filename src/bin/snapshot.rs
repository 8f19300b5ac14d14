//! Headless exporter: renders one full frame through the same engine
//! as the windowed viewer and writes it out as a PNG.  Useful on
//! machines with no display, and for eyeballing the color ramps.

extern crate clap;
extern crate env_logger;
extern crate image;
extern crate mandelview;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use mandelview::{ColorMode, ColorTable, ComputeParameters, Engine, PixelSurface, RenderJob};

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const ITERATIONS: &str = "iterations";
const MODE: &str = "mode";
const BANDWIDTH: &str = "bandwidth";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    App::new("snapshot")
        .version("0.1.0")
        .about("Renders the Mandelbrot set to a PNG, no window required")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value("1024")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse image width",
                        "Image width must be between 1 and 1024",
                    )
                })
                .help("Width of the output image"),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .required(false)
                .long(HEIGHT)
                .short("H")
                .takes_value(true)
                .default_value("768")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        768,
                        "Could not parse image height",
                        "Image height must be between 1 and 768",
                    )
                })
                .help("Height of the output image"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000",
                    )
                })
                .help("Escape iteration limit"),
        )
        .arg(
            Arg::with_name(MODE)
                .required(false)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    ColorMode::from_str(&s)
                        .map(|_| ())
                        .map_err(|e| format!("{}", e))
                })
                .help("Color mode: 0 grayscale, 1 colored"),
        )
        .arg(
            Arg::with_name(BANDWIDTH)
                .required(false)
                .long(BANDWIDTH)
                .short("b")
                .takes_value(true)
                .default_value("32")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1024,
                        "Could not parse band width",
                        "Band width must be between 1 and the image width",
                    )
                })
                .help("Columns per band in threaded mode"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .help("Number of worker threads (defaults to the CPU count)"),
        )
        .get_matches()
}

/// Unpacks the surface's ARGB words into the RGBA byte order the PNG
/// encoder wants.
fn to_rgba(pixels: &[u32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() * 4);
    for p in pixels {
        out.push((p >> 16) as u8);
        out.push((p >> 8) as u8);
        out.push(*p as u8);
        out.push((p >> 24) as u8);
    }
    out
}

fn write_image(outfile: &str, pixels: &[u32], width: usize, height: usize) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let output = File::create(&path)?;
    let encoder = PNGEncoder::new(output);
    encoder.encode(
        &to_rgba(pixels),
        width as u32,
        height as u32,
        ColorType::RGBA(8),
    )?;
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();

    let width = usize::from_str(matches.value_of(WIDTH).unwrap_or("1024"))
        .expect("width was validated");
    let height = usize::from_str(matches.value_of(HEIGHT).unwrap_or("768"))
        .expect("height was validated");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or("1000"))
        .expect("iterations were validated");
    let mode = ColorMode::from_str(matches.value_of(MODE).unwrap_or("1"))
        .expect("mode was validated");

    let params = match ComputeParameters::new(width, height, iterations, mode) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let threads = match matches.value_of(THREADS) {
        Some(s) => match usize::from_str(s) {
            Ok(t) => t,
            Err(_) => {
                eprintln!("Could not parse thread count: {}", s);
                std::process::exit(1);
            }
        },
        None => num_cpus::get().min(mandelview::config::MAX_WORKERS),
    };
    let band_width = usize::from_str(matches.value_of(BANDWIDTH).unwrap_or("32"))
        .expect("band width was validated")
        .min(width);

    let job = if threads == 1 {
        Ok(RenderJob::single(params))
    } else {
        RenderJob::striped(params, band_width, threads).map(|j| j.with_continuous(false))
    };
    let job = match job {
        Ok(job) => job,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let table = match ColorTable::build(&params) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    let surface = Arc::new(PixelSurface::new(width, height));

    match Engine::start(job, table, surface.clone()) {
        Ok(handle) => handle.wait(),
        Err(e) => {
            eprintln!("Could not start the worker pool: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &surface.snapshot(), width, height) {
        eprintln!("Could not write image: {}", e);
        std::process::exit(1);
    }
}
