extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelras;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use mandelras::palette::{ColorScheme, Palette};
use mandelras::planes::PlaneMapper;
use mandelras::raster::save_raster;
use mandelras::render::{render, RenderOptions};
use mandelras::schedule::SchedulePolicy;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";

/// Given a string and a separator, returns the two values separated by
/// the separator.
fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Mandelbrot renderer producing legacy Sun raster files")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandel.ras")
                .help("Output raster file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x800")
                .help("Size of the output image, as WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-2,-2")
                .help("Leftlower corner of the window, as RE,IM"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("2,2")
                .help("Rightupper corner of the window, as RE,IM"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("10000")
                .help("Iteration cap per pixel"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .help("Worker threads (0 means one per core)"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("cos")
                .help("Colormap flavour: cos or banded"),
        )
        .get_matches()
}

/// Reads a pair-valued flag, substituting the default when the value
/// does not parse.  Render configuration never aborts the program.
fn pair_or<T: FromStr + Copy>(
    matches: &ArgMatches,
    name: &str,
    separator: char,
    default: (T, T),
) -> (T, T) {
    match matches.value_of(name).and_then(|s| parse_pair(s, separator)) {
        Some(pair) => pair,
        None => {
            warn!("ignoring malformed --{}", name);
            default
        }
    }
}

/// Reads a numeric flag, substituting the default when the value does
/// not parse.
fn numeric_or<T: FromStr + Copy>(matches: &ArgMatches, name: &str, default: T) -> T {
    match matches.value_of(name).and_then(|s| T::from_str(s.trim()).ok()) {
        Some(value) => value,
        None => {
            warn!("ignoring malformed --{}", name);
            default
        }
    }
}

fn main() {
    env_logger::init();
    let matches = args();

    let (width, height) = pair_or(&matches, SIZE, 'x', (800usize, 800usize));
    let (xmin, ymin) = pair_or(&matches, LEFTLOWER, ',', (-2.0, -2.0));
    let (xmax, ymax) = pair_or(&matches, RIGHTUPPER, ',', (2.0, 2.0));
    let depth = numeric_or(&matches, ITERATIONS, 10_000usize);
    let mut threads = numeric_or(&matches, THREADS, 0usize);
    if threads == 0 {
        threads = num_cpus::get();
    }
    let scheme = match matches.value_of(PALETTE).and_then(ColorScheme::parse) {
        Some(scheme) => scheme,
        None => {
            warn!("ignoring unknown --{}", PALETTE);
            ColorScheme::default()
        }
    };
    let output = matches.value_of(OUTPUT).unwrap();

    let plane = match PlaneMapper::new(
        width,
        height,
        Complex::new(xmin, ymin),
        Complex::new(xmax, ymax),
    ) {
        Ok(plane) => plane,
        Err(e) => {
            eprintln!("mandel: {}", e);
            process::exit(1);
        }
    };
    let options = RenderOptions {
        policy: SchedulePolicy::from_env(),
        threads,
    };

    let (xinc, yinc) = plane.increments();
    info!("domain: [{},{}]x[{},{}]", xmin, ymin, xmax, ymax);
    info!("increment: {} {}", xinc, yinc);
    info!("depth: {}", depth);
    info!("image: {}x{}", width, height);
    info!("workers: {}, schedule: {:?}", options.threads, options.policy);

    let start = Instant::now();
    let pixels = match render(&plane, depth, &options) {
        Ok(pixels) => pixels,
        Err(e) => {
            eprintln!("mandel: render failure: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();
    let seconds = elapsed.as_secs() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9;
    info!("total compute time: {} s", seconds);

    let palette = Palette::build(scheme);
    if let Err(e) = save_raster(output, width, height, &palette, &pixels) {
        eprintln!("mandel: {}", e);
        process::exit(1);
    }

    println!("{}", seconds);
}
