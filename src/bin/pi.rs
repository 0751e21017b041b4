extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate mandelras;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use std::str::FromStr;
use std::time::Instant;

const SAMPLES: &str = "samples";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    App::new("pi")
        .version("0.1.0")
        .about("Midpoint-rule estimate of pi, computed by a pool of workers")
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("10000000")
                .help("Number of integration steps"),
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
        .get_matches()
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

    let samples = numeric_or(&matches, SAMPLES, 10_000_000u64);
    let mut threads = numeric_or(&matches, THREADS, 0usize);
    if threads == 0 {
        threads = num_cpus::get();
    }

    info!("samples: {}, workers: {}", samples, threads);
    let start = Instant::now();
    let estimate = mandelras::pi::estimate(samples, threads);
    let elapsed = start.elapsed();
    let seconds = elapsed.as_secs() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9;
    info!("total compute time: {} s", seconds);

    println!("{:.10}", estimate);
}
