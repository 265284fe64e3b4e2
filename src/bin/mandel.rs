// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate env_logger;
extern crate mandel;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandel::{output, Palette, RenderError, RenderParameters, Renderer};
use num::Complex;
use std::str::FromStr;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
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
const SIZE: &str = "size";
const CENTER: &str = "center";
const MAGNIFICATION: &str = "magnification";
const ITERATIONS: &str = "iterations";
const ANTIALIAS: &str = "antialias";
const CONTINUOUS: &str = "continuous";
const PALETTE: &str = "palette";
const THREADS: &str = "threads";
const QUIET: &str = "quiet";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("mandelbrot.png")
                .help("Output file name"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1024x768")
                .validator(|s| match parse_pair::<u32>(&s, 'x') {
                    Some((w, h)) if w >= 1 && h >= 1 => Ok(()),
                    Some(_) => Err("Image dimensions must be at least 1x1".to_string()),
                    None => Err("Could not parse output image size".to_string()),
                })
                .help("Size of the image in pixels, WIDTHxHEIGHT"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("z")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.75,0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center point of the image, REAL,IMAGINARY"),
        )
        .arg(
            Arg::with_name(MAGNIFICATION)
                .long(MAGNIFICATION)
                .short("m")
                .takes_value(true)
                .default_value("0.4")
                .validator(|s| match f64::from_str(&s) {
                    Ok(m) if m > 0.0 && m.is_finite() => Ok(()),
                    Ok(_) => Err("Magnification must be a positive number".to_string()),
                    Err(_) => Err("Could not parse magnification".to_string()),
                })
                .help("Magnification level"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        std::u32::MAX,
                        "Could not parse iteration count",
                        "Iteration count must be 1 or higher",
                    )
                })
                .help("Maximum iterations per point"),
        )
        .arg(
            Arg::with_name(ANTIALIAS)
                .long(ANTIALIAS)
                .short("a")
                .takes_value(true)
                .default_value("2")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        64,
                        "Could not parse anti-aliasing level",
                        "Anti-aliasing level must be between 1 and 64",
                    )
                })
                .help("Anti-aliasing level for smoother image (1 is off)"),
        )
        .arg(
            Arg::with_name(CONTINUOUS)
                .long(CONTINUOUS)
                .short("c")
                .help("Enable continuous color gradient"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .help("Palette JSON file (leave out for the default)"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("Do not print progress"),
        )
        .get_matches()
}

// Only for arguments with a default and a validator.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> T {
    match matches.value_of(name).map(T::from_str) {
        Some(Ok(v)) => v,
        _ => panic!("argument {} escaped validation", name),
    }
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let palette = match matches.value_of(PALETTE) {
        Some(path) if !path.is_empty() => Palette::load(path)?,
        _ => Palette::default(),
    };
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing center point");

    let params = RenderParameters {
        center,
        magnification: value(matches, MAGNIFICATION),
        max_iterations: value(matches, ITERATIONS),
        width,
        height,
        antialias: value(matches, ANTIALIAS),
        continuous: matches.is_present(CONTINUOUS),
        palette,
        ..Default::default()
    };
    let threads = match matches.value_of(THREADS) {
        Some(t) => usize::from_str(t).expect("Could not parse thread count."),
        None => num_cpus::get(),
    };
    let quiet = matches.is_present(QUIET);

    let renderer = Renderer::new(params)?.threads(threads);
    let canvas = renderer.render_with_progress(|done, total| {
        if !quiet {
            eprint!("\r{:.2}%", 100.0 * f64::from(done) / f64::from(total));
        }
    })?;
    if !quiet {
        eprintln!("\rfinished");
    }

    output::write_png(value::<String>(matches, OUTPUT), &canvas)
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
