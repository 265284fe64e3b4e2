#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points on the complex plane whose
//! orbit under z -> z^2 + c never runs off to infinity.  Points
//! outside the set do run off, some quickly and some slowly, and the
//! number of iterations it takes them to cross a bailout radius is
//! what gets turned into a colour.  Points inside are painted a single
//! "inside" colour.
//!
//! Rendering takes a center point, a magnification, an iteration
//! bound, and an image size.  Each pixel can be sampled several times
//! on a regular sub-grid and the results averaged (antialiasing), and
//! the counts can be smoothed into fractional values that blend
//! through the palette instead of stepping through it.
//!
//! The work is spread over a pool of threads, one image row at a time;
//! a single aggregator assembles the results into the canvas.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;
extern crate serde_json;

pub mod colour;
pub mod errors;
pub mod escape;
pub mod output;
pub mod palette;
pub mod params;
pub mod planes;
pub mod render;

pub use errors::RenderError;
pub use escape::{Fractal, Mandelbrot};
pub use palette::Palette;
pub use params::RenderParameters;
pub use planes::Pixel;
pub use render::Renderer;
