// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The renderer proper.  Rows are handed out one at a time to a pool
//! of worker threads over a channel; the workers colour every pixel in
//! the row and send the results to a single aggregator thread, which
//! is the only thing that ever touches the canvas.

use crossbeam::channel;
use image::{Rgb, Rgba, RgbaImage};
use itertools::iproduct;

use crate::colour::colour;
use crate::errors::RenderError;
use crate::escape::{Fractal, Mandelbrot};
use crate::params::RenderParameters;
use crate::planes::{Pixel, PlaneMapper};

/// One finished pixel on its way to the canvas.
struct Sample {
    pixel: Pixel,
    colour: Rgb<u8>,
}

/// A validated render, ready to go.  The only way to get one is through
/// `new` or `with_fractal`, so the subpixel offsets always exist by the
/// time anything is sampled.
pub struct Renderer<F = Mandelbrot> {
    params: RenderParameters,
    plane: PlaneMapper,
    fractal: F,
    threads: usize,
}

impl Renderer<Mandelbrot> {
    /// Validates the parameters for a Mandelbrot render.
    pub fn new(params: RenderParameters) -> Result<Self, RenderError> {
        Renderer::with_fractal(params, Mandelbrot)
    }
}

impl<F: Fractal> Renderer<F> {
    /// Validates the parameters and derives the plane mapping and
    /// subpixel offsets.  The worker pool defaults to one thread per
    /// CPU.
    pub fn with_fractal(params: RenderParameters, fractal: F) -> Result<Self, RenderError> {
        params.validate()?;
        let plane = PlaneMapper::new(
            params.width,
            params.height,
            params.center,
            params.magnification,
            params.antialias,
        );
        Ok(Renderer {
            params,
            plane,
            fractal,
            threads: num_cpus::get(),
        })
    }

    /// Overrides the size of the worker pool.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// The parameters this renderer was built with.
    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    /// The fractal being rendered.
    pub fn fractal(&self) -> &F {
        &self.fractal
    }

    /// Colours one pixel: every combination of subpixel offsets is
    /// evaluated and coloured, and the channels are averaged with
    /// integer division.
    pub fn sample(&self, pixel: Pixel) -> Rgb<u8> {
        let params = &self.params;
        let offsets = self.plane.offsets();
        let mut sums = [0u64; 3];
        for (&dy, &dx) in iproduct!(offsets, offsets) {
            let point = self.plane.pixel_to_point(pixel, dx, dy);
            let escape = self
                .fractal
                .escape(point, params.max_iterations, params.continuous);
            let c = colour(escape, &params.palette, params.inside, params.continuous);
            for (sum, channel) in sums.iter_mut().zip(c.0.iter()) {
                *sum += u64::from(*channel);
            }
        }
        let count = (offsets.len() * offsets.len()) as u64;
        Rgb([
            (sums[0] / count) as u8,
            (sums[1] / count) as u8,
            (sums[2] / count) as u8,
        ])
    }

    /// Renders the whole image, blocking until every pixel is on the
    /// canvas.
    pub fn render(&self) -> Result<RgbaImage, RenderError> {
        self.render_with_progress(|_, _| {})
    }

    /// As `render`, calling `progress(rows_dispatched, total_rows)` from
    /// the calling thread each time a row is handed to a worker, and
    /// once more when all rows are out.
    pub fn render_with_progress<P>(&self, mut progress: P) -> Result<RgbaImage, RenderError>
    where
        P: FnMut(u32, u32),
    {
        let (width, height) = self.plane.dimensions();
        info!(
            "rendering {}x{} around {} at {}x, {} iterations, antialias {}, {} threads",
            width,
            height,
            self.params.center,
            self.params.magnification,
            self.params.max_iterations,
            self.params.antialias,
            self.threads
        );

        let (row_tx, row_rx) = channel::bounded::<u32>(0);
        let (pixel_tx, pixel_rx) = channel::bounded::<Sample>(width as usize);

        let result = crossbeam::scope(|spawner| {
            for worker in 0..self.threads {
                let rows = row_rx.clone();
                let pixels = pixel_tx.clone();
                spawner.spawn(move |_| {
                    for row in rows.iter() {
                        for col in 0..width {
                            let pixel = Pixel(col, row);
                            let colour = self.sample(pixel);
                            if pixels.send(Sample { pixel, colour }).is_err() {
                                return;
                            }
                        }
                    }
                    debug!("worker {} found the row queue empty", worker);
                });
            }
            // The workers hold the only remaining ends, so each stream
            // closes once its producers are done.
            drop(row_rx);
            drop(pixel_tx);

            let aggregator = spawner.spawn(move |_| {
                let mut canvas = RgbaImage::new(width, height);
                for Sample { pixel, colour } in pixel_rx.iter() {
                    let Rgb([r, g, b]) = colour;
                    canvas.put_pixel(pixel.0, pixel.1, Rgba([r, g, b, 255]));
                }
                canvas
            });

            for row in 0..height {
                progress(row, height);
                if row_tx.send(row).is_err() {
                    // Every worker is gone; the scope will report it.
                    break;
                }
            }
            drop(row_tx);
            progress(height, height);

            aggregator.join()
        });

        match result {
            Ok(Ok(canvas)) => {
                info!("render of {}x{} complete", width, height);
                Ok(canvas)
            }
            _ => {
                error!("a render thread panicked");
                Err(RenderError::WorkerPanicked)
            }
        }
    }
}
