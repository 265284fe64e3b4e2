// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes the relationship
//! between the integral plane of the image, with its origin in the
//! upper left corner and rows growing downward, and a window on the
//! complex plane described by a center point and a magnification.
use num::Complex;

/// Column and row of a pixel in the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Evenly spaced offsets inside a pixel, one per antialias step, all in
/// the open interval (-0.5, 0.5).  A level of 1 yields just the pixel
/// center.
pub fn subpixel_offsets(level: u32) -> Vec<f64> {
    let n = f64::from(level);
    (0..level).map(|i| (0.5 + f64::from(i)) / n - 0.5).collect()
}

/// Maps pixels (and positions within pixels) onto the complex plane.
/// The shorter image side sets the scale, so a wide image shows more
/// of the plane rather than stretching it.
#[derive(Debug)]
pub struct PlaneMapper {
    width: u32,
    height: u32,
    center: Complex<f64>,
    // Pixels per unit of the complex plane.
    scale: f64,
    offsets: Vec<f64>,
}

impl PlaneMapper {
    /// Takes the image size, the point of the complex plane that lands
    /// in the middle of the image, the magnification, and the antialias
    /// level.  Expects already validated values.
    pub fn new(
        width: u32,
        height: u32,
        center: Complex<f64>,
        magnification: f64,
        antialias: u32,
    ) -> PlaneMapper {
        let min_dimension = width.min(height);
        // A one-pixel side would put a zero in the denominator.
        let span = f64::from(min_dimension.max(2) - 1);
        PlaneMapper {
            width,
            height,
            center,
            scale: magnification * span,
            offsets: subpixel_offsets(antialias),
        }
    }

    /// Width and height of the integral plane.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The subpixel offsets shared by every pixel.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Maps a position inside `pixel`, displaced from the pixel's
    /// corner by `(dx, dy)`, onto the complex plane.  Rows grow
    /// downward but the imaginary axis grows upward, hence the flip.
    pub fn pixel_to_point(&self, pixel: Pixel, dx: f64, dy: f64) -> Complex<f64> {
        let col = i64::from(pixel.0) - i64::from(self.width / 2);
        let row = i64::from(pixel.1) - i64::from(self.height / 2);
        Complex::new(
            self.center.re + (col as f64 + dx) / self.scale,
            self.center.im - (row as f64 - dy) / self.scale,
        )
    }
}
