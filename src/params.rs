// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The knobs for a single render.

use image::Rgb;
use num::Complex;

use crate::errors::RenderError;
use crate::palette::Palette;

/// Everything a render needs to know.  Once handed to a `Renderer`
/// it does not change.
#[derive(Clone, Debug)]
pub struct RenderParameters {
    /// The point of the complex plane shown in the middle of the image.
    pub center: Complex<f64>,
    /// Bigger is closer.
    pub magnification: f64,
    /// Upper bound on iterations per sample.
    pub max_iterations: u32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Each pixel is sampled on an N x N grid; 1 turns antialiasing off.
    pub antialias: u32,
    /// Smoothed counts and gradient colouring instead of whole counts
    /// and palette cycling.
    pub continuous: bool,
    /// Colours for escaping points.
    pub palette: Palette,
    /// Colour for points that never escape.
    pub inside: Rgb<u8>,
}

impl Default for RenderParameters {
    fn default() -> Self {
        RenderParameters {
            center: Complex::new(-0.75, 0.0),
            magnification: 0.4,
            max_iterations: 1000,
            width: 1024,
            height: 768,
            antialias: 2,
            continuous: false,
            palette: Palette::default(),
            inside: Rgb([0, 0, 0]),
        }
    }
}

impl RenderParameters {
    /// Checks every value a render depends on.  The palette cannot be
    /// empty by construction, so it is not checked here.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.antialias < 1 {
            return Err(RenderError::InvalidAntialias(self.antialias));
        }
        if self.max_iterations < 1 {
            return Err(RenderError::InvalidIterations(self.max_iterations));
        }
        if self.width < 1 || self.height < 1 {
            return Err(RenderError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.magnification.is_nan()
            || self.magnification <= 0.0
            || self.magnification.is_infinite()
        {
            return Err(RenderError::InvalidMagnification(self.magnification));
        }
        Ok(())
    }
}
