// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can stop a render.  Configuration problems are
//! caught before any work starts; output problems after the canvas is
//! complete.  There is no partial render.

use std::io;
use std::path::Path;

/// The ways a render can fail.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The antialias level was zero.
    #[fail(display = "Anti-aliasing level must be 1 or higher, got {}", _0)]
    InvalidAntialias(u32),

    /// The iteration bound was zero.
    #[fail(display = "Iteration count must be 1 or higher, got {}", _0)]
    InvalidIterations(u32),

    /// One of the image dimensions was zero.
    #[fail(display = "Image dimensions must be at least 1x1, got {}x{}", width, height)]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Magnification was zero, negative, or not a number.
    #[fail(display = "Magnification must be a positive number, got {}", _0)]
    InvalidMagnification(f64),

    /// A palette with no colours in it.
    #[fail(display = "Palette must have at least one color")]
    EmptyPalette,

    /// A palette entry without exactly four channels.
    #[fail(
        display = "Error in palette: each color must have exactly 4 elements: red, green, blue, and alpha: entry {} is {:?}",
        index, found
    )]
    PaletteEntry {
        /// Position of the entry within the palette.
        index: usize,
        /// The channels that were actually present.
        found: Vec<u8>,
    },

    /// The palette file could not be read.
    #[fail(display = "Error reading palette file {}: {}", path, cause)]
    PaletteRead {
        /// The file that was asked for.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: io::Error,
    },

    /// The palette file was not an array of byte arrays.
    #[fail(display = "Error parsing palette JSON data: {}", _0)]
    PaletteParse(#[cause] serde_json::Error),

    /// The output file could not be created.
    #[fail(display = "Error creating file {}: {}", path, cause)]
    OutputCreate {
        /// The destination path.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: io::Error,
    },

    /// The encoder rejected the canvas or could not write it.
    #[fail(display = "Error encoding image {}: {}", path, cause)]
    OutputEncode {
        /// The destination path.
        path: String,
        /// The underlying failure.
        #[cause]
        cause: image::ImageError,
    },

    /// A worker thread died before the canvas was complete.
    #[fail(display = "A render worker panicked; no image was produced")]
    WorkerPanicked,
}

impl RenderError {
    pub(crate) fn palette_read(path: &Path, cause: io::Error) -> Self {
        RenderError::PaletteRead {
            path: path.display().to_string(),
            cause,
        }
    }
}
