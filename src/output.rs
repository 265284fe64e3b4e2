// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writing the finished canvas out.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};

use crate::errors::RenderError;

/// Encodes the canvas as an RGBA PNG at `path`, replacing whatever was
/// there.
pub fn write_png<P: AsRef<Path>>(path: P, canvas: &RgbaImage) -> Result<(), RenderError> {
    let path = path.as_ref();
    let output = File::create(path).map_err(|cause| RenderError::OutputCreate {
        path: path.display().to_string(),
        cause,
    })?;
    let encoder = PngEncoder::new(BufWriter::new(output));
    encoder
        .write_image(canvas, canvas.width(), canvas.height(), ColorType::Rgba8)
        .map_err(|cause| RenderError::OutputEncode {
            path: path.display().to_string(),
            cause,
        })?;
    info!("wrote {}", path.display());
    Ok(())
}
