// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Palettes: the ordered list of colours the escape counts cycle
//! through.  Either the built-in one, or a JSON file shaped like
//! `[[r, g, b, a], [r, g, b, a], ...]`.

use std::fs;
use std::path::Path;

use image::Rgba;

use crate::errors::RenderError;

const DEFAULT_COLORS: [[u8; 4]; 16] = [
    [66, 30, 15, 255],
    [25, 7, 26, 255],
    [9, 1, 47, 255],
    [4, 4, 73, 255],
    [0, 7, 100, 255],
    [12, 44, 138, 255],
    [24, 82, 177, 255],
    [57, 125, 209, 255],
    [134, 181, 229, 255],
    [211, 236, 248, 255],
    [241, 233, 191, 255],
    [248, 201, 95, 255],
    [255, 170, 0, 255],
    [204, 128, 0, 255],
    [153, 87, 0, 255],
    [106, 52, 3, 255],
];

/// A non-empty, ordered list of RGBA colours.  Order matters: it is
/// the order of the cycle in discrete mode and of the gradient in
/// continuous mode.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette(Vec<Rgba<u8>>);

impl Palette {
    /// Wraps a list of colours, refusing an empty one.
    pub fn new(colors: Vec<Rgba<u8>>) -> Result<Self, RenderError> {
        if colors.is_empty() {
            return Err(RenderError::EmptyPalette);
        }
        Ok(Palette(colors))
    }

    /// Builds a palette from raw channel lists, each of which must hold
    /// exactly red, green, blue and alpha.
    pub fn from_channels(channels: Vec<Vec<u8>>) -> Result<Self, RenderError> {
        let colors = channels
            .into_iter()
            .enumerate()
            .map(|(index, c)| match c.as_slice() {
                [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
                _ => Err(RenderError::PaletteEntry { index, found: c }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors)
    }

    /// Parses a JSON document into a palette.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let channels: Vec<Vec<u8>> = serde_json::from_str(json).map_err(RenderError::PaletteParse)?;
        Palette::from_channels(channels)
    }

    /// Reads and parses a JSON palette file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| RenderError::palette_read(path, e))?;
        let palette = Palette::from_json(&raw)?;
        debug!("loaded {} colours from {}", palette.len(), path.display());
        Ok(palette)
    }

    /// Number of colours; never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false.  A palette cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The colour at `index`, wrapping around the end of the palette.
    pub fn cycle(&self, index: usize) -> Rgba<u8> {
        self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette(DEFAULT_COLORS.iter().map(|c| Rgba(*c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_palette_is_usable() {
        let p = Palette::default();
        assert_eq!(p.len(), 16);
        assert!(!p.is_empty());
        assert_eq!(p.cycle(16), p.cycle(0));
    }

    #[test]
    fn empty_palette_is_refused() {
        match Palette::new(vec![]) {
            Err(RenderError::EmptyPalette) => {}
            other => panic!("expected EmptyPalette, got {:?}", other),
        }
        match Palette::from_json("[]") {
            Err(RenderError::EmptyPalette) => {}
            other => panic!("expected EmptyPalette, got {:?}", other),
        }
    }

    #[test]
    fn json_palette_keeps_order() {
        let p = Palette::from_json("[[255, 0, 0, 255], [0, 255, 0, 128], [0, 0, 255, 0]]").unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.cycle(0), Rgba([255, 0, 0, 255]));
        assert_eq!(p.cycle(1), Rgba([0, 255, 0, 128]));
        assert_eq!(p.cycle(2), Rgba([0, 0, 255, 0]));
        assert_eq!(p.cycle(5), Rgba([0, 0, 255, 0]));
    }

    #[test]
    fn wrong_channel_count_names_the_entry() {
        match Palette::from_json("[[1, 2, 3, 4], [5, 6, 7]]") {
            Err(RenderError::PaletteEntry { index, found }) => {
                assert_eq!(index, 1);
                assert_eq!(found, vec![5, 6, 7]);
            }
            other => panic!("expected PaletteEntry, got {:?}", other),
        }
        let message = format!("{}", Palette::from_json("[[1, 2, 3, 4, 5]]").unwrap_err());
        assert!(message.contains("exactly 4 elements"), "{}", message);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        for bad in &["", "{}", "[[1, 2, 3, 256]]", "[[-1, 0, 0, 0]]", "[\"red\"]"] {
            match Palette::from_json(bad) {
                Err(RenderError::PaletteParse(_)) => {}
                other => panic!("expected PaletteParse for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn load_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[10, 20, 30, 255]]").unwrap();
        let p = Palette::load(file.path()).unwrap();
        assert_eq!(p, Palette::new(vec![Rgba([10, 20, 30, 255])]).unwrap());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = Palette::load(&path).unwrap_err();
        match err {
            RenderError::PaletteRead { .. } => {}
            ref other => panic!("expected PaletteRead, got {:?}", other),
        }
        assert!(format!("{}", err).contains("nope.json"));
    }
}
