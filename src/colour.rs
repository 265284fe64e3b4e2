// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns escape counts into colours.

use image::Rgb;

use crate::palette::Palette;

/// Colours one escape count.  `None` (never escaped) is painted with
/// `inside`.  Otherwise the count either picks a palette entry
/// directly, or, in continuous mode, blends two neighbouring entries.
/// Palette alpha is ignored.
pub fn colour(escape: Option<f64>, palette: &Palette, inside: Rgb<u8>, continuous: bool) -> Rgb<u8> {
    match escape {
        None => inside,
        Some(iters) if continuous => gradient(iters, palette),
        Some(iters) => cycle(iters, palette),
    }
}

/// Entry `iters mod len`.  The count is used as is: an escape on the
/// first iteration gets entry 1, not entry 0.
fn cycle(iters: f64, palette: &Palette) -> Rgb<u8> {
    let c = palette.cycle(iters.floor() as usize);
    Rgb([c.0[0], c.0[1], c.0[2]])
}

/// Linear blend of entries `floor - 1` and `floor`, weighted by the
/// fractional part.  Smoothed counts occasionally dip below 1; those
/// blend entries 0 and 1.
fn gradient(iters: f64, palette: &Palette) -> Rgb<u8> {
    let floor = iters.floor();
    let weight = iters - floor;
    let (lo, hi) = if floor < 1.0 {
        (0, 1)
    } else {
        let n = floor as usize;
        (n - 1, n)
    };
    let (c1, c2) = (palette.cycle(lo), palette.cycle(hi));
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        *channel = (f64::from(c1.0[i]) * (1.0 - weight) + f64::from(c2.0[i]) * weight) as u8;
    }
    Rgb(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const INSIDE: Rgb<u8> = Rgb([1, 2, 3]);

    fn palette(colors: &[[u8; 4]]) -> Palette {
        Palette::new(colors.iter().map(|c| Rgba(*c)).collect()).unwrap()
    }

    fn rgb_palette() -> Palette {
        palette(&[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]])
    }

    #[test]
    fn non_escaping_points_get_inside_colour() {
        assert_eq!(colour(None, &rgb_palette(), INSIDE, false), INSIDE);
        assert_eq!(colour(None, &rgb_palette(), INSIDE, true), INSIDE);
    }

    #[test]
    fn single_colour_palette_always_returns_that_colour() {
        let p = palette(&[[9, 8, 7, 0]]);
        for n in 1..50 {
            assert_eq!(colour(Some(f64::from(n)), &p, INSIDE, false), Rgb([9, 8, 7]));
        }
    }

    #[test]
    fn discrete_index_is_count_mod_length() {
        let p = rgb_palette();
        assert_eq!(colour(Some(1.0), &p, INSIDE, false), Rgb([0, 255, 0]));
        assert_eq!(colour(Some(2.0), &p, INSIDE, false), Rgb([0, 0, 255]));
        assert_eq!(colour(Some(3.0), &p, INSIDE, false), Rgb([255, 0, 0]));
        assert_eq!(colour(Some(301.0), &p, INSIDE, false), Rgb([0, 255, 0]));
    }

    #[test]
    fn gradient_at_whole_counts_is_the_lower_entry() {
        let p = rgb_palette();
        assert_eq!(colour(Some(1.0), &p, INSIDE, true), Rgb([255, 0, 0]));
        assert_eq!(colour(Some(2.0), &p, INSIDE, true), Rgb([0, 255, 0]));
        assert_eq!(colour(Some(3.0), &p, INSIDE, true), Rgb([0, 0, 255]));
        assert_eq!(colour(Some(4.0), &p, INSIDE, true), Rgb([255, 0, 0]));
    }

    #[test]
    fn gradient_blends_and_truncates() {
        let p = palette(&[[0, 0, 0, 255], [255, 255, 100, 255]]);
        // halfway from entry 0 to entry 1: 127.5 -> 127, 50
        assert_eq!(colour(Some(1.5), &p, INSIDE, true), Rgb([127, 127, 50]));
        // a quarter of the way from entry 1 back to entry 0 (wrapping)
        assert_eq!(colour(Some(2.25), &p, INSIDE, true), Rgb([191, 191, 75]));
    }

    #[test]
    fn gradient_wraps_past_the_last_entry() {
        let p = rgb_palette();
        // entries 2 and 0
        assert_eq!(colour(Some(3.5), &p, INSIDE, true), Rgb([127, 0, 127]));
    }

    #[test]
    fn gradient_clamps_counts_below_one() {
        let p = rgb_palette();
        assert_eq!(colour(Some(0.5), &p, INSIDE, true), Rgb([127, 127, 0]));
        // floor(-2.25) = -3, weight 0.75, still entries 0 and 1
        assert_eq!(colour(Some(-2.25), &p, INSIDE, true), Rgb([63, 191, 0]));
    }

    #[test]
    fn gradient_with_one_colour_is_flat() {
        let p = palette(&[[40, 50, 60, 255]]);
        for &n in &[0.3, 1.0, 1.7, 12.9] {
            assert_eq!(colour(Some(n), &p, INSIDE, true), Rgb([40, 50, 60]));
        }
    }
}
