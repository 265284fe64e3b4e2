// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time evaluation.  Given a point on the complex plane, find
//! out how many turns of the crank it takes before the orbit of that
//! point heads off to infinity, or report that it never does.

use num::Complex;

/// Squared radius past which an orbit counts as escaped when counting
/// whole iterations.
pub const BAILOUT: f64 = 4.0;

/// Squared radius used for smoothed counting.  It has to be large for
/// the log-log correction to stay well behaved.
pub const SMOOTH_BAILOUT: f64 = (2 << 16) as f64;

/// An escape-time fractal.  Implementations must be pure: the renderer
/// calls `escape` from every worker at once.
pub trait Fractal: Sync {
    /// Iterate `point` at most `limit` times.  Returns `None` if the
    /// orbit never leaves the bailout radius, otherwise the iteration
    /// (counting from 1) at which it did.  With `continuous` set the
    /// count is smoothed into a fractional value.
    fn escape(&self, point: Complex<f64>, limit: u32, continuous: bool) -> Option<f64>;
}

/// The classic z -> z^2 + c, starting with z = c.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mandelbrot;

impl Fractal for Mandelbrot {
    fn escape(&self, point: Complex<f64>, limit: u32, continuous: bool) -> Option<f64> {
        let bailout = if continuous { SMOOTH_BAILOUT } else { BAILOUT };
        let (x, y) = (point.re, point.im);
        let (mut a, mut b) = (x, y);
        for iters in 1..=limit {
            let a2 = a * a;
            let b2 = b * b;
            if a2 + b2 >= bailout {
                if !continuous {
                    return Some(f64::from(iters));
                }
                let nu = ((a2 + b2).log2() * 0.5).log2();
                return Some(f64::from(iters) + 1.0 - nu);
            }
            // Spelled out rather than z * z + c so the rounding is
            // exactly a^2 - b^2 + x and 2ab + y.
            let ab = a * b;
            a = a2 - b2 + x;
            b = ab + ab + y;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discrete(re: f64, im: f64, limit: u32) -> Option<f64> {
        Mandelbrot.escape(Complex::new(re, im), limit, false)
    }

    fn smooth(re: f64, im: f64, limit: u32) -> Option<f64> {
        Mandelbrot.escape(Complex::new(re, im), limit, true)
    }

    #[test]
    fn points_outside_radius_two_escape_on_first_iteration() {
        for &(re, im) in &[(2.0, 0.0), (0.0, -2.0), (3.0, 4.0), (-1.5, 1.5), (1e6, 1e6)] {
            assert_eq!(discrete(re, im, 1000), Some(1.0), "({}, {})", re, im);
        }
    }

    #[test]
    fn cardioid_and_bulb_never_escape() {
        for &limit in &[1, 2, 10, 1000, 100_000] {
            assert_eq!(discrete(0.0, 0.0, limit), None);
            assert_eq!(discrete(-1.0, 0.0, limit), None);
            assert_eq!(discrete(-0.75, 0.0, limit), None);
            assert_eq!(smooth(0.0, 0.0, limit), None);
            assert_eq!(smooth(-1.0, 0.0, limit), None);
        }
    }

    #[test]
    fn known_escape_count() {
        // 1+0i: 1 -> 2, and |2|^2 >= 4 on the second check.
        assert_eq!(discrete(1.0, 0.0, 100), Some(2.0));
        // 0.5+0i: 0.5, 0.75, 1.0625, 1.6289, 3.1533
        assert_eq!(discrete(0.5, 0.0, 100), Some(5.0));
    }

    #[test]
    fn single_iteration_limit_never_exceeds_one() {
        for &(re, im) in &[(0.0, 0.0), (1.0, 0.0), (0.5, 0.5), (-1.9, 0.1), (3.0, 0.0)] {
            match discrete(re, im, 1) {
                None => {}
                Some(n) => assert_eq!(n, 1.0),
            }
        }
        // 1+0i needs two iterations to escape
        assert_eq!(discrete(1.0, 0.0, 1), None);
    }

    #[test]
    fn smoothed_count_is_close_to_discrete_count() {
        // Walk along the real axis just past the cusp at 0.25; the
        // smoothed value must track the discrete count without jumps.
        let mut previous: Option<(f64, f64)> = None;
        let mut re = 0.26;
        while re < 2.0 {
            let d = discrete(re, 0.0, 10_000).unwrap();
            let s = smooth(re, 0.0, 10_000).unwrap();
            if let Some((pd, ps)) = previous {
                if (pd - d - 1.0).abs() < 1e-9 {
                    let delta = ps - s;
                    assert!(delta > 0.0, "smoothed count rose at re = {}", re);
                    assert!(delta <= 2.0, "smoothed count jumped {} at re = {}", delta, re);
                }
            }
            previous = Some((d, s));
            re += 0.001;
        }
    }

    #[test]
    fn smoothed_count_is_fractional() {
        let s = smooth(0.4, 0.6, 1000).unwrap();
        assert!(s.fract() != 0.0);
        assert_eq!(discrete(0.4, 0.6, 1000), Some(15.0));
        assert!(s > 15.0 && s < 17.0, "smoothed count {}", s);
    }
}
