// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


use num_complex::Complex;

#[allow(non_camel_case_types)]
pub type c64 = Complex<f64>;

/// Complex multiplication, written out so that the order of floating-point
/// operations is fixed.
///
/// # Examples
///
/// `assert_eq!(cmul(c64::new(1.0, 2.0), c64::new(3.0, 4.0)), c64::new(-5.0, 10.0));`
#[inline]
pub fn cmul(a: c64, b: c64) -> c64 {
    c64::new(a.re * b.re - a.im * b.im, a.im * b.re + a.re * b.im)
}

/// The modulus of the difference between two complex numbers.
#[inline]
pub(crate) fn cdist(a: c64, b: c64) -> f64 {
    (a - b).norm()
}

/// Round half away from zero and convert to an integer, like C's `round`
/// followed by a cast.
#[inline]
pub(crate) fn round_to_i64(x: f64) -> i64 {
    x.round() as i64
}

/// The fractional part of `x` after truncation towards zero. Negative inputs
/// give negative (or zero) fractions, i.e. this is *not* `x - x.floor()`.
///
/// # Examples
///
/// `assert_abs_diff_eq!(trunc_frac(-1.25), -0.25);`
#[inline]
pub(crate) fn trunc_frac(x: f64) -> f64 {
    x - x.trunc()
}
