// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Baseline coordinates.

use std::ops::{Div, Mul};

use crate::constants::VEL_C;

/// The (u, v, w) coordinates of a baseline. Depending on context these are
/// either in metres or in wavelengths.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UVW {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl UVW {
    /// Convert coordinates in metres into wavelengths at the given frequency.
    /// `w` is discarded (set to 0); only the w = 0 plane is degridded.
    /// If `right_ascension` is set, `u` is negated to follow the sky
    /// convention.
    pub fn from_metres(metres: UVW, freq_hz: f64, right_ascension: bool) -> UVW {
        let mut uvw = metres * metres_to_wavelengths(freq_hz);
        uvw.w = 0.0;
        if right_ascension {
            uvw.u = -uvw.u;
        }
        uvw
    }

    /// The inverse of [`UVW::from_metres`], except that `w` cannot be
    /// recovered.
    pub fn to_metres(self, freq_hz: f64, right_ascension: bool) -> UVW {
        let mut metres = self / metres_to_wavelengths(freq_hz);
        if right_ascension {
            metres.u = -metres.u;
        }
        metres
    }
}

/// The number of wavelengths per metre at the given frequency.
#[inline]
pub fn metres_to_wavelengths(freq_hz: f64) -> f64 {
    freq_hz / VEL_C
}

impl Mul<f64> for UVW {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        UVW {
            u: self.u * rhs,
            v: self.v * rhs,
            w: self.w * rhs,
        }
    }
}

impl Div<f64> for UVW {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        UVW {
            u: self.u / rhs,
            v: self.v / rhs,
            w: self.w / rhs,
        }
    }
}
