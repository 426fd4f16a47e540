// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mapping continuous uv coordinates onto grid and kernel indices.

use crate::math::{round_to_i64, trunc_frac};

/// Where a single coordinate component (u or v) lands on one grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisMapping {
    /// The grid row/column nearest to the coordinate.
    pub grid_centre: i64,
    /// The sub-cell phase of the coordinate, in oversampled kernel units. This
    /// lies within `[-oversampling, oversampling]`.
    pub kernel_offset: i64,
}

impl AxisMapping {
    /// Map `coord` \[wavelengths\] onto an axis.
    ///
    /// The grid centre is `round(coord * uv_scale) + half_grid_size`. The
    /// kernel offset is `round(frac(coord) * oversampling)`, where `frac`
    /// truncates towards zero, so a negative coordinate has a negative
    /// offset. No bounds checking happens here; a coordinate too large for
    /// the grid saturates, so the window ends up outside of it.
    pub fn new(coord: f64, uv_scale: f64, half_grid_size: i64, oversampling: i64) -> AxisMapping {
        AxisMapping {
            grid_centre: round_to_i64(coord * uv_scale).saturating_add(half_grid_size),
            kernel_offset: round_to_i64(trunc_frac(coord) * oversampling as f64),
        }
    }

    /// The first grid index of a window `2 * half_kernel_size + 1` cells wide
    /// centred on this mapping.
    #[inline]
    pub fn window_start(self, half_kernel_size: i64) -> i64 {
        self.grid_centre.saturating_sub(half_kernel_size)
    }

    /// The last grid index (inclusive) of the window.
    #[inline]
    pub fn window_end(self, half_kernel_size: i64) -> i64 {
        self.grid_centre.saturating_add(half_kernel_size)
    }

    /// The kernel-space position matching [`AxisMapping::window_start`].
    /// Each step along the grid window advances this by `oversampling`.
    #[inline]
    pub fn kernel_origin(self, half_kernel_size: i64, oversampling: i64) -> i64 {
        kernel_origin(half_kernel_size, oversampling, self.kernel_offset)
    }
}

/// `-half_kernel_size * oversampling + kernel_offset`
#[inline]
pub fn kernel_origin(half_kernel_size: i64, oversampling: i64, kernel_offset: i64) -> i64 {
    -half_kernel_size * oversampling + kernel_offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centre_of_grid() {
        let m = AxisMapping::new(0.0, 100.0, 8, 4);
        assert_eq!(m.grid_centre, 8);
        assert_eq!(m.kernel_offset, 0);
        assert_eq!(m.window_start(1), 7);
        assert_eq!(m.window_end(1), 9);
    }

    #[test]
    fn test_grid_centre_rounds_scaled_coord() {
        // 0.013 * 100 = 1.3 -> 1
        assert_eq!(AxisMapping::new(0.013, 100.0, 8, 4).grid_centre, 9);
        // 0.016 * 100 = 1.6 -> 2
        assert_eq!(AxisMapping::new(0.016, 100.0, 8, 4).grid_centre, 10);
        // -0.016 * 100 = -1.6 -> -2
        assert_eq!(AxisMapping::new(-0.016, 100.0, 8, 4).grid_centre, 6);
    }

    #[test]
    fn test_huge_coords_saturate() {
        let m = AxisMapping::new(1e300, 1.0, 8, 4);
        assert_eq!(m.grid_centre, i64::MAX);
        assert_eq!(m.window_end(4), i64::MAX);
        let m = AxisMapping::new(f64::NEG_INFINITY, 1.0, 8, 4);
        assert_eq!(m.window_start(4), i64::MIN);
    }

    #[test]
    fn test_kernel_offset_uses_truncation() {
        // frac(2.3) = 0.3; 0.3 * 4 = 1.2 -> 1
        assert_eq!(AxisMapping::new(2.3, 1.0, 0, 4).kernel_offset, 1);
        // frac(-2.3) = -0.3; -0.3 * 4 = -1.2 -> -1. A floor-based fraction
        // would have given 0.7 -> 3 here.
        assert_eq!(AxisMapping::new(-2.3, 1.0, 0, 4).kernel_offset, -1);
        // frac(0.9) * 4 = 3.6 -> 4, i.e. a full cell
        assert_eq!(AxisMapping::new(0.9, 1.0, 0, 4).kernel_offset, 4);
        assert_eq!(AxisMapping::new(-0.9, 1.0, 0, 4).kernel_offset, -4);
    }

    #[test]
    fn test_kernel_origin() {
        assert_eq!(kernel_origin(4, 4, 0), -16);
        assert_eq!(kernel_origin(4, 4, 3), -13);
        assert_eq!(kernel_origin(0, 1, 0), 0);
        let m = AxisMapping::new(-0.3, 1.0, 0, 4);
        assert_eq!(m.kernel_origin(2, 4), -9);
    }
}
