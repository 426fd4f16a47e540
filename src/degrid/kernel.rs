// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The oversampled w = 0 convolution kernel.
//!
//! The kernel is symmetric about its origin along each axis, so only the
//! quadrant of non-negative offsets is stored. Negative offsets are folded
//! onto this quadrant by taking their absolute value.

use ndarray::{Array2, ArrayView2};

use super::DegridError;
use crate::math::c64;

/// The side length of a stored kernel quadrant:
/// `((kernel_size / 2) + 1) * oversampling`.
pub fn kernel_table_side(kernel_size: usize, oversampling: usize) -> usize {
    ((kernel_size / 2) + 1) * oversampling
}

#[derive(Debug, Clone)]
pub struct KernelTable {
    /// Row-major samples; rows are v offsets, columns are u offsets.
    samples: Array2<c64>,
}

impl KernelTable {
    /// Wrap a stored quadrant. The table must be square.
    pub fn new(samples: Array2<c64>) -> Result<KernelTable, DegridError> {
        let (rows, cols) = samples.dim();
        if rows != cols {
            return Err(DegridError::KernelShape {
                expected: rows.max(cols),
                rows,
                cols,
            });
        }
        Ok(KernelTable { samples })
    }

    /// The number of samples per row (and the number of rows).
    #[inline]
    pub fn side(&self) -> usize {
        self.samples.len_of(ndarray::Axis(0))
    }

    pub fn view(&self) -> ArrayView2<c64> {
        self.samples.view()
    }

    /// Get the kernel amplitude at the oversampled offset
    /// (`kernel_u`, `kernel_v`). The flat index of the sample is
    /// `|kernel_v * side| + |kernel_u|`; an offset whose folded value falls
    /// outside `[0, side)` on either axis is an error rather than a read of
    /// a neighbouring row.
    #[inline]
    pub fn sample(&self, kernel_u: i64, kernel_v: i64) -> Result<c64, DegridError> {
        let side = self.side();
        let u = kernel_u.unsigned_abs() as usize;
        let v = kernel_v.unsigned_abs() as usize;
        if u >= side || v >= side {
            return Err(DegridError::KernelLookupOutOfBounds {
                kernel_u,
                kernel_v,
                table_side: side,
            });
        }
        Ok(self.samples[(v, u)])
    }
}
