// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to predict visibilities from a uv grid.
//!
//! Each visibility is the sum of the grid cells in a `kernel_size` x
//! `kernel_size` window around its nearest grid cell, each cell weighted by
//! the oversampled convolution kernel at the matching sub-cell phase.

mod coord;
mod error;
mod kernel;

pub use coord::{kernel_origin, AxisMapping};
pub use error::DegridError;
pub use kernel::{kernel_table_side, KernelTable};

use indicatif::ProgressBar;
use ndarray::{ArrayView2, Axis};
use num_traits::Zero;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    math::{c64, cmul},
    uvw::UVW,
};

/// The geometry of the grid and kernel. This is set once per run and never
/// mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegridSettings {
    /// The side length of the grid \[cells\].
    pub grid_size: usize,

    /// The angular size of a grid cell.
    pub cell_size: f64,

    /// The side length of the convolution window \[cells\]. This must be odd.
    pub kernel_size: usize,

    /// The number of kernel phases per grid cell along one axis.
    pub oversampling: usize,
}

impl DegridSettings {
    pub fn validate(&self) -> Result<(), DegridError> {
        if self.grid_size == 0 || self.grid_size % 2 != 0 {
            return Err(DegridError::InvalidGridSize(self.grid_size));
        }
        if self.kernel_size % 2 == 0 {
            return Err(DegridError::EvenKernelSize(self.kernel_size));
        }
        if self.oversampling == 0 {
            return Err(DegridError::ZeroOversampling);
        }
        if self.kernel_size > self.grid_size {
            return Err(DegridError::KernelLargerThanGrid {
                kernel_size: self.kernel_size,
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }

    /// Converts visibility coordinates \[wavelengths\] into grid coordinates.
    pub fn uv_scale(&self) -> f64 {
        self.grid_size as f64 * self.cell_size
    }

    pub fn half_grid_size(&self) -> i64 {
        (self.grid_size / 2) as i64
    }

    pub fn half_kernel_size(&self) -> i64 {
        ((self.kernel_size as i64) - 1) / 2
    }

    /// The side length of the stored kernel quadrant.
    pub fn kernel_table_side(&self) -> usize {
        kernel_table_side(self.kernel_size, self.oversampling)
    }
}

/// Predicts visibilities from an immutable grid and kernel.
pub struct Degridder<'a> {
    grid: ArrayView2<'a, c64>,
    kernel: &'a KernelTable,
    settings: DegridSettings,

    uv_scale: f64,
    half_grid_size: i64,
    half_kernel_size: i64,
    oversampling: i64,
}

impl<'a> Degridder<'a> {
    /// Check that the grid and kernel match the settings.
    pub fn new(
        grid: ArrayView2<'a, c64>,
        kernel: &'a KernelTable,
        settings: DegridSettings,
    ) -> Result<Degridder<'a>, DegridError> {
        settings.validate()?;

        let (rows, cols) = grid.dim();
        if rows != settings.grid_size || cols != settings.grid_size {
            return Err(DegridError::GridShape {
                expected: settings.grid_size,
                rows,
                cols,
            });
        }
        let expected = settings.kernel_table_side();
        if kernel.side() != expected {
            return Err(DegridError::KernelShape {
                expected,
                rows: kernel.side(),
                cols: kernel.view().len_of(Axis(1)),
            });
        }

        Ok(Degridder {
            grid,
            kernel,
            settings,
            uv_scale: settings.uv_scale(),
            half_grid_size: settings.half_grid_size(),
            half_kernel_size: settings.half_kernel_size(),
            oversampling: settings.oversampling as i64,
        })
    }

    pub fn settings(&self) -> &DegridSettings {
        &self.settings
    }

    /// Get the grid/kernel mappings of both axes of a visibility.
    pub fn map(&self, uvw: UVW) -> (AxisMapping, AxisMapping) {
        (
            AxisMapping::new(uvw.u, self.uv_scale, self.half_grid_size, self.oversampling),
            AxisMapping::new(uvw.v, self.uv_scale, self.half_grid_size, self.oversampling),
        )
    }

    /// Predict the visibility at `uvw` \[wavelengths\]. Grid rows are
    /// indexed by v and columns by u. The window is walked row by row in
    /// ascending order, so the summation order (and result) is always the
    /// same.
    pub fn predict(&self, uvw: UVW) -> Result<c64, DegridError> {
        if !(uvw.u.is_finite() && uvw.v.is_finite()) {
            return Err(DegridError::NonFiniteCoordinate { u: uvw.u, v: uvw.v });
        }
        let (u, v) = self.map(uvw);
        let half = self.half_kernel_size;
        let (u_start, u_end) = (u.window_start(half), u.window_end(half));
        let (v_start, v_end) = (v.window_start(half), v.window_end(half));
        self.check_window(u_start, u_end, v_start, v_end)?;

        let kernel_u_origin = u.kernel_origin(half, self.oversampling);
        let mut kernel_v = v.kernel_origin(half, self.oversampling);
        let mut predicted = c64::zero();

        for grid_v in v_start..=v_end {
            let mut kernel_u = kernel_u_origin;
            for grid_u in u_start..=u_end {
                let grid_point = self.grid[(grid_v as usize, grid_u as usize)];
                let kernel_point = self.kernel.sample(kernel_u, kernel_v)?;
                predicted += cmul(grid_point, kernel_point);
                kernel_u += self.oversampling;
            }
            kernel_v += self.oversampling;
        }

        Ok(predicted)
    }

    /// Predict all of the visibilities in parallel. The results are in the
    /// same order as `uvws`, and are identical to calling
    /// [`Degridder::predict`] on each one. `progress` is incremented once per
    /// visibility.
    pub fn predict_all(
        &self,
        uvws: &[UVW],
        progress: &ProgressBar,
    ) -> Result<Vec<c64>, DegridError> {
        uvws.par_iter()
            .enumerate()
            .map(|(index, &uvw)| {
                let result = self.predict(uvw).map_err(|err| DegridError::Visibility {
                    index,
                    err: Box::new(err),
                });
                progress.inc(1);
                result
            })
            .collect()
    }

    fn check_window(
        &self,
        u_start: i64,
        u_end: i64,
        v_start: i64,
        v_end: i64,
    ) -> Result<(), DegridError> {
        let n = self.settings.grid_size as i64;
        let out = |x: i64| x < 0 || x >= n;
        if out(v_start) || out(v_end) || out(u_start) || out(u_end) {
            let row = if out(v_start) { v_start } else { v_end };
            let col = if out(u_start) { u_start } else { u_end };
            return Err(DegridError::GridWindowOutOfBounds {
                row,
                col,
                grid_size: self.settings.grid_size,
            });
        }
        Ok(())
    }
}
