// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all degridding-related errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegridError {
    #[error("The kernel size must be odd, but got {0}")]
    EvenKernelSize(usize),

    #[error("The kernel oversampling factor must be at least 1")]
    ZeroOversampling,

    #[error("The grid size must be a non-zero even number, but got {0}")]
    InvalidGridSize(usize),

    #[error("The kernel size ({kernel_size}) is larger than the grid ({grid_size})")]
    KernelLargerThanGrid {
        kernel_size: usize,
        grid_size: usize,
    },

    #[error("The grid must be {expected}x{expected} cells, but it is {rows}x{cols}")]
    GridShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("The kernel table must be {expected}x{expected} samples, but it is {rows}x{cols}")]
    KernelShape {
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Convolution window cell (row {row}, col {col}) is outside of the {grid_size}x{grid_size} grid")]
    GridWindowOutOfBounds {
        row: i64,
        col: i64,
        grid_size: usize,
    },

    #[error("Kernel sample at offset (u {kernel_u}, v {kernel_v}) folds outside of the {table_side}x{table_side} kernel table")]
    KernelLookupOutOfBounds {
        kernel_u: i64,
        kernel_v: i64,
        table_side: usize,
    },

    #[error("Visibility coordinates must be finite, but got (u {u}, v {v})")]
    NonFiniteCoordinate { u: f64, v: f64 },

    #[error("Visibility {index}: {err}")]
    Visibility {
        index: usize,
        err: Box<DegridError>,
    },
}

impl DegridError {
    /// Is this an access outside of the grid or kernel table? Such an error
    /// may be wrapped in [`DegridError::Visibility`].
    pub fn is_out_of_window(&self) -> bool {
        match self {
            DegridError::GridWindowOutOfBounds { .. }
            | DegridError::KernelLookupOutOfBounds { .. } => true,
            DegridError::Visibility { err, .. } => err.is_out_of_window(),
            _ => false,
        }
    }
}
