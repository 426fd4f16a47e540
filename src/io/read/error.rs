// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors from reading grids, kernels and visibilities.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Couldn't open '{}': {err}", file.display())]
    FileOpen {
        file: PathBuf,
        err: std::io::Error,
    },

    #[error("Couldn't allocate memory for {num_elements} {what}")]
    Allocation {
        what: &'static str,
        num_elements: usize,
    },

    #[error("'{}' line {line_num}, field {field}: Couldn't parse '{string}' as a float", file.display())]
    ParseFloat {
        file: PathBuf,
        line_num: usize,
        field: usize,
        string: String,
    },

    #[error("'{}' line {line_num}, field {field}: '{string}' isn't a finite coordinate", file.display())]
    NonFiniteCoordinate {
        file: PathBuf,
        line_num: usize,
        field: usize,
        string: String,
    },

    #[error("'{}' line {line_num}: Couldn't parse '{string}' as a number of visibilities", file.display())]
    ParseCount {
        file: PathBuf,
        line_num: usize,
        string: String,
    },

    #[error("'{}': Expected {expected} values, but only found {found}", file.display())]
    TooFewValues {
        file: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("'{}': Expected {expected} visibilities, but only found {found}", file.display())]
    TooFewVisibilities {
        file: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("'{}' line {line_num}: Expected 6 values (u v w real imag weight), but found {found}", file.display())]
    IncompleteVisibilityLine {
        file: PathBuf,
        line_num: usize,
        found: usize,
    },

    #[error("'{}': The file doesn't contain a visibility count", file.display())]
    MissingCount { file: PathBuf },

    #[error("'{}': No visibilities to degrid", file.display())]
    NoVisibilities { file: PathBuf },

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
