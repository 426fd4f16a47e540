// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all degridder-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::degrid::DegridArgsError;
use crate::{
    degrid::DegridError,
    io::{ReadError, WriteError},
    params::DegridRunError,
};

/// The *only* publicly visible error from the degridder. The variants sort
/// errors by what the user probably has to do about them.
#[derive(Error, Debug)]
pub enum DegridderError {
    /// A file couldn't be opened or read.
    #[error("{0}\n\nCheck that the file exists and that you have read permissions.")]
    ResourceUnavailable(String),

    /// Memory for a grid, kernel or visibilities couldn't be reserved.
    #[error("{0}\n\nThe grid size and kernel oversampling determine how much memory is needed; are they right?")]
    AllocationFailure(String),

    /// An input file doesn't look like what it should.
    #[error("{0}\n\nGrid and kernel files are whitespace-separated numbers. Visibility files start with a count, then have one 'u v w real imag weight' line per visibility.")]
    MalformedInput(String),

    /// A visibility wanted grid cells or kernel samples that don't exist.
    #[error("{0}\n\nThe visibility may be too far from the grid centre for this grid and cell size, or the kernel table may not match the kernel size and oversampling.")]
    OutOfWindowAccess(String),

    /// The predicted visibilities aren't close enough to the measured ones.
    #[error("{0}")]
    Tolerance(String),

    /// A problem with the command-line arguments.
    #[error("{0}\n\nSee --help for the available options.")]
    Args(String),

    /// An error related to argument files.
    #[error("{0}\n\nArgument files are toml or json with the same keys as the long command-line options (with underscores instead of dashes).")]
    ArgFile(String),

    /// An error related to writing visibilities.
    #[error("{0}")]
    VisWrite(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<DegridArgsError> for DegridderError {
    fn from(e: DegridArgsError) -> Self {
        let s = e.to_string();
        match e {
            DegridArgsError::MissingFile { .. }
            | DegridArgsError::InvalidCellSize(_)
            | DegridArgsError::InvalidFrequency(_)
            | DegridArgsError::InvalidMaxDifference(_)
            | DegridArgsError::ZeroVisibilities => Self::Args(s),
            DegridArgsError::FileNotFound { .. } => Self::ResourceUnavailable(s),
            DegridArgsError::Settings(_) => Self::Args(s),
            DegridArgsError::Output(e) => Self::from(e),
        }
    }
}

impl From<DegridRunError> for DegridderError {
    fn from(e: DegridRunError) -> Self {
        match e {
            DegridRunError::Read(e) => Self::from(e),
            DegridRunError::Degrid(e) => Self::from(e),
            DegridRunError::Write(e) => Self::from(e),
            DegridRunError::DifferenceTooLarge { .. } => Self::Tolerance(e.to_string()),
        }
    }
}

impl From<ReadError> for DegridderError {
    fn from(e: ReadError) -> Self {
        let s = e.to_string();
        match e {
            ReadError::FileOpen { .. } | ReadError::IO(_) => Self::ResourceUnavailable(s),
            ReadError::Allocation { .. } => Self::AllocationFailure(s),
            ReadError::ParseFloat { .. }
            | ReadError::NonFiniteCoordinate { .. }
            | ReadError::ParseCount { .. }
            | ReadError::TooFewValues { .. }
            | ReadError::TooFewVisibilities { .. }
            | ReadError::IncompleteVisibilityLine { .. }
            | ReadError::MissingCount { .. }
            | ReadError::NoVisibilities { .. } => Self::MalformedInput(s),
            ReadError::Shape(_) => Self::Generic(s),
        }
    }
}

impl From<DegridError> for DegridderError {
    fn from(e: DegridError) -> Self {
        let s = e.to_string();
        // Categorise by the error underneath any visibility index.
        let mut inner = &e;
        while let DegridError::Visibility { err, .. } = inner {
            inner = &**err;
        }
        match inner {
            DegridError::GridWindowOutOfBounds { .. }
            | DegridError::KernelLookupOutOfBounds { .. } => Self::OutOfWindowAccess(s),
            DegridError::GridShape { .. }
            | DegridError::KernelShape { .. }
            | DegridError::NonFiniteCoordinate { .. } => Self::MalformedInput(s),
            _ => Self::Args(s),
        }
    }
}

impl From<WriteError> for DegridderError {
    fn from(e: WriteError) -> Self {
        Self::VisWrite(e.to_string())
    }
}

impl From<std::io::Error> for DegridderError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}

impl From<toml::ser::Error> for DegridderError {
    fn from(e: toml::ser::Error) -> Self {
        Self::ArgFile(e.to_string())
    }
}
