// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Convolutional degridding: predict visibilities at arbitrary (u, v)
//! coordinates from a regular complex uv grid and an oversampled convolution
//! kernel.
//!
//! The pieces are usable on their own; [`degrid::Degridder`] takes an
//! in-memory grid and [`degrid::KernelTable`], and [`io`] reads and writes the
//! text formats used by the `degridder` binary.

pub mod constants;
pub mod degrid;
pub mod io;
pub mod math;
pub mod uvw;

mod cli;
pub(crate) mod params;

pub use cli::{DegridderCli, DegridderError};

use crossbeam_utils::atomic::AtomicCell;

/// Are progress bars being drawn? This should only ever be enabled by CLI
/// code.
pub(crate) static PROGRESS_BARS: AtomicCell<bool> = AtomicCell::new(false);
