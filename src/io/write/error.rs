// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Cannot write to the specified file '{file}'. Do you have write permissions set?")]
    FileNotWritable { file: String },

    #[error(
        "Couldn't create directory '{}' for output files. Do you have write permissions set?", .0.display()
    )]
    NewDirectory(PathBuf),

    #[error("Tried to write {num_uvws} visibility coordinates with {num_vis} visibilities and {num_weights} weights")]
    LengthMismatch {
        num_uvws: usize,
        num_vis: usize,
        num_weights: usize,
    },

    #[error(transparent)]
    IO(#[from] std::io::Error),
}
