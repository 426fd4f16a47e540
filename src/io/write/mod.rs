// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to handle writing out visibilities.

mod error;
#[cfg(test)]
mod tests;

pub use error::WriteError;

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, trace};

use crate::{cli::Warn, math::c64, uvw::UVW};

/// Write visibilities to a text file. The first line is the number of
/// visibilities, and every other line is `u v w real imag weight`.
///
/// `uvws` are in wavelengths (as they are after reading); they are converted
/// back to metres with `freq_hz`, and `u` is negated if `right_ascension` is
/// set, undoing what happened when they were read.
pub fn write_visibilities(
    file: &Path,
    uvws: &[UVW],
    vis: &[c64],
    weights: &[f64],
    freq_hz: f64,
    right_ascension: bool,
) -> Result<(), WriteError> {
    if uvws.len() != vis.len() || uvws.len() != weights.len() {
        return Err(WriteError::LengthMismatch {
            num_uvws: uvws.len(),
            num_vis: vis.len(),
            num_weights: weights.len(),
        });
    }
    debug!(
        "Writing {} visibilities to '{}'",
        uvws.len(),
        file.display()
    );

    let mut f = BufWriter::new(File::create(file)?);
    writeln!(f, "{}", uvws.len())?;
    for ((&uvw, vis), weight) in uvws.iter().zip(vis).zip(weights) {
        let UVW { u, v, w } = uvw.to_metres(freq_hz, right_ascension);
        writeln!(
            f,
            "{u:.6} {v:.6} {w:.6} {:.6} {:.6} {weight:.6}",
            vis.re, vis.im
        )?;
    }
    f.flush()?;

    Ok(())
}

/// Check if we are able to write to a file path. If we aren't able to write to
/// the file, it's either because the directory containing the file doesn't
/// exist, or there's another issue (probably bad permissions). In the former
/// case, create the parent directories, otherwise return an error.
/// Additionally, if the file exists, emit a warning that it will be
/// overwritten.
///
/// With this approach, we potentially avoid doing a whole run of degridding
/// only to be unable to write to a file at the end. This code _doesn't_ alter
/// the file if it exists.
pub(crate) fn can_write_to_file(file: &Path) -> Result<(), WriteError> {
    trace!("Testing whether we can write to {}", file.display());

    if file.is_dir() {
        return Err(WriteError::FileNotWritable {
            file: file.display().to_string(),
        });
    }

    let file_exists = file.exists();
    match std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(file)
        .map_err(|e| e.kind())
    {
        // File is writable.
        Ok(_) => {
            if file_exists {
                format!("Will overwrite the existing file '{}'", file.display()).warn();
            } else {
                // If the file in question didn't already exist, `OpenOptions::new`
                // creates it as part of its work. We don't want to keep the 0-sized
                // file; remove it if it didn't exist before.
                std::fs::remove_file(file)?;
            }
        }

        // File doesn't exist. Attempt to make the directories leading up to the
        // file; if this fails, then we can't write the file anyway.
        Err(std::io::ErrorKind::NotFound) => {
            if let Some(p) = file.parent() {
                match std::fs::DirBuilder::new()
                    .recursive(true)
                    .create(p)
                    .map_err(|e| e.kind())
                {
                    Ok(()) => (),
                    Err(std::io::ErrorKind::PermissionDenied) => {
                        return Err(WriteError::NewDirectory(p.to_path_buf()))
                    }
                    Err(e) => return Err(WriteError::IO(e.into())),
                }
            }
        }

        Err(std::io::ErrorKind::PermissionDenied) => {
            return Err(WriteError::FileNotWritable {
                file: file.display().to_string(),
            })
        }

        Err(e) => {
            return Err(WriteError::IO(e.into()));
        }
    }

    Ok(())
}
