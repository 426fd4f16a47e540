// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read in grids, kernels and visibilities from text files.
//!
//! Grids and kernels are stored as a pair of files, one holding the real parts
//! and the other the imaginary parts. Each is a whitespace-separated list of
//! doubles in row-major order; line breaks carry no meaning.

mod error;

pub use error::ReadError;

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::{debug, trace};
use ndarray::Array2;
use vec1::Vec1;

use crate::{cli::Warn, math::c64, uvw::UVW};

/// Visibilities read from a text file.
#[derive(Debug, Clone)]
pub struct InputVisibilities {
    /// \[wavelengths\]. `w` is always 0, and `u` has already been negated if
    /// the right-ascension convention was requested.
    pub uvws: Vec1<UVW>,

    /// The measured visibilities.
    pub vis: Vec<c64>,

    pub weights: Vec<f64>,

    /// The number of visibilities the file claims to hold.
    pub declared_count: usize,
}

fn open(file: &Path) -> Result<BufReader<File>, ReadError> {
    File::open(file)
        .map(BufReader::new)
        .map_err(|err| ReadError::FileOpen {
            file: file.to_path_buf(),
            err,
        })
}

/// An empty `Vec` with room for `num_elements`; running out of memory is an
/// error rather than an abort.
fn with_capacity<T>(what: &'static str, num_elements: usize) -> Result<Vec<T>, ReadError> {
    let mut v = Vec::new();
    v.try_reserve_exact(num_elements)
        .map_err(|_| ReadError::Allocation { what, num_elements })?;
    Ok(v)
}

fn parse_float(file: &Path, line_num: usize, field: usize, string: &str) -> Result<f64, ReadError> {
    string.parse().map_err(|_| ReadError::ParseFloat {
        file: file.to_path_buf(),
        line_num,
        field,
        string: string.to_string(),
    })
}

/// Stream `num_values` floats out of `file`, handing each to `f` with its
/// position. Anything after the last wanted value is ignored with a warning.
fn read_floats<F>(file: &Path, num_values: usize, mut f: F) -> Result<(), ReadError>
where
    F: FnMut(usize, f64),
{
    let mut buf = open(file)?;
    let mut line = String::new();
    let mut line_num = 0;
    let mut count = 0;

    while buf.read_line(&mut line)? > 0 {
        line_num += 1;
        for (i_field, token) in line.split_ascii_whitespace().enumerate() {
            if count == num_values {
                format!(
                    "'{}' has more than the {num_values} expected values (from line {line_num}); ignoring the rest",
                    file.display()
                )
                .warn();
                return Ok(());
            }
            f(count, parse_float(file, line_num, i_field + 1, token)?);
            count += 1;
        }
        line.clear();
    }

    if count < num_values {
        return Err(ReadError::TooFewValues {
            file: file.to_path_buf(),
            expected: num_values,
            found: count,
        });
    }
    Ok(())
}

/// Read a `side` x `side` complex array from a pair of real and imaginary
/// files. `what` describes the array for error messages.
pub fn read_complex_plane(
    real_file: &Path,
    imag_file: &Path,
    side: usize,
    what: &'static str,
) -> Result<Array2<c64>, ReadError> {
    let num_values = side.checked_mul(side).ok_or(ReadError::Allocation {
        what,
        num_elements: usize::MAX,
    })?;
    debug!(
        "Reading {side}x{side} {what} from '{}' and '{}'",
        real_file.display(),
        imag_file.display()
    );

    // Open both files before the (potentially huge) allocation so that a
    // missing file is reported first.
    drop(open(real_file)?);
    drop(open(imag_file)?);

    let mut values = with_capacity(what, num_values)?;
    values.resize(num_values, c64::default());
    read_floats(real_file, num_values, |i, re| values[i].re = re)?;
    read_floats(imag_file, num_values, |i, im| values[i].im = im)?;

    Ok(Array2::from_shape_vec((side, side), values)?)
}

/// Read visibilities from a text file. The first token is the number of
/// visibilities in the file; each following non-empty line is
/// `u v w real imag weight`, with u, v and w in metres.
///
/// At most `max_visibilities` are read if it is supplied. The coordinates are
/// converted to wavelengths with `freq_hz`, `w` is set to 0, and if
/// `right_ascension` is true then `u` is negated.
pub fn read_visibilities(
    file: &Path,
    freq_hz: f64,
    right_ascension: bool,
    max_visibilities: Option<usize>,
) -> Result<InputVisibilities, ReadError> {
    let mut buf = open(file)?;
    let mut line = String::new();
    let mut line_num = 0;

    // Find the count.
    let declared_count = loop {
        line.clear();
        if buf.read_line(&mut line)? == 0 {
            return Err(ReadError::MissingCount {
                file: file.to_path_buf(),
            });
        }
        line_num += 1;
        let mut items = line.split_ascii_whitespace();
        if let Some(count) = items.next() {
            if items.next().is_some() {
                format!(
                    "'{}' line {line_num}: Ignoring trailing contents after the visibility count",
                    file.display()
                )
                .warn();
            }
            break count.parse::<usize>().map_err(|_| ReadError::ParseCount {
                file: file.to_path_buf(),
                line_num,
                string: count.to_string(),
            })?;
        }
    };
    debug!("'{}' declares {declared_count} visibilities", file.display());

    let num_to_read = match max_visibilities {
        Some(max) if max < declared_count => {
            format!(
                "'{}' declares {declared_count} visibilities; only using the first {max}",
                file.display()
            )
            .warn();
            max
        }
        _ => declared_count,
    };

    let mut uvws = with_capacity("visibility coordinates", num_to_read)?;
    let mut vis = with_capacity("visibilities", num_to_read)?;
    let mut weights = with_capacity("visibility weights", num_to_read)?;

    let mut warned_about_extra_fields = false;
    while uvws.len() < num_to_read {
        line.clear();
        if buf.read_line(&mut line)? == 0 {
            return Err(ReadError::TooFewVisibilities {
                file: file.to_path_buf(),
                expected: num_to_read,
                found: uvws.len(),
            });
        }
        line_num += 1;

        let items: Vec<&str> = line.split_ascii_whitespace().collect();
        if items.is_empty() {
            continue;
        }
        if items.len() < 6 {
            return Err(ReadError::IncompleteVisibilityLine {
                file: file.to_path_buf(),
                line_num,
                found: items.len(),
            });
        }
        if items.len() > 6 && !warned_about_extra_fields {
            format!(
                "'{}' line {line_num}: Ignoring values after the weight",
                file.display()
            )
            .warn();
            warned_about_extra_fields = true;
        }

        let mut values = [0.0; 6];
        for (i_field, (value, item)) in values.iter_mut().zip(&items).enumerate() {
            *value = parse_float(file, line_num, i_field + 1, item)?;
        }
        // u and v place the visibility on the grid; they must be real numbers.
        for (i_field, value) in values[..2].iter().enumerate() {
            if !value.is_finite() {
                return Err(ReadError::NonFiniteCoordinate {
                    file: file.to_path_buf(),
                    line_num,
                    field: i_field + 1,
                    string: items[i_field].to_string(),
                });
            }
        }
        let [u, v, w, re, im, weight] = values;
        trace!("{u}, {v}, {w}, {re}, {im}, {weight}");

        uvws.push(UVW::from_metres(
            UVW { u, v, w },
            freq_hz,
            right_ascension,
        ));
        vis.push(c64::new(re, im));
        weights.push(weight);
    }

    // Anything left over?
    let mut leftover = 0;
    loop {
        line.clear();
        if buf.read_line(&mut line)? == 0 {
            break;
        }
        if !line.trim().is_empty() {
            leftover += 1;
        }
    }
    if leftover > 0 {
        format!(
            "'{}' has {leftover} more visibility lines than were read; ignoring them",
            file.display()
        )
        .warn();
    }

    let uvws = Vec1::try_from_vec(uvws).map_err(|_| ReadError::NoVisibilities {
        file: file.to_path_buf(),
    })?;
    Ok(InputVisibilities {
        uvws,
        vis,
        weights,
        declared_count,
    })
}
