// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Predict visibilities from a uv grid and write them out.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};
use thiserror::Error;

use crate::{
    degrid::{DegridError, DegridSettings, Degridder, KernelTable},
    io::{read_complex_plane, read_visibilities, write_visibilities, ReadError, WriteError},
    math::{c64, cdist},
    PROGRESS_BARS,
};

/// A pair of files holding the real and imaginary parts of a complex array.
#[derive(Debug, Clone)]
pub(crate) struct ComplexFiles {
    pub(crate) real: PathBuf,
    pub(crate) imag: PathBuf,
}

/// Parameters needed to degrid visibilities.
pub(crate) struct DegridParams {
    /// The grid and kernel geometry.
    pub(crate) settings: DegridSettings,

    /// The observing frequency \[Hz\].
    pub(crate) freq_hz: f64,

    /// Negate u when reading and writing visibilities.
    pub(crate) right_ascension: bool,

    pub(crate) grid_files: ComplexFiles,

    /// The w = 0 kernel quadrant.
    pub(crate) kernel_files: ComplexFiles,

    pub(crate) input_vis_file: PathBuf,

    /// Only degrid this many visibilities, if set.
    pub(crate) num_visibilities: Option<usize>,

    pub(crate) output_vis_file: PathBuf,

    /// Fail if any predicted visibility is further than this from its
    /// measured counterpart.
    pub(crate) max_difference: Option<f64>,
}

/// What happened during a run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DegridSummary {
    pub(crate) num_visibilities: usize,
    pub(crate) max_difference: f64,
    pub(crate) mean_difference: f64,
}

impl DegridParams {
    pub(crate) fn run(&self) -> Result<DegridSummary, DegridRunError> {
        let DegridParams {
            settings,
            freq_hz,
            right_ascension,
            grid_files,
            kernel_files,
            input_vis_file,
            num_visibilities,
            output_vis_file,
            max_difference,
        } = self;

        info!("Loading kernel");
        let kernel = KernelTable::new(read_complex_plane(
            &kernel_files.real,
            &kernel_files.imag,
            settings.kernel_table_side(),
            "kernel samples",
        )?)?;

        info!("Loading grid");
        let grid = read_complex_plane(
            &grid_files.real,
            &grid_files.imag,
            settings.grid_size,
            "grid cells",
        )?;

        info!("Loading visibilities");
        let input = read_visibilities(
            input_vis_file,
            *freq_hz,
            *right_ascension,
            *num_visibilities,
        )?;
        info!("Degridding {} visibilities", input.uvws.len());

        let degridder = Degridder::new(grid.view(), &kernel, *settings)?;
        let progress = ProgressBar::with_draw_target(
            Some(input.uvws.len() as _),
            if PROGRESS_BARS.load() {
                ProgressDrawTarget::stdout()
            } else {
                ProgressDrawTarget::hidden()
            },
        )
        .with_style(
            ProgressStyle::default_bar()
                .template(
                    "{msg:18}: [{wide_bar:.blue}] {pos:2}/{len:2} visibilities ({elapsed_precise}<{eta_precise})",
                )
                .unwrap()
                .progress_chars("=> "),
        )
        .with_position(0)
        .with_message("Degridding");
        let predicted = degridder.predict_all(&input.uvws, &progress)?;
        progress.abandon_with_message("Finished degridding");

        write_visibilities(
            output_vis_file,
            &input.uvws,
            &predicted,
            &input.weights,
            *freq_hz,
            *right_ascension,
        )?;
        info!(
            "Predicted visibilities written to: {}",
            output_vis_file.display()
        );

        let (max, mean) = compare_visibilities(&input.vis, &predicted);
        info!("Largest difference between measured and predicted visibilities: {max:e}");
        info!("Mean difference between measured and predicted visibilities:    {mean:e}");
        if let Some(tolerance) = max_difference {
            debug!("Comparing the largest difference against {tolerance:e}");
            if max.is_nan() || max > *tolerance {
                return Err(DegridRunError::DifferenceTooLarge {
                    max_difference: max,
                    tolerance: *tolerance,
                });
            }
        }

        Ok(DegridSummary {
            num_visibilities: predicted.len(),
            max_difference: max,
            mean_difference: mean,
        })
    }
}

/// The largest and mean moduli of the differences between measured and
/// predicted visibilities. NaN differences propagate into both.
pub(crate) fn compare_visibilities(measured: &[c64], predicted: &[c64]) -> (f64, f64) {
    if measured.is_empty() {
        return (0.0, 0.0);
    }
    let (max, sum) = measured.iter().zip(predicted).fold(
        (0.0_f64, 0.0),
        |(max, sum), (&m, &p)| {
            let d = cdist(m, p);
            // f64::max ignores NaNs; don't.
            let max = if d.is_nan() || d > max { d } else { max };
            (max, sum + d)
        },
    );
    (max, sum / measured.len() as f64)
}

#[derive(Error, Debug)]
pub(crate) enum DegridRunError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Degrid(#[from] DegridError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("The largest difference between the measured and predicted visibilities ({max_difference:e}) exceeds the tolerance ({tolerance:e})")]
    DifferenceTooLarge { max_difference: f64, tolerance: f64 },
}
