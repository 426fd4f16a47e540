// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments for degridding.


use std::{borrow::Cow, path::PathBuf};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{display_warnings, InfoPrinter, ARG_FILE_HELP};
use crate::{
    constants::{
        DEFAULT_CELL_SIZE, DEFAULT_FREQ_HZ, DEFAULT_GRID_SIZE, DEFAULT_KERNEL_SIZE,
        DEFAULT_OUTPUT_VIS_FILENAME, DEFAULT_OVERSAMPLING,
    },
    degrid::{DegridError, DegridSettings},
    io::{write::can_write_to_file, WriteError},
    params::{ComplexFiles, DegridParams},
    DegridderError,
};

lazy_static::lazy_static! {
    static ref GRID_SIZE_HELP: String =
        format!("The number of cells along each side of the grid. Must be even. Default: {DEFAULT_GRID_SIZE}");

    static ref CELL_SIZE_HELP: String =
        format!("The angular size of a grid cell. The grid size multiplied by this converts wavelengths into grid cells. Default: {DEFAULT_CELL_SIZE:e}");

    static ref FREQ_HELP: String =
        format!("The observing frequency used to convert visibility coordinates between metres and wavelengths [Hz]. Default: {DEFAULT_FREQ_HZ:e}");

    static ref KERNEL_SIZE_HELP: String =
        format!("The number of grid cells along each side of the convolution window. Must be odd. Default: {DEFAULT_KERNEL_SIZE}");

    static ref OVERSAMPLING_HELP: String =
        format!("The number of kernel samples per grid cell along one axis. Default: {DEFAULT_OVERSAMPLING}");

    static ref OUTPUT_HELP: String =
        format!("Where to write the predicted visibilities. Default: {DEFAULT_OUTPUT_VIS_FILENAME}");
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct DegridArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(long, help = GRID_SIZE_HELP.as_str(), help_heading = "GEOMETRY")]
    pub(super) grid_size: Option<usize>,

    #[clap(long, help = CELL_SIZE_HELP.as_str(), help_heading = "GEOMETRY")]
    pub(super) cell_size: Option<f64>,

    #[clap(long, help = KERNEL_SIZE_HELP.as_str(), help_heading = "GEOMETRY")]
    pub(super) kernel_size: Option<usize>,

    #[clap(long, help = OVERSAMPLING_HELP.as_str(), help_heading = "GEOMETRY")]
    pub(super) oversampling: Option<usize>,

    #[clap(long, help = FREQ_HELP.as_str(), help_heading = "VISIBILITIES")]
    pub(super) freq: Option<f64>,

    /// Don't negate u when reading and writing visibilities. By default, u is
    /// flipped to match the grid's right-ascension axis.
    #[clap(long, help_heading = "VISIBILITIES")]
    #[serde(default)]
    pub(super) no_right_ascension: bool,

    /// Text file of the real parts of the grid cells, row by row.
    #[clap(long, help_heading = "GRID")]
    pub(super) grid_real: Option<PathBuf>,

    /// Text file of the imaginary parts of the grid cells, row by row.
    #[clap(long, help_heading = "GRID")]
    pub(super) grid_imag: Option<PathBuf>,

    /// Text file of the real parts of the w = 0 kernel quadrant, row by row.
    #[clap(long, help_heading = "KERNEL")]
    pub(super) kernel_real: Option<PathBuf>,

    /// Text file of the imaginary parts of the w = 0 kernel quadrant, row by
    /// row.
    #[clap(long, help_heading = "KERNEL")]
    pub(super) kernel_imag: Option<PathBuf>,

    /// The visibilities to predict. The first value is the number of
    /// visibilities, then each line is "u v w real imag weight" with u, v, w
    /// in metres.
    #[clap(long, help_heading = "VISIBILITIES")]
    pub(super) visibilities: Option<PathBuf>,

    /// Only degrid this many visibilities. The default is the count at the
    /// top of the visibility file.
    #[clap(long, help_heading = "VISIBILITIES")]
    pub(super) num_visibilities: Option<usize>,

    #[clap(short = 'o', long, help = OUTPUT_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,

    /// Fail if any predicted visibility differs from its measured value by
    /// more than this. The output file is still written.
    #[clap(long, help_heading = "OUTPUT FILES")]
    pub(super) max_difference: Option<f64>,
}

impl DegridArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    ///
    /// This function should only ever merge arguments, and not try to make
    /// sense of them.
    pub(super) fn merge(self) -> Result<DegridArgs, DegridderError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let DegridArgs {
                args_file: _,
                grid_size,
                cell_size,
                kernel_size,
                oversampling,
                freq,
                no_right_ascension,
                grid_real,
                grid_imag,
                kernel_real,
                kernel_imag,
                visibilities,
                num_visibilities,
                output,
                max_difference,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(DegridArgs {
                args_file: None,
                grid_size: cli_args.grid_size.or(grid_size),
                cell_size: cli_args.cell_size.or(cell_size),
                kernel_size: cli_args.kernel_size.or(kernel_size),
                oversampling: cli_args.oversampling.or(oversampling),
                freq: cli_args.freq.or(freq),
                no_right_ascension: cli_args.no_right_ascension || no_right_ascension,
                grid_real: cli_args.grid_real.or(grid_real),
                grid_imag: cli_args.grid_imag.or(grid_imag),
                kernel_real: cli_args.kernel_real.or(kernel_real),
                kernel_imag: cli_args.kernel_imag.or(kernel_imag),
                visibilities: cli_args.visibilities.or(visibilities),
                num_visibilities: cli_args.num_visibilities.or(num_visibilities),
                output: cli_args.output.or(output),
                max_difference: cli_args.max_difference.or(max_difference),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<DegridParams, DegridArgsError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            grid_size,
            cell_size,
            kernel_size,
            oversampling,
            freq,
            no_right_ascension,
            grid_real,
            grid_imag,
            kernel_real,
            kernel_imag,
            visibilities,
            num_visibilities,
            output,
            max_difference,
        } = self;

        let settings = DegridSettings {
            grid_size: grid_size.unwrap_or(DEFAULT_GRID_SIZE),
            cell_size: cell_size.unwrap_or(DEFAULT_CELL_SIZE),
            kernel_size: kernel_size.unwrap_or(DEFAULT_KERNEL_SIZE),
            oversampling: oversampling.unwrap_or(DEFAULT_OVERSAMPLING),
        };
        settings.validate()?;
        if !(settings.cell_size.is_finite() && settings.cell_size > 0.0) {
            return Err(DegridArgsError::InvalidCellSize(settings.cell_size));
        }
        let freq_hz = freq.unwrap_or(DEFAULT_FREQ_HZ);
        if !(freq_hz.is_finite() && freq_hz > 0.0) {
            return Err(DegridArgsError::InvalidFrequency(freq_hz));
        }
        if let Some(tol) = max_difference {
            if tol.is_nan() || tol < 0.0 {
                return Err(DegridArgsError::InvalidMaxDifference(tol));
            }
        }
        if num_visibilities == Some(0) {
            return Err(DegridArgsError::ZeroVisibilities);
        }

        let grid_files = ComplexFiles {
            real: existing_file(grid_real, "--grid-real")?,
            imag: existing_file(grid_imag, "--grid-imag")?,
        };
        let kernel_files = ComplexFiles {
            real: existing_file(kernel_real, "--kernel-real")?,
            imag: existing_file(kernel_imag, "--kernel-imag")?,
        };
        let input_vis_file = existing_file(visibilities, "--visibilities")?;
        let output_vis_file =
            output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_VIS_FILENAME));
        can_write_to_file(&output_vis_file)?;
        let right_ascension = !no_right_ascension;

        let mut printer = InfoPrinter::new("Degridding settings".into());
        printer.push_block(vec![
            format!(
                "Grid: {0}x{0} cells, cell size {1:e}",
                settings.grid_size, settings.cell_size
            )
            .into(),
            format!("uv scale: {}", settings.uv_scale()).into(),
        ]);
        printer.push_block(vec![
            format!(
                "Kernel: {0}x{0} cells, oversampled by {1}",
                settings.kernel_size, settings.oversampling
            )
            .into(),
            format!(
                "Stored quadrant: {0}x{0} samples",
                settings.kernel_table_side()
            )
            .into(),
        ]);
        printer.push_block(vec![
            format!("Frequency: {freq_hz:e} Hz").into(),
            if right_ascension {
                "u is negated (right ascension)".into()
            } else {
                "u is not negated".into()
            },
        ]);
        printer.display();

        let mut printer = InfoPrinter::new("Files".into());
        printer.push_block(vec![
            format!("Grid (real): {}", grid_files.real.display()).into(),
            format!("Grid (imag): {}", grid_files.imag.display()).into(),
        ]);
        printer.push_block(vec![
            format!("Kernel (real): {}", kernel_files.real.display()).into(),
            format!("Kernel (imag): {}", kernel_files.imag.display()).into(),
        ]);
        let mut vis_block: Vec<Cow<'static, str>> =
            vec![format!("Visibilities: {}", input_vis_file.display()).into()];
        if let Some(n) = num_visibilities {
            vis_block.push(format!("Using at most {n} visibilities").into());
        }
        printer.push_block(vis_block);
        let mut output_block: Vec<Cow<'static, str>> =
            vec![format!("Output: {}", output_vis_file.display()).into()];
        if let Some(tol) = max_difference {
            output_block.push(format!("Maximum allowed difference: {tol:e}").into());
        }
        printer.push_block(output_block);
        printer.display();

        display_warnings();

        Ok(DegridParams {
            settings,
            freq_hz,
            right_ascension,
            grid_files,
            kernel_files,
            input_vis_file,
            num_visibilities,
            output_vis_file,
            max_difference,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), DegridderError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let summary = params.run();
        display_warnings();
        let summary = summary?;
        info!("Degridded {} visibilities", summary.num_visibilities);
        Ok(())
    }
}

fn existing_file(file: Option<PathBuf>, option: &'static str) -> Result<PathBuf, DegridArgsError> {
    match file {
        None => Err(DegridArgsError::MissingFile { option }),
        Some(f) if f.is_file() => Ok(f),
        Some(file) => Err(DegridArgsError::FileNotFound { option, file }),
    }
}

#[derive(Error, Debug)]
pub(super) enum DegridArgsError {
    #[error("No file was specified with {option}")]
    MissingFile { option: &'static str },

    #[error("The file given to {option} ('{}') doesn't exist or isn't a file", file.display())]
    FileNotFound {
        option: &'static str,
        file: PathBuf,
    },

    #[error("The cell size must be a positive number, but got {0}")]
    InvalidCellSize(f64),

    #[error("The frequency must be a positive number of Hz, but got {0}")]
    InvalidFrequency(f64),

    #[error("The maximum allowed difference can't be negative, but got {0}")]
    InvalidMaxDifference(f64),

    #[error("Asked to degrid 0 visibilities")]
    ZeroVisibilities,

    #[error(transparent)]
    Settings(#[from] DegridError),

    #[error(transparent)]
    Output(#[from] WriteError),
}
