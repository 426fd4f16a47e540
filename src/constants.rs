// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `degridder` does all of its
calculations in double precision.
 */

/// Speed of light \[metres/second\]
pub const VEL_C: f64 = 299_792_458.0;

/// The default side length of the grid \[cells\].
pub const DEFAULT_GRID_SIZE: usize = 16384;

/// The default angular size of a single grid cell \[radians\].
pub const DEFAULT_CELL_SIZE: f64 = 6.39708380288950e-6;

/// The default observing frequency \[Hz\].
pub const DEFAULT_FREQ_HZ: f64 = 100e6;

/// The default side length of the convolution window \[cells\]. Must be odd.
pub const DEFAULT_KERNEL_SIZE: usize = 9;

/// The default number of kernel phases per grid cell along one axis.
pub const DEFAULT_OVERSAMPLING: usize = 4;

/// The default path of the output visibility file.
pub const DEFAULT_OUTPUT_VIS_FILENAME: &str = "degridded_visibilities.txt";

/// The weight given to each output visibility if no weight was read in.
pub const DEFAULT_VIS_WEIGHT: f64 = 1.0;
