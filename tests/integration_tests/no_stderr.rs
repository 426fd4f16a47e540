// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests to ensure there is no stderr output for successful commands.

use tempfile::TempDir;

use crate::{degridder, geometry_args, get_cmd_output, write_test_files, Files};

#[test]
fn test_degrid_no_stderr() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files {
        grid_real,
        grid_imag,
        kernel_real,
        kernel_imag,
        vis,
    } = write_test_files(tmp_dir.path());
    let output = tmp_dir.path().join("out.txt");

    #[rustfmt::skip]
    let cmd = degridder()
        .args(geometry_args())
        .args([
            "--grid-real", &grid_real,
            "--grid-imag", &grid_imag,
            "--kernel-real", &kernel_real,
            "--kernel-imag", &kernel_imag,
            "--visibilities", &vis,
            "--output", &output.display().to_string(),
        ])
        .ok();
    assert!(
        cmd.is_ok(),
        "degridder failed on simple test data: {}",
        cmd.err().unwrap()
    );
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
}
