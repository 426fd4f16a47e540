// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod degrid;
mod no_stderr;

use std::{path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};
use indoc::indoc;

fn degridder() -> Command {
    Command::cargo_bin("degridder").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

struct Files {
    grid_real: String,
    grid_imag: String,
    kernel_real: String,
    kernel_imag: String,
    vis: String,
}

/// Write an 8x8 grid of ones, a 4x4 kernel quadrant (kernel size 3,
/// oversampling 2) and three visibilities into `dir`.
fn write_test_files(dir: &Path) -> Files {
    let write = |name: &str, contents: &str| {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path.display().to_string()
    };

    let grid_real = (0..8).map(|_| "1 1 1 1 1 1 1 1\n").collect::<String>();
    let grid_imag = (0..8).map(|_| "0 0 0 0 0 0 0 0\n").collect::<String>();
    Files {
        grid_real: write("grid_real.csv", &grid_real),
        grid_imag: write("grid_imag.csv", &grid_imag),
        kernel_real: write(
            "kernel_real.csv",
            indoc! {"
                1.0 0.8 0.5 0.2
                0.8 0.6 0.4 0.1
                0.5 0.4 0.2 0.05
                0.2 0.1 0.05 0.0
            "},
        ),
        kernel_imag: write("kernel_imag.csv", &"0 ".repeat(16)),
        vis: write(
            "vis.txt",
            indoc! {"
                3
                1.25 -2.4 10.0 1.0 0.0 1.0
                0.0 0.0 0.0 1.0 0.0 0.5
                -0.3 1.1 3.0 1.0 0.0 2.0
            "},
        ),
    }
}

/// Arguments describing the test files' geometry. The frequency makes metres
/// and wavelengths the same.
fn geometry_args() -> [&'static str; 10] {
    [
        "--grid-size",
        "8",
        "--cell-size",
        "0.125",
        "--kernel-size",
        "3",
        "--oversampling",
        "2",
        "--freq",
        "299792458",
    ]
}
