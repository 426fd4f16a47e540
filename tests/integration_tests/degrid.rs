// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use tempfile::TempDir;

use crate::{degridder, geometry_args, get_cmd_output, write_test_files, Files};

#[test]
fn test_degrid_writes_output() {
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
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_ok(), "degridder failed: {}", cmd.err().unwrap());

    let contents = std::fs::read_to_string(&output).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("3"));
    let lines: Vec<Vec<f64>> = lines
        .map(|l| l.split(' ').map(|s| s.parse().unwrap()).collect())
        .collect();
    assert_eq!(lines.len(), 3);
    for line in &lines {
        assert_eq!(line.len(), 6);
        // w is always discarded.
        assert_eq!(line[2], 0.0);
    }
    // Coordinates and weights come back as they went in.
    assert_eq!(lines[0][0], 1.25);
    assert_eq!(lines[0][1], -2.4);
    assert_eq!(lines[2][0], -0.3);
    assert_eq!(lines[1][5], 0.5);
    assert_eq!(lines[2][5], 2.0);
    // The grid is all ones and the kernel is real and positive.
    for line in &lines {
        assert!(line[3] > 0.0);
        assert_eq!(line[4], 0.0);
    }
}

#[test]
fn test_dry_run_and_save_toml() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files {
        grid_real,
        grid_imag,
        kernel_real,
        kernel_imag,
        vis,
    } = write_test_files(tmp_dir.path());
    let output = tmp_dir.path().join("out.txt");
    let toml = tmp_dir.path().join("args.toml");

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
            "--dry-run",
            "--save-toml", &toml.display().to_string(),
        ])
        .ok();
    assert!(cmd.is_ok(), "dry run failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Dry run"));
    assert!(!output.exists());
    assert!(toml.exists());

    // The saved arguments are enough to do the run.
    let toml = toml.display().to_string();
    let cmd = degridder().args([toml.as_str(), "--no-progress-bars"]).ok();
    assert!(
        cmd.is_ok(),
        "degridder failed with saved arguments: {}",
        cmd.err().unwrap()
    );
    assert!(output.exists());
}

#[test]
fn test_missing_grid_file_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files {
        grid_imag,
        kernel_real,
        kernel_imag,
        vis,
        ..
    } = write_test_files(tmp_dir.path());
    let missing = tmp_dir.path().join("missing.csv").display().to_string();
    let output = tmp_dir.path().join("out.txt");

    #[rustfmt::skip]
    let cmd = degridder()
        .args(geometry_args())
        .args([
            "--grid-real", &missing,
            "--grid-imag", &grid_imag,
            "--kernel-real", &kernel_real,
            "--kernel-imag", &kernel_imag,
            "--visibilities", &vis,
            "--output", &output.display().to_string(),
        ])
        .assert();
    cmd.failure().code(1);
    assert!(!output.exists());
}

#[test]
fn test_malformed_visibilities_fail() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files {
        grid_real,
        grid_imag,
        kernel_real,
        kernel_imag,
        vis,
    } = write_test_files(tmp_dir.path());
    std::fs::write(&vis, "2\n0 0 0 1 0 1\n0 zero 0 1 0 1\n").unwrap();
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
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("line 3, field 2"), "{stderr}");
    assert!(!output.exists());
}

#[test]
fn test_tolerance_failure_still_writes() {
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
            "--max-difference", "1e-9",
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("exceeds the tolerance"), "{stderr}");
    assert!(output.exists());
}

#[test]
fn test_nan_coordinate_fails() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let Files {
        grid_real,
        grid_imag,
        kernel_real,
        kernel_imag,
        vis,
    } = write_test_files(tmp_dir.path());
    std::fs::write(&vis, "2\n0 0 0 1 0 1\n0.5 nan 0 1 0 1\n").unwrap();
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
            "--no-progress-bars",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("line 3, field 2"), "{stderr}");
    assert!(stderr.contains("isn't a finite coordinate"), "{stderr}");
    assert!(!output.exists());
}
