// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;
use indoc::indoc;
use tempfile::TempDir;

use super::*;
use crate::{constants::VEL_C, io::read::read_visibilities};

#[test]
fn test_write_format() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("out.csv");
    // At a frequency equal to c, metres and wavelengths are the same.
    let uvws = [
        UVW {
            u: -1.5,
            v: 2.0,
            w: 0.0,
        },
        UVW {
            u: 0.25,
            v: -3.0,
            w: 0.0,
        },
    ];
    let vis = [c64::new(1.0, -2.0), c64::new(0.125, 0.0)];
    let weights = [1.0, 0.5];

    write_visibilities(&file, &uvws, &vis, &weights, VEL_C, true).unwrap();
    let contents = std::fs::read_to_string(&file).unwrap();
    assert_eq!(
        contents,
        indoc! {"
            2
            1.500000 2.000000 0.000000 1.000000 -2.000000 1.000000
            -0.250000 -3.000000 0.000000 0.125000 0.000000 0.500000
        "}
    );
}

#[test]
fn test_right_ascension_round_trip_through_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(
        &input,
        indoc! {"
            2
            12.5 -4.25 7.0 1.0 2.0 1.0
            -8.0 16.0 0.0 3.0 4.0 0.5
        "},
    )
    .unwrap();
    let freq = 180e6;

    let read = read_visibilities(&input, freq, true, None).unwrap();
    // u was flipped on the way in.
    assert!(read.uvws[0].u < 0.0);
    assert!(read.uvws[1].u > 0.0);

    let output = dir.path().join("out.txt");
    write_visibilities(&output, &read.uvws, &read.vis, &read.weights, freq, true).unwrap();

    // Reading the output without any sign flip recovers the original u.
    let back = read_visibilities(&output, VEL_C, false, None).unwrap();
    assert_abs_diff_eq!(back.uvws[0].u, 12.5, epsilon = 1e-6);
    assert_abs_diff_eq!(back.uvws[0].v, -4.25, epsilon = 1e-6);
    assert_abs_diff_eq!(back.uvws[1].u, -8.0, epsilon = 1e-6);
    assert_abs_diff_eq!(back.uvws[1].v, 16.0, epsilon = 1e-6);
    assert_eq!(back.weights, vec![1.0, 0.5]);
}

#[test]
fn test_mismatched_lengths() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("out.csv");
    let result = write_visibilities(
        &file,
        &[UVW::default()],
        &[],
        &[1.0],
        VEL_C,
        false,
    );
    assert!(matches!(result, Err(WriteError::LengthMismatch { .. })));
    assert!(!file.exists());
}

#[test]
fn test_can_write_to_file() {
    let dir = TempDir::new().unwrap();

    // A new file in a new directory; the directory is made, the file isn't.
    let file = dir.path().join("new_dir").join("out.txt");
    assert!(can_write_to_file(&file).is_ok());
    assert!(file.parent().unwrap().is_dir());
    assert!(!file.exists());

    // An existing file is left alone.
    std::fs::write(&file, "keep me").unwrap();
    assert!(can_write_to_file(&file).is_ok());
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "keep me");

    // Directories aren't files.
    assert!(can_write_to_file(dir.path()).is_err());
}
