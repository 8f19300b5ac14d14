//! Exit-code and validation behavior of the two binaries.  Every case
//! here fails (or, for the exporter, succeeds) before any window is
//! created, so the suite runs on a headless machine.

extern crate assert_cmd;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn mandelview() -> Command {
    Command::cargo_bin("mandelview").unwrap()
}

#[test]
fn no_arguments_prints_usage_and_exits_one() {
    mandelview()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn wrong_argument_counts_print_usage() {
    mandelview()
        .args(&["100", "100", "10"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    mandelview()
        .args(&["100", "100", "10", "0", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
    mandelview()
        .args(&["100", "100", "10", "0", "5", "4", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn oversized_width_is_rejected() {
    mandelview()
        .args(&["2000", "100", "10", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("width"));
}

#[test]
fn oversized_height_is_rejected() {
    mandelview()
        .args(&["100", "800", "10", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("height"));
}

#[test]
fn iteration_bounds_are_enforced() {
    mandelview()
        .args(&["100", "100", "1001", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("iterations"));
    // Zero iterations is the degenerate case that would divide by zero
    // in the color table; it must die as a plain configuration error.
    mandelview()
        .args(&["100", "100", "0", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("iterations"));
}

#[test]
fn unknown_color_mode_is_rejected() {
    mandelview()
        .args(&["100", "100", "10", "2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("color mode"));
}

#[test]
fn band_width_bounds_are_enforced() {
    mandelview()
        .args(&["100", "100", "10", "0", "0", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("band width"));
    mandelview()
        .args(&["100", "100", "10", "0", "101", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("band width"));
}

#[test]
fn worker_count_bounds_are_enforced() {
    mandelview()
        .args(&["100", "100", "10", "0", "5", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("worker count"));
    mandelview()
        .args(&["100", "100", "10", "0", "5", "101"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("worker count"));
}

#[test]
fn malformed_numbers_are_rejected() {
    mandelview()
        .args(&["abc", "100", "10", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not parse width"));
    mandelview()
        .args(&["100", "100", "10", "0", "5", "many"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("could not parse worker count"));
}

#[test]
fn snapshot_exports_a_png_headlessly() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mini.png");
    Command::cargo_bin("snapshot")
        .unwrap()
        .args(&[
            "-o",
            out.to_str().unwrap(),
            "-w",
            "64",
            "-H",
            "48",
            "-i",
            "20",
            "-t",
            "2",
            "-b",
            "8",
        ])
        .assert()
        .success();
    let written = std::fs::metadata(&out).unwrap();
    assert!(written.len() > 0);
}

#[test]
fn snapshot_rejects_out_of_range_arguments() {
    Command::cargo_bin("snapshot")
        .unwrap()
        .args(&["-o", "x.png", "-w", "2000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("width"));
}
