//! End-to-end runs over real files: load, align, save.

use std::fs;
use std::path::Path;
use std::process::Command;

use approx::assert_relative_eq;
use nalgebra::Vector3;
use tempfile::TempDir;

use xyzalign::{
    output_path, read_xyz, run, select, write_xyz_file, AlignError, Directives, Selection,
};

const BENZENE_FRAGMENT: &str = "4
fragment, angstrom
C     1.58890000   -1.44870000   -0.47000000
C     0.23110000   -1.14270000   -0.46190000
H     2.27480000   -0.82780000    0.11070000
O    -0.26750000    0.09310000    0.87330000
";

fn write_input(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn xyzalign_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_xyzalign"))
}

#[test]
fn test_identity_round_trip_is_exact() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let mut xyz = read_xyz(&input).unwrap();
    run(&mut xyz.points, &Directives::identity()).unwrap();
    let out = output_path(&input);
    write_xyz_file(&out, &xyz).unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), BENZENE_FRAGMENT);
    assert_eq!(read_xyz(&out).unwrap(), read_xyz(&input).unwrap());
}

#[test]
fn test_align_from_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let mut xyz = read_xyz(&input).unwrap();
    let d = Directives {
        origin: Some(Selection::Explicit(vec![1])),
        x: Some(Selection::Explicit(vec![2])),
        ..Directives::default()
    };
    let report = run(&mut xyz.points, &d).unwrap();
    assert_relative_eq!(
        report.origin().unwrap(),
        Vector3::new(1.5889, -1.4487, -0.47),
        epsilon = 1e-12
    );

    let out = output_path(&input);
    write_xyz_file(&out, &xyz).unwrap();
    let saved = read_xyz(&out).unwrap();

    assert_eq!(saved.header, "4\nfragment, angstrom");
    let origin = saved.points.get(1).unwrap().position;
    assert_relative_eq!(origin, Vector3::zeros(), epsilon = 1e-8);
    let x = select(&saved.points, &Selection::Explicit(vec![2])).unwrap().centroid;
    assert!(x.x > 0.0);
    assert_relative_eq!(x.y, 0.0, epsilon = 1e-8);
    assert_relative_eq!(x.z, 0.0, epsilon = 1e-8);
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = read_xyz(&dir.path().join("absent.xyz")).unwrap_err();
    assert!(matches!(err, AlignError::InputNotFound { .. }));
    assert!(err.to_string().contains("absent.xyz"));
}

#[test]
fn test_unwritable_output() {
    let dir = TempDir::new().unwrap();
    let xyz = read_xyz(&write_input(&dir, "frag.xyz", BENZENE_FRAGMENT)).unwrap();
    let err = write_xyz_file(&dir.path().join("no/such/dir/out.xyz"), &xyz).unwrap_err();
    assert!(matches!(err, AlignError::OutputWrite { .. }));
}

#[test]
fn test_cli_writes_sibling_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let status = xyzalign_bin()
        .arg(&input)
        .args(["-x", "1", "-y", "3"])
        .status()
        .unwrap();
    assert!(status.success());

    let saved = read_xyz(&dir.path().join("frag-mod.xyz")).unwrap();
    assert_eq!(saved.points.len(), 4);
    let centroid = select(&saved.points, &Selection::AllPoints).unwrap().centroid;
    assert_relative_eq!(centroid, Vector3::zeros(), epsilon = 1e-7);
    let x = saved.points.get(1).unwrap().position;
    assert_relative_eq!(x.y, 0.0, epsilon = 1e-7);
    assert_relative_eq!(x.z, 0.0, epsilon = 1e-7);
}

#[test]
fn test_cli_stdout_writes_no_file() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let output = xyzalign_bin()
        .arg(&input)
        .args(["--keep-origin", "-t", "1", "0", "0", "-s"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("4\nfragment, angstrom\nC     2.58890000"));
    assert!(!dir.path().join("frag-mod.xyz").exists());
}

#[test]
fn test_cli_missing_atom_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let output = xyzalign_bin()
        .arg(&input)
        .args(["-x", "99"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("atom 99"));
    assert!(!dir.path().join("frag-mod.xyz").exists());
}

#[test]
fn test_cli_missing_input_fails() {
    let output = xyzalign_bin()
        .arg(Path::new("/nonexistent/none.xyz"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_cli_report() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);
    let report_path = dir.path().join("report.json");

    let status = xyzalign_bin()
        .arg(&input)
        .args(["-x", "2", "-r", "0", "90", "0", "--report"])
        .arg(&report_path)
        .status()
        .unwrap();
    assert!(status.success());

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    let stages: Vec<&str> = value["stages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["stage"].as_str().unwrap())
        .collect();
    assert_eq!(stages, ["center", "align_x", "realign_x", "rotate"]);
}

#[test]
fn test_cli_report_not_written_when_output_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);
    // A directory in place of the output file makes the save fail.
    fs::create_dir(dir.path().join("frag-mod.xyz")).unwrap();
    let report_path = dir.path().join("report.json");

    let output = xyzalign_bin()
        .arg(&input)
        .args(["-x", "1", "--report"])
        .arg(&report_path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(!report_path.exists());
}

#[test]
fn test_cli_verbose_logs_stages() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "frag.xyz", BENZENE_FRAGMENT);

    let output = xyzalign_bin()
        .arg(&input)
        .args(["-x", "1", "-v"])
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stage origin done"));
    assert!(stderr.contains("stage x done"));
}
