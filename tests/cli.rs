//! The command line tools, run as separate processes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn sample(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data/examples")
        .join(name)
}

fn run(binary: &str, args: &[&std::ffi::OsStr]) -> Output {
    Command::new(binary)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run {}: {}", binary, e))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_print_sedml_summary() {
    let path = sample("oscillator_l1v1.sedml");
    let output = run(env!("CARGO_BIN_EXE_print_sedml"), &[path.as_os_str()]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("The document has 1 simulation(s).\n"), "{}", text);
    assert!(text.contains(
        "\tTimecourse id=sim1 start=0 end=200 numPoints=1000 kisao=KISAO:0000019\n"
    ));
    assert!(text.contains("The document has 2 datagenerators(s).\n"));
    assert!(text.contains("\tDG id=P_tot math=scale * (P0 + P1)\n"));
}

#[test]
fn test_print_sedml_usage() {
    let output = run(env!("CARGO_BIN_EXE_print_sedml"), &[]);
    assert_eq!(output.status.code(), Some(2));

    let a = sample("oscillator_l1v1.sedml");
    let b = sample("fitting_l1v4.sedml");
    let output = run(env!("CARGO_BIN_EXE_print_sedml"), &[a.as_os_str(), b.as_os_str()]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_print_sedml_unreadable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sedml");
    let output = run(env!("CARGO_BIN_EXE_print_sedml"), &[path.as_os_str()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("missing.sedml"));
}

#[test]
fn test_echo_sedml_copies_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = sample("parameter_scan_l1v3.sedml");
    let copy = dir.path().join("copy.sedml");
    let output = run(
        env!("CARGO_BIN_EXE_echo_sedml"),
        &[input.as_os_str(), copy.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(sedml::read_sedml(&copy), sedml::read_sedml(&input));
}

#[test]
fn test_echo_sedml_refuses_broken_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.sedml");
    let copy = dir.path().join("copy.sedml");
    fs::write(&input, "<sedML xmlns=\"http://sed-ml.org/\" level=\"1\" version=\"1\">").unwrap();
    let output = run(
        env!("CARGO_BIN_EXE_echo_sedml"),
        &[input.as_os_str(), copy.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(!copy.exists());
}

#[test]
fn test_validate_sedml_counts_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dangling.sedml");
    fs::write(
        &path,
        r#"<sedML xmlns="http://sed-ml.org/sed-ml/level1/version3" level="1" version="3">
  <listOfTasks>
    <task id="t1" modelReference="nowhere" simulationReference="never"/>
  </listOfTasks>
</sedML>"#,
    )
    .unwrap();

    let output = run(env!("CARGO_BIN_EXE_validate_sedml"), &[dir.path().as_os_str()]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("has 0 warning(s) and 2 error(s)"), "{}", text);
    assert!(text.contains("Error L0 C0: "), "{}", text);
}

#[test]
fn test_validate_sedml_samples_pass() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/examples");
    let output = run(env!("CARGO_BIN_EXE_validate_sedml"), &[dir.as_os_str()]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    assert_eq!(stdout(&output).matches("has 0 warning(s) and 0 error(s)").count(), 3);
}
