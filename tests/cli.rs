use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;

fn binary_case(rust_end: u64, cpp_end: u64) -> Value {
    json!({
        "operation": "join",
        "input_a": {"start": 0, "end": 5, "is_bottom": false},
        "input_b": {"start": 3, "end": 8, "is_bottom": false},
        "results": [
            {"method": "Rust_join", "output": {"start": 0, "end": rust_end, "is_bottom": false}, "avg_time_ns": 40.0},
            {"method": "CPP_join", "output": {"start": 0, "end": cpp_end, "is_bottom": false}, "avg_time_ns": 35.5}
        ]
    })
}

fn at_case(rust: bool, cpp: bool) -> Value {
    json!({
        "operation": "at",
        "input_interval": {"start": 0, "end": 10, "is_bottom": false},
        "input_value": 4,
        "results": [
            {"method": "Rust_at", "output": rust},
            {"method": "CPP_at", "output": cpp}
        ]
    })
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("fixture should be written");
}

fn run(temp: &TempDir, document: &str, extra_args: &[&str]) -> (Output, std::path::PathBuf) {
    let input_path = temp.path().join("results.json");
    let report_path = temp.path().join("comparison_results.json");
    write_file(&input_path, document);

    let output = Command::new(env!("CARGO_BIN_EXE_wi-crosscheck"))
        .arg(&input_path)
        .arg("--output")
        .arg(&report_path)
        .args(extra_args)
        .output()
        .expect("binary should run");

    (output, report_path)
}

fn read_report(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("report should be readable"))
        .expect("report JSON should parse")
}

#[test]
fn agreeing_join_passes() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({"binary_operations": [binary_case(8, 8)], "at_operations": []});

    let (output, report_path) = run(&temp, &document.to_string(), &[]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = read_report(&report_path);
    assert_eq!(
        report["summary"]["binary_operations"],
        json!({"total_cases": 1, "differences": 0, "success_rate": 100.0})
    );
    assert_eq!(report["binary_differences"], json!([]));
}

#[test]
fn diverging_join_fails_with_baseline_from_cpp() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({"binary_operations": [binary_case(8, 9)], "at_operations": []});

    let (output, report_path) = run(&temp, &document.to_string(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let report = read_report(&report_path);
    assert_eq!(report["summary"]["binary_operations"]["differences"], json!(1));

    let differences = report["binary_differences"].as_array().expect("array");
    assert_eq!(differences.len(), 1);
    assert_eq!(
        differences[0]["baseline_output"],
        json!({"start": 0, "end": 9, "is_bottom": false})
    );
    assert_eq!(differences[0]["method"], json!("Rust_join"));
    assert_eq!(differences[0]["case_number"], json!(0));
}

#[test]
fn agreeing_at_operation_records_nothing() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({"binary_operations": [], "at_operations": [at_case(true, true)]});

    let (output, report_path) = run(&temp, &document.to_string(), &[]);

    assert!(output.status.success());
    let report = read_report(&report_path);
    assert_eq!(report["summary"]["at_operations"]["total_cases"], json!(1));
    assert_eq!(report["at_differences"], json!([]));
    assert_eq!(
        report["summary"]["binary_operations"]["success_rate"],
        Value::Null
    );
}

#[test]
fn missing_at_section_is_fatal_and_writes_nothing() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({"binary_operations": [binary_case(8, 8)]});

    let (output, report_path) = run(&temp, &document.to_string(), &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!report_path.exists(), "no report should be written");
    assert!(String::from_utf8_lossy(&output.stderr).contains("at_operations"));
}

#[test]
fn invalid_json_is_fatal() {
    let temp = TempDir::new().expect("tempdir should be created");

    let (output, report_path) = run(&temp, "{\"binary_operations\": [", &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!report_path.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid JSON"));
}

#[test]
fn missing_input_file_is_fatal() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("comparison_results.json");

    let output = Command::new(env!("CARGO_BIN_EXE_wi-crosscheck"))
        .arg(temp.path().join("does-not-exist.json"))
        .arg("-o")
        .arg(&report_path)
        .output()
        .expect("binary should run");

    assert_eq!(output.status.code(), Some(1));
    assert!(!report_path.exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Could not read results file"));
}

#[test]
fn one_sided_records_are_not_counted() {
    let temp = TempDir::new().expect("tempdir should be created");
    let mut lonely = binary_case(8, 8);
    lonely["results"] = json!([{"method": "Rust_join", "output": 1}]);
    let document = json!({
        "binary_operations": [lonely, binary_case(8, 8)],
        "at_operations": []
    });

    let (output, report_path) = run(&temp, &document.to_string(), &[]);

    assert!(output.status.success());
    let report = read_report(&report_path);
    assert_eq!(report["summary"]["binary_operations"]["total_cases"], json!(1));
}

#[test]
fn verbose_prints_divergence_details() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({
        "binary_operations": [binary_case(8, 9)],
        "at_operations": [at_case(true, false)]
    });

    let (output, _) = run(&temp, &document.to_string(), &["--verbose"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Binary Operation Differences"));
    assert!(stdout.contains("At Operation Differences"));
    assert!(stdout.contains("Case 0: "));
}

#[test]
fn repeated_runs_write_identical_reports() {
    let temp = TempDir::new().expect("tempdir should be created");
    let document = json!({
        "binary_operations": [binary_case(8, 9), binary_case(8, 8)],
        "at_operations": [at_case(false, true)]
    })
    .to_string();

    let (_, report_path) = run(&temp, &document, &[]);
    let first = fs::read_to_string(&report_path).expect("first report");
    let (_, report_path) = run(&temp, &document, &[]);
    let second = fs::read_to_string(&report_path).expect("second report");

    assert_eq!(first, second);
}

#[test]
fn config_file_renames_implementations() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("crosscheck.yaml");
    write_file(
        &config_path,
        r"
implementations:
  a: { name: Ebpf, prefix: Ebpf_ }
baseline: a
",
    );

    let mut case = binary_case(8, 9);
    case["results"][0]["method"] = json!("Ebpf_join");
    let document = json!({"binary_operations": [case], "at_operations": []});

    let config_arg = config_path.to_string_lossy().into_owned();
    let (output, report_path) = run(&temp, &document.to_string(), &["--config", &config_arg]);

    assert_eq!(output.status.code(), Some(1));
    let report = read_report(&report_path);
    let difference = &report["binary_differences"][0];
    assert_eq!(difference["method"], json!("CPP_join"));
    assert_eq!(
        difference["baseline_output"],
        json!({"start": 0, "end": 8, "is_bottom": false})
    );
}
