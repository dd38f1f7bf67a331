// SPDX-License-Identifier: Apache-2.0

use std::process::{Command, Output};

fn adder_tree(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_adder-tree"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_default_tree() {
    let output = adder_tree(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("module ripple_adder_tree (\n"));
    assert_eq!(stdout.matches(" ripple_add #(").count(), 63);
    assert!(stdout.contains("  output logic signed [13:0] sum\n"));
    assert_eq!(
        stdout,
        adder_tree::generate(8, 64, "ripple_add", "summands", "sum").unwrap()
    );
}

#[test]
fn test_flags() {
    let output = adder_tree(&[
        "--width",
        "4",
        "--rows",
        "2",
        "--dialect",
        "verilog",
        "--output-name",
        "total",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("  input wire signed [7:0] summands,\n"));
    assert!(stdout.contains("  assign total = layer1out;\n"));
}

#[test]
fn test_invalid_rows_produce_no_output() {
    let output = adder_tree(&["--rows", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("row count must be a positive power of two, got 3"));
}

#[test]
fn test_config_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tree.toml");
    std::fs::write(
        &config_path,
        "word_width = 16\nrows = 4\nmodule_name = \"acc_tree\"\nadder_usage = \"emit_stub\"\n",
    )
    .unwrap();
    let out_path = dir.path().join("acc_tree.sv");

    let output = adder_tree(&[
        "--config",
        config_path.to_str().unwrap(),
        "--rows",
        "8",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let text = std::fs::read_to_string(&out_path).unwrap();
    assert!(text.starts_with("module ripple_add #(\n  parameter int WIDTH = 16\n"));
    assert!(text.contains("module acc_tree (\n"));
    assert!(text.contains("  // WORDLEN=16 NROWS=8\n"));
    assert!(text.contains("  output logic signed [18:0] sum\n"));
}

#[test]
fn test_invalid_config_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("tree.toml");
    std::fs::write(&config_path, "word_width = 0\n").unwrap();
    let out_path = dir.path().join("out.sv");

    let output = adder_tree(&[
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out_path.exists());
}
