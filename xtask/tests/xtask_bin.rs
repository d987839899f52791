use std::process::Command;

#[test]
fn xtask_help_runs() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("help")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("xtask commands"));
    assert!(stderr.contains("conform"));
}

#[test]
fn xtask_explain_coverage_passes() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("explain-coverage")
        .output()
        .expect("run xtask");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn xtask_print_schema_ids_lists_report_and_config() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("print-schema-ids")
        .output()
        .expect("run xtask");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("refguard.report.v1"));
    assert!(stdout.contains("refguard.config.v1"));
}

#[test]
fn xtask_unknown_command_fails() {
    let exe = env!("CARGO_BIN_EXE_xtask");
    let output = Command::new(exe)
        .arg("frobnicate")
        .output()
        .expect("run xtask");

    assert!(!output.status.success());
}
