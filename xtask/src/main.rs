//! Developer tasks (schema generation, fixture conformance, explain coverage).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use refguard_test_util::{normalize_nondeterministic, normalize_path_prefix};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> anyhow::Result<PathBuf> {
    let manifest_dir = match std::env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => std::env::current_dir().context("Cannot determine current directory")?,
    };

    // If we're in the xtask directory, go up one level
    if manifest_dir.ends_with("xtask")
        && let Some(parent) = manifest_dir.parent()
    {
        return Ok(parent.to_path_buf());
    }
    Ok(manifest_dir)
}

fn schemas_dir() -> anyhow::Result<PathBuf> {
    Ok(project_root()?.join("schemas"))
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(refguard_types::RefguardReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(refguard_settings::RefguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "refguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "refguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Validate that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir()?;
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run the refguard binary on tests/fixtures and validate reports");
    eprintln!("  explain-coverage  Validate all check IDs, codes and diagnostic IDs have explanations");
}

/// Token pattern for verdict reasons.
fn is_valid_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// The unit a fixture is analyzed as: the source of the first declared edge.
fn fixture_unit(references: &Path) -> anyhow::Result<Option<String>> {
    let text = fs::read_to_string(references)
        .with_context(|| format!("Failed to read {}", references.display()))?;
    Ok(text
        .lines()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| line.split('\t').next())
        .map(str::to_string))
}

/// Check one produced report for schema and envelope invariants.
fn check_report(
    fixture_name: &str,
    value: &serde_json::Value,
    validator: &jsonschema::Validator,
    errors: &mut Vec<String>,
) {
    for err in validator.iter_errors(value) {
        errors.push(format!("fixture '{fixture_name}': schema validation: {err}"));
    }

    if let Some(reasons) = value["verdict"]["reasons"].as_array() {
        for (i, reason) in reasons.iter().enumerate() {
            if let Some(s) = reason.as_str()
                && !is_valid_token(s)
            {
                errors.push(format!(
                    "fixture '{fixture_name}': verdict.reasons[{i}] '{s}' is not a valid token"
                ));
            }
        }
    }

    let findings = value["findings"].as_array().map(Vec::as_slice).unwrap_or(&[]);
    let count = |severity: &str| findings.iter().filter(|f| f["severity"] == severity).count();
    let counts = &value["verdict"]["counts"];
    for (key, severity) in [("info", "info"), ("warn", "warning"), ("error", "error")] {
        if counts[key].as_u64() != Some(count(severity) as u64) {
            errors.push(format!(
                "fixture '{fixture_name}': verdict.counts.{key} does not match findings"
            ));
        }
    }

    for (i, finding) in findings.iter().enumerate() {
        if finding["diagnostic_id"].as_str().is_none() {
            errors.push(format!(
                "fixture '{fixture_name}': finding[{i}] has no diagnostic_id"
            ));
        }
    }
}

/// Run the built refguard binary on every rule fixture and validate its reports.
///
/// A fixture is any directory under `tests/fixtures/` holding both `DependencyRules.json`
/// and `references.tsv`. Each fixture is run twice; the normalized reports must be equal.
fn conform() -> anyhow::Result<()> {
    let root = project_root()?;
    let schema = serde_json::to_value(generate_report_schema()).context("serialize schema")?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;

    let refguard_bin = root.join("target").join("debug").join("refguard");
    #[cfg(target_os = "windows")]
    let refguard_bin = refguard_bin.with_extension("exe");

    if !refguard_bin.exists() {
        bail!(
            "refguard binary not found at {}.\nRun `cargo build -p refguard-cli` first.",
            refguard_bin.display()
        );
    }

    let fixtures_dir = root.join("tests").join("fixtures");
    let fixtures_prefix = fixtures_dir.to_string_lossy().into_owned();
    let mut errors = Vec::new();
    let mut fixture_count = 0;

    let mut entries: Vec<PathBuf> = fs::read_dir(&fixtures_dir)
        .context("Failed to read tests/fixtures/")?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.join("DependencyRules.json").exists() && p.join("references.tsv").exists())
        .collect();
    entries.sort();

    for fixture_dir in entries {
        let fixture_name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let references = fixture_dir.join("references.tsv");
        let unit = fixture_unit(&references)?.unwrap_or_else(|| fixture_name.clone());

        let mut runs = Vec::new();
        for _ in 0..2 {
            let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
            let report_out = temp_dir.path().join("report.json");
            let output = std::process::Command::new(&refguard_bin)
                .arg("--config")
                .arg(temp_dir.path().join("refguard.toml"))
                .arg("check")
                .arg("--unit")
                .arg(&unit)
                .arg("--rules")
                .arg(fixture_dir.join("DependencyRules.json"))
                .arg("--references")
                .arg(&references)
                .arg("--report-out")
                .arg(&report_out)
                .output()
                .with_context(|| format!("Failed to run refguard on fixture '{fixture_name}'"))?;

            if output.status.code() == Some(1) {
                errors.push(format!(
                    "fixture '{fixture_name}': refguard hit a runtime error: {}",
                    String::from_utf8_lossy(&output.stderr)
                ));
            }

            let content = fs::read_to_string(&report_out)
                .with_context(|| format!("fixture '{fixture_name}': no report written"))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("fixture '{fixture_name}': report is not JSON"))?;
            runs.push(normalize_path_prefix(
                normalize_nondeterministic(value),
                &fixtures_prefix,
                "__FIXTURES__",
            ));
        }

        check_report(&fixture_name, &runs[0], &validator, &mut errors);
        if runs[0] != runs[1] {
            errors.push(format!(
                "fixture '{fixture_name}': report differs between runs"
            ));
        }

        fixture_count += 1;
        println!("  ✓ {fixture_name} ({unit})");
    }

    if fixture_count == 0 {
        bail!("No rule fixtures found in {}", fixtures_dir.display());
    }

    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance validation failed with {} errors", errors.len());
    }

    println!("\n✓ All {fixture_count} fixtures pass conformance checks!");
    Ok(())
}

fn explanation_problems(kind: &str, id: &str) -> Vec<String> {
    let Some(exp) = refguard_types::explain::lookup_explanation(id) else {
        return vec![format!("{kind} '{id}' has no explanation")];
    };
    let mut problems = Vec::new();
    if exp.title.is_empty() {
        problems.push(format!("{kind} '{id}' has empty title"));
    }
    if exp.description.is_empty() {
        problems.push(format!("{kind} '{id}' has empty description"));
    }
    if exp.remediation.is_empty() {
        problems.push(format!("{kind} '{id}' has empty remediation"));
    }
    problems
}

/// Validate that all check IDs, codes and diagnostic IDs have explanations.
fn explain_coverage() -> anyhow::Result<()> {
    use refguard_types::explain::{all_check_ids, all_codes};
    use refguard_types::ids::diagnostic_id_for_code;

    let check_ids = all_check_ids();
    let codes = all_codes();
    let mut errors = Vec::new();

    for check_id in check_ids {
        errors.extend(explanation_problems("Check ID", check_id));
    }
    for code in codes {
        errors.extend(explanation_problems("Code", code));
        match diagnostic_id_for_code(code) {
            Some(diag) => errors.extend(explanation_problems("Diagnostic ID", diag)),
            None => errors.push(format!("Code '{code}' has no diagnostic ID")),
        }
    }

    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  - {error}");
        }
        bail!(
            "Explain coverage validation failed with {} errors",
            errors.len()
        );
    }

    println!("✓ {} check IDs have explanations", check_ids.len());
    println!("✓ {} codes have explanations and diagnostic IDs", codes.len());
    println!("\n✓ All explain coverage checks passed!");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "explain-coverage" => explain_coverage(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
