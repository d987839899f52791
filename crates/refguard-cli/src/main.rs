//! CLI entry point for refguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup and
//! exit codes. All business logic lives in the `refguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use refguard_app::{
    format_explanation, format_not_found, parse_report_json, render_annotations, render_markdown,
    run_check, run_check_batch, run_explain, runtime_error_report, serialize_report,
    verdict_exit_code, CheckBatchInput, CheckInput, ExplainOutput,
};
use refguard_settings::Overrides;
use refguard_types::RefguardReport;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "refguard",
    version,
    about = "Project and package reference policy guard with tech-debt auditing"
)]
struct Cli {
    /// Path to refguard config TOML (a missing file means defaults).
    #[arg(long, default_value = "refguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (warn|strict|lenient).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one unit's declared references and write artifacts.
    Check {
        /// Identifier of the unit under analysis (e.g. its project file path).
        #[arg(long)]
        unit: String,

        /// Path to the dependency rules document (JSON, comments allowed).
        #[arg(long)]
        rules: Option<Utf8PathBuf>,

        /// Path to the declared-reference file (one tab-separated edge per line).
        #[arg(long)]
        references: Option<Utf8PathBuf>,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/refguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/refguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Skip analysis entirely and emit a `skip` report.
        #[arg(long)]
        disable: bool,
    },

    /// Evaluate many declared-reference files against one rules document.
    CheckBatch {
        /// Path to the dependency rules document.
        #[arg(long)]
        rules: Option<Utf8PathBuf>,

        /// Declared-reference files; the unit of each is the source of its first edge.
        #[arg(long, num_args = 1.., required = true)]
        references: Vec<Utf8PathBuf>,

        /// Directory receiving one `<file stem>.json` report per input file.
        #[arg(long, default_value = "artifacts/refguard/batch")]
        report_dir: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/refguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/refguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id, code or RPxxxx diagnostic id with remediation guidance.
    Explain {
        /// e.g. "refs.tech_debt", "stale_tech_debt_exception" or "RP0006".
        identifier: String,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Check {
            unit,
            rules,
            references,
            report_out,
            write_markdown,
            markdown_out,
            disable,
        } => cmd_check(
            &cli,
            CheckArgs {
                unit,
                rules: rules.as_deref(),
                references: references.as_deref(),
                report_out,
                markdown_out: write_markdown.then_some(markdown_out.as_path()),
                disable: *disable,
            },
        ),
        Commands::CheckBatch {
            rules,
            references,
            report_dir,
        } => cmd_check_batch(&cli, rules.as_deref(), references, report_dir),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
    }
}

/// Logs go to stderr so stdout stays clean for `md`, `annotations` and `explain`.
/// `REFGUARD_LOG` wins over `RUST_LOG`; with neither set the level is `warn`.
fn init_logging() -> anyhow::Result<()> {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    let filter = match std::env::var("REFGUARD_LOG") {
        Ok(directives) => builder.parse(directives).context("parse REFGUARD_LOG")?,
        Err(_) => builder.from_env_lossy(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

struct CheckArgs<'a> {
    unit: &'a str,
    rules: Option<&'a Utf8Path>,
    references: Option<&'a Utf8Path>,
    report_out: &'a Utf8Path,
    markdown_out: Option<&'a Utf8Path>,
    disable: bool,
}

fn overrides(cli: &Cli, rules: Option<&Utf8Path>, references: Option<&Utf8Path>) -> Overrides {
    Overrides {
        profile: cli.profile.clone(),
        max_findings: cli.max_findings,
        rules_file: rules.map(|p| p.to_string()),
        references_file: references.map(|p| p.to_string()),
        enabled: None,
    }
}

fn read_config(path: &Utf8Path) -> String {
    // Missing file is allowed (defaults apply).
    std::fs::read_to_string(path).unwrap_or_default()
}

fn cmd_check(cli: &Cli, args: CheckArgs<'_>) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let cfg_text = read_config(&cli.config);
        let mut overrides = overrides(cli, args.rules, args.references);
        if args.disable {
            overrides.enabled = Some(false);
        }

        let output = run_check(CheckInput {
            unit: args.unit,
            config_text: &cfg_text,
            overrides,
        })?;

        write_report_file(args.report_out, &output.report).context("write report json")?;
        if let Some(markdown_out) = args.markdown_out {
            write_text_file(markdown_out, &render_markdown(&output.report))
                .context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict.status))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(args.unit, &format!("{err:#}"));
            let _ = write_report_file(args.report_out, &report);
            eprintln!("refguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_check_batch(
    cli: &Cli,
    rules: Option<&Utf8Path>,
    references: &[Utf8PathBuf],
    report_dir: &Utf8Path,
) -> anyhow::Result<()> {
    let cfg_text = read_config(&cli.config);
    let items = match run_check_batch(CheckBatchInput {
        config_text: &cfg_text,
        overrides: overrides(cli, rules, None),
        references_files: references.to_vec(),
    }) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("refguard error: {err:#}");
            std::process::exit(1);
        }
    };

    let mut exit_code = 0;
    let mut runtime_errors = 0;
    for item in items {
        let stem = item
            .references_file
            .file_stem()
            .unwrap_or(item.references_file.as_str());
        let report_path = report_dir.join(format!("{stem}.json"));

        let report = match item.result {
            Ok(report) => {
                exit_code = exit_code.max(verdict_exit_code(report.verdict.status));
                report
            }
            Err(err) => {
                eprintln!("refguard error: {}: {err:#}", item.references_file);
                runtime_errors += 1;
                runtime_error_report(&item.unit, &format!("{err:#}"))
            }
        };

        write_report_file(&report_path, &report).context("write batch report")?;
        println!(
            "{}\t{}\t{}",
            item.unit,
            status_label(&report),
            report_path
        );
    }

    // Runtime errors outrank policy failures.
    if runtime_errors > 0 {
        std::process::exit(1);
    }
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn status_label(report: &RefguardReport) -> &'static str {
    match report.verdict.status {
        refguard_types::VerdictStatus::Pass => "pass",
        refguard_types::VerdictStatus::Warn => "warn",
        refguard_types::VerdictStatus::Fail => "fail",
        refguard_types::VerdictStatus::Skip => "skip",
    }
}

fn write_report_file(path: &Utf8Path, report: &RefguardReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<RefguardReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&report);

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&report, max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}
