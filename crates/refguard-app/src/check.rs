//! The `check` use case: load rules and declared references, evaluate policy, produce a report.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use refguard_domain::model::ReferenceEdge;
use refguard_domain::policy::EffectiveConfig;
use refguard_domain::rules::RuleDocument;
use refguard_domain::{compute_verdict, evaluate, EvaluationInput};
use refguard_repo::RulesError;
use refguard_settings::{Overrides, RefguardConfigV1, ResolvedConfig};
use refguard_types::{ids, Finding, Location, RefguardData, RefguardReport, VerdictStatus};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{debug, info, info_span, warn};

use crate::report::{build_report, disabled_report};

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Identifier of the compilation unit under analysis.
    pub unit: &'a str,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: RefguardReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Input for the batch use case: one rules document, many declared-reference files.
#[derive(Clone, Debug)]
pub struct CheckBatchInput<'a> {
    pub config_text: &'a str,
    pub overrides: Overrides,
    pub references_files: Vec<Utf8PathBuf>,
}

/// One unit's outcome in a batch. A failed item does not stop the others.
#[derive(Debug)]
pub struct BatchItem {
    pub references_file: Utf8PathBuf,
    pub unit: String,
    pub result: anyhow::Result<RefguardReport>,
}

/// The rules document as seen by the app. Only `Loaded` reaches the engine.
#[derive(Clone, Debug)]
enum RulesInput {
    NotProvided { path: String },
    Invalid { path: String, reason: String },
    Loaded { path: String, document: RuleDocument },
}

/// Run the check use case: resolve config, load inputs, evaluate, produce report.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();
    let _span = info_span!("check", unit = input.unit).entered();

    let resolved = resolve(input.config_text, input.overrides)?;
    if !resolved.enabled {
        info!("refguard disabled by configuration; skipping");
        return Ok(CheckOutput {
            report: disabled_report(input.unit, &resolved.effective.profile),
            resolved_config: resolved,
        });
    }

    let rules = load_rules_input(resolved.rules_file.as_deref())?;

    // Declared references are only needed once there is a rule document to apply.
    let edges = match &rules {
        RulesInput::Loaded { .. } => {
            let path = references_path(&resolved)?;
            load_references(path)?
        }
        RulesInput::NotProvided { .. } | RulesInput::Invalid { .. } => Vec::new(),
    };

    let report = evaluate_unit(
        started_at,
        input.unit,
        &rules,
        &edges,
        resolved.references_file.as_deref(),
        &resolved.effective,
    );

    Ok(CheckOutput {
        report,
        resolved_config: resolved,
    })
}

/// Evaluate many units against one rules document, in parallel. Items keep input order.
pub fn run_check_batch(input: CheckBatchInput<'_>) -> anyhow::Result<Vec<BatchItem>> {
    let resolved = resolve(input.config_text, input.overrides)?;

    if !resolved.enabled {
        info!("refguard disabled by configuration; skipping batch");
        return Ok(input
            .references_files
            .into_iter()
            .map(|references_file| {
                let unit = unit_for_references(&references_file, &[]);
                let report = disabled_report(&unit, &resolved.effective.profile);
                BatchItem {
                    references_file,
                    unit,
                    result: Ok(report),
                }
            })
            .collect());
    }

    let rules = load_rules_input(resolved.rules_file.as_deref())?;
    let cfg = &resolved.effective;

    let items = input
        .references_files
        .into_par_iter()
        .map(|references_file| {
            let started_at = OffsetDateTime::now_utc();
            let _span = info_span!("check_batch_item", file = %references_file).entered();

            // Same short-circuit as the single-unit check: an unusable rule document is
            // reported without touching the references.
            let loaded = match &rules {
                RulesInput::Loaded { .. } => load_references(&references_file),
                RulesInput::NotProvided { .. } | RulesInput::Invalid { .. } => Ok(Vec::new()),
            };

            match loaded {
                Ok(edges) => {
                    let unit = unit_for_references(&references_file, &edges);
                    let report = evaluate_unit(
                        started_at,
                        &unit,
                        &rules,
                        &edges,
                        Some(references_file.as_str()),
                        cfg,
                    );
                    BatchItem {
                        references_file,
                        unit,
                        result: Ok(report),
                    }
                }
                Err(err) => {
                    warn!(error = %format!("{err:#}"), "batch item failed");
                    BatchItem {
                        unit: unit_for_references(&references_file, &[]),
                        references_file,
                        result: Err(err),
                    }
                }
            }
        })
        .collect();

    Ok(items)
}

/// The unit a declared-reference file belongs to: the source of its first edge, or the file
/// stem when the file declares nothing.
pub fn unit_for_references(path: &Utf8Path, edges: &[ReferenceEdge]) -> String {
    match edges.first() {
        Some(edge) => edge.source.clone(),
        None => path.file_stem().unwrap_or(path.as_str()).to_string(),
    }
}

/// Map verdict to exit code: 0 = pass/warn/skip, 2 = fail.
pub fn verdict_exit_code(status: VerdictStatus) -> i32 {
    match status {
        VerdictStatus::Pass | VerdictStatus::Warn | VerdictStatus::Skip => 0,
        VerdictStatus::Fail => 2,
    }
}

fn resolve(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty config is allowed; defaults apply.
    let cfg = if config_text.trim().is_empty() {
        RefguardConfigV1::default()
    } else {
        refguard_settings::parse_config_toml(config_text).context("parse config")?
    };

    let resolved = refguard_settings::resolve_config(cfg, overrides).context("resolve config")?;
    debug!(
        profile = %resolved.effective.profile,
        rules_file = ?resolved.rules_file,
        references_file = ?resolved.references_file,
        "resolved config"
    );
    Ok(resolved)
}

fn load_rules_input(rules_file: Option<&str>) -> anyhow::Result<RulesInput> {
    let Some(path) = rules_file else {
        warn!("no dependency rules file configured");
        return Ok(RulesInput::NotProvided {
            path: String::new(),
        });
    };

    match refguard_repo::load_rules(Utf8Path::new(path)) {
        Ok(document) => {
            debug!(
                path,
                project_rules = document.project_dependencies.len(),
                package_rules = document.package_dependencies.len(),
                "loaded dependency rules"
            );
            Ok(RulesInput::Loaded {
                path: path.to_string(),
                document,
            })
        }
        Err(RulesError::NotProvided { .. }) => {
            warn!(path, "dependency rules file not found");
            Ok(RulesInput::NotProvided {
                path: path.to_string(),
            })
        }
        Err(RulesError::InvalidFormat { reason, .. }) => {
            warn!(path, %reason, "dependency rules file is invalid");
            Ok(RulesInput::Invalid {
                path: path.to_string(),
                reason,
            })
        }
        Err(err @ RulesError::Read { .. }) => Err(err).context("load dependency rules"),
    }
}

fn references_path(resolved: &ResolvedConfig) -> anyhow::Result<&Utf8Path> {
    resolved
        .references_file
        .as_deref()
        .map(Utf8Path::new)
        .context("no declared-reference file: pass --references or set references_file")
}

fn load_references(path: &Utf8Path) -> anyhow::Result<Vec<ReferenceEdge>> {
    let edges = refguard_repo::load_declared_references(path)
        .with_context(|| format!("load declared references from {path}"))?;
    debug!(%path, edges = edges.len(), "loaded declared references");
    Ok(edges)
}

fn evaluate_unit(
    started_at: OffsetDateTime,
    unit: &str,
    rules: &RulesInput,
    edges: &[ReferenceEdge],
    references_file: Option<&str>,
    cfg: &EffectiveConfig,
) -> RefguardReport {
    let (rules_path, document) = match rules {
        RulesInput::Loaded { path, document } => (path, document),
        RulesInput::NotProvided { path } => {
            let message = format!(
                "Provide DependencyRulesFile property to specify valid dependency rules file. Current path: {path}."
            );
            return rules_report(
                started_at,
                unit,
                cfg,
                RulesProblem {
                    check_id: ids::CHECK_RULES_PROVIDED,
                    code: ids::CODE_RULES_NOT_PROVIDED,
                    reason: ids::REASON_RULES_NOT_PROVIDED,
                    path,
                    message,
                    data: json!({ "path": path }),
                },
            );
        }
        RulesInput::Invalid { path, reason } => {
            let message =
                format!("Make sure the dependency rules file '{path}' is in the correct json format");
            return rules_report(
                started_at,
                unit,
                cfg,
                RulesProblem {
                    check_id: ids::CHECK_RULES_FORMAT,
                    code: ids::CODE_INVALID_RULES_FORMAT,
                    reason: ids::REASON_INVALID_RULES,
                    path,
                    message,
                    data: json!({ "path": path, "error": reason }),
                },
            );
        }
    };

    let domain_report = evaluate(
        &EvaluationInput {
            unit,
            edges,
            rules: document,
            rules_path: Some(rules_path.as_str()),
        },
        cfg,
    );

    let mut data = domain_report.data;
    data.references_file = references_file.map(str::to_string);

    let mut reasons = Vec::new();
    if data.truncated_reason.is_some() {
        reasons.push(ids::REASON_TRUNCATED.to_string());
    }

    info!(
        verdict = ?domain_report.verdict,
        violations = domain_report.analysis.violations.len(),
        stale_exceptions = domain_report.analysis.stale_exceptions.len(),
        "check complete"
    );

    build_report(
        started_at,
        domain_report.verdict.into(),
        reasons,
        domain_report.findings,
        data,
    )
}

struct RulesProblem<'a> {
    check_id: &'static str,
    code: &'static str,
    reason: &'static str,
    path: &'a str,
    message: String,
    data: serde_json::Value,
}

/// Report for a run that never reached the engine because the rules document was unusable.
fn rules_report(
    started_at: OffsetDateTime,
    unit: &str,
    cfg: &EffectiveConfig,
    problem: RulesProblem<'_>,
) -> RefguardReport {
    let mut findings = Vec::new();
    if let Some(policy) = cfg.check_policy(problem.check_id) {
        findings.push(Finding {
            severity: policy.severity,
            check_id: problem.check_id.to_string(),
            code: problem.code.to_string(),
            diagnostic_id: ids::diagnostic_id_for_code(problem.code).map(str::to_string),
            message: problem.message,
            location: (!problem.path.is_empty()).then(|| Location {
                path: problem.path.to_string(),
                line: None,
                col: None,
            }),
            help: Some(format!("Run `refguard explain {}` for details.", problem.code)),
            fingerprint: None,
            data: problem.data,
        });
    }

    let verdict = compute_verdict(&findings, cfg.fail_on);
    let data = RefguardData {
        unit: unit.to_string(),
        profile: cfg.profile.clone(),
        rules_file: (!problem.path.is_empty()).then(|| problem.path.to_string()),
        findings_total: findings.len() as u32,
        findings_emitted: findings.len() as u32,
        ..RefguardData::default()
    };

    build_report(
        started_at,
        verdict.into(),
        vec![problem.reason.to_string()],
        findings,
        data,
    )
}
