use crate::analysis::analyze;
use crate::checks;
use crate::model::ReferenceEdge;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, SeverityCounts};
use crate::rules::RuleDocument;
use refguard_types::{Finding, RefguardData, Severity, Verdict};

/// Everything one evaluation run looks at.
#[derive(Clone, Copy, Debug)]
pub struct EvaluationInput<'a> {
    /// Identifier of the compilation unit under analysis.
    pub unit: &'a str,
    /// The unit's declared references.
    pub edges: &'a [ReferenceEdge],
    pub rules: &'a RuleDocument,
    /// Where the rule document came from; used as the location of rule-document findings.
    pub rules_path: Option<&'a str>,
}

pub fn evaluate(input: &EvaluationInput<'_>, cfg: &EffectiveConfig) -> DomainReport {
    let analysis = analyze(input.unit, input.edges, input.rules);

    let mut findings: Vec<Finding> = Vec::new();
    checks::run_all(&analysis, input, cfg, &mut findings);

    // Deterministic ordering before truncation. The sort is stable, so findings that compare
    // equal (the same edge breaking two identical rules) keep their evaluation order.
    findings.sort_by(compare_findings);

    let total = findings.len() as u32;

    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let verdict = compute_verdict(&emitted, cfg.fail_on);
    let counts = SeverityCounts::from_findings(&emitted);

    let data = RefguardData {
        unit: input.unit.to_string(),
        profile: cfg.profile.clone(),
        rules_file: input.rules_path.map(str::to_string),
        references_file: None,
        project_references_scanned: analysis.project_edges as u32,
        package_references_scanned: analysis.package_edges as u32,
        project_rules_applied: analysis.project_rules_applied as u32,
        package_rules_applied: analysis.package_rules_applied as u32,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
    };

    DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
        analysis,
    }
}

pub fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    if has_error {
        return Verdict::Fail;
    }

    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);
    if has_warn {
        return match fail_on {
            FailOn::Warning => Verdict::Fail,
            FailOn::Error => Verdict::Warn,
        };
    }

    Verdict::Pass
}

fn compare_findings(a: &Finding, b: &Finding) -> std::cmp::Ordering {
    // Ordering priority:
    // 1) severity (error -> warning -> info)
    // 2) check_id
    // 3) code
    // 4) message
    let severity_rank = |sev: Severity| match sev {
        Severity::Error => 0,
        Severity::Warning => 1,
        Severity::Info => 2,
    };

    severity_rank(a.severity)
        .cmp(&severity_rank(b.severity))
        .then(a.check_id.cmp(&b.check_id))
        .then(a.code.cmp(&b.code))
        .then(a.message.cmp(&b.message))
}
