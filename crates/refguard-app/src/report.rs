use anyhow::Context;
use refguard_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use refguard_types::{
    ids, Finding, RefguardData, RefguardReport, RunMeta, Severity, ToolMeta, VerdictCounts,
    VerdictStatus, VerdictSummary, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

pub fn parse_report_json(text: &str) -> anyhow::Result<RefguardReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse refguard v1 report")
}

pub fn serialize_report(report: &RefguardReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Assemble the envelope around already-ordered findings.
pub(crate) fn build_report(
    started_at: OffsetDateTime,
    status: VerdictStatus,
    reasons: Vec<String>,
    findings: Vec<Finding>,
    data: RefguardData,
) -> RefguardReport {
    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    let mut counts = VerdictCounts::default();
    for f in &findings {
        match f.severity {
            Severity::Info => counts.info += 1,
            Severity::Warning => counts.warn += 1,
            Severity::Error => counts.error += 1,
        }
    }

    RefguardReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "refguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at: Some(ended_at),
            duration_ms: Some(duration_ms),
        },
        verdict: VerdictSummary {
            status,
            counts,
            reasons,
        },
        findings,
        data,
    }
}

/// Report for a run turned off by the `enabled` flag: verdict `skip`, nothing analysed.
pub fn disabled_report(unit: &str, profile: &str) -> RefguardReport {
    build_report(
        OffsetDateTime::now_utc(),
        VerdictStatus::Skip,
        vec![ids::REASON_DISABLED.to_string()],
        Vec::new(),
        RefguardData {
            unit: unit.to_string(),
            profile: profile.to_string(),
            ..RefguardData::default()
        },
    )
}

pub fn runtime_error_report(unit: &str, message: &str) -> RefguardReport {
    build_report(
        OffsetDateTime::now_utc(),
        VerdictStatus::Fail,
        vec![ids::REASON_TOOL_ERROR.to_string()],
        vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            diagnostic_id: None,
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run refguard.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        RefguardData {
            unit: unit.to_string(),
            profile: "unknown".to_string(),
            findings_total: 1,
            findings_emitted: 1,
            ..RefguardData::default()
        },
    )
}

pub fn to_renderable(report: &RefguardReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict.status {
            VerdictStatus::Pass => RenderableVerdictStatus::Pass,
            VerdictStatus::Warn => RenderableVerdictStatus::Warn,
            VerdictStatus::Fail => RenderableVerdictStatus::Fail,
            VerdictStatus::Skip => RenderableVerdictStatus::Skip,
        },
        reasons: report.verdict.reasons.clone(),
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            unit: report.data.unit.clone(),
            profile: report.data.profile.clone(),
            findings_emitted: report.data.findings_emitted,
            findings_total: report.data.findings_total,
            truncated_reason: report.data.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        diagnostic_id: f.diagnostic_id.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            path: loc.path.clone(),
            line: loc.line,
            col: loc.col,
        }),
        help: f.help.clone(),
    }
}
