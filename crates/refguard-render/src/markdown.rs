use crate::{RenderableFinding, RenderableReport, RenderableSeverity, RenderableVerdictStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Refguard report\n\n");
    let verdict = match report.verdict {
        RenderableVerdictStatus::Pass => "PASS",
        RenderableVerdictStatus::Warn => "WARN",
        RenderableVerdictStatus::Fail => "FAIL",
        RenderableVerdictStatus::Skip => "SKIP",
    };
    out.push_str(&format!("- Verdict: **{verdict}**\n"));
    if !report.data.unit.is_empty() {
        out.push_str(&format!("- Unit: `{}`\n", report.data.unit));
    }
    if !report.data.profile.is_empty() {
        out.push_str(&format!("- Profile: {}\n", report.data.profile));
    }
    out.push_str(&format!(
        "- Findings: {} (emitted) / {} (total)\n\n",
        report.data.findings_emitted, report.data.findings_total
    ));

    if !report.reasons.is_empty() {
        out.push_str(&format!("> Reasons: {}\n\n", report.reasons.join(", ")));
    }
    if let Some(r) = &report.data.truncated_reason {
        out.push_str(&format!("> Note: {r}\n\n"));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");

    for f in &report.findings {
        out.push_str(&finding_line(f));

        if let Some(help) = &f.help {
            out.push_str(&format!("  - help: {help}\n"));
        }
    }

    out
}

fn finding_line(f: &RenderableFinding) -> String {
    let sev = match f.severity {
        RenderableSeverity::Info => "INFO",
        RenderableSeverity::Warning => "WARN",
        RenderableSeverity::Error => "ERROR",
    };

    let mut line = format!("- [{sev}]");
    if let Some(id) = &f.diagnostic_id {
        line.push_str(&format!(" {id}"));
    }
    line.push_str(&format!(
        " `{}` / `{}`: {}",
        f.check_id.as_deref().unwrap_or(""),
        f.code,
        f.message
    ));

    if let Some(loc) = &f.location {
        match loc.line {
            Some(n) => line.push_str(&format!(" (`{}`:{n})", loc.path)),
            None => line.push_str(&format!(" (`{}`)", loc.path)),
        }
    }

    line.push('\n');
    line
}
