use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path},line={line},col={col},title={diagnostic}::[{check_id}:{code}] {message}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let mut props: Vec<String> = Vec::new();
        if let Some(loc) = &f.location {
            props.push(format!("file={}", escape_property(&loc.path)));
            if let Some(line) = loc.line {
                props.push(format!("line={line}"));
            }
            if let Some(col) = loc.col {
                props.push(format!("col={col}"));
            }
        }
        if let Some(id) = &f.diagnostic_id {
            props.push(format!("title={}", escape_property(id)));
        }

        let check_id = f.check_id.as_deref().unwrap_or("refguard");
        let message = escape_data(&format!("[{}:{}] {}", check_id, f.code, f.message));

        if props.is_empty() {
            out.push(format!("::{level}::{message}"));
        } else {
            out.push(format!("::{level} {}::{message}", props.join(",")));
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableData, RenderableFinding, RenderableLocation, RenderableVerdictStatus,
    };

    fn report(findings: Vec<RenderableFinding>) -> RenderableReport {
        RenderableReport {
            verdict: RenderableVerdictStatus::Warn,
            reasons: Vec::new(),
            findings,
            data: RenderableData {
                unit: "A".to_string(),
                profile: "warn".to_string(),
                findings_emitted: 0,
                findings_total: 0,
                truncated_reason: None,
            },
        }
    }

    fn finding(severity: RenderableSeverity, path: Option<&str>) -> RenderableFinding {
        RenderableFinding {
            severity,
            check_id: Some("refs.tech_debt".to_string()),
            code: "stale_tech_debt_exception".to_string(),
            diagnostic_id: Some("RP0006".to_string()),
            message: "100% stale\nremove it".to_string(),
            location: path.map(|p| RenderableLocation {
                path: p.to_string(),
                line: None,
                col: None,
            }),
            help: None,
        }
    }

    #[test]
    fn renders_level_properties_and_escaped_message() {
        let lines = render_github_annotations(&report(vec![finding(
            RenderableSeverity::Warning,
            Some("C:\\repo\\DependencyRules.json"),
        )]));

        assert_eq!(
            lines,
            vec![
                "::warning file=C%3A\\repo\\DependencyRules.json,title=RP0006::[refs.tech_debt:stale_tech_debt_exception] 100%25 stale%0Aremove it"
                    .to_string()
            ]
        );
    }

    #[test]
    fn maps_severities_to_workflow_levels() {
        let lines = render_github_annotations(&report(vec![
            finding(RenderableSeverity::Error, None),
            finding(RenderableSeverity::Info, None),
        ]));

        assert!(lines[0].starts_with("::error title=RP0006::"));
        assert!(lines[1].starts_with("::notice title=RP0006::"));
    }

    #[test]
    fn finding_without_properties_has_bare_command() {
        let mut f = finding(RenderableSeverity::Warning, None);
        f.diagnostic_id = None;
        f.check_id = None;

        let lines = render_github_annotations(&report(vec![f]));

        assert!(lines[0].starts_with("::warning::[refguard:stale_tech_debt_exception] "));
    }
}
