//! The `explain` use case: look up check/code/diagnostic documentation.

use refguard_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    /// Found an explanation for the identifier.
    Found(Explanation),
    /// Unknown identifier; includes available check_ids and codes.
    NotFound {
        identifier: String,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a check_id, code or `RPxxxx` diagnostic ID.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available_check_ids: explain::all_check_ids(),
            available_codes: explain::all_codes(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Remediation\n");
    out.push_str("-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\n");
    out.push_str("Examples\n");
    out.push_str("--------\n\n");
    push_example(&mut out, "Before (finding):", exp.examples.before);
    out.push('\n');
    push_example(&mut out, "After (fixed):", exp.examples.after);

    out
}

fn push_example(out: &mut String, heading: &str, body: &str) {
    let lang = if body.trim_start().starts_with('{') {
        "json"
    } else {
        "toml"
    };
    out.push_str(heading);
    out.push('\n');
    out.push_str(&format!("```{lang}\n"));
    out.push_str(body);
    out.push('\n');
    out.push_str("```\n");
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check_id, code or diagnostic id: {identifier}\n\n"));
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {id}\n"));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        let diag = refguard_types::ids::diagnostic_id_for_code(code).unwrap_or("");
        out.push_str(&format!("  - {code} ({diag})\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_known_check_id() {
        let output = run_explain("refs.tech_debt");
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_known_code() {
        let output = run_explain("project_reference_violation");
        assert!(matches!(output, ExplainOutput::Found(_)));
    }

    #[test]
    fn explain_diagnostic_id_in_any_case() {
        let upper = unwrap_found(run_explain("RP0006"));
        let lower = unwrap_found(run_explain("rp0006"));
        assert_eq!(upper.title, lower.title);
        assert_eq!(upper.title, unwrap_found(run_explain("refs.tech_debt")).title);
    }

    #[test]
    fn explain_unknown() {
        let output = run_explain("deps.no_wildcards");
        let (identifier, available_check_ids, available_codes) = unwrap_not_found(output);
        assert_eq!(identifier, "deps.no_wildcards");
        assert_eq!(available_check_ids.len(), 6);
        assert_eq!(available_codes.len(), 6);
    }

    #[test]
    fn format_explanation_uses_matching_fences() {
        let json = format_explanation(&unwrap_found(run_explain("refs.project_references")));
        assert!(json.contains("Remediation"));
        assert!(json.contains("Examples"));
        assert!(json.contains("```json"));

        let toml = format_explanation(&unwrap_found(run_explain("rules.provided")));
        assert!(toml.contains("```toml"));
    }

    #[test]
    fn format_not_found_output() {
        let formatted = format_not_found(
            "missing",
            &["refs.tech_debt"],
            &["stale_tech_debt_exception"],
        );
        assert!(formatted.contains("Unknown check_id, code or diagnostic id: missing"));
        assert!(formatted.contains("Available check_ids:"));
        assert!(formatted.contains("  - refs.tech_debt"));
        assert!(formatted.contains("Available codes:"));
        assert!(formatted.contains("  - stale_tech_debt_exception (RP0006)"));
    }

    fn unwrap_found(output: ExplainOutput) -> Explanation {
        match output {
            ExplainOutput::Found(exp) => exp,
            _ => panic!("expected Found"),
        }
    }

    fn unwrap_not_found(
        output: ExplainOutput,
    ) -> (String, &'static [&'static str], &'static [&'static str]) {
        match output {
            ExplainOutput::NotFound {
                identifier,
                available_check_ids,
                available_codes,
            } => (identifier, available_check_ids, available_codes),
            _ => panic!("expected NotFound"),
        }
    }
}
