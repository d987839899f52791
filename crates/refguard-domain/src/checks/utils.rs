use crate::analysis::Violation;
use crate::fingerprint::fingerprint_for_reference;
use crate::policy::CheckPolicy;
use crate::rules::Policy;
use refguard_types::{ids, Finding, Location};
use serde_json::json;

pub fn violation_finding(
    check_id: &str,
    code: &str,
    policy: &CheckPolicy,
    violation: &Violation,
) -> Finding {
    Finding {
        severity: policy.severity,
        check_id: check_id.to_string(),
        code: code.to_string(),
        diagnostic_id: ids::diagnostic_id_for_code(code).map(str::to_string),
        message: format!(
            "{} reference '{}' ==> '{}' violates dependency rule '{}' or one of its exceptions",
            violation.family.label(),
            violation.source,
            violation.target,
            violation.rule_description
        ),
        location: Some(unit_location(&violation.source)),
        help: Some(
            "Remove the reference or update the dependency rules file to allow it.".to_string(),
        ),
        fingerprint: Some(fingerprint_for_reference(
            check_id,
            code,
            &violation.source,
            &violation.target,
            &violation.rule_description,
        )),
        data: json!({
            "source": violation.source,
            "target": violation.target,
            "link_kind": violation.kind.token(),
            "rule": violation.rule_description,
            "policy": policy_name(violation.policy),
            "exception_matched": violation.exception_matched,
        }),
    }
}

pub fn unit_location(unit: &str) -> Location {
    Location {
        path: unit.to_string(),
        line: None,
        col: None,
    }
}

fn policy_name(policy: Policy) -> &'static str {
    match policy {
        Policy::Allowed => "Allowed",
        Policy::Forbidden => "Forbidden",
    }
}
