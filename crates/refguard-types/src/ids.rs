//! Stable identifiers for checks, finding codes and diagnostics.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.
//! `RPxxxx` diagnostic IDs are what build hosts display next to a warning.

// Checks
pub const CHECK_RULES_PROVIDED: &str = "rules.provided";
pub const CHECK_RULES_FORMAT: &str = "rules.format";
pub const CHECK_REFS_RULE_COVERAGE: &str = "refs.rule_coverage";
pub const CHECK_REFS_PROJECT_REFERENCES: &str = "refs.project_references";
pub const CHECK_REFS_PACKAGE_REFERENCES: &str = "refs.package_references";
pub const CHECK_REFS_TECH_DEBT: &str = "refs.tech_debt";

// Codes: rules.provided
pub const CODE_RULES_NOT_PROVIDED: &str = "rules_not_provided";

// Codes: rules.format
pub const CODE_INVALID_RULES_FORMAT: &str = "invalid_rules_format";

// Codes: refs.rule_coverage
pub const CODE_NO_PROJECT_RULES_MATCHED: &str = "no_project_rules_matched";

// Codes: refs.project_references
pub const CODE_PROJECT_REFERENCE_VIOLATION: &str = "project_reference_violation";

// Codes: refs.package_references
pub const CODE_PACKAGE_REFERENCE_VIOLATION: &str = "package_reference_violation";

// Codes: refs.tech_debt
pub const CODE_STALE_TECH_DEBT_EXCEPTION: &str = "stale_tech_debt_exception";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";

// Verdict reasons
pub const REASON_DISABLED: &str = "disabled";
pub const REASON_RULES_NOT_PROVIDED: &str = "rules_not_provided";
pub const REASON_INVALID_RULES: &str = "invalid_rules";
pub const REASON_TRUNCATED: &str = "truncated";
pub const REASON_TOOL_ERROR: &str = "tool_error";

// Diagnostic IDs
pub const DIAG_RULES_NOT_PROVIDED: &str = "RP0001";
pub const DIAG_INVALID_RULES_FORMAT: &str = "RP0002";
pub const DIAG_NO_PROJECT_RULES_MATCHED: &str = "RP0003";
pub const DIAG_PROJECT_REFERENCE_VIOLATION: &str = "RP0004";
pub const DIAG_PACKAGE_REFERENCE_VIOLATION: &str = "RP0005";
pub const DIAG_STALE_TECH_DEBT_EXCEPTION: &str = "RP0006";

/// Map a finding code to the diagnostic ID hosts display for it.
pub fn diagnostic_id_for_code(code: &str) -> Option<&'static str> {
    match code {
        CODE_RULES_NOT_PROVIDED => Some(DIAG_RULES_NOT_PROVIDED),
        CODE_INVALID_RULES_FORMAT => Some(DIAG_INVALID_RULES_FORMAT),
        CODE_NO_PROJECT_RULES_MATCHED => Some(DIAG_NO_PROJECT_RULES_MATCHED),
        CODE_PROJECT_REFERENCE_VIOLATION => Some(DIAG_PROJECT_REFERENCE_VIOLATION),
        CODE_PACKAGE_REFERENCE_VIOLATION => Some(DIAG_PACKAGE_REFERENCE_VIOLATION),
        CODE_STALE_TECH_DEBT_EXCEPTION => Some(DIAG_STALE_TECH_DEBT_EXCEPTION),
        _ => None,
    }
}

/// Reverse of [`diagnostic_id_for_code`]. Matching is case-insensitive (`rp0004` works).
pub fn code_for_diagnostic_id(diagnostic_id: &str) -> Option<&'static str> {
    match diagnostic_id.to_ascii_uppercase().as_str() {
        DIAG_RULES_NOT_PROVIDED => Some(CODE_RULES_NOT_PROVIDED),
        DIAG_INVALID_RULES_FORMAT => Some(CODE_INVALID_RULES_FORMAT),
        DIAG_NO_PROJECT_RULES_MATCHED => Some(CODE_NO_PROJECT_RULES_MATCHED),
        DIAG_PROJECT_REFERENCE_VIOLATION => Some(CODE_PROJECT_REFERENCE_VIOLATION),
        DIAG_PACKAGE_REFERENCE_VIOLATION => Some(CODE_PACKAGE_REFERENCE_VIOLATION),
        DIAG_STALE_TECH_DEBT_EXCEPTION => Some(CODE_STALE_TECH_DEBT_EXCEPTION),
        _ => None,
    }
}
