//! Explain registry for checks and codes.
//!
//! Maps check IDs, codes and `RPxxxx` diagnostic IDs to human-readable explanations with
//! remediation guidance. Every check emits exactly one code, so both resolve to the same entry.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after rule document examples.
    pub examples: ExamplePair,
}

/// Before and after examples (JSON rule documents or reference files).
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Input that would trigger a finding.
    pub before: &'static str,
    /// Input that passes the check.
    pub after: &'static str,
}

/// Look up an explanation by check_id, code, or diagnostic ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    let identifier = ids::code_for_diagnostic_id(identifier).unwrap_or(identifier);
    match identifier {
        ids::CHECK_RULES_PROVIDED | ids::CODE_RULES_NOT_PROVIDED => Some(explain_rules_provided()),
        ids::CHECK_RULES_FORMAT | ids::CODE_INVALID_RULES_FORMAT => Some(explain_rules_format()),
        ids::CHECK_REFS_RULE_COVERAGE | ids::CODE_NO_PROJECT_RULES_MATCHED => {
            Some(explain_rule_coverage())
        }
        ids::CHECK_REFS_PROJECT_REFERENCES | ids::CODE_PROJECT_REFERENCE_VIOLATION => {
            Some(explain_project_references())
        }
        ids::CHECK_REFS_PACKAGE_REFERENCES | ids::CODE_PACKAGE_REFERENCE_VIOLATION => {
            Some(explain_package_references())
        }
        ids::CHECK_REFS_TECH_DEBT | ids::CODE_STALE_TECH_DEBT_EXCEPTION => {
            Some(explain_tech_debt())
        }
        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_RULES_PROVIDED,
        ids::CHECK_RULES_FORMAT,
        ids::CHECK_REFS_RULE_COVERAGE,
        ids::CHECK_REFS_PROJECT_REFERENCES,
        ids::CHECK_REFS_PACKAGE_REFERENCES,
        ids::CHECK_REFS_TECH_DEBT,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_RULES_NOT_PROVIDED,
        ids::CODE_INVALID_RULES_FORMAT,
        ids::CODE_NO_PROJECT_RULES_MATCHED,
        ids::CODE_PROJECT_REFERENCE_VIOLATION,
        ids::CODE_PACKAGE_REFERENCE_VIOLATION,
        ids::CODE_STALE_TECH_DEBT_EXCEPTION,
    ]
}

fn explain_rules_provided() -> Explanation {
    Explanation {
        title: "Dependency Rules Provided",
        description: "\
Reported when refguard is enabled for a project but no dependency rules file exists at the
configured location. Without a rule document nothing can be evaluated, so the run stops
after emitting this finding.",
        remediation: "\
Point `rules_file` in refguard.toml (or `--rules` on the command line) at a JSON rule
document, or disable refguard for this project with `enabled = false`.",
        examples: ExamplePair {
            before: r#"# refguard.toml
rules_file = "missing/DependencyRules.json""#,
            after: r#"# refguard.toml
rules_file = "DependencyRules.json""#,
        },
    }
}

fn explain_rules_format() -> Explanation {
    Explanation {
        title: "Invalid Dependency Rules Format",
        description: "\
Reported when the dependency rules file exists but cannot be read as a rule document.

Field names are case-insensitive and comments and trailing commas are accepted, but every
rule and exception needs `From` and `To`, and `Policy`/`LinkType` must be one of the known
values (`Allowed`/`Forbidden`, `Direct`/`Transitive`/`DirectOrTransitive`).",
        remediation: "\
Fix the JSON so that it parses; the finding message includes the parser's reason and
position.",
        examples: ExamplePair {
            before: r#"{ "ProjectDependencies": [ { "From": "*", "Policy": "Denied" } ] }"#,
            after: r#"{ "ProjectDependencies": [ { "From": "*", "To": "*", "Policy": "Forbidden" } ] }"#,
        },
    }
}

fn explain_rule_coverage() -> Explanation {
    Explanation {
        title: "No Project Rules Matched",
        description: "\
Informational. None of the project dependency rules has a `From` pattern matching the
project under analysis, so its project references were not evaluated. Package rules are
still evaluated independently.

Patterns match the end of an identifier: `Foo.csproj` matches `/src/Foo.csproj` and also
`/src/OtherFoo.csproj`. Matching is case-insensitive and `*` matches any run of characters.",
        remediation: "\
Add a project rule whose `From` matches this project (for example `*` or `*/Core/*`), or
ignore the finding if the project is intentionally unconstrained.",
        examples: ExamplePair {
            before: r#"{ "ProjectDependencies": [ { "From": "*/Web/*", "To": "*", "Policy": "Allowed" } ] }"#,
            after: r#"{ "ProjectDependencies": [ { "From": "*", "To": "*", "Policy": "Allowed" } ] }"#,
        },
    }
}

fn explain_project_references() -> Explanation {
    Explanation {
        title: "Project Reference Violation",
        description: "\
A direct or transitive project reference violates a project dependency rule.

A rule matches a reference when its `From`/`To` patterns match the reference source/target
and its `LinkType` admits the reference kind. A `Forbidden` rule rejects matching
references unless one of its exceptions matches; an `Allowed` rule accepts matching
references unless one of its exceptions matches. Each violated rule is reported separately.",
        remediation: "\
Remove the project reference, or add an exception with a justification to the rule. Mark
the exception `IsTechDebt` if it should be removed once the reference is gone.",
        examples: ExamplePair {
            before: r#"{ "ProjectDependencies": [ {
    "From": "*", "To": "*Legacy.csproj", "Policy": "Forbidden", "LinkType": "Direct",
    "Description": "No new Legacy references" } ] }"#,
            after: r#"{ "ProjectDependencies": [ {
    "From": "*", "To": "*Legacy.csproj", "Policy": "Forbidden", "LinkType": "Direct",
    "Description": "No new Legacy references",
    "Exceptions": [ { "From": "*Billing.csproj", "To": "*Legacy.csproj",
                      "Justification": "Migration in progress", "IsTechDebt": true } ] } ] }"#,
        },
    }
}

fn explain_package_references() -> Explanation {
    Explanation {
        title: "Package Reference Violation",
        description: "\
A direct package reference violates a package dependency rule. Package rules follow the
same Allowed/Forbidden and exception semantics as project rules but have no `LinkType`:
only direct package references are evaluated.",
        remediation: "\
Remove the package reference, or add an exception with a justification to the rule.",
        examples: ExamplePair {
            before: r#"{ "PackageDependencies": [ {
    "From": "*", "To": "Newtonsoft.*", "Policy": "Forbidden",
    "Description": "Use System.Text.Json" } ] }"#,
            after: r#"{ "PackageDependencies": [ {
    "From": "*", "To": "Newtonsoft.*", "Policy": "Forbidden",
    "Description": "Use System.Text.Json",
    "Exceptions": [ { "From": "*Interop.csproj", "To": "Newtonsoft.Json",
                      "Justification": "Third-party contract" } ] } ] }"#,
        },
    }
}

fn explain_tech_debt() -> Explanation {
    Explanation {
        title: "Stale Tech Debt Exception",
        description: "\
An exception marked `IsTechDebt` no longer matches any declared reference of the project
it is scoped to. Removing it does not change any analysis outcome.

Only exceptions whose `From` matches the project under analysis are audited; exceptions
scoped to other projects are audited when those projects are analyzed.",
        remediation: "\
Delete the exception from the rule document.",
        examples: ExamplePair {
            before: r#"{ "ProjectDependencies": [ {
    "From": "*", "To": "*Legacy.csproj", "Policy": "Forbidden",
    "Exceptions": [ { "From": "*Billing.csproj", "To": "*Legacy.csproj",
                      "Justification": "Migration in progress", "IsTechDebt": true } ] } ] }"#,
            after: r#"{ "ProjectDependencies": [ {
    "From": "*", "To": "*Legacy.csproj", "Policy": "Forbidden" } ] }"#,
        },
    }
}
