//! Dependency rules document loader.
//!
//! Field names and enum values are matched without regard to case. A missing `LinkType`
//! means `Direct` and a missing `Policy` means `Allowed`, the first value of each enum.

use crate::jsonc;
use camino::{Utf8Path, Utf8PathBuf};
use refguard_domain::rules::{
    LinkScope, PackageDependencyRule, Policy, ProjectDependencyRule, RuleCore, RuleDocument,
    RuleException,
};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("dependency rules file not found: {path}")]
    NotProvided { path: Utf8PathBuf },

    #[error("failed to read dependency rules file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dependency rules file {path} is not valid: {reason}")]
    InvalidFormat { path: Utf8PathBuf, reason: String },
}

impl RulesError {
    pub fn path(&self) -> &Utf8Path {
        match self {
            RulesError::NotProvided { path }
            | RulesError::Read { path, .. }
            | RulesError::InvalidFormat { path, .. } => path,
        }
    }
}

/// Read and parse the rules document at `path`.
pub fn load_rules(path: &Utf8Path) -> Result<RuleDocument, RulesError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(RulesError::NotProvided {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(RulesError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse_rules(path, &text)
}

/// Parse rules document text. `path` is only used for error reporting.
pub fn parse_rules(path: &Utf8Path, text: &str) -> Result<RuleDocument, RulesError> {
    let invalid = |reason: String| RulesError::InvalidFormat {
        path: path.to_path_buf(),
        reason,
    };

    let clean = jsonc::sanitize(text).map_err(invalid)?;
    let value: serde_json::Value =
        serde_json::from_str(&clean).map_err(|e| invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid("top-level value must be an object".to_string()));
    }
    let dto: RulesDto =
        serde_json::from_value(jsonc::fold_keys(value)).map_err(|e| invalid(e.to_string()))?;

    dto.into_document().map_err(invalid)
}

// Keys arrive lowercased. Optional fields may be absent or an explicit `null`; both read as
// empty.

#[derive(Deserialize)]
struct RulesDto {
    #[serde(default, rename = "projectdependencies")]
    project_dependencies: Option<Vec<ProjectRuleDto>>,
    #[serde(default, rename = "packagedependencies")]
    package_dependencies: Option<Vec<PackageRuleDto>>,
}

#[derive(Deserialize)]
struct ProjectRuleDto {
    from: String,
    to: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default, rename = "linktype")]
    link_type: Option<String>,
    #[serde(default)]
    exceptions: Option<Vec<ExceptionDto>>,
}

#[derive(Deserialize)]
struct PackageRuleDto {
    from: String,
    to: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    policy: Option<String>,
    #[serde(default)]
    exceptions: Option<Vec<ExceptionDto>>,
}

#[derive(Deserialize)]
struct ExceptionDto {
    from: String,
    to: String,
    #[serde(default)]
    justification: Option<String>,
    #[serde(default, rename = "istechdebt")]
    is_tech_debt: Option<bool>,
}

impl RulesDto {
    fn into_document(self) -> Result<RuleDocument, String> {
        let project_dependencies = self
            .project_dependencies
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, dto)| {
                let scope = parse_link_scope(dto.link_type.as_deref())
                    .map_err(|e| format!("ProjectDependencies[{i}]: {e}"))?;
                let core = core(dto.from, dto.to, dto.description, dto.policy, dto.exceptions)
                    .map_err(|e| format!("ProjectDependencies[{i}]: {e}"))?;
                Ok(ProjectDependencyRule::new(core, scope))
            })
            .collect::<Result<Vec<_>, String>>()?;

        let package_dependencies = self
            .package_dependencies
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, dto)| {
                let core = core(dto.from, dto.to, dto.description, dto.policy, dto.exceptions)
                    .map_err(|e| format!("PackageDependencies[{i}]: {e}"))?;
                Ok(PackageDependencyRule::new(core))
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(RuleDocument {
            project_dependencies,
            package_dependencies,
        })
    }
}

fn core(
    from: String,
    to: String,
    description: Option<String>,
    policy: Option<String>,
    exceptions: Option<Vec<ExceptionDto>>,
) -> Result<RuleCore, String> {
    let policy = parse_policy(policy.as_deref())?;
    let description = description.unwrap_or_default();
    let mut core = RuleCore::new(&from, &to, &description, policy);
    for e in exceptions.unwrap_or_default() {
        let justification = e.justification.unwrap_or_default();
        let mut exception = RuleException::new(&e.from, &e.to, &justification);
        exception.is_tech_debt = e.is_tech_debt.unwrap_or(false);
        core = core.with_exception(exception);
    }
    Ok(core)
}

fn parse_policy(v: Option<&str>) -> Result<Policy, String> {
    let Some(v) = v else {
        return Ok(Policy::Allowed);
    };
    match v.to_ascii_lowercase().as_str() {
        "allowed" => Ok(Policy::Allowed),
        "forbidden" => Ok(Policy::Forbidden),
        _ => Err(format!("unknown Policy '{v}' (expected Allowed|Forbidden)")),
    }
}

fn parse_link_scope(v: Option<&str>) -> Result<LinkScope, String> {
    let Some(v) = v else {
        return Ok(LinkScope::Direct);
    };
    match v.to_ascii_lowercase().as_str() {
        "direct" => Ok(LinkScope::Direct),
        "transitive" => Ok(LinkScope::Transitive),
        "directortransitive" => Ok(LinkScope::DirectOrTransitive),
        _ => Err(format!(
            "unknown LinkType '{v}' (expected Direct|Transitive|DirectOrTransitive)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<RuleDocument, RulesError> {
        parse_rules(Utf8Path::new("DependencyRules.json"), text)
    }

    fn reason(err: RulesError) -> String {
        match err {
            RulesError::InvalidFormat { reason, .. } => reason,
            other => panic!("expected InvalidFormat, got {other:?}"),
        }
    }

    #[test]
    fn parses_both_families() {
        let doc = parse(
            r#"{
  "ProjectDependencies": [
    {
      "From": "*",
      "To": "Legacy.*",
      "Description": "No legacy",
      "Policy": "Forbidden",
      "LinkType": "DirectOrTransitive",
      "Exceptions": [
        { "From": "Old.csproj", "To": "Legacy.Core.csproj", "Justification": "migration", "IsTechDebt": true }
      ]
    }
  ],
  "PackageDependencies": [
    { "From": "*", "To": "Forbidden.Package", "Description": "banned", "Policy": "Forbidden" }
  ]
}"#,
        )
        .expect("parse");

        assert_eq!(doc.project_dependencies.len(), 1);
        let rule = &doc.project_dependencies[0];
        assert_eq!(rule.core.from.as_str(), "*");
        assert_eq!(rule.core.to.as_str(), "Legacy.*");
        assert_eq!(rule.core.description, "No legacy");
        assert_eq!(rule.core.policy, Policy::Forbidden);
        assert_eq!(rule.link_scope, LinkScope::DirectOrTransitive);
        let ex = &rule.core.exceptions[0];
        assert_eq!(ex.justification, "migration");
        assert!(ex.is_tech_debt);

        assert_eq!(doc.package_dependencies.len(), 1);
        assert_eq!(doc.package_dependencies[0].core.to.as_str(), "Forbidden.Package");
    }

    #[test]
    fn keys_and_enum_values_ignore_case() {
        let doc = parse(
            r#"{"projectDEPENDENCIES": [{"FROM": "a", "to": "b", "policy": "FORBIDDEN", "linkType": "transitive",
                "exceptions": [{"from": "x", "TO": "y", "isTechDebt": true}]}]}"#,
        )
        .expect("parse");

        let rule = &doc.project_dependencies[0];
        assert_eq!(rule.core.policy, Policy::Forbidden);
        assert_eq!(rule.link_scope, LinkScope::Transitive);
        assert!(rule.core.exceptions[0].is_tech_debt);
    }

    #[test]
    fn optional_fields_take_defaults() {
        let doc = parse(
            r#"{"ProjectDependencies": [{"From": "a", "To": "b"}],
                "PackageDependencies": [{"From": "a", "To": "p", "Exceptions": [{"From": "x", "To": "y"}]}]}"#,
        )
        .expect("parse");

        let rule = &doc.project_dependencies[0];
        assert_eq!(rule.link_scope, LinkScope::Direct);
        assert_eq!(rule.core.policy, Policy::Allowed);
        assert_eq!(rule.core.description, "");
        assert!(rule.core.exceptions.is_empty());

        let ex = &doc.package_dependencies[0].core.exceptions[0];
        assert_eq!(ex.justification, "");
        assert!(!ex.is_tech_debt);
    }

    #[test]
    fn null_optional_fields_read_as_empty() {
        let doc = parse(
            r#"{"ProjectDependencies": [{"From": "*", "To": "*", "Policy": "Forbidden",
                                         "LinkType": "Direct", "Description": null,
                                         "Exceptions": null}],
                "PackageDependencies": null}"#,
        )
        .expect("parse");

        assert_eq!(doc.project_dependencies.len(), 1);
        let rule = &doc.project_dependencies[0];
        assert_eq!(rule.core.policy, Policy::Forbidden);
        assert_eq!(rule.core.description, "");
        assert!(rule.core.exceptions.is_empty());
        assert!(doc.package_dependencies.is_empty());
    }

    #[test]
    fn null_rule_lists_and_exception_fields_are_accepted() {
        let doc = parse(
            r#"{"ProjectDependencies": null,
                "PackageDependencies": [{"From": "*", "To": "Newtonsoft.*",
                    "Exceptions": [{"From": "A.csproj", "To": "Newtonsoft.Json",
                                    "Justification": null, "IsTechDebt": null}]}]}"#,
        )
        .expect("parse");

        assert!(doc.project_dependencies.is_empty());
        let ex = &doc.package_dependencies[0].core.exceptions[0];
        assert_eq!(ex.justification, "");
        assert!(!ex.is_tech_debt);
    }

    #[test]
    fn empty_object_is_an_empty_document() {
        let doc = parse("{}").expect("parse");
        assert!(doc.is_empty());
    }

    #[test]
    fn comments_trailing_commas_and_unknown_fields_are_accepted() {
        let doc = parse(
            r#"{
  // owned by the platform team
  "$schema": "https://example.invalid/rules.json",
  "ProjectDependencies": [
    { "From": "*", "To": "*", "Policy": "Allowed", "Owner": "platform", }, /* more later */
  ],
}"#,
        )
        .expect("parse");
        assert_eq!(doc.project_dependencies.len(), 1);
    }

    #[test]
    fn missing_pattern_is_invalid() {
        let r = reason(parse(r#"{"ProjectDependencies": [{"From": "a"}]}"#).expect_err("no To"));
        assert!(r.contains("to"), "{r}");

        let r = reason(
            parse(r#"{"PackageDependencies": [{"From": "a", "To": "b", "Exceptions": [{"To": "c"}]}]}"#)
                .expect_err("exception without From"),
        );
        assert!(r.contains("from"), "{r}");
    }

    #[test]
    fn unknown_enum_values_are_invalid() {
        let r = reason(
            parse(r#"{"ProjectDependencies": [{"From": "a", "To": "b", "Policy": "Maybe"}]}"#)
                .expect_err("bad policy"),
        );
        assert!(r.contains("ProjectDependencies[0]"), "{r}");
        assert!(r.contains("Maybe"), "{r}");

        let r = reason(
            parse(r#"{"ProjectDependencies": [{"From": "a", "To": "b", "LinkType": "Sideways"}]}"#)
                .expect_err("bad link type"),
        );
        assert!(r.contains("Sideways"), "{r}");
    }

    #[test]
    fn malformed_json_is_invalid() {
        assert!(matches!(
            parse("{ \"ProjectDependencies\": [ }"),
            Err(RulesError::InvalidFormat { .. })
        ));
        assert!(matches!(parse("[]"), Err(RulesError::InvalidFormat { .. })));
        assert!(matches!(parse(""), Err(RulesError::InvalidFormat { .. })));
    }

    #[test]
    fn load_reports_missing_file_as_not_provided() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("DependencyRules.json"))
            .expect("utf8 path");

        let err = load_rules(&path).expect_err("missing");
        assert!(matches!(err, RulesError::NotProvided { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn load_reads_and_parses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("DependencyRules.json"))
            .expect("utf8 path");
        std::fs::write(&path, r#"{"PackageDependencies": [{"From": "*", "To": "x"}]}"#)
            .expect("write");

        let doc = load_rules(&path).expect("load");
        assert_eq!(doc.package_dependencies.len(), 1);
    }
}
