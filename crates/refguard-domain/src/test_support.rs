use crate::engine::EvaluationInput;
use crate::model::ReferenceEdge;
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use crate::rules::{
    LinkScope, PackageDependencyRule, Policy, ProjectDependencyRule, RuleCore, RuleDocument,
};
use refguard_types::{ids, Severity};
use std::collections::BTreeMap;

pub fn forbid_project(from: &str, to: &str, description: &str) -> ProjectDependencyRule {
    ProjectDependencyRule::new(
        RuleCore::new(from, to, description, Policy::Forbidden),
        LinkScope::Direct,
    )
}

pub fn forbid_package(from: &str, to: &str, description: &str) -> PackageDependencyRule {
    PackageDependencyRule::new(RuleCore::new(from, to, description, Policy::Forbidden))
}

pub fn input<'a>(
    unit: &'a str,
    edges: &'a [ReferenceEdge],
    rules: &'a RuleDocument,
) -> EvaluationInput<'a> {
    EvaluationInput {
        unit,
        edges,
        rules,
        rules_path: Some("DependencyRules.json"),
    }
}

/// Every check enabled with its default severity.
pub fn warn_config() -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(
        ids::CHECK_REFS_RULE_COVERAGE.to_string(),
        CheckPolicy::enabled(Severity::Info),
    );
    for check_id in [
        ids::CHECK_REFS_PROJECT_REFERENCES,
        ids::CHECK_REFS_PACKAGE_REFERENCES,
        ids::CHECK_REFS_TECH_DEBT,
    ] {
        checks.insert(check_id.to_string(), CheckPolicy::enabled(Severity::Warning));
    }
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks,
    }
}

pub fn config_with_check(check_id: &str, severity: Severity) -> EffectiveConfig {
    let mut checks = BTreeMap::new();
    checks.insert(check_id.to_string(), CheckPolicy::enabled(severity));
    EffectiveConfig {
        profile: "test".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks,
    }
}
