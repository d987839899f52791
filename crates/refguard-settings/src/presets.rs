use refguard_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use refguard_types::{ids, Severity};
use std::collections::BTreeMap;

/// Known profile names, default first.
pub const PROFILES: [&str; 3] = ["warn", "strict", "lenient"];

/// Preset profiles are opinionated defaults. Returns `None` for an unknown profile name.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "warn" => Some(warn_profile()),
        "strict" => Some(strict_profile()),
        "lenient" => Some(lenient_profile()),
        _ => None,
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(Severity::Error),
    }
}

fn lenient_profile() -> EffectiveConfig {
    // Violations still surface; bookkeeping checks are off.
    let mut checks = default_checks(Severity::Warning);
    checks.insert(
        ids::CHECK_REFS_TECH_DEBT.to_string(),
        CheckPolicy::disabled(),
    );
    checks.insert(
        ids::CHECK_REFS_RULE_COVERAGE.to_string(),
        CheckPolicy::disabled(),
    );

    EffectiveConfig {
        profile: "lenient".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks,
    }
}

fn default_checks(violation_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    let mut m = BTreeMap::new();

    m.insert(
        ids::CHECK_RULES_PROVIDED.to_string(),
        CheckPolicy::enabled(Severity::Warning),
    );
    m.insert(
        ids::CHECK_RULES_FORMAT.to_string(),
        CheckPolicy::enabled(Severity::Warning),
    );
    m.insert(
        ids::CHECK_REFS_RULE_COVERAGE.to_string(),
        CheckPolicy::enabled(Severity::Info),
    );
    m.insert(
        ids::CHECK_REFS_PROJECT_REFERENCES.to_string(),
        CheckPolicy::enabled(violation_severity),
    );
    m.insert(
        ids::CHECK_REFS_PACKAGE_REFERENCES.to_string(),
        CheckPolicy::enabled(violation_severity),
    );
    m.insert(
        ids::CHECK_REFS_TECH_DEBT.to_string(),
        CheckPolicy::enabled(violation_severity),
    );

    m
}
