use crate::{model::RefguardConfigV1, presets};
use anyhow::Context;
use refguard_domain::policy::{EffectiveConfig, FailOn};
use refguard_types::{explain::all_check_ids, Severity};

pub const DEFAULT_PROFILE: &str = "warn";

/// Values supplied on the command line; each wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
    pub rules_file: Option<String>,
    pub references_file: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub enabled: bool,
    pub rules_file: Option<String>,
    pub references_file: Option<String>,
}

pub fn resolve_config(
    cfg: RefguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

    let Some(mut effective) = presets::preset(&profile) else {
        anyhow::bail!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        );
    };

    // max findings
    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    // per-check overrides
    for (check_id, cc) in cfg.checks.iter() {
        if !all_check_ids().iter().any(|id| id == check_id) {
            anyhow::bail!("unknown check id in config: {check_id}");
        }
        let Some(entry) = effective.checks.get_mut(check_id) else {
            anyhow::bail!("profile {profile} does not configure {check_id}");
        };

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig {
        effective,
        enabled: overrides.enabled.or(cfg.enabled).unwrap_or(true),
        rules_file: overrides.rules_file.or(cfg.rules_file),
        references_file: overrides.references_file.or(cfg.references_file),
    })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning)"),
    }
}
