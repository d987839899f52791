use crate::analysis::Analysis;
use crate::checks::utils::unit_location;
use crate::policy::EffectiveConfig;
use refguard_types::{ids, Finding};
use serde_json::json;

pub fn run(analysis: &Analysis, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_REFS_RULE_COVERAGE) else {
        return;
    };
    if !analysis.no_project_rules_matched {
        return;
    }

    out.push(Finding {
        severity: policy.severity,
        check_id: ids::CHECK_REFS_RULE_COVERAGE.to_string(),
        code: ids::CODE_NO_PROJECT_RULES_MATCHED.to_string(),
        diagnostic_id: Some(ids::DIAG_NO_PROJECT_RULES_MATCHED.to_string()),
        message: format!(
            "No dependency rules matched the current project '{}'",
            analysis.unit
        ),
        location: Some(unit_location(&analysis.unit)),
        help: Some("Add a project dependency rule whose From pattern matches this project.".to_string()),
        fingerprint: None,
        data: json!({
            "unit": analysis.unit,
            "project_references": analysis.project_edges,
        }),
    });
}
