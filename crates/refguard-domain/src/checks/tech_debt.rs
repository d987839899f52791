use crate::analysis::Analysis;
use crate::engine::EvaluationInput;
use crate::fingerprint::fingerprint_for_reference;
use crate::policy::EffectiveConfig;
use refguard_types::{ids, Finding, Location};
use serde_json::json;

pub fn run(
    analysis: &Analysis,
    input: &EvaluationInput<'_>,
    cfg: &EffectiveConfig,
    out: &mut Vec<Finding>,
) {
    let Some(policy) = cfg.check_policy(ids::CHECK_REFS_TECH_DEBT) else {
        return;
    };

    for stale in &analysis.stale_exceptions {
        out.push(Finding {
            severity: policy.severity,
            check_id: ids::CHECK_REFS_TECH_DEBT.to_string(),
            code: ids::CODE_STALE_TECH_DEBT_EXCEPTION.to_string(),
            diagnostic_id: Some(ids::DIAG_STALE_TECH_DEBT_EXCEPTION.to_string()),
            message: format!(
                "Tech debt exception '{}' ==> '{}' in dependency rule '{}' no longer matches any declared reference and can be removed",
                stale.from, stale.to, stale.rule_description
            ),
            // Points at the rule document: that is where the fix happens.
            location: input.rules_path.map(|path| Location {
                path: path.to_string(),
                line: None,
                col: None,
            }),
            help: Some("Delete the exception from the dependency rules file.".to_string()),
            fingerprint: Some(fingerprint_for_reference(
                ids::CHECK_REFS_TECH_DEBT,
                ids::CODE_STALE_TECH_DEBT_EXCEPTION,
                &stale.from,
                &stale.to,
                &stale.rule_description,
            )),
            data: json!({
                "family": stale.family.label(),
                "from": stale.from,
                "to": stale.to,
                "justification": stale.justification,
                "rule": stale.rule_description,
            }),
        });
    }
}
