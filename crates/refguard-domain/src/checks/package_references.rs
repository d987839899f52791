use crate::analysis::Analysis;
use crate::checks::utils::violation_finding;
use crate::policy::EffectiveConfig;
use crate::rules::RuleFamily;
use refguard_types::{ids, Finding};

pub fn run(analysis: &Analysis, cfg: &EffectiveConfig, out: &mut Vec<Finding>) {
    let Some(policy) = cfg.check_policy(ids::CHECK_REFS_PACKAGE_REFERENCES) else {
        return;
    };

    for v in analysis
        .violations
        .iter()
        .filter(|v| v.family == RuleFamily::Package)
    {
        out.push(violation_finding(
            ids::CHECK_REFS_PACKAGE_REFERENCES,
            ids::CODE_PACKAGE_REFERENCE_VIOLATION,
            policy,
            v,
        ));
    }
}
