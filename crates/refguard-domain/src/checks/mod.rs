use crate::analysis::Analysis;
use crate::engine::EvaluationInput;
use crate::policy::EffectiveConfig;
use refguard_types::Finding;

mod package_references;
mod project_references;
mod rule_coverage;
mod tech_debt;
mod utils;

#[cfg(test)]
mod tests;

pub fn run_all(
    analysis: &Analysis,
    input: &EvaluationInput<'_>,
    cfg: &EffectiveConfig,
    out: &mut Vec<Finding>,
) {
    rule_coverage::run(analysis, cfg, out);
    project_references::run(analysis, cfg, out);
    package_references::run(analysis, cfg, out);
    tech_debt::run(analysis, input, cfg, out);
}
