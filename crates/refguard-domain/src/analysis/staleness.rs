use crate::analysis::StaleException;
use crate::model::ReferenceEdge;
use crate::rules::DependencyRule;

/// Report tech-debt exceptions of the applicable rules that no declared edge needs.
///
/// Exceptions whose `From` does not match `unit` belong to another compilation unit and are
/// audited when that unit is analyzed. An exception is needed while at least one edge of a
/// kind its rule admits matches the exception's From/To. Whether the rule currently produces
/// violations is irrelevant.
pub fn find_stale_exceptions<R: DependencyRule>(
    rules: &[&R],
    unit: &str,
    edges: &[ReferenceEdge],
    out: &mut Vec<StaleException>,
) {
    for rule in rules {
        let core = rule.core();
        for exception in core.exceptions.iter().filter(|e| e.is_tech_debt) {
            if !exception.from.matches(unit) {
                continue;
            }

            let still_needed = edges
                .iter()
                .any(|edge| rule.admits(edge.kind) && exception.covers(edge));
            if still_needed {
                continue;
            }

            out.push(StaleException {
                family: R::FAMILY,
                from: exception.from.as_str().to_string(),
                to: exception.to.as_str().to_string(),
                justification: exception.justification.clone(),
                rule_description: core.description.clone(),
            });
        }
    }
}
