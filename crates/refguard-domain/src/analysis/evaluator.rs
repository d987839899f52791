use crate::analysis::Violation;
use crate::model::ReferenceEdge;
use crate::rules::DependencyRule;

/// Check every edge against every applicable rule of one family.
///
/// A rule is a candidate for an edge when it admits the edge's kind and its From/To patterns
/// match the edge. Each candidate is judged on its own: one violation per rule whose policy
/// is not satisfied, so an edge may be reported several times.
pub fn evaluate_edges<R: DependencyRule>(
    rules: &[&R],
    edges: &[ReferenceEdge],
    out: &mut Vec<Violation>,
) {
    for edge in edges {
        for rule in rules {
            if !rule.admits(edge.kind) {
                continue;
            }
            let core = rule.core();
            if !core.covers(edge) {
                continue;
            }

            let exception_matched = core.any_exception_covers(edge);
            if core.policy.is_satisfied(exception_matched) {
                continue;
            }

            out.push(Violation {
                family: R::FAMILY,
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: edge.kind,
                rule_description: core.description.clone(),
                policy: core.policy,
                exception_matched,
            });
        }
    }
}
