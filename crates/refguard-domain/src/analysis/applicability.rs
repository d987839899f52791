use crate::rules::DependencyRule;

/// The rules of one family whose `From` pattern matches the compilation unit.
pub fn applicable_rules<'r, R: DependencyRule>(rules: &'r [R], unit: &str) -> Vec<&'r R> {
    rules
        .iter()
        .filter(|rule| rule.core().from.matches(unit))
        .collect()
}
