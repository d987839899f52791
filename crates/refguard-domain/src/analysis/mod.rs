//! Configuration-free core: which edges break which rules, and which tech-debt exceptions
//! are no longer needed.

mod applicability;
mod evaluator;
mod staleness;

use crate::model::{LinkKind, ReferenceEdge};
use crate::rules::{Policy, RuleDocument, RuleFamily};

pub use applicability::applicable_rules;
pub use evaluator::evaluate_edges;
pub use staleness::find_stale_exceptions;

/// An edge that breaks one rule. An edge breaking several rules yields one violation each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub family: RuleFamily,
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
    pub rule_description: String,
    pub policy: Policy,
    pub exception_matched: bool,
}

/// A tech-debt exception that no declared edge needs anymore.
///
/// `from`/`to` are the exception's patterns as written in the rule document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaleException {
    pub family: RuleFamily,
    pub from: String,
    pub to: String,
    pub justification: String,
    pub rule_description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Analysis {
    pub unit: String,
    /// No project rule's `From` matched the unit; project evaluation was skipped.
    pub no_project_rules_matched: bool,
    pub project_rules_applied: usize,
    pub package_rules_applied: usize,
    pub project_edges: usize,
    pub package_edges: usize,
    pub violations: Vec<Violation>,
    pub stale_exceptions: Vec<StaleException>,
}

/// Evaluate both rule families for one compilation unit.
///
/// The project and package families are filtered and evaluated independently; an empty
/// project family after filtering only suppresses project evaluation.
pub fn analyze(unit: &str, edges: &[ReferenceEdge], rules: &RuleDocument) -> Analysis {
    let mut analysis = Analysis {
        unit: unit.to_string(),
        project_edges: edges.iter().filter(|e| e.kind.is_project()).count(),
        package_edges: edges.iter().filter(|e| !e.kind.is_project()).count(),
        ..Analysis::default()
    };

    let project_rules = applicable_rules(&rules.project_dependencies, unit);
    analysis.project_rules_applied = project_rules.len();
    if project_rules.is_empty() {
        analysis.no_project_rules_matched = true;
    } else {
        evaluate_edges(&project_rules, edges, &mut analysis.violations);
        find_stale_exceptions(&project_rules, unit, edges, &mut analysis.stale_exceptions);
    }

    let package_rules = applicable_rules(&rules.package_dependencies, unit);
    analysis.package_rules_applied = package_rules.len();
    evaluate_edges(&package_rules, edges, &mut analysis.violations);
    find_stale_exceptions(&package_rules, unit, edges, &mut analysis.stale_exceptions);

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{
        LinkScope, PackageDependencyRule, ProjectDependencyRule, RuleCore, RuleException,
    };

    fn forbidden_direct_with_tech_debt() -> RuleDocument {
        RuleDocument {
            project_dependencies: vec![ProjectDependencyRule::new(
                RuleCore::new("*.csproj", "*.csproj", "No project references", Policy::Forbidden)
                    .with_exception(
                        RuleException::new("A.csproj", "B.csproj", "being removed").tech_debt(),
                    ),
                LinkScope::Direct,
            )],
            package_dependencies: Vec::new(),
        }
    }

    #[test]
    fn exception_in_use_produces_nothing() {
        let rules = forbidden_direct_with_tech_debt();
        let edges = vec![ReferenceEdge::new(
            "A.csproj",
            LinkKind::ProjectDirect,
            "B.csproj",
        )];

        let analysis = analyze("A.csproj", &edges, &rules);

        assert!(analysis.violations.is_empty());
        assert!(analysis.stale_exceptions.is_empty());
        assert!(!analysis.no_project_rules_matched);
    }

    #[test]
    fn unexcepted_edge_violates_and_unused_exception_is_stale() {
        let rules = forbidden_direct_with_tech_debt();
        let edges = vec![ReferenceEdge::new(
            "A.csproj",
            LinkKind::ProjectDirect,
            "C.csproj",
        )];

        let analysis = analyze("A.csproj", &edges, &rules);

        assert_eq!(analysis.violations.len(), 1);
        let v = &analysis.violations[0];
        assert_eq!((v.source.as_str(), v.target.as_str()), ("A.csproj", "C.csproj"));
        assert_eq!(v.rule_description, "No project references");

        assert_eq!(analysis.stale_exceptions.len(), 1);
        let s = &analysis.stale_exceptions[0];
        assert_eq!((s.from.as_str(), s.to.as_str()), ("A.csproj", "B.csproj"));
        assert_eq!(s.family, RuleFamily::Project);
    }

    #[test]
    fn package_violation_and_no_project_match_are_independent() {
        let rules = RuleDocument {
            project_dependencies: Vec::new(),
            package_dependencies: vec![PackageDependencyRule::new(RuleCore::new(
                "*",
                "System.Text.*",
                "No System.Text packages",
                Policy::Forbidden,
            ))],
        };
        let edges = vec![ReferenceEdge::new(
            "A.csproj",
            LinkKind::PackageDirect,
            "System.Text.Json",
        )];

        let analysis = analyze("A.csproj", &edges, &rules);

        assert!(analysis.no_project_rules_matched);
        assert_eq!(analysis.violations.len(), 1);
        assert_eq!(analysis.violations[0].family, RuleFamily::Package);
        assert_eq!(analysis.package_edges, 1);
        assert_eq!(analysis.project_edges, 0);
    }

    #[test]
    fn unmatched_project_family_skips_project_evaluation() {
        let rules = RuleDocument {
            project_dependencies: vec![ProjectDependencyRule::new(
                RuleCore::new("Other.csproj", "*", "everything", Policy::Forbidden).with_exception(
                    RuleException::new("A.csproj", "B.csproj", "unused").tech_debt(),
                ),
                LinkScope::DirectOrTransitive,
            )],
            package_dependencies: Vec::new(),
        };
        let edges = vec![ReferenceEdge::new(
            "A.csproj",
            LinkKind::ProjectDirect,
            "C.csproj",
        )];

        let analysis = analyze("A.csproj", &edges, &rules);

        assert!(analysis.no_project_rules_matched);
        assert!(analysis.violations.is_empty());
        assert!(analysis.stale_exceptions.is_empty());
    }

    #[test]
    fn empty_document_only_reports_missing_project_rules() {
        let analysis = analyze("A.csproj", &[], &RuleDocument::default());
        assert!(analysis.no_project_rules_matched);
        assert!(analysis.violations.is_empty());
        assert!(analysis.stale_exceptions.is_empty());
    }

    #[test]
    fn analysis_is_a_pure_function_of_inputs() {
        let rules = forbidden_direct_with_tech_debt();
        let edges = vec![
            ReferenceEdge::new("A.csproj", LinkKind::ProjectDirect, "C.csproj"),
            ReferenceEdge::new("A.csproj", LinkKind::ProjectTransitive, "D.csproj"),
        ];
        assert_eq!(
            analyze("A.csproj", &edges, &rules),
            analyze("A.csproj", &edges, &rules)
        );
    }
}
