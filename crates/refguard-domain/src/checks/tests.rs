use super::{package_references, project_references, rule_coverage, tech_debt};
use crate::analysis::analyze;
use crate::model::{LinkKind, ReferenceEdge};
use crate::rules::{LinkScope, Policy, ProjectDependencyRule, RuleCore, RuleDocument, RuleException};
use crate::test_support::{config_with_check, forbid_package, forbid_project, input, warn_config};
use refguard_types::{ids, Severity};

#[test]
fn project_violation_message_matches_diagnostic_format() {
    let rules = RuleDocument {
        project_dependencies: vec![forbid_project(
            "TestProject.csproj",
            "ReferencedProject.csproj",
            "Can't reference this project directly",
        )],
        package_dependencies: Vec::new(),
    };
    let edges = vec![ReferenceEdge::new(
        "TestProject.csproj",
        LinkKind::ProjectDirect,
        "ReferencedProject.csproj",
    )];
    let analysis = analyze("TestProject.csproj", &edges, &rules);
    let cfg = config_with_check(ids::CHECK_REFS_PROJECT_REFERENCES, Severity::Warning);

    let mut out = Vec::new();
    project_references::run(&analysis, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    let f = &out[0];
    assert_eq!(
        f.message,
        "Project reference 'TestProject.csproj' ==> 'ReferencedProject.csproj' violates dependency rule 'Can't reference this project directly' or one of its exceptions"
    );
    assert_eq!(f.diagnostic_id.as_deref(), Some("RP0004"));
    assert_eq!(f.severity, Severity::Warning);
    assert_eq!(f.data["link_kind"], "ProjectReferenceDirect");
    assert_eq!(f.data["policy"], "Forbidden");
    assert_eq!(f.data["exception_matched"], false);
    assert!(f.fingerprint.is_some());
}

#[test]
fn project_and_package_checks_split_violations_by_family() {
    let rules = RuleDocument {
        project_dependencies: vec![forbid_project("*", "*", "no projects")],
        package_dependencies: vec![forbid_package("*", "*", "no packages")],
    };
    let edges = vec![
        ReferenceEdge::new("A", LinkKind::ProjectDirect, "B"),
        ReferenceEdge::new("A", LinkKind::PackageDirect, "Serilog"),
    ];
    let analysis = analyze("A", &edges, &rules);
    let cfg = warn_config();

    let mut projects = Vec::new();
    project_references::run(&analysis, &cfg, &mut projects);
    let mut packages = Vec::new();
    package_references::run(&analysis, &cfg, &mut packages);

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].data["target"], "B");
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].code, ids::CODE_PACKAGE_REFERENCE_VIOLATION);
    assert_eq!(
        packages[0].message,
        "Package reference 'A' ==> 'Serilog' violates dependency rule 'no packages' or one of its exceptions"
    );
    assert_eq!(packages[0].diagnostic_id.as_deref(), Some("RP0005"));
}

#[test]
fn disabled_checks_emit_nothing() {
    let rules = RuleDocument {
        project_dependencies: vec![forbid_project("*", "*", "no projects")],
        package_dependencies: Vec::new(),
    };
    let edges = vec![ReferenceEdge::new("A", LinkKind::ProjectDirect, "B")];
    let analysis = analyze("A", &edges, &rules);
    let cfg = config_with_check(ids::CHECK_REFS_TECH_DEBT, Severity::Warning);

    let mut out = Vec::new();
    project_references::run(&analysis, &cfg, &mut out);
    rule_coverage::run(&analysis, &cfg, &mut out);

    assert!(out.is_empty());
}

#[test]
fn rule_coverage_reports_the_unit() {
    let analysis = analyze("TestProject.csproj", &[], &RuleDocument::default());
    let cfg = config_with_check(ids::CHECK_REFS_RULE_COVERAGE, Severity::Info);

    let mut out = Vec::new();
    rule_coverage::run(&analysis, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(
        out[0].message,
        "No dependency rules matched the current project 'TestProject.csproj'"
    );
    assert_eq!(out[0].severity, Severity::Info);
    assert_eq!(out[0].diagnostic_id.as_deref(), Some("RP0003"));
}

#[test]
fn stale_exception_points_at_the_rule_document() {
    let rules = RuleDocument {
        project_dependencies: vec![ProjectDependencyRule::new(
            RuleCore::new("*.csproj", "*.csproj", "closed", Policy::Forbidden).with_exception(
                RuleException::new("A.csproj", "B.csproj", "migrating").tech_debt(),
            ),
            LinkScope::Direct,
        )],
        package_dependencies: Vec::new(),
    };
    let edges = vec![ReferenceEdge::new("A.csproj", LinkKind::ProjectDirect, "C.csproj")];
    let analysis = analyze("A.csproj", &edges, &rules);
    let cfg = warn_config();

    let mut out = Vec::new();
    tech_debt::run(&analysis, &input("A.csproj", &edges, &rules), &cfg, &mut out);

    assert_eq!(out.len(), 1);
    let f = &out[0];
    assert_eq!(f.code, ids::CODE_STALE_TECH_DEBT_EXCEPTION);
    assert_eq!(
        f.location.as_ref().map(|l| l.path.as_str()),
        Some("DependencyRules.json")
    );
    assert_eq!(f.data["from"], "A.csproj");
    assert_eq!(f.data["to"], "B.csproj");
    assert_eq!(f.data["justification"], "migrating");
    assert_eq!(f.data["family"], "Project");
    assert!(f.message.contains("'A.csproj' ==> 'B.csproj'"));
}

#[test]
fn severity_comes_from_config() {
    let rules = RuleDocument {
        project_dependencies: vec![forbid_project("*", "*", "closed")],
        package_dependencies: Vec::new(),
    };
    let edges = vec![ReferenceEdge::new("A", LinkKind::ProjectTransitive, "B")];
    let mut rules_transitive = rules.clone();
    rules_transitive.project_dependencies[0].link_scope = LinkScope::Transitive;
    let analysis = analyze("A", &edges, &rules_transitive);
    let cfg = config_with_check(ids::CHECK_REFS_PROJECT_REFERENCES, Severity::Error);

    let mut out = Vec::new();
    project_references::run(&analysis, &cfg, &mut out);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].severity, Severity::Error);
    assert_eq!(out[0].data["link_kind"], "ProjectReferenceTransitive");

    // The original Direct-scoped rule never sees the transitive edge.
    assert!(analyze("A", &edges, &rules).violations.is_empty());
}
