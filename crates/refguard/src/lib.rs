//! Embeddable reference policy checks.
//!
//! Parse a rule document and a unit's declared references, then ask which edges break which
//! rules and which tech-debt exceptions can go:
//!
//! ```
//! let rules = refguard::parse_rules(
//!     camino::Utf8Path::new("DependencyRules.json"),
//!     r#"{ "ProjectDependencies": [
//!         { "From": "*", "To": "*/Legacy/*", "Description": "Legacy is frozen", "Policy": "Forbidden" }
//!     ] }"#,
//! )?;
//! let edges = refguard::parse_declared_references(
//!     "/src/App.csproj\tProjectReferenceDirect\t/src/Legacy/Old.csproj\n",
//! )?;
//!
//! let analysis = refguard::analyze("/src/App.csproj", &edges, &rules);
//! assert_eq!(analysis.violations.len(), 1);
//! assert!(analysis.stale_exceptions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use refguard_domain::model::{LinkKind, ReferenceEdge};
pub use refguard_domain::rules::{
    DependencyRule, LinkScope, PackageDependencyRule, Policy, ProjectDependencyRule, RuleCore,
    RuleDocument, RuleException, RuleFamily,
};
pub use refguard_domain::{analyze, matches, Analysis, Pattern, StaleException, Violation};
pub use refguard_repo::{
    load_declared_references, load_rules, parse_declared_references, parse_rules,
    ReferencesError, RulesError,
};
