//! The rule document: two independent rule families sharing one rule shape.

use crate::model::{LinkKind, ReferenceEdge};
use crate::pattern::Pattern;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    Allowed,
    Forbidden,
}

impl Policy {
    /// Outcome of a matching rule given whether any of its exceptions matched.
    ///
    /// `Forbidden` is default-deny with named allowances; `Allowed` is default-permit with
    /// named carve-outs.
    pub const fn is_satisfied(self, exception_matched: bool) -> bool {
        match self {
            Policy::Allowed => !exception_matched,
            Policy::Forbidden => exception_matched,
        }
    }
}

/// Which project reference kinds a project rule applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkScope {
    #[default]
    Direct,
    Transitive,
    DirectOrTransitive,
}

impl LinkScope {
    pub const fn admits(self, kind: LinkKind) -> bool {
        matches!(
            (self, kind),
            (LinkScope::Direct, LinkKind::ProjectDirect)
                | (LinkScope::Transitive, LinkKind::ProjectTransitive)
                | (
                    LinkScope::DirectOrTransitive,
                    LinkKind::ProjectDirect | LinkKind::ProjectTransitive
                )
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleFamily {
    Project,
    Package,
}

impl RuleFamily {
    pub const fn label(self) -> &'static str {
        match self {
            RuleFamily::Project => "Project",
            RuleFamily::Package => "Package",
        }
    }
}

/// A named override of a rule's outcome for one From/To pair.
///
/// Scoped independently of the parent rule: it may be narrower or name other entities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleException {
    pub from: Pattern,
    pub to: Pattern,
    pub justification: String,
    /// Temporary allowance, audited for staleness.
    pub is_tech_debt: bool,
}

impl RuleException {
    pub fn new(from: &str, to: &str, justification: &str) -> Self {
        Self {
            from: Pattern::new(from),
            to: Pattern::new(to),
            justification: justification.to_string(),
            is_tech_debt: false,
        }
    }

    pub fn tech_debt(mut self) -> Self {
        self.is_tech_debt = true;
        self
    }

    pub fn covers(&self, edge: &ReferenceEdge) -> bool {
        self.from.matches(&edge.source) && self.to.matches(&edge.target)
    }
}

/// The part of a rule both families share.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleCore {
    pub from: Pattern,
    pub to: Pattern,
    pub description: String,
    pub policy: Policy,
    pub exceptions: Vec<RuleException>,
}

impl RuleCore {
    pub fn new(from: &str, to: &str, description: &str, policy: Policy) -> Self {
        Self {
            from: Pattern::new(from),
            to: Pattern::new(to),
            description: description.to_string(),
            policy,
            exceptions: Vec::new(),
        }
    }

    pub fn with_exception(mut self, exception: RuleException) -> Self {
        self.exceptions.push(exception);
        self
    }

    pub fn covers(&self, edge: &ReferenceEdge) -> bool {
        self.from.matches(&edge.source) && self.to.matches(&edge.target)
    }

    pub fn any_exception_covers(&self, edge: &ReferenceEdge) -> bool {
        self.exceptions.iter().any(|e| e.covers(edge))
    }
}

/// Behaviour the evaluators need from either rule family.
pub trait DependencyRule {
    const FAMILY: RuleFamily;

    fn core(&self) -> &RuleCore;

    /// Whether edges of `kind` are subject to this rule at all.
    fn admits(&self, kind: LinkKind) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectDependencyRule {
    pub core: RuleCore,
    pub link_scope: LinkScope,
}

impl ProjectDependencyRule {
    pub fn new(core: RuleCore, link_scope: LinkScope) -> Self {
        Self { core, link_scope }
    }
}

impl DependencyRule for ProjectDependencyRule {
    const FAMILY: RuleFamily = RuleFamily::Project;

    fn core(&self) -> &RuleCore {
        &self.core
    }

    fn admits(&self, kind: LinkKind) -> bool {
        self.link_scope.admits(kind)
    }
}

/// Package rules only ever see direct package references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageDependencyRule {
    pub core: RuleCore,
}

impl PackageDependencyRule {
    pub fn new(core: RuleCore) -> Self {
        Self { core }
    }
}

impl DependencyRule for PackageDependencyRule {
    const FAMILY: RuleFamily = RuleFamily::Package;

    fn core(&self) -> &RuleCore {
        &self.core
    }

    fn admits(&self, kind: LinkKind) -> bool {
        kind == LinkKind::PackageDirect
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDocument {
    pub project_dependencies: Vec<ProjectDependencyRule>,
    pub package_dependencies: Vec<PackageDependencyRule>,
}

impl RuleDocument {
    pub fn is_empty(&self) -> bool {
        self.project_dependencies.is_empty() && self.package_dependencies.is_empty()
    }
}
