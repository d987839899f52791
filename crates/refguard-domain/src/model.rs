use std::fmt;

/// How a compilation unit reaches a reference target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKind {
    ProjectDirect,
    ProjectTransitive,
    PackageDirect,
}

impl LinkKind {
    pub const ALL: [LinkKind; 3] = [
        LinkKind::ProjectDirect,
        LinkKind::ProjectTransitive,
        LinkKind::PackageDirect,
    ];

    /// Token used in the declared-reference file.
    pub const fn token(self) -> &'static str {
        match self {
            LinkKind::ProjectDirect => "ProjectReferenceDirect",
            LinkKind::ProjectTransitive => "ProjectReferenceTransitive",
            LinkKind::PackageDirect => "PackageReferenceDirect",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.token() == token)
    }

    pub const fn is_project(self) -> bool {
        matches!(self, LinkKind::ProjectDirect | LinkKind::ProjectTransitive)
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// One declared dependency of the compilation unit under analysis.
///
/// `source` is always the unit itself; edges of other units are never part of a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReferenceEdge {
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
}

impl ReferenceEdge {
    pub fn new<S: Into<String>, T: Into<String>>(source: S, kind: LinkKind, target: T) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

/// Renders the declared-reference line: `source<TAB>token<TAB>target`.
impl fmt::Display for ReferenceEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.source, self.kind.token(), self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_resolve_back_to_kinds() {
        for kind in LinkKind::ALL {
            assert_eq!(LinkKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(LinkKind::from_token("projectreferencedirect"), None);
        assert_eq!(LinkKind::from_token("PackageReferenceTransitive"), None);
    }

    #[test]
    fn edge_renders_as_tab_separated_line() {
        let edge = ReferenceEdge::new("A.csproj", LinkKind::ProjectTransitive, "C.csproj");
        assert_eq!(
            edge.to_string(),
            "A.csproj\tProjectReferenceTransitive\tC.csproj"
        );
    }
}
