//! Wildcard patterns over entity identifiers.
//!
//! A pattern is literal text in which every `*` stands for zero or more characters. The end
//! of the candidate must line up with the end of the pattern but the start is free, so a
//! pattern without a leading `*` still matches any candidate that merely *ends* with it:
//! `Project.csproj` matches `/src/OtherProject.csproj`. Matching ignores case.

use std::fmt;

/// A compiled pattern: the literal segments between wildcards, lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<String>,
}

impl Pattern {
    pub fn new<S: Into<String>>(raw: S) -> Self {
        let raw = raw.into();
        let segments = raw.to_lowercase().split('*').map(str::to_string).collect();
        Self { raw, segments }
    }

    /// The pattern exactly as written in the rule document.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();

        // `split` always yields at least one segment.
        let Some((last, leading)) = self.segments.split_last() else {
            return true;
        };

        // The segment after the final wildcard is pinned to the end of the candidate.
        let Some(mut rest) = candidate.strip_suffix(last.as_str()) else {
            return false;
        };

        // Everything before it floats: leftmost placement of each segment in order leaves the
        // most room for the ones that follow.
        for segment in leading.iter().filter(|s| !s.is_empty()) {
            match rest.find(segment.as_str()) {
                Some(idx) => rest = &rest[idx + segment.len()..],
                None => return false,
            }
        }

        true
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::new(value)
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Pattern::new(value)
    }
}

/// One-shot convenience over [`Pattern::matches`].
pub fn matches(pattern: &str, candidate: &str) -> bool {
    Pattern::new(pattern).matches(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_pattern_matches_exact_and_any_prefix() {
        assert!(matches("Foo.csproj", "Foo.csproj"));
        assert!(matches("Foo.csproj", "XFoo.csproj"));
        assert!(matches("Foo.csproj", "/repo/src/Foo/Foo.csproj"));
        assert!(!matches("Foo.csproj", "Foo.csproj.user"));
        assert!(!matches("Foo.csproj", "Bar.csproj"));
    }

    #[test]
    fn unanchored_start_permits_partial_names() {
        assert!(matches("Project.csproj", "OtherProject.csproj"));
    }

    #[test]
    fn matching_ignores_case() {
        assert!(matches("foo.CSPROJ", "/src/FOO.csproj"));
        assert!(matches("System.Text.*", "system.text.json"));
    }

    #[test]
    fn star_matches_everything() {
        assert!(matches("*", ""));
        assert!(matches("*", "anything at all"));
        assert!(matches("", "anything at all"));
    }

    #[test]
    fn trailing_star_lifts_the_end_anchor() {
        assert!(matches("Legacy.*", "Legacy.Core.csproj"));
        assert!(matches("Legacy.*", "/src/Legacy.Core/Legacy.Core.csproj"));
        assert!(!matches("Legacy.csproj", "Legacy.csproj.bak"));
        assert!(matches("Legacy.csproj*", "Legacy.csproj.bak"));
    }

    #[test]
    fn inner_wildcards_keep_segment_order() {
        assert!(matches("src/*/Core/*.csproj", "/repo/src/Billing/Core/Billing.csproj"));
        assert!(!matches("Core/*/src", "src/x/Core"));
        assert!(matches("a*b*c", "abc"));
        assert!(matches("a*b*c", "xxaxxbxxc"));
        assert!(!matches("a*b*c", "acb"));
    }

    #[test]
    fn last_segment_does_not_overlap_earlier_segments() {
        // "ab" must appear before the final "b", not share it.
        assert!(!matches("ab*b", "ab"));
        assert!(matches("ab*b", "abb"));
    }

    #[test]
    fn consecutive_wildcards_behave_like_one() {
        assert!(matches("A**B", "AxyzB"));
        assert!(matches("A**B", "AB"));
    }

    #[test]
    fn compiled_pattern_keeps_raw_text() {
        let p = Pattern::new("*Legacy.*");
        assert_eq!(p.as_str(), "*Legacy.*");
        assert_eq!(p.to_string(), "*Legacy.*");
    }
}
