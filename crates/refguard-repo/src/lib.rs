//! Input adapters: read the dependency rules document and the declared-reference file.
//!
//! This crate is allowed to do filesystem IO. Everything it hands to the engine is already
//! in domain types.

#![forbid(unsafe_code)]

mod jsonc;
mod references;
mod rules;

pub use references::{
    load_declared_references, parse_declared_references, render_declared_references,
    write_declared_references, ReferencesError,
};
pub use rules::{load_rules, parse_rules, RulesError};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use camino::Utf8Path;

    /// Parse arbitrary text as a dependency rules document.
    ///
    /// Returns `Ok(())` when the text is an acceptable rules document, `Err(...)` otherwise.
    /// **Never panics** on any input.
    pub fn parse_rules_document(text: &str) -> anyhow::Result<()> {
        let _ = super::parse_rules(Utf8Path::new("DependencyRules.json"), text)?;
        Ok(())
    }

    /// Parse arbitrary text as a declared-reference file.
    ///
    /// **Never panics** on any input.
    pub fn parse_reference_lines(text: &str) -> anyhow::Result<usize> {
        let edges = super::parse_declared_references(text)?;
        Ok(edges.len())
    }

    /// Strip comments and trailing commas from JSON-with-comments text.
    ///
    /// **Never panics** on any input.
    pub fn sanitize_jsonc(text: &str) -> anyhow::Result<String> {
        super::jsonc::sanitize(text).map_err(anyhow::Error::msg)
    }
}
