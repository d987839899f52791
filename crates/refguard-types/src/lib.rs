//! Stable DTOs and IDs used across the refguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs, finding codes and diagnostic IDs
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use receipt::{
    Finding, Location, RefguardData, RefguardReport, RunMeta, Severity, ToolMeta, Verdict,
    VerdictCounts, VerdictStatus, VerdictSummary, SCHEMA_REPORT_V1,
};
