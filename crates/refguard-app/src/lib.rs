//! Use case orchestration for refguard.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! settings and render layers. It stays thin and delegates the real work to those layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod explain;
mod render;
mod report;

pub use check::{
    run_check, run_check_batch, unit_for_references, verdict_exit_code, BatchItem,
    CheckBatchInput, CheckInput, CheckOutput,
};
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use render::{render_annotations, render_markdown};
pub use report::{
    disabled_report, parse_report_json, runtime_error_report, serialize_report, to_renderable,
};
