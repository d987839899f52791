//! Rendering utilities for CI surfaces (Markdown, GitHub annotations).
//!
//! Renderers take a flattened [`RenderableReport`] so they stay independent of the receipt
//! schema.

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
