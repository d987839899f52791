//! Render use cases: markdown and GitHub annotations from in-memory reports.

use refguard_types::RefguardReport;

use crate::report::to_renderable;

pub fn render_markdown(report: &RefguardReport) -> String {
    refguard_render::render_markdown(&to_renderable(report))
}

pub fn render_annotations(report: &RefguardReport, max: usize) -> Vec<String> {
    refguard_render::render_github_annotations(&to_renderable(report))
        .into_iter()
        .take(max)
        .collect()
}
