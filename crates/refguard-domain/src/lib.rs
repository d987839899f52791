//! Pure reference policy evaluation (no IO).
//!
//! Input: the declared reference edges of one compilation unit and a rule document,
//! both constructed elsewhere.
//! Output: violations, stale tech-debt exceptions, findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod model;
pub mod pattern;
pub mod policy;
pub mod report;
pub mod rules;

mod checks;
mod engine;
mod fingerprint;

#[cfg(test)]
mod test_support;

pub use analysis::{analyze, Analysis, StaleException, Violation};
pub use engine::{compute_verdict, evaluate, EvaluationInput};
pub use pattern::{matches, Pattern};
