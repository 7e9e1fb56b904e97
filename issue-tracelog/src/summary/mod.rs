//! Run summary types and helpers.

mod result;
mod run_summary;

pub use result::LinkOutcome;
pub use run_summary::{LinkSummary, RunSummary};
