//! Run summary types and helpers.

mod preview_counts;
mod run_summary;

pub use preview_counts::PreviewCounts;
pub use run_summary::RunSummary;
