//! End-to-end analysis
//!
//! [`Analyzer`] wires the stages together: fetch signals concurrently, score,
//! search for similar repositories, aggregate them, recommend, and compose the
//! enhanced scores. Portfolio mode fans the single-repository pipeline out over
//! an account's repositories with bounded concurrency and isolates failures per
//! repository.
//!
//! Nothing is spawned: dropping the returned future abandons every in-flight
//! request for that analysis.

mod analysis;
mod analyzer;

pub use analysis::{RepositoryAnalysis, SignalSummary};
#[cfg(test)]
pub use analysis::sample_analysis;
pub use analyzer::{Analyzer, AnalyzerSettings};
