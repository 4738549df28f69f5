//! Repository facts and the collaborator that fetches them
//!
//! The [`Fetcher`] trait is the boundary between the analysis pipeline and the
//! hosting service. [`GitHubFetcher`] implements it against the GitHub REST API,
//! classifying every failure into a [`FetchError`]. Callers absorb failed
//! optional fetches into empty values and count them in a [`Coverage`].
//!
//! Records are plain snapshots: nothing here scores or aggregates.

mod coverage;
mod fetch_error;
mod fetcher;
mod hosting;
mod progress;
mod records;
mod repo_spec;
mod throttler;

pub use coverage::Coverage;
pub use fetch_error::FetchError;
pub use fetcher::Fetcher;
pub use hosting::GitHubFetcher;
pub use progress::{NoProgress, Progress};
pub use records::{
    ActivitySignals, CommitRecord, Contributor, IssueFilter, IssueRecord, IssueState, LanguageHistogram, RepositoryRecord,
    parse_timestamp,
};
pub use repo_spec::RepoSpec;
#[cfg(test)]
pub use records::sample_record;
pub use throttler::Throttler;
