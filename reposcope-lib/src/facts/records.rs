use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bytes of source per language, as reported by the hosting service.
pub type LanguageHistogram = BTreeMap<String, u64>;

/// Snapshot of a repository's metadata, fetched once per analysis pass.
///
/// Timestamps are kept as the upstream text. They are parsed at the point of use
/// so a malformed value only disables the rule that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub owner: String,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub stars: u64,
    pub forks: u64,
    pub size: u64,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
}

impl RepositoryRecord {
    /// Length of the description in characters, zero when absent.
    #[must_use]
    pub fn description_len(&self) -> usize {
        self.description.as_deref().map_or(0, |d| d.chars().count())
    }

    #[must_use]
    pub fn has_topic(&self, topic: &str) -> bool {
        self.topics.iter().any(|t| t == topic)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: String,
    /// Author date as reported upstream (RFC 3339 when well-formed)
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Which issues to request from the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum IssueFilter {
    Open,
    Closed,
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub labels: Vec<String>,
}

/// Contributor, commit, and issue signals for one repository.
///
/// Commits are ordered most-recent-first, as the hosting service returns them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivitySignals {
    pub contributors: Vec<Contributor>,
    pub commits: Vec<CommitRecord>,
    pub issues: Vec<IssueRecord>,
}

impl ActivitySignals {
    #[must_use]
    pub fn open_issues(&self) -> usize {
        self.issues.iter().filter(|i| i.state == IssueState::Open).count()
    }

    #[must_use]
    pub fn closed_issues(&self) -> usize {
        self.issues.iter().filter(|i| i.state == IssueState::Closed).count()
    }

    /// Number of commits authored strictly after `cutoff`.
    ///
    /// Commits whose date does not parse are skipped rather than counted.
    #[must_use]
    pub fn commits_since(&self, cutoff: DateTime<Utc>) -> usize {
        self.commits
            .iter()
            .filter_map(|c| parse_timestamp(&c.date))
            .filter(|date| *date > cutoff)
            .count()
    }
}

/// Parse an upstream RFC 3339 timestamp, logging and discarding malformed input.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("skipping unparseable timestamp '{text}': {e}");
            None
        }
    }
}

/// Bare record with the given `owner/name` and every other field empty.
#[cfg(test)]
pub fn sample_record(full_name: &str) -> RepositoryRecord {
    let (owner, name) = full_name.split_once('/').unwrap_or(("owner", full_name));
    RepositoryRecord {
        id: 1,
        owner: owner.into(),
        name: name.into(),
        full_name: full_name.into(),
        description: None,
        language: None,
        topics: Vec::new(),
        stars: 0,
        forks: 0,
        size: 0,
        created_at: String::new(),
        updated_at: String::new(),
        url: format!("https://github.com/{full_name}"),
    }
}
