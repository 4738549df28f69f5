use crate::facts::{ActivitySignals, LanguageHistogram, RepositoryRecord};
use chrono::{DateTime, Duration, Utc};

const RECENT_ACTIVITY_DAYS: i64 = 30;

/// Short factual observations about a repository, in a fixed order.
#[must_use]
pub fn insights(repo: &RepositoryRecord, languages: &LanguageHistogram, signals: &ActivitySignals, now: DateTime<Utc>) -> Vec<String> {
    let mut out = Vec::new();

    if let Some(language) = &repo.language {
        out.push(format!("Primary language: {language}"));
    }

    if languages.len() > 1 {
        out.push(format!("Multi-language project with {} languages", languages.len()));
    }

    let recent = signals.commits_since(now - Duration::days(RECENT_ACTIVITY_DAYS));
    if recent > 0 {
        out.push(format!("Active development with {recent} recent commits"));
    }

    if repo.stars > 50 {
        out.push("High community interest".to_string());
    }

    if signals.contributors.len() > 1 {
        out.push("Collaborative development".to_string());
    }

    if !repo.topics.is_empty() {
        let focus: Vec<&str> = repo.topics.iter().take(3).map(String::as_str).collect();
        out.push(format!("Focused on: {}", focus.join(", ")));
    }

    out
}
