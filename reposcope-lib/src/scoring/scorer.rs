use super::ScoreSet;
use super::tables::{ADVANCED_TOPICS, language_complexity};
use crate::facts::{ActivitySignals, LanguageHistogram, RepositoryRecord, parse_timestamp};
use chrono::{DateTime, Duration, Utc};

const BASE_SCORE: f64 = 5.0;
const RECENT_COMMIT_WINDOW_DAYS: i64 = 90;
const MATURE_REPOSITORY_DAYS: i64 = 365;

/// Score one repository from its own signals.
///
/// Pure computation: `now` anchors every time window so results are reproducible.
#[must_use]
pub fn score(repo: &RepositoryRecord, languages: &LanguageHistogram, signals: &ActivitySignals, now: DateTime<Utc>) -> ScoreSet {
    ScoreSet::new(
        technical_score(repo, languages),
        quality_score(repo, signals),
        activity_score(repo, signals, now),
    )
}

fn technical_score(repo: &RepositoryRecord, languages: &LanguageHistogram) -> f64 {
    let mut score = BASE_SCORE;

    if let Some(language) = &repo.language {
        score += (language_complexity(language) - 5.0) * 0.2;
    }

    if repo.size > 10_000 {
        score += 1.0;
    } else if repo.size > 1_000 {
        score += 0.5;
    }

    if languages.len() > 3 {
        score += 0.5;
    }

    if repo.topics.iter().any(|t| ADVANCED_TOPICS.contains(&t.as_str())) {
        score += 1.0;
    }

    score
}

fn quality_score(repo: &RepositoryRecord, signals: &ActivitySignals) -> f64 {
    let mut score = BASE_SCORE;

    if repo.description_len() > 50 {
        score += 1.0;
    }

    if signals.contributors.len() > 1 {
        score += 1.0;
    }

    // the open-issue bonus needs some issue history to judge
    if !signals.issues.is_empty() && signals.open_issues() < 10 {
        score += 1.0;
    }

    if repo.stars > 10 {
        score += 0.5;
    }

    if repo.forks > 5 {
        score += 0.5;
    }

    score
}

fn activity_score(repo: &RepositoryRecord, signals: &ActivitySignals, now: DateTime<Utc>) -> f64 {
    let mut score = BASE_SCORE;

    let recent = signals.commits_since(now - Duration::days(RECENT_COMMIT_WINDOW_DAYS));
    score += match recent {
        0 => 0.0,
        1..=5 => 0.5,
        6..=10 => 1.0,
        _ => 2.0,
    };

    let age_days = parse_timestamp(&repo.created_at).map_or(0, |created| (now - created).num_days());
    if age_days > MATURE_REPOSITORY_DAYS {
        score += 0.5;
    }

    score
}
