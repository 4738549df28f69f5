use super::candidate::CandidateRepository;
use crate::facts::parse_timestamp;
use chrono::{DateTime, Duration, Utc};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

const RECENT_UPDATE_DAYS: i64 = 30;

/// Qualitative practices observed among the most popular comparable repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter)]
pub enum BestPractice {
    #[strum(to_string = "High community engagement (100+ stars)")]
    HighCommunityEngagement,

    #[strum(to_string = "Active community contribution (50+ forks)")]
    ActiveCommunityContribution,

    #[strum(to_string = "Comprehensive project description")]
    ComprehensiveDescription,

    #[strum(to_string = "Well-categorized with multiple topics")]
    WellCategorized,

    #[strum(to_string = "Recent development activity")]
    RecentDevelopment,
}

impl Serialize for BestPractice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Summary statistics over the top of a candidate pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonAggregate {
    /// Number of candidates the statistics cover
    pub analyzed: usize,
    pub mean_stars: f64,
    pub mean_forks: f64,
    /// Primary language to number of analyzed candidates using it
    pub languages: BTreeMap<String, usize>,
    /// Topic to number of analyzed candidates tagged with it
    pub topics: BTreeMap<String, usize>,
    pub best_practices: BTreeSet<BestPractice>,
}

impl ComparisonAggregate {
    /// How many analyzed candidates use `language` as their primary language.
    #[must_use]
    pub fn language_count(&self, language: &str) -> usize {
        self.languages.get(language).copied().unwrap_or(0)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.analyzed == 0
    }
}

/// Summarize the `set_size` most-starred candidates.
///
/// An empty pool yields the all-zero aggregate.
#[must_use]
pub fn aggregate(candidates: &[CandidateRepository], set_size: usize, now: DateTime<Utc>) -> ComparisonAggregate {
    let mut top: Vec<&CandidateRepository> = candidates.iter().collect();
    top.sort_by(|a, b| b.record.stars.cmp(&a.record.stars));
    top.truncate(set_size);

    if top.is_empty() {
        return ComparisonAggregate::default();
    }

    let total_stars: u64 = top.iter().map(|c| c.record.stars).sum();
    let total_forks: u64 = top.iter().map(|c| c.record.forks).sum();

    let mut languages = BTreeMap::new();
    let mut topics = BTreeMap::new();
    for candidate in &top {
        if let Some(language) = candidate.record.language.as_deref().filter(|l| !l.is_empty()) {
            *languages.entry(language.to_string()).or_insert(0) += 1;
        }

        let mut seen = BTreeSet::new();
        for topic in &candidate.record.topics {
            if seen.insert(topic.as_str()) {
                *topics.entry(topic.clone()).or_insert(0) += 1;
            }
        }
    }

    ComparisonAggregate {
        analyzed: top.len(),
        mean_stars: mean(total_stars, top.len()),
        mean_forks: mean(total_forks, top.len()),
        languages,
        topics,
        best_practices: best_practices(&top, now),
    }
}

fn best_practices(top: &[&CandidateRepository], now: DateTime<Utc>) -> BTreeSet<BestPractice> {
    let recent_cutoff = now - Duration::days(RECENT_UPDATE_DAYS);
    let mut practices = BTreeSet::new();

    for candidate in top {
        let record = &candidate.record;

        if record.stars > 100 {
            let _ = practices.insert(BestPractice::HighCommunityEngagement);
        }

        if record.forks > 50 {
            let _ = practices.insert(BestPractice::ActiveCommunityContribution);
        }

        if record.description_len() > 50 {
            let _ = practices.insert(BestPractice::ComprehensiveDescription);
        }

        if record.topics.len() > 3 {
            let _ = practices.insert(BestPractice::WellCategorized);
        }

        if parse_timestamp(&record.updated_at).is_some_and(|updated| updated > recent_cutoff) {
            let _ = practices.insert(BestPractice::RecentDevelopment);
        }
    }

    practices
}

#[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
fn mean(total: u64, count: usize) -> f64 {
    total as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::Provenance;
    use crate::facts::{RepositoryRecord, sample_record};
    use chrono::TimeZone;
    use strum::IntoEnumIterator;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn candidate(full_name: &str, stars: u64, forks: u64, language: &str, topics: &[&str]) -> CandidateRepository {
        CandidateRepository::new(
            RepositoryRecord {
                stars,
                forks,
                language: Some(language.into()),
                topics: topics.iter().map(|t| (*t).to_string()).collect(),
                ..sample_record(full_name)
            },
            Provenance::Language,
        )
    }

    #[test]
    fn test_empty_pool() {
        let agg = aggregate(&[], 5, now());
        assert!(agg.is_empty());
        assert!(agg.mean_stars.abs() < f64::EPSILON);
        assert!(agg.mean_forks.abs() < f64::EPSILON);
        assert!(agg.languages.is_empty());
        assert!(agg.topics.is_empty());
        assert!(agg.best_practices.is_empty());
    }

    #[test]
    fn test_uses_top_five_only() {
        let pool: Vec<_> = (1..=7).map(|i| candidate(&format!("o/r{i}"), i * 10, i, "Rust", &[])).collect();
        let agg = aggregate(&pool, 5, now());

        assert_eq!(agg.analyzed, 5);
        // stars 70, 60, 50, 40, 30
        assert!((agg.mean_stars - 50.0).abs() < 1e-9);
        assert!((agg.mean_forks - 5.0).abs() < 1e-9);
        assert_eq!(agg.language_count("Rust"), 5);
        assert_eq!(agg.language_count("Go"), 0);
    }

    #[test]
    fn test_frequency_maps() {
        let pool = vec![
            candidate("a/1", 30, 0, "Rust", &["cli", "async"]),
            candidate("a/2", 20, 0, "Rust", &["cli"]),
            candidate("a/3", 10, 0, "Go", &["cli", "cli"]),
        ];
        let agg = aggregate(&pool, 5, now());

        assert_eq!(agg.languages.get("Rust"), Some(&2));
        assert_eq!(agg.languages.get("Go"), Some(&1));
        assert_eq!(agg.topics.get("cli"), Some(&3));
        assert_eq!(agg.topics.get("async"), Some(&1));
    }

    #[test]
    fn test_best_practices() {
        let mut popular = candidate("a/1", 150, 60, "Rust", &["a", "b", "c", "d"]);
        popular.record.description = Some("x".repeat(60));
        popular.record.updated_at = "2024-05-20T00:00:00Z".into();

        let agg = aggregate(&[popular], 5, now());
        assert_eq!(agg.best_practices, BestPractice::iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_bad_timestamp_does_not_abort() {
        let mut broken = candidate("a/1", 150, 0, "Rust", &[]);
        broken.record.updated_at = "not a date".into();
        let mut fresh = candidate("a/2", 5, 0, "Rust", &[]);
        fresh.record.updated_at = "2024-05-31T00:00:00Z".into();

        let agg = aggregate(&[broken, fresh], 5, now());
        assert_eq!(agg.analyzed, 2);
        assert!(agg.best_practices.contains(&BestPractice::HighCommunityEngagement));
        assert!(agg.best_practices.contains(&BestPractice::RecentDevelopment));
    }

    #[test]
    fn test_stale_update_is_not_recent() {
        let mut stale = candidate("a/1", 1, 0, "Rust", &[]);
        stale.record.updated_at = "2024-01-01T00:00:00Z".into();
        assert!(aggregate(&[stale], 5, now()).best_practices.is_empty());
    }

    #[test]
    fn test_best_practice_serializes_as_text() {
        let json = serde_json::to_value(BestPractice::WellCategorized).unwrap();
        assert_eq!(json, "Well-categorized with multiple topics");
    }
}
