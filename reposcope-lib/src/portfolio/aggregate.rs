use super::category::categorize;
use super::guidance::{CareerGuidance, career_guidance, portfolio_recommendations};
use super::market::{MarketPosition, assess_market_position};
use super::ranking::{AverageScores, LanguageShare, TopicCount, average_scores, rank_languages, rank_topics};
use super::summary::{EnhancedSummary, enhanced_summary};
use crate::enhancement::EnhancedScoreSet;
use crate::pipeline::RepositoryAnalysis;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A repository that was listed but could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryFailure {
    pub name: String,
    pub reason: String,
}

/// Per-repository line in the portfolio rollup.
#[derive(Debug, Clone, Serialize)]
pub struct RepositorySummary {
    pub name: String,
    pub category: &'static str,
    pub scores: EnhancedScoreSet,
    pub recommendations: usize,

    /// Some optional signal or similarity search could not be fetched
    pub degraded: bool,
}

/// Portfolio-wide rollup for one account.
///
/// Rankings and averages cover only the analyzed repositories;
/// `total_repositories` and `failures` report what was left out, and
/// `degraded_repositories` counts analyses built on incomplete data.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioAggregate {
    pub account: String,
    pub analysis_date: DateTime<Utc>,
    pub total_repositories: usize,
    pub analyzed_repositories: usize,
    pub failures: Vec<RepositoryFailure>,
    pub degraded_repositories: usize,
    pub languages: Vec<LanguageShare>,
    pub topics: Vec<TopicCount>,
    pub average_scores: AverageScores,
    pub categories: BTreeMap<String, usize>,
    pub active_projects: usize,
    pub high_quality_projects: usize,
    pub repositories: Vec<RepositorySummary>,
    pub recommendations: Vec<String>,
    pub market_position: MarketPosition,
    pub career_guidance: CareerGuidance,
    pub enhanced_summary: Option<EnhancedSummary>,
}

impl PortfolioAggregate {
    /// Whether some listed repositories are missing from the rollup.
    #[must_use]
    pub const fn is_partial(&self) -> bool {
        self.analyzed_repositories < self.total_repositories
    }
}

/// Roll up the analyses of an account's repositories.
///
/// `total` is the number of repositories that were attempted; `analyses` holds
/// the successes and `failures` the rest.
#[must_use]
pub fn aggregate_portfolio(
    account: &str,
    total: usize,
    analyses: &[RepositoryAnalysis],
    failures: Vec<RepositoryFailure>,
    now: DateTime<Utc>,
) -> PortfolioAggregate {
    let languages = rank_languages(analyses.iter().map(|a| &a.languages));
    let topics = rank_topics(analyses.iter().flat_map(|a| &a.repository.topics));
    let average_scores = average_scores(analyses.iter().map(|a| &a.scores));

    let mut categories = BTreeMap::new();
    let repositories: Vec<RepositorySummary> = analyses
        .iter()
        .map(|a| {
            let category = categorize(&a.repository.topics, &a.languages);
            *categories.entry(category.to_string()).or_insert(0) += 1;
            RepositorySummary {
                name: a.repository.name.clone(),
                category,
                scores: a.enhanced_scores,
                recommendations: a.recommendations.len(),
                degraded: a.is_degraded(),
            }
        })
        .collect();

    let recommendations = portfolio_recommendations(&average_scores, &languages, &categories);
    let market_position = assess_market_position(&languages, &categories);
    let career_guidance = career_guidance(&average_scores, &categories);

    PortfolioAggregate {
        account: account.to_string(),
        analysis_date: now,
        total_repositories: total,
        analyzed_repositories: analyses.len(),
        failures,
        degraded_repositories: analyses.iter().filter(|a| a.is_degraded()).count(),
        languages,
        topics,
        average_scores,
        categories,
        active_projects: analyses.iter().filter(|a| a.scores.activity() > 5.0).count(),
        high_quality_projects: analyses.iter().filter(|a| a.scores.quality() > 7.0).count(),
        repositories,
        recommendations,
        market_position,
        career_guidance,
        enhanced_summary: enhanced_summary(analyses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement::Priority;
    use crate::facts::{FetchError, LanguageHistogram};
    use crate::pipeline::sample_analysis;
    use crate::scoring::ScoreSet;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn analysis(name: &str, scores: ScoreSet, language: &str, bytes: u64, topics: &[&str]) -> RepositoryAnalysis {
        let mut a = sample_analysis(&format!("octo/{name}"), scores, &[]);
        a.languages = LanguageHistogram::from([(language.to_string(), bytes)]);
        a.repository.topics = topics.iter().map(|t| (*t).to_string()).collect();
        a
    }

    #[test]
    fn test_partial_portfolio_counts() {
        let analyses = vec![
            analysis("one", ScoreSet::new(6.0, 8.0, 6.0), "Rust", 300, &["cli"]),
            analysis("two", ScoreSet::new(4.0, 6.0, 5.0), "Python", 100, &["ml", "cli"]),
            analysis("three", ScoreSet::new(5.0, 7.0, 7.0), "Rust", 100, &["docker"]),
        ];
        let failures = vec![
            RepositoryFailure { name: "four".into(), reason: "not found".into() },
            RepositoryFailure { name: "five".into(), reason: "rate limited".into() },
        ];

        let portfolio = aggregate_portfolio("octo", 5, &analyses, failures, now());

        assert_eq!(portfolio.total_repositories, 5);
        assert_eq!(portfolio.analyzed_repositories, 3);
        assert!(portfolio.is_partial());
        assert_eq!(portfolio.failures.len(), 2);

        assert_eq!(portfolio.languages[0].language, "Rust");
        assert!((portfolio.languages[0].percentage - 80.0).abs() < 1e-9);
        assert_eq!(portfolio.topics[0].topic, "cli");
        assert_eq!(portfolio.topics[0].count, 2);

        assert_eq!(portfolio.average_scores.technical, Some(5.0));
        assert_eq!(portfolio.average_scores.quality, Some(7.0));
        assert_eq!(portfolio.average_scores.activity, Some(6.0));

        assert_eq!(portfolio.categories.get("ai-ml"), Some(&1));
        assert_eq!(portfolio.categories.get("devops"), Some(&1));
        assert_eq!(portfolio.categories.get("other"), Some(&1));

        assert_eq!(portfolio.active_projects, 2);
        assert_eq!(portfolio.high_quality_projects, 1);
        assert_eq!(portfolio.repositories.len(), 3);
    }

    #[test]
    fn test_empty_portfolio() {
        let portfolio = aggregate_portfolio("ghost", 0, &[], Vec::new(), now());

        assert_eq!(portfolio.analyzed_repositories, 0);
        assert!(!portfolio.is_partial());
        assert!(portfolio.languages.is_empty());
        assert_eq!(portfolio.average_scores, AverageScores::default());
        assert!(portfolio.enhanced_summary.is_none());
        assert_eq!(portfolio.recommendations.len(), 9);
    }

    #[test]
    fn test_enhanced_summary() {
        let mut weak = sample_analysis("octo/weak", ScoreSet::new(4.0, 4.0, 4.0), &[Priority::High, Priority::Medium]);
        weak.repository.name = "weak".into();
        let strong = sample_analysis("octo/strong", ScoreSet::new(9.0, 9.0, 9.0), &[Priority::High, Priority::Low]);

        let portfolio = aggregate_portfolio("octo", 2, &[weak, strong], Vec::new(), now());
        let summary = portfolio.enhanced_summary.unwrap();

        assert_eq!(summary.high_priority, 2);
        assert_eq!(summary.medium_priority, 1);
        assert_eq!(summary.total_improvements(), 3);
        assert_eq!(summary.top_repository.name, "strong");
        assert!((summary.averages.technical - 6.5).abs() < 1e-9);
        assert_eq!(summary.strengths[0], "Technical skills development needed");
        assert_eq!(summary.strengths.len(), 4);
    }

    #[test]
    fn test_serializes() {
        let analyses = vec![analysis("one", ScoreSet::new(6.0, 8.0, 6.0), "Rust", 300, &["cli"])];
        let portfolio = aggregate_portfolio("octo", 1, &analyses, Vec::new(), now());

        let json = serde_json::to_value(&portfolio).unwrap();
        assert_eq!(json["total_repositories"], 1);
        assert_eq!(json["languages"][0]["rank"], 1);
        assert_eq!(json["repositories"][0]["category"], "other");
    }

    #[test]
    fn test_counts_degraded_repositories() {
        let complete = analysis("complete", ScoreSet::new(6.0, 6.0, 6.0), "Rust", 100, &[]);
        let mut degraded = analysis("degraded", ScoreSet::new(6.0, 6.0, 6.0), "Rust", 100, &[]);
        let failed: Result<Vec<String>, _> = Err(FetchError::RateLimited { reset_at: None });
        let _ = degraded.search_coverage.absorb("search 'language:Rust stars:>10'", failed);

        let portfolio = aggregate_portfolio("octo", 2, &[complete, degraded], Vec::new(), now());

        assert!(!portfolio.is_partial());
        assert_eq!(portfolio.degraded_repositories, 1);
        assert!(!portfolio.repositories[0].degraded);
        assert!(portfolio.repositories[1].degraded);
    }
}
