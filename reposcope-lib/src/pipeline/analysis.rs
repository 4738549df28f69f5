use crate::comparison::{CandidateRepository, ComparisonAggregate};
use crate::enhancement::{EnhancedScoreSet, Priority, Recommendation};
use crate::facts::{ActivitySignals, Coverage, LanguageHistogram, RepositoryRecord};
use crate::scoring::ScoreSet;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Counts distilled from a repository's activity signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SignalSummary {
    pub contributors: usize,
    pub commits: usize,
    pub open_issues: usize,
    pub closed_issues: usize,
}

impl From<&ActivitySignals> for SignalSummary {
    fn from(signals: &ActivitySignals) -> Self {
        Self {
            contributors: signals.contributors.len(),
            commits: signals.commits.len(),
            open_issues: signals.open_issues(),
            closed_issues: signals.closed_issues(),
        }
    }
}

/// Everything produced by one pass of the single-repository pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryAnalysis {
    pub repository: RepositoryRecord,
    pub languages: LanguageHistogram,
    pub signals: SignalSummary,

    /// The four optional signal fetches: languages, contributors, commits, issues
    pub signal_coverage: Coverage,
    pub scores: ScoreSet,
    pub enhanced_scores: EnhancedScoreSet,
    pub insights: Vec<String>,
    pub similar_repositories: Vec<CandidateRepository>,

    /// One entry per similarity sub-search
    pub search_coverage: Coverage,
    pub comparison: ComparisonAggregate,
    pub recommendations: Vec<Recommendation>,
    pub analyzed_at: DateTime<Utc>,
}

impl RepositoryAnalysis {
    /// Whether any optional signal or similarity search could not be fetched.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.signal_coverage.is_partial() || self.search_coverage.is_partial()
    }

    #[must_use]
    pub fn count_priority(&self, priority: Priority) -> usize {
        self.recommendations.iter().filter(|r| r.priority == priority).count()
    }
}

/// Analysis of a bare repository with the given basic scores and one
/// recommendation per listed priority.
#[cfg(test)]
pub fn sample_analysis(full_name: &str, scores: ScoreSet, priorities: &[Priority]) -> RepositoryAnalysis {
    use chrono::TimeZone;

    let repository = crate::facts::sample_record(full_name);
    let comparison = ComparisonAggregate::default();
    let recommendations: Vec<Recommendation> = priorities
        .iter()
        .map(|p| Recommendation {
            category: "Test".into(),
            title: format!("{p} item"),
            description: String::new(),
            priority: *p,
            impact: String::new(),
            action_items: Vec::new(),
        })
        .collect();
    let enhanced_scores = EnhancedScoreSet::compose(scores, &repository, &comparison, &recommendations);

    RepositoryAnalysis {
        repository,
        languages: LanguageHistogram::new(),
        signals: SignalSummary::default(),
        signal_coverage: Coverage::default(),
        scores,
        enhanced_scores,
        insights: Vec::new(),
        similar_repositories: Vec::new(),
        search_coverage: Coverage::default(),
        comparison,
        recommendations,
        analyzed_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    }
}
