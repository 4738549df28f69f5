use super::{RepositoryAnalysis, SignalSummary};
use crate::comparison::{SearchLimits, aggregate, find_similar};
use crate::enhancement::{EnhancedScoreSet, recommend};
use crate::facts::{ActivitySignals, Coverage, FetchError, Fetcher, IssueFilter, Progress, RepositoryRecord, Throttler};
use crate::portfolio::{PortfolioAggregate, RepositoryFailure, aggregate_portfolio};
use crate::scoring::{insights, score};
use chrono::{DateTime, Utc};
use core::sync::atomic::{AtomicUsize, Ordering};
use futures_util::future::join_all;
use std::sync::Arc;

const LOG_TARGET: &str = "  pipeline";
const PORTFOLIO_LOG_TARGET: &str = " portfolio";

/// Tunables for the analysis pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzerSettings {
    /// Most recent commits fetched per repository
    pub commit_limit: usize,
    pub search: SearchLimits,
    /// Number of top candidates the comparison aggregate covers
    pub comparison_set_size: usize,
    /// Repositories analyzed at once in portfolio mode
    pub max_concurrent_repositories: usize,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            commit_limit: 100,
            search: SearchLimits::default(),
            comparison_set_size: 5,
            max_concurrent_repositories: 4,
        }
    }
}

/// Runs the scoring and enhancement pipeline against a [`Fetcher`].
///
/// All time windows are measured from the `now` supplied at construction.
#[derive(Debug)]
pub struct Analyzer<F> {
    fetcher: F,
    settings: AnalyzerSettings,
    now: DateTime<Utc>,
}

impl<F: Fetcher> Analyzer<F> {
    pub const fn new(fetcher: F, settings: AnalyzerSettings, now: DateTime<Utc>) -> Self {
        Self { fetcher, settings, now }
    }

    #[must_use]
    pub const fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Analyze one repository end to end.
    ///
    /// Only the identity lookup can fail. Every other signal degrades to empty and
    /// is counted in the coverage fields of the result.
    pub async fn analyze_repository(&self, account: &str, name: &str) -> Result<RepositoryAnalysis, FetchError> {
        let repository = self.fetcher.get_repository(account, name).await?;
        Ok(self.analyze_record(repository).await)
    }

    async fn analyze_record(&self, repository: RepositoryRecord) -> RepositoryAnalysis {
        let (owner, name) = (repository.owner.as_str(), repository.name.as_str());
        log::info!(target: LOG_TARGET, "Analyzing repository '{}'", repository.full_name);

        let (languages, contributors, commits, issues) = tokio::join!(
            self.fetcher.get_languages(owner, name),
            self.fetcher.get_contributors(owner, name),
            self.fetcher.get_commits(owner, name, self.settings.commit_limit),
            self.fetcher.get_issues(owner, name, IssueFilter::All),
        );

        let mut signal_coverage = Coverage::default();
        let languages = signal_coverage.absorb("languages", languages);
        let signals = ActivitySignals {
            contributors: signal_coverage.absorb("contributors", contributors),
            commits: signal_coverage.absorb("commits", commits),
            issues: signal_coverage.absorb("issues", issues),
        };

        let scores = score(&repository, &languages, &signals, self.now);
        log::debug!(
            target: LOG_TARGET,
            "Basic scores for '{}': technical {:.2}, quality {:.2}, activity {:.2}",
            repository.full_name,
            scores.technical(),
            scores.quality(),
            scores.activity()
        );

        let insights = insights(&repository, &languages, &signals, self.now);
        let (similar_repositories, search_coverage) = find_similar(&self.fetcher, &repository, self.settings.search).await;
        let comparison = aggregate(&similar_repositories, self.settings.comparison_set_size, self.now);
        let recommendations = recommend(&repository, &scores, &comparison);
        let enhanced_scores = EnhancedScoreSet::compose(scores, &repository, &comparison, &recommendations);

        log::debug!(
            target: LOG_TARGET,
            "Enhanced overall score for '{}': {:.2} ({} recommendations)",
            repository.full_name,
            enhanced_scores.overall(),
            recommendations.len()
        );

        RepositoryAnalysis {
            signals: SignalSummary::from(&signals),
            signal_coverage,
            repository,
            languages,
            scores,
            enhanced_scores,
            insights,
            similar_repositories,
            search_coverage,
            comparison,
            recommendations,
            analyzed_at: self.now,
        }
    }

    /// Analyze up to `max_repositories` repositories owned by `account` and roll them up.
    ///
    /// Listing the account's repositories must succeed. After that, a repository
    /// whose pipeline fails is dropped and recorded as a failure; the batch carries on.
    pub async fn analyze_portfolio(
        &self,
        account: &str,
        max_repositories: usize,
        progress: &dyn Progress,
    ) -> Result<PortfolioAggregate, FetchError> {
        progress.set_phase("Listing");
        let repositories = self.fetcher.list_repositories(account, max_repositories).await?;
        let total = repositories.len();

        log::info!(target: PORTFOLIO_LOG_TARGET, "Analyzing {total} repositories owned by '{account}'");

        let completed = Arc::new(AtomicUsize::new(0));
        progress.set_phase("Analyzing");
        progress.set_determinate({
            let completed = Arc::clone(&completed);
            Box::new(move || {
                let done = completed.load(Ordering::Relaxed);
                (total as u64, done as u64, format!("{done}/{total} repositories"))
            })
        });

        let throttler = Throttler::new(self.settings.max_concurrent_repositories);
        let (throttler, counter) = (&throttler, &*completed);

        let outcomes = join_all(repositories.iter().map(move |record| async move {
            let _permit = throttler.acquire().await;
            let outcome = self.analyze_repository(account, &record.name).await;
            let _ = counter.fetch_add(1, Ordering::Relaxed);
            (record.name.as_str(), outcome)
        }))
        .await;

        progress.done();

        let mut analyses = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (name, outcome) in outcomes {
            match outcome {
                Ok(analysis) => analyses.push(analysis),
                Err(e) => {
                    log::error!(target: PORTFOLIO_LOG_TARGET, "Could not analyze '{account}/{name}': {e}");
                    failures.push(RepositoryFailure {
                        name: name.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        log::info!(
            target: PORTFOLIO_LOG_TARGET,
            "Analyzed {} of {total} repositories owned by '{account}'",
            analyses.len()
        );

        Ok(aggregate_portfolio(account, total, &analyses, failures, self.now))
    }
}
