//! Portfolio rollup across an account's repositories
//!
//! Takes the per-repository analyses that succeeded, plus the list of those
//! that did not, and produces rankings, averages, project categories, and the
//! market-position and career-guidance bundles.

mod aggregate;
mod category;
mod guidance;
mod market;
mod ranking;
mod summary;

pub use aggregate::{PortfolioAggregate, RepositoryFailure, RepositorySummary, aggregate_portfolio};
pub use category::categorize;
pub use guidance::{CareerGuidance, career_guidance, portfolio_recommendations};
pub use market::{MarketLabel, MarketPosition, assess_market_position};
pub use ranking::{AverageScores, LanguageShare, MAX_RANKED_LANGUAGES, MAX_RANKED_TOPICS, TopicCount, average_scores, rank_languages, rank_topics};
pub use summary::{EnhancedAverages, EnhancedSummary, TopRepository, enhanced_summary};
