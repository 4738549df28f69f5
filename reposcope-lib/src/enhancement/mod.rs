//! Recommendations and enhanced scoring
//!
//! Second scoring pass: compares a repository against its comparison set,
//! emits prioritized [`Recommendation`]s, and folds both into an
//! [`EnhancedScoreSet`].

mod enhanced;
mod recommendation;

pub use enhanced::{EnhancedScoreSet, NEUTRAL_SCORE};
pub use recommendation::{Priority, Recommendation, recommend};
