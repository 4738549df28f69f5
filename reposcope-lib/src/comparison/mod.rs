//! Comparison-set discovery and aggregation
//!
//! [`find_similar`] issues language, topic, and keyword searches and pools the
//! hits into a deduplicated, popularity-ranked candidate list. [`aggregate`]
//! summarizes the head of that list into a [`ComparisonAggregate`].

mod aggregate;
mod candidate;
mod keywords;
mod search;

pub use aggregate::{BestPractice, ComparisonAggregate, aggregate};
pub use candidate::{CandidateRepository, Provenance, dedupe_and_rank};
pub use keywords::{MAX_KEYWORDS, extract_keywords};
pub use search::{SearchLimits, SearchQuery, build_queries, find_similar};
