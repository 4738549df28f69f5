//! Single-repository scoring
//!
//! Turns one repository's fetched signals into a [`ScoreSet`] plus a handful of
//! rule-based insights. Everything here is synchronous and deterministic given
//! the reference time passed in.

mod insights;
mod score_set;
mod scorer;
pub mod tables;

pub use insights::insights;
pub use score_set::{MAX_SCORE, MIN_SCORE, ScoreSet};
pub use scorer::score;
