use super::{Priority, Recommendation};
use crate::comparison::ComparisonAggregate;
use crate::facts::RepositoryRecord;
use crate::scoring::ScoreSet;
use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

/// Score used for derived dimensions when there is nothing to compare against.
pub const NEUTRAL_SCORE: f64 = 5.0;
const MAX_DERIVED_SCORE: f64 = 10.0;

/// Basic scores extended with market position and improvement potential.
///
/// [`overall`](Self::overall) averages all five dimensions; the untouched basic
/// scores, including their own overall, remain reachable via [`basic`](Self::basic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnhancedScoreSet {
    basic: ScoreSet,
    market_position: f64,
    improvement_potential: f64,
}

impl EnhancedScoreSet {
    /// Derive the enhanced scores for `repo` from its basic scores, its comparison
    /// set, and the recommendations generated for it.
    #[must_use]
    pub fn compose(basic: ScoreSet, repo: &RepositoryRecord, comparison: &ComparisonAggregate, recommendations: &[Recommendation]) -> Self {
        Self {
            basic,
            market_position: market_position(repo, comparison),
            improvement_potential: improvement_potential(recommendations),
        }
    }

    #[must_use]
    pub const fn basic(&self) -> &ScoreSet {
        &self.basic
    }

    #[must_use]
    pub const fn technical(&self) -> f64 {
        self.basic.technical()
    }

    #[must_use]
    pub const fn quality(&self) -> f64 {
        self.basic.quality()
    }

    #[must_use]
    pub const fn activity(&self) -> f64 {
        self.basic.activity()
    }

    #[must_use]
    pub const fn market_position(&self) -> f64 {
        self.market_position
    }

    #[must_use]
    pub const fn improvement_potential(&self) -> f64 {
        self.improvement_potential
    }

    #[must_use]
    pub fn overall(&self) -> f64 {
        (self.technical() + self.quality() + self.activity() + self.market_position + self.improvement_potential) / 5.0
    }
}

impl Serialize for EnhancedScoreSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EnhancedScoreSet", 7)?;
        state.serialize_field("technical", &self.technical())?;
        state.serialize_field("quality", &self.quality())?;
        state.serialize_field("activity", &self.activity())?;
        state.serialize_field("market_position", &self.market_position)?;
        state.serialize_field("improvement_potential", &self.improvement_potential)?;
        state.serialize_field("overall", &self.overall())?;
        state.serialize_field("basic_overall", &self.basic.overall())?;
        state.end()
    }
}

/// Popularity relative to the comparison set.
///
/// The star ratio replaces the neutral default when the set has stars; the fork
/// ratio is then averaged in when the set has forks. Each ratio is capped at 10
/// before averaging.
fn market_position(repo: &RepositoryRecord, comparison: &ComparisonAggregate) -> f64 {
    let mut score = NEUTRAL_SCORE;

    if comparison.mean_stars > 0.0 {
        score = capped_ratio(repo.stars, comparison.mean_stars);
    }

    if comparison.mean_forks > 0.0 {
        score = f64::midpoint(score, capped_ratio(repo.forks, comparison.mean_forks));
    }

    score.clamp(0.0, MAX_DERIVED_SCORE)
}

#[expect(clippy::cast_precision_loss, reason = "acceptable for ratios")]
fn capped_ratio(value: u64, mean: f64) -> f64 {
    (value as f64 / mean * 10.0).min(MAX_DERIVED_SCORE)
}

/// More outstanding high and medium priority work means more headroom.
fn improvement_potential(recommendations: &[Recommendation]) -> f64 {
    let weight: u32 = recommendations
        .iter()
        .map(|r| match r.priority {
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        })
        .sum();

    (NEUTRAL_SCORE + f64::from(weight) / 10.0).min(MAX_DERIVED_SCORE)
}
