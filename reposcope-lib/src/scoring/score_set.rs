use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;

/// Basic 1-10 scores for one repository.
///
/// The overall score is always the mean of the other three, so there is no way
/// to set it directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSet {
    technical: f64,
    quality: f64,
    activity: f64,
}

impl ScoreSet {
    /// Build a score set, clamping each input into `[1, 10]`.
    #[must_use]
    pub fn new(technical: f64, quality: f64, activity: f64) -> Self {
        Self {
            technical: technical.clamp(MIN_SCORE, MAX_SCORE),
            quality: quality.clamp(MIN_SCORE, MAX_SCORE),
            activity: activity.clamp(MIN_SCORE, MAX_SCORE),
        }
    }

    #[must_use]
    pub const fn technical(&self) -> f64 {
        self.technical
    }

    #[must_use]
    pub const fn quality(&self) -> f64 {
        self.quality
    }

    #[must_use]
    pub const fn activity(&self) -> f64 {
        self.activity
    }

    #[must_use]
    pub fn overall(&self) -> f64 {
        (self.technical + self.quality + self.activity) / 3.0
    }
}

impl Serialize for ScoreSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ScoreSet", 4)?;
        state.serialize_field("technical", &self.technical)?;
        state.serialize_field("quality", &self.quality)?;
        state.serialize_field("activity", &self.activity)?;
        state.serialize_field("overall", &self.overall())?;
        state.end()
    }
}
