use crate::HashMap;
use crate::facts::LanguageHistogram;
use crate::scoring::ScoreSet;
use serde::Serialize;

pub const MAX_RANKED_LANGUAGES: usize = 10;
pub const MAX_RANKED_TOPICS: usize = 15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    /// Share of all bytes in the portfolio, rounded to two decimals
    pub percentage: f64,
    /// 1-based position by byte count
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

/// Mean basic scores across analyzed repositories; `None` when nothing was analyzed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AverageScores {
    pub technical: Option<f64>,
    pub quality: Option<f64>,
    pub activity: Option<f64>,
    pub overall: Option<f64>,
}

/// Sum language histograms and rank languages by share of the grand total.
#[must_use]
pub fn rank_languages<'a>(histograms: impl IntoIterator<Item = &'a LanguageHistogram>) -> Vec<LanguageShare> {
    let mut totals: HashMap<&str, u64> = HashMap::default();
    for histogram in histograms {
        for (language, bytes) in histogram {
            *totals.entry(language.as_str()).or_insert(0) += bytes;
        }
    }

    let grand_total: u64 = totals.values().sum();
    if grand_total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&str, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(MAX_RANKED_LANGUAGES)
        .enumerate()
        .map(|(i, (language, bytes))| LanguageShare {
            language: language.to_string(),
            bytes,
            percentage: round2(share(bytes, grand_total)),
            rank: i + 1,
        })
        .collect()
}

/// Count topic occurrences across repositories, most frequent first.
#[must_use]
pub fn rank_topics<'a>(topics: impl IntoIterator<Item = &'a String>) -> Vec<TopicCount> {
    let mut counts: HashMap<&str, usize> = HashMap::default();
    for topic in topics {
        *counts.entry(topic.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<TopicCount> = counts
        .into_iter()
        .map(|(topic, count)| TopicCount {
            topic: topic.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.topic.cmp(&b.topic)));
    ranked.truncate(MAX_RANKED_TOPICS);
    ranked
}

#[must_use]
pub fn average_scores<'a>(scores: impl IntoIterator<Item = &'a ScoreSet>) -> AverageScores {
    let scores: Vec<&ScoreSet> = scores.into_iter().collect();
    AverageScores {
        technical: mean(scores.iter().map(|s| s.technical())),
        quality: mean(scores.iter().map(|s| s.quality())),
        activity: mean(scores.iter().map(|s| s.activity())),
        overall: mean(scores.iter().map(|s| s.overall())),
    }
}

/// Arithmetic mean rounded to two decimals, `None` for an empty input.
pub(super) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| round2(sum / f64::from(count)))
}

pub(super) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[expect(clippy::cast_precision_loss, reason = "acceptable for percentages")]
fn share(part: u64, total: u64) -> f64 {
    part as f64 / total as f64 * 100.0
}
