use super::ranking::{mean, round2};
use crate::enhancement::Priority;
use crate::pipeline::RepositoryAnalysis;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnhancedAverages {
    pub technical: f64,
    pub quality: f64,
    pub activity: f64,
    pub market_position: f64,
    pub improvement_potential: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopRepository {
    pub name: String,
    pub overall: f64,
    pub market_position: f64,
}

/// Rollup of enhanced scores and recommendation counts across a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedSummary {
    pub averages: EnhancedAverages,
    pub high_priority: usize,
    pub medium_priority: usize,
    pub top_repository: TopRepository,
    /// One statement each for technical, quality, activity, and market position
    pub strengths: Vec<String>,
}

impl EnhancedSummary {
    #[must_use]
    pub const fn total_improvements(&self) -> usize {
        self.high_priority + self.medium_priority
    }
}

/// Summarize enhanced scores, or `None` when nothing was analyzed.
#[must_use]
pub fn enhanced_summary(analyses: &[RepositoryAnalysis]) -> Option<EnhancedSummary> {
    let first = analyses.first()?;

    let avg = |f: fn(&RepositoryAnalysis) -> f64| mean(analyses.iter().map(f)).unwrap_or_default();
    let technical = avg(|a| a.enhanced_scores.technical());
    let quality = avg(|a| a.enhanced_scores.quality());
    let activity = avg(|a| a.enhanced_scores.activity());
    let market_position = avg(|a| a.enhanced_scores.market_position());
    let improvement_potential = avg(|a| a.enhanced_scores.improvement_potential());
    let overall = round2((technical + quality + activity + market_position + improvement_potential) / 5.0);

    // first repository wins ties
    let top = analyses.iter().skip(1).fold(first, |best, a| {
        if a.enhanced_scores.overall() > best.enhanced_scores.overall() { a } else { best }
    });

    let strengths = vec![
        pick(technical > 7.0, "Strong technical implementation", "Technical skills development needed"),
        pick(quality > 7.0, "High code quality", "Code quality improvement needed"),
        pick(activity > 6.0, "Active development", "Increase development activity"),
        pick(market_position > 6.0, "Good market position", "Improve repository visibility"),
    ];

    Some(EnhancedSummary {
        averages: EnhancedAverages {
            technical,
            quality,
            activity,
            market_position,
            improvement_potential,
            overall,
        },
        high_priority: analyses.iter().map(|a| a.count_priority(Priority::High)).sum(),
        medium_priority: analyses.iter().map(|a| a.count_priority(Priority::Medium)).sum(),
        top_repository: TopRepository {
            name: top.repository.name.clone(),
            overall: top.enhanced_scores.overall(),
            market_position: top.enhanced_scores.market_position(),
        },
        strengths,
    })
}

fn pick(condition: bool, strength: &str, weakness: &str) -> String {
    if condition { strength } else { weakness }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::sample_analysis;
    use crate::scoring::ScoreSet;

    #[test]
    fn test_empty_portfolio_has_no_summary() {
        assert!(enhanced_summary(&[]).is_none());
    }

    #[test]
    fn test_counts_priorities_and_picks_top() {
        let analyses = vec![
            sample_analysis("octo/weak", ScoreSet::new(4.0, 4.0, 4.0), &[Priority::High]),
            sample_analysis("octo/strong", ScoreSet::new(8.0, 8.0, 8.0), &[Priority::High, Priority::Medium, Priority::Low]),
        ];

        let summary = enhanced_summary(&analyses).unwrap();

        assert_eq!(summary.high_priority, 2);
        assert_eq!(summary.medium_priority, 1);
        assert_eq!(summary.total_improvements(), 3);
        assert_eq!(summary.top_repository.name, "strong");
        assert!((summary.averages.technical - 6.0).abs() < 1e-9);
        // no comparison data: every market position is neutral
        assert!((summary.averages.market_position - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_weaknesses_when_averages_are_low() {
        let analyses = vec![sample_analysis("octo/a", ScoreSet::new(6.0, 6.0, 6.0), &[])];

        let summary = enhanced_summary(&analyses).unwrap();

        assert_eq!(
            summary.strengths,
            vec![
                "Technical skills development needed",
                "Code quality improvement needed",
                "Increase development activity",
                "Improve repository visibility",
            ]
        );
    }

    #[test]
    fn test_first_repository_wins_ties() {
        let analyses = vec![
            sample_analysis("octo/first", ScoreSet::new(7.0, 7.0, 7.0), &[]),
            sample_analysis("octo/second", ScoreSet::new(7.0, 7.0, 7.0), &[]),
        ];

        assert_eq!(enhanced_summary(&analyses).unwrap().top_repository.name, "first");
    }
}
