use super::ranking::LanguageShare;
use crate::scoring::tables::{EMERGING_TECHNOLOGIES, HIGH_DEMAND_LANGUAGES};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

const LANGUAGES_CONSIDERED: usize = 5;
const LANGUAGES_FOR_ROLES: usize = 3;
const MAX_MARKET_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MarketLabel {
    #[strum(to_string = "High Market Demand")]
    HighDemand,

    #[strum(to_string = "Good Market Position")]
    Good,

    #[strum(to_string = "Growing Market Presence")]
    Growing,
}

impl MarketLabel {
    #[must_use]
    pub const fn from_points(points: u32) -> Self {
        match points {
            6.. => Self::HighDemand,
            4..=5 => Self::Good,
            _ => Self::Growing,
        }
    }
}

impl Serialize for MarketLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketPosition {
    pub position: MarketLabel,
    /// Demand points, capped at 10
    pub score: u32,
    pub insights: Vec<String>,
    pub opportunities: Vec<String>,
}

/// Rate the portfolio's market fit from its leading languages and its categories.
#[must_use]
pub fn assess_market_position(languages: &[LanguageShare], categories: &BTreeMap<String, usize>) -> MarketPosition {
    let mut points = 0;
    let mut insights = Vec::new();

    for share in languages.iter().take(LANGUAGES_CONSIDERED) {
        if HIGH_DEMAND_LANGUAGES.contains(&share.language.to_lowercase().as_str()) {
            points += 2;
            insights.push(format!("Strong demand for {}", share.language));
        }
    }

    for tech in EMERGING_TECHNOLOGIES {
        if categories.contains_key(*tech) {
            points += 1;
            insights.push(format!("Trending technology: {tech}"));
        }
    }

    MarketPosition {
        position: MarketLabel::from_points(points),
        score: points.min(MAX_MARKET_SCORE),
        insights,
        opportunities: market_opportunities(languages, categories),
    }
}

fn market_opportunities(languages: &[LanguageShare], categories: &BTreeMap<String, usize>) -> Vec<String> {
    let mut out = Vec::new();

    for (category, role) in [
        ("ai-ml", "AI/ML Engineering roles"),
        ("devops", "DevOps Engineering positions"),
        ("backend", "Backend Development roles"),
    ] {
        if !categories.contains_key(category) {
            out.push(role.to_string());
        }
    }

    let top: Vec<String> = languages.iter().take(LANGUAGES_FOR_ROLES).map(|l| l.language.to_lowercase()).collect();
    let has = |language: &str| top.iter().any(|l| l == language);

    if has("python") {
        out.push("Python-focused roles".to_string());
    }

    if has("javascript") {
        out.push("Full-stack development".to_string());
    }

    if has("go") || has("rust") {
        out.push("Systems programming roles".to_string());
    }

    out.extend(
        [
            "Software Engineering positions",
            "Technical Leadership roles",
            "Startup technical roles",
            "Open source contributions",
        ]
        .map(String::from),
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(language: &str, rank: usize) -> LanguageShare {
        LanguageShare {
            language: language.to_string(),
            bytes: 100,
            percentage: 10.0,
            rank,
        }
    }

    fn categories(names: &[&str]) -> BTreeMap<String, usize> {
        names.iter().map(|n| ((*n).to_string(), 1)).collect()
    }

    #[test]
    fn test_label_thresholds() {
        assert_eq!(MarketLabel::from_points(7), MarketLabel::HighDemand);
        assert_eq!(MarketLabel::from_points(6), MarketLabel::HighDemand);
        assert_eq!(MarketLabel::from_points(5), MarketLabel::Good);
        assert_eq!(MarketLabel::from_points(4), MarketLabel::Good);
        assert_eq!(MarketLabel::from_points(3), MarketLabel::Growing);
        assert_eq!(MarketLabel::from_points(0), MarketLabel::Growing);
    }

    #[test]
    fn test_points_from_languages_and_categories() {
        let languages = vec![share("Rust", 1), share("Python", 2), share("C", 3)];
        let market = assess_market_position(&languages, &categories(&["ai-ml", "devops", "other"]));

        assert_eq!(market.score, 6);
        assert_eq!(market.position, MarketLabel::HighDemand);
        assert_eq!(
            market.insights,
            vec![
                "Strong demand for Rust",
                "Strong demand for Python",
                "Trending technology: ai-ml",
                "Trending technology: devops",
            ]
        );
    }

    #[test]
    fn test_only_top_five_languages_count() {
        let languages: Vec<_> = ["C", "C++", "Java", "PHP", "Ruby", "Python"]
            .iter()
            .enumerate()
            .map(|(i, l)| share(l, i + 1))
            .collect();
        let market = assess_market_position(&languages, &BTreeMap::new());

        assert_eq!(market.score, 0);
        assert_eq!(market.position, MarketLabel::Growing);
    }

    #[test]
    fn test_score_capped_at_ten() {
        let languages: Vec<_> = ["Python", "JavaScript", "TypeScript", "Go", "Rust"]
            .iter()
            .enumerate()
            .map(|(i, l)| share(l, i + 1))
            .collect();
        let market = assess_market_position(&languages, &categories(&["ai-ml", "blockchain", "devops"]));

        assert_eq!(market.score, 10);
        assert_eq!(market.insights.len(), 8);
    }

    #[test]
    fn test_opportunities() {
        let languages = vec![share("Go", 1), share("Python", 2)];
        let opportunities = market_opportunities(&languages, &categories(&["backend"]));

        assert_eq!(
            opportunities,
            vec![
                "AI/ML Engineering roles",
                "DevOps Engineering positions",
                "Python-focused roles",
                "Systems programming roles",
                "Software Engineering positions",
                "Technical Leadership roles",
                "Startup technical roles",
                "Open source contributions",
            ]
        );
    }

    #[test]
    fn test_label_serializes_as_text() {
        assert_eq!(serde_json::to_value(MarketLabel::Good).unwrap(), "Good Market Position");
    }
}
