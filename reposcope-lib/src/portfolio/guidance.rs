use super::ranking::{AverageScores, LanguageShare};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CareerGuidance {
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
    pub skill_development: Vec<String>,
    pub networking: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Portfolio-wide advice driven by average scores, language breadth, and category gaps.
#[must_use]
pub fn portfolio_recommendations(
    averages: &AverageScores,
    languages: &[LanguageShare],
    categories: &BTreeMap<String, usize>,
) -> Vec<String> {
    let mut out = Vec::new();

    if averages.quality.unwrap_or(0.0) < 7.0 {
        out.push("Focus on improving code quality and documentation".to_string());
    }

    if averages.activity.unwrap_or(0.0) < 6.0 {
        out.push("Maintain more active development on projects".to_string());
    }

    if languages.len() > 8 {
        out.push("Consider focusing on fewer core technologies for depth".to_string());
    } else if languages.len() < 3 {
        out.push("Explore more programming languages for versatility".to_string());
    }

    if !categories.contains_key("ai-ml") {
        out.push("Consider adding AI/ML projects to stay current".to_string());
    }

    if !categories.contains_key("devops") {
        out.push("Add DevOps projects to show deployment skills".to_string());
    }

    out.extend(strings(&[
        "Regularly update project documentation",
        "Add comprehensive testing to projects",
        "Showcase problem-solving approaches",
        "Highlight business value of projects",
    ]));

    out
}

#[must_use]
pub fn career_guidance(averages: &AverageScores, categories: &BTreeMap<String, usize>) -> CareerGuidance {
    let mut short_term = Vec::new();

    if averages.quality.unwrap_or(0.0) < 7.0 {
        short_term.push("Improve code quality and testing".to_string());
    }

    if categories.len() < 4 {
        short_term.push("Diversify project types".to_string());
    }

    short_term.extend(strings(&["Update project documentation", "Add performance metrics to projects"]));

    CareerGuidance {
        short_term,
        medium_term: strings(&[
            "Build a flagship project",
            "Contribute to open source",
            "Learn emerging technologies",
            "Create technical blog content",
        ]),
        long_term: strings(&[
            "Establish technical leadership",
            "Build industry connections",
            "Consider specialization areas",
            "Explore entrepreneurship",
        ]),
        skill_development: strings(&[
            "Advanced testing strategies",
            "Performance optimization",
            "System design principles",
            "Cloud architecture",
        ]),
        networking: strings(&[
            "Attend tech conferences",
            "Join developer communities",
            "Participate in hackathons",
            "Connect with industry leaders",
        ]),
    }
}
