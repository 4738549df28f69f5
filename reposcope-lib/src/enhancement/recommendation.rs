use crate::comparison::ComparisonAggregate;
use crate::facts::RepositoryRecord;
use crate::scoring::ScoreSet;
use serde::Serialize;

const MAX_SUGGESTED_TOPICS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One prioritized improvement item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    /// Expected payoff and effort, in prose
    pub impact: String,
    pub action_items: Vec<String>,
}

impl Recommendation {
    fn new(category: &str, title: impl Into<String>, description: String, priority: Priority, impact: &str, action_items: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            title: title.into(),
            description,
            priority,
            impact: impact.to_string(),
            action_items: action_items.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Compare a repository against its comparison set and list what to improve.
///
/// Every rule is evaluated independently and the output keeps rule order; it is
/// not sorted by priority.
#[must_use]
pub fn recommend(repo: &RepositoryRecord, scores: &ScoreSet, comparison: &ComparisonAggregate) -> Vec<Recommendation> {
    let mut out = Vec::new();

    #[expect(clippy::cast_precision_loss, reason = "star counts are far below 2^52")]
    let (stars, forks) = (repo.stars as f64, repo.forks as f64);

    if stars < comparison.mean_stars * 0.1 {
        out.push(Recommendation::new(
            "Community Engagement",
            "Increase Repository Visibility",
            format!(
                "Your repository has {} stars, while similar top repositories average {:.0} stars. Focus on promoting your project.",
                repo.stars, comparison.mean_stars
            ),
            Priority::High,
            "High impact on discoverability and adoption; moderate, ongoing effort",
            &[
                "Add comprehensive README with screenshots",
                "Create demo videos or live examples",
                "Share on social media and developer communities",
                "Write blog posts about your project",
            ],
        ));
    }

    if forks < comparison.mean_forks * 0.1 {
        out.push(Recommendation::new(
            "Community Contribution",
            "Encourage Community Contributions",
            format!(
                "Your repository has {} forks, while similar repositories average {:.0} forks. Make it easier for others to contribute.",
                repo.forks, comparison.mean_forks
            ),
            Priority::Medium,
            "Medium impact on contributor growth; low one-time effort",
            &[
                "Add CONTRIBUTING.md file",
                "Create good first issue labels",
                "Add code of conduct",
                "Set up issue templates",
            ],
        ));
    }

    if let Some(language) = repo.language.as_deref() {
        let count = comparison.language_count(language);
        if count >= 3 {
            out.push(Recommendation {
                category: "Technology Stack".to_string(),
                title: format!("Leverage {language} Best Practices"),
                description: format!(
                    "{language} is used in {count} of the top similar repositories. Ensure you're following {language} best practices."
                ),
                priority: Priority::Medium,
                impact: "Medium impact on maintainability; moderate effort".to_string(),
                action_items: vec![
                    format!("Follow {language} style guides"),
                    "Add proper linting and formatting".to_string(),
                    format!("Use modern {language} features"),
                    "Add comprehensive tests".to_string(),
                ],
            });
        }
    }

    let missing = missing_topics(repo, comparison);
    if !missing.is_empty() {
        out.push(Recommendation::new(
            "Repository Organization",
            "Add Relevant Topics",
            format!("Consider adding these popular topics: {}", missing.join(", ")),
            Priority::Low,
            "Low impact on search ranking; minimal effort",
            &[
                "Add relevant topics to improve discoverability",
                "Research what topics similar repositories use",
                "Keep topics updated as project evolves",
            ],
        ));
    }

    if scores.quality() < 7.0 {
        out.push(Recommendation::new(
            "Code Quality",
            "Improve Code Quality",
            format!("Your quality score is {:.1}/10. Focus on improving code quality.", scores.quality()),
            Priority::High,
            "High impact on credibility and maintainability; significant effort",
            &[
                "Add comprehensive documentation",
                "Write unit tests",
                "Improve code comments",
                "Follow consistent coding standards",
            ],
        ));
    }

    if scores.activity() < 6.0 {
        out.push(Recommendation::new(
            "Development Activity",
            "Increase Development Activity",
            format!(
                "Your activity score is {:.1}/10. Regular commits improve project credibility.",
                scores.activity()
            ),
            Priority::Medium,
            "Medium impact on perceived health; steady ongoing effort",
            &[
                "Make regular commits",
                "Respond to issues and PRs",
                "Update dependencies regularly",
                "Add new features or improvements",
            ],
        ));
    }

    out
}

/// Topics shared by at least two comparison repositories that `repo` lacks,
/// most common first.
fn missing_topics<'a>(repo: &RepositoryRecord, comparison: &'a ComparisonAggregate) -> Vec<&'a str> {
    let mut missing: Vec<(&str, usize)> = comparison
        .topics
        .iter()
        .filter(|(topic, count)| **count >= 2 && !repo.has_topic(topic))
        .map(|(topic, count)| (topic.as_str(), *count))
        .collect();

    missing.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    missing.into_iter().take(MAX_SUGGESTED_TOPICS).map(|(topic, _)| topic).collect()
}
