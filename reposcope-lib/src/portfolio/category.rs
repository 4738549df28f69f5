use crate::facts::LanguageHistogram;
use crate::scoring::tables::{CATEGORIES, DEFAULT_CATEGORY};

/// Assign a repository to exactly one project category.
///
/// Topics are tried against the whole category table before languages are; in
/// each pass the first category with a matching keyword wins. Language names
/// are lower-cased before matching; topics are already lower case.
#[must_use]
pub fn categorize(topics: &[String], languages: &LanguageHistogram) -> &'static str {
    let by_topic = CATEGORIES
        .iter()
        .find(|(_, keywords)| topics.iter().any(|t| keywords.contains(&t.as_str())));

    if let Some((category, _)) = by_topic {
        return *category;
    }

    let lowered: Vec<String> = languages.keys().map(|l| l.to_lowercase()).collect();
    CATEGORIES
        .iter()
        .find(|(_, keywords)| lowered.iter().any(|l| keywords.contains(&l.as_str())))
        .map_or(DEFAULT_CATEGORY, |(category, _)| *category)
}
