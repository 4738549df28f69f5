//! Fixed lookup tables behind the scoring and categorization heuristics.

/// Relative language complexity on a 1-10 scale.
pub static LANGUAGE_COMPLEXITY: &[(&str, f64)] = &[
    ("Assembly", 10.0),
    ("C++", 9.0),
    ("C", 8.0),
    ("Rust", 8.0),
    ("Go", 7.0),
    ("Java", 6.0),
    ("C#", 6.0),
    ("Python", 5.0),
    ("JavaScript", 4.0),
    ("TypeScript", 5.0),
    ("PHP", 4.0),
    ("Ruby", 4.0),
    ("Swift", 6.0),
    ("Kotlin", 6.0),
    ("Scala", 7.0),
    ("HTML", 2.0),
    ("CSS", 2.0),
    ("Markdown", 1.0),
    ("Shell", 3.0),
];

pub const DEFAULT_LANGUAGE_COMPLEXITY: f64 = 5.0;

/// Topics that mark a repository as working in an advanced domain.
pub static ADVANCED_TOPICS: &[&str] = &["ai", "ml", "blockchain", "quantum", "distributed"];

/// Words never used as search keywords.
pub static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are", "was", "were", "be", "been",
    "have", "has", "had", "do", "does", "did", "will", "would", "could", "should",
];

/// Project categories in match order; the first category whose keywords hit wins.
pub static CATEGORIES: &[(&str, &[&str])] = &[
    ("web-development", &["web", "frontend", "backend", "fullstack", "react", "vue", "angular"]),
    ("mobile-development", &["mobile", "ios", "android", "react-native", "flutter"]),
    ("ai-ml", &["ai", "ml", "machine-learning", "deep-learning", "nlp", "computer-vision"]),
    ("data-science", &["data", "analytics", "visualization", "pandas", "numpy", "matplotlib"]),
    ("devops", &["devops", "docker", "kubernetes", "ci-cd", "aws", "azure"]),
    ("backend", &["api", "server", "database", "postgresql", "mongodb", "redis"]),
    ("frontend", &["ui", "ux", "design", "css", "html", "javascript"]),
    ("game-development", &["game", "unity", "unreal", "gaming"]),
    ("blockchain", &["blockchain", "crypto", "web3", "solidity"]),
];

pub const DEFAULT_CATEGORY: &str = "other";

/// Lower-cased languages with strong hiring demand.
pub static HIGH_DEMAND_LANGUAGES: &[&str] = &["python", "javascript", "typescript", "go", "rust"];

/// Categories counted as emerging technology.
pub static EMERGING_TECHNOLOGIES: &[&str] = &["ai-ml", "blockchain", "devops", "cloud"];

#[must_use]
pub fn language_complexity(language: &str) -> f64 {
    LANGUAGE_COMPLEXITY
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(DEFAULT_LANGUAGE_COMPLEXITY, |(_, c)| *c)
}

#[must_use]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
