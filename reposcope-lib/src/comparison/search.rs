use super::candidate::{CandidateRepository, Provenance, dedupe_and_rank};
use super::keywords::extract_keywords;
use crate::facts::{Coverage, Fetcher, RepositoryRecord};
use futures_util::future::join_all;

const LOG_TARGET: &str = "    search";

const MAX_TOPIC_SEARCHES: usize = 3;
const MAX_QUERY_KEYWORDS: usize = 3;

/// Limits applied to similarity search.
#[derive(Debug, Clone, Copy)]
pub struct SearchLimits {
    /// Cap on the results requested by each sub-search
    pub results_per_search: usize,

    /// Cap on the pooled, deduplicated candidate list
    pub max_candidates: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            results_per_search: 10,
            max_candidates: 20,
        }
    }
}

/// One sub-search to issue against the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub provenance: Provenance,
}

/// Build the sub-searches for a repository: its language, up to three topics,
/// and the leading description keywords.
#[must_use]
pub fn build_queries(repo: &RepositoryRecord) -> Vec<SearchQuery> {
    let mut queries = Vec::new();

    if let Some(language) = repo.language.as_deref().filter(|l| !l.is_empty()) {
        queries.push(SearchQuery {
            text: format!("language:{language} stars:>10"),
            provenance: Provenance::Language,
        });
    }

    for topic in repo.topics.iter().take(MAX_TOPIC_SEARCHES) {
        queries.push(SearchQuery {
            text: format!("topic:{topic} stars:>5"),
            provenance: Provenance::Topic,
        });
    }

    if let Some(description) = &repo.description {
        let keywords = extract_keywords(description);
        if !keywords.is_empty() {
            let leading: Vec<&str> = keywords.iter().take(MAX_QUERY_KEYWORDS).map(String::as_str).collect();
            queries.push(SearchQuery {
                text: format!("{} stars:>5", leading.join(" ")),
                provenance: Provenance::Keyword,
            });
        }
    }

    queries
}

/// Find repositories comparable to `repo`, most popular first.
///
/// Sub-searches run concurrently. A failed sub-search contributes nothing and is
/// counted in the returned [`Coverage`]; it never fails the whole search.
pub async fn find_similar<F: Fetcher>(
    fetcher: &F,
    repo: &RepositoryRecord,
    limits: SearchLimits,
) -> (Vec<CandidateRepository>, Coverage) {
    let queries = build_queries(repo);
    log::debug!(target: LOG_TARGET, "Running {} similarity searches for '{}'", queries.len(), repo.full_name);

    let outcomes = join_all(queries.iter().map(|q| fetcher.search(&q.text, limits.results_per_search))).await;

    let mut searches = Coverage::default();
    let mut pooled = Vec::new();
    for (query, outcome) in queries.iter().zip(outcomes) {
        let hits = searches.absorb(&format!("search '{}'", query.text), outcome);
        log::debug!(target: LOG_TARGET, "Query '{}' returned {} repositories", query.text, hits.len());
        pooled.extend(hits.into_iter().map(|record| CandidateRepository::new(record, query.provenance)));
    }

    let ranked = dedupe_and_rank(pooled, limits.max_candidates);
    log::info!(
        target: LOG_TARGET,
        "Found {} similar repositories for '{}' ({} of {} searches succeeded)",
        ranked.len(),
        repo.full_name,
        searches.succeeded,
        searches.attempted
    );

    (ranked, searches)
}
