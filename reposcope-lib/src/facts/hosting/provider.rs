use super::client::{
    Client, CommitPayload, ContributorPayload, HostingApiResult, IssuePayload, RepositoryPayload, SearchPayload,
};
use crate::Result;
use crate::facts::records::{
    CommitRecord, Contributor, IssueFilter, IssueRecord, IssueState, LanguageHistogram, RepositoryRecord,
};
use crate::facts::{FetchError, Fetcher};
use core::time::Duration;
use ohno::EnrichableExt;

const LOG_TARGET: &str = "   hosting";

/// Largest page the GitHub REST API serves.
const MAX_PAGE_SIZE: usize = 100;

/// [`Fetcher`] backed by the GitHub REST v3 API.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    client: Client,
}

impl GitHubFetcher {
    pub fn new(token: Option<&str>, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: Client::new(token, base_url, timeout)?,
        })
    }

    fn repo_path(owner: &str, repo: &str, suffix: &str) -> String {
        format!("/repos/{owner}/{repo}{suffix}")
    }
}

impl Fetcher for GitHubFetcher {
    async fn get_repository(&self, account: &str, name: &str) -> Result<RepositoryRecord, FetchError> {
        log::info!(target: LOG_TARGET, "Querying GitHub for information on repository '{account}/{name}'");

        let path = Self::repo_path(account, name, "");
        let payload: RepositoryPayload = require(self.client.get_json(&path, &[]).await, || {
            format!("repository '{account}/{name}'")
        })?;

        Ok(payload.into())
    }

    async fn list_repositories(&self, account: &str, max: usize) -> Result<Vec<RepositoryRecord>, FetchError> {
        if max == 0 {
            return Ok(Vec::new());
        }

        log::info!(target: LOG_TARGET, "Listing repositories owned by '{account}'");

        let path = format!("/users/{account}/repos");
        let query = [
            ("sort", "updated".to_string()),
            ("type", "owner".to_string()),
            ("per_page", max.min(MAX_PAGE_SIZE).to_string()),
        ];

        let payload: Vec<RepositoryPayload> =
            require(self.client.get_json(&path, &query).await, || format!("account '{account}'"))?;

        let repos: Vec<RepositoryRecord> = payload
            .into_iter()
            .filter(|r| {
                let skip = r.archived || r.disabled;
                if skip {
                    log::debug!(target: LOG_TARGET, "Skipping archived or disabled repository '{}'", r.full_name);
                }
                !skip
            })
            .take(max)
            .map(RepositoryRecord::from)
            .collect();

        log::debug!(target: LOG_TARGET, "Found {} active repositories for '{account}'", repos.len());
        Ok(repos)
    }

    async fn get_languages(&self, account: &str, name: &str) -> Result<LanguageHistogram, FetchError> {
        let path = Self::repo_path(account, name, "/languages");
        require(self.client.get_json(&path, &[]).await, || format!("languages of '{account}/{name}'"))
    }

    async fn get_contributors(&self, account: &str, name: &str) -> Result<Vec<Contributor>, FetchError> {
        let path = Self::repo_path(account, name, "/contributors");
        let query = [("per_page", MAX_PAGE_SIZE.to_string())];

        let payload: Vec<ContributorPayload> =
            require(self.client.get_json(&path, &query).await, || format!("contributors of '{account}/{name}'"))?;

        Ok(payload
            .into_iter()
            .map(|c| Contributor {
                login: c.login,
                contributions: c.contributions,
            })
            .collect())
    }

    async fn get_commits(&self, account: &str, name: &str, limit: usize) -> Result<Vec<CommitRecord>, FetchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let path = Self::repo_path(account, name, "/commits");
        let query = [("per_page", limit.min(MAX_PAGE_SIZE).to_string())];

        let payload: Vec<CommitPayload> =
            require(self.client.get_json(&path, &query).await, || format!("commits of '{account}/{name}'"))?;

        Ok(payload
            .into_iter()
            .take(limit)
            .map(|c| {
                let (author, date) = c.commit.author.map(|a| (a.name, a.date)).unwrap_or_default();
                CommitRecord {
                    sha: c.sha,
                    message: c.commit.message,
                    author,
                    date,
                }
            })
            .collect())
    }

    async fn get_issues(&self, account: &str, name: &str, filter: IssueFilter) -> Result<Vec<IssueRecord>, FetchError> {
        let path = Self::repo_path(account, name, "/issues");
        let query = [("state", filter.to_string()), ("per_page", MAX_PAGE_SIZE.to_string())];

        let payload: Vec<IssuePayload> =
            require(self.client.get_json(&path, &query).await, || format!("issues of '{account}/{name}'"))?;

        Ok(payload.into_iter().filter_map(issue_record).collect())
    }

    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<RepositoryRecord>, FetchError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        log::debug!(target: LOG_TARGET, "Searching GitHub for '{query}'");

        let params = [
            ("q", query.to_string()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", max_results.min(MAX_PAGE_SIZE).to_string()),
        ];

        let payload: SearchPayload =
            require(self.client.get_json("/search/repositories", &params).await, || format!("search results for '{query}'"))?;

        Ok(payload.items.into_iter().take(max_results).map(RepositoryRecord::from).collect())
    }
}

/// Map the outcome of a lookup onto the fetch error taxonomy.
fn require<T>(result: HostingApiResult<T>, resource: impl FnOnce() -> String) -> Result<T, FetchError> {
    match result {
        HostingApiResult::Success(data) => Ok(data),
        HostingApiResult::RateLimited(reset_at) => {
            log::warn!(target: LOG_TARGET, "Hit GitHub rate limit while fetching {}", resource());
            Err(FetchError::RateLimited { reset_at })
        }
        HostingApiResult::NotFound => Err(FetchError::not_found(resource())),
        HostingApiResult::Failed(e) => Err(FetchError::Upstream(e.enrich_with(|| format!("fetching {}", resource())))),
    }
}

fn issue_record(issue: IssuePayload) -> Option<IssueRecord> {
    let state = match issue.state.as_str() {
        "open" => IssueState::Open,
        "closed" => IssueState::Closed,
        other => {
            log::debug!(target: LOG_TARGET, "Skipping issue #{} with unknown state '{other}'", issue.number);
            return None;
        }
    };

    Some(IssueRecord {
        number: issue.number,
        title: issue.title,
        state,
        created_at: issue.created_at,
        closed_at: issue.closed_at,
        labels: issue.labels.into_iter().map(|l| l.name).collect(),
    })
}

impl From<RepositoryPayload> for RepositoryRecord {
    fn from(repo: RepositoryPayload) -> Self {
        Self {
            id: repo.id,
            owner: repo.owner.login,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            language: repo.language,
            topics: repo.topics,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            size: repo.size,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            url: repo.html_url,
        }
    }
}
