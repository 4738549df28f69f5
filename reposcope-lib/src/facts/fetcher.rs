use super::FetchError;
use super::records::{CommitRecord, Contributor, IssueFilter, IssueRecord, LanguageHistogram, RepositoryRecord};

/// Source of repository metadata and signals.
///
/// Every method reports upstream failures. The identity lookups
/// ([`get_repository`](Self::get_repository) and
/// [`list_repositories`](Self::list_repositories)) are terminal for the request;
/// the pipeline absorbs failures of the other methods into empty values and
/// counts them, so the affected signal degrades instead of aborting.
pub trait Fetcher: Send + Sync {
    fn get_repository(&self, account: &str, name: &str) -> impl Future<Output = Result<RepositoryRecord, FetchError>> + Send;

    /// Repositories owned by `account`, most recently updated first, at most `max` of them.
    fn list_repositories(&self, account: &str, max: usize) -> impl Future<Output = Result<Vec<RepositoryRecord>, FetchError>> + Send;

    fn get_languages(&self, account: &str, name: &str) -> impl Future<Output = Result<LanguageHistogram, FetchError>> + Send;

    fn get_contributors(&self, account: &str, name: &str) -> impl Future<Output = Result<Vec<Contributor>, FetchError>> + Send;

    /// Most-recent-first commit history, at most `limit` entries.
    fn get_commits(&self, account: &str, name: &str, limit: usize) -> impl Future<Output = Result<Vec<CommitRecord>, FetchError>> + Send;

    fn get_issues(
        &self,
        account: &str,
        name: &str,
        filter: IssueFilter,
    ) -> impl Future<Output = Result<Vec<IssueRecord>, FetchError>> + Send;

    /// Repository search ordered by stars, descending.
    fn search(&self, query: &str, max_results: usize) -> impl Future<Output = Result<Vec<RepositoryRecord>, FetchError>> + Send;
}
