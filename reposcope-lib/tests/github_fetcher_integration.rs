//! Integration tests for the GitHub fetcher against a mock REST API.

use core::time::Duration;
use reposcope_lib::facts::{FetchError, Fetcher, GitHubFetcher, IssueFilter, IssueState};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn repo_json(owner: &str, name: &str, stars: u64) -> Value {
    json!({
        "id": stars + 1,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "owner": { "login": owner },
        "description": format!("The {name} project"),
        "language": "Rust",
        "topics": ["cli", "tooling"],
        "stargazers_count": stars,
        "forks_count": stars / 10,
        "size": 4096,
        "created_at": "2021-03-01T00:00:00Z",
        "updated_at": "2024-05-20T00:00:00Z",
        "html_url": format!("https://github.com/{owner}/{name}")
    })
}

fn fetcher(server: &MockServer) -> GitHubFetcher {
    GitHubFetcher::new(None, &server.uri(), Duration::from_secs(5)).expect("Failed to create fetcher")
}

#[tokio::test]
async fn test_get_repository_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat"))
        .and(header("accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("octo", "cat", 120)))
        .expect(1)
        .mount(&server)
        .await;

    let repo = fetcher(&server).get_repository("octo", "cat").await.expect("Repository should be found");

    assert_eq!(repo.full_name, "octo/cat");
    assert_eq!(repo.owner, "octo");
    assert_eq!(repo.stars, 120);
    assert_eq!(repo.forks, 12);
    assert_eq!(repo.language.as_deref(), Some("Rust"));
    assert_eq!(repo.topics, vec!["cli", "tooling"]);
    assert_eq!(repo.url, "https://github.com/octo/cat");
}

#[tokio::test]
async fn test_get_repository_sends_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat"))
        .and(header("authorization", "token secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_json("octo", "cat", 1)))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = GitHubFetcher::new(Some("secret-token"), &server.uri(), Duration::from_secs(5)).unwrap();
    let _ = fetcher.get_repository("octo", "cat").await.expect("Token should be accepted");
}

#[tokio::test]
async fn test_get_repository_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = fetcher(&server).get_repository("octo", "missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "repository 'octo/missing' not found");
}

#[tokio::test]
async fn test_get_repository_rate_limited_carries_reset_time() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&server)
        .await;

    let err = fetcher(&server).get_repository("octo", "cat").await.unwrap_err();
    match err {
        FetchError::RateLimited { reset_at } => {
            assert_eq!(reset_at.map(|t| t.timestamp()), Some(1_704_067_200));
        }
        other => panic!("expected rate limit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_repository_server_error_is_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = fetcher(&server).get_repository("octo", "cat").await.unwrap_err();
    assert!(matches!(err, FetchError::Upstream(_)));
}

#[tokio::test]
async fn test_get_repository_forbidden_with_quota_left_is_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/private"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-remaining", "4999")
                .insert_header("x-ratelimit-reset", "1704067200"),
        )
        .mount(&server)
        .await;

    let err = fetcher(&server).get_repository("octo", "private").await.unwrap_err();
    assert!(matches!(err, FetchError::Upstream(_)), "expected upstream failure, got {err:?}");
    assert!(err.to_string().contains("forbidden"));
}

#[tokio::test]
async fn test_optional_signal_failures_are_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/contributors"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let fetcher = fetcher(&server);
    assert!(matches!(fetcher.get_languages("octo", "cat").await, Err(FetchError::Upstream(_))));
    assert!(matches!(fetcher.get_contributors("octo", "cat").await, Err(FetchError::RateLimited { .. })));
    assert!(matches!(fetcher.get_commits("octo", "cat", 10).await, Err(FetchError::Upstream(_))));
    // no mock mounted: wiremock answers 404
    let err = fetcher.get_issues("octo", "cat", IssueFilter::All).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_signals_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rust": 9000, "Shell": 100 })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/contributors"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "login": "alice", "contributions": 40 },
            { "login": "bob", "contributions": 2 }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/commits"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "sha": "a1", "commit": { "message": "first", "author": { "name": "Alice", "date": "2024-05-01T00:00:00Z" } } },
            { "sha": "b2", "commit": { "message": "second", "author": null } },
            { "sha": "c3", "commit": { "message": "third", "author": { "name": "Bob", "date": "2024-04-01T00:00:00Z" } } }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/octo/cat/issues"))
        .and(query_param("state", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "number": 1, "title": "Open bug", "state": "open", "created_at": "2024-01-01T00:00:00Z", "closed_at": null, "labels": [{ "name": "bug" }] },
            { "number": 2, "title": "Fixed", "state": "closed", "created_at": "2024-01-01T00:00:00Z", "closed_at": "2024-01-05T00:00:00Z", "labels": [] },
            { "number": 3, "title": "Odd", "state": "locked", "created_at": "2024-01-01T00:00:00Z", "closed_at": null, "labels": [] }
        ])))
        .mount(&server)
        .await;

    let fetcher = fetcher(&server);

    let languages = fetcher.get_languages("octo", "cat").await.expect("Languages should decode");
    assert_eq!(languages.get("Rust"), Some(&9000));
    assert_eq!(languages.len(), 2);

    let contributors = fetcher.get_contributors("octo", "cat").await.expect("Contributors should decode");
    assert_eq!(contributors.len(), 2);
    assert_eq!(contributors[0].login, "alice");

    let commits = fetcher.get_commits("octo", "cat", 2).await.expect("Commits should decode");
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].author, "Alice");
    assert_eq!(commits[1].sha, "b2");
    assert!(commits[1].date.is_empty());

    let issues = fetcher.get_issues("octo", "cat", IssueFilter::All).await.expect("Issues should decode");
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].state, IssueState::Open);
    assert_eq!(issues[0].labels, vec!["bug"]);
    assert_eq!(issues[1].closed_at.as_deref(), Some("2024-01-05T00:00:00Z"));
}

#[tokio::test]
async fn test_list_repositories_skips_archived_and_truncates() {
    let server = MockServer::start().await;

    let mut archived = repo_json("octo", "old", 5);
    archived["archived"] = json!(true);
    let mut disabled = repo_json("octo", "off", 5);
    disabled["disabled"] = json!(true);

    Mock::given(method("GET"))
        .and(path("/users/octo/repos"))
        .and(query_param("sort", "updated"))
        .and(query_param("type", "owner"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            archived,
            repo_json("octo", "a", 1),
            disabled,
            repo_json("octo", "b", 2),
            repo_json("octo", "c", 3)
        ])))
        .mount(&server)
        .await;

    let repos = fetcher(&server).list_repositories("octo", 2).await.expect("Listing should succeed");
    let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn test_list_repositories_unknown_account() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost/repos"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher(&server).list_repositories("ghost", 10).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_list_repositories_zero_max_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let repos = fetcher(&server).list_repositories("octo", 0).await.unwrap();
    assert!(repos.is_empty());
}

#[tokio::test]
async fn test_search_uses_star_ordering() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "language:Rust stars:>10"))
        .and(query_param("sort", "stars"))
        .and(query_param("order", "desc"))
        .and(query_param("per_page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "items": [repo_json("a", "one", 300), repo_json("b", "two", 200), repo_json("c", "three", 100)]
        })))
        .mount(&server)
        .await;

    let results = fetcher(&server).search("language:Rust stars:>10", 2).await.expect("Search should succeed");
    let names: Vec<_> = results.iter().map(|r| r.full_name.as_str()).collect();
    assert_eq!(names, vec!["a/one", "b/two"]);
}

#[tokio::test]
async fn test_search_failure_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let err = fetcher(&server).search("topic:cli stars:>5", 10).await.unwrap_err();
    assert!(matches!(err, FetchError::Upstream(_)));
}

#[tokio::test]
async fn test_search_with_no_hits_is_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": 0, "items": [] })))
        .mount(&server)
        .await;

    let results = fetcher(&server).search("topic:nothing stars:>5", 10).await.expect("Empty search should succeed");
    assert!(results.is_empty());
}
