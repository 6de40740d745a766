use std::sync::Arc;

use ghx::core::action::{Action, Effect, update};
use ghx::core::policy;
use ghx::core::state::{App, RepoPanel, SearchPanel};
use ghx::core::task;
use ghx::github::client::GITHUB_ACCEPT;
use ghx::github::{ApiError, GithubApi, GithubClient, SearchOutcome, UserSummary};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn user_json(server: &MockServer, id: u64, login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": id,
        "avatar_url": format!("https://avatars.example/{id}"),
        "html_url": format!("https://github.com/{login}"),
        "repos_url": format!("{}/users/{login}/repos", server.uri()),
        "score": 1.0,
        "type": "User"
    })
}

async fn mount_search(server: &MockServer, term: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", term))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> GithubClient {
    GithubClient::new(Some(server.uri()))
}

// ============================================================================
// User Search
// ============================================================================

#[tokio::test]
async fn test_search_sends_query_page_size_and_accept_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("q", "octocat"))
        .and(query_param("per_page", "5"))
        .and(header("accept", GITHUB_ACCEPT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [user_json(&server, 583231, "octocat")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = assert_ok!(client_for(&server).search_users("octocat").await);
    match outcome {
        SearchOutcome::Found(users) => {
            assert_eq!(users.len(), 1);
            assert_eq!(users[0].login, "octocat");
            assert_eq!(users[0].profile_url, "https://github.com/octocat");
        }
        SearchOutcome::NoMatch => panic!("expected a match"),
    }
}

#[tokio::test]
async fn test_search_with_custom_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 0,
            "incomplete_results": false,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_page_sizes(20, 100);
    assert_ok!(client.search_users("x").await);
}

#[tokio::test]
async fn test_search_zero_results_is_no_match() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "nobody",
        json!({"total_count": 0, "incomplete_results": false, "items": []}),
    )
    .await;

    let outcome = assert_ok!(client_for(&server).search_users("nobody").await);
    assert_eq!(outcome, SearchOutcome::NoMatch);
}

#[tokio::test]
async fn test_search_missing_items_is_parse_error() {
    let server = MockServer::start().await;
    mount_search(&server, "odd", json!({"total_count": 0})).await;

    let err = assert_err!(client_for(&server).search_users("odd").await);
    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_search_server_error_uses_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Internal Server Error"})),
        )
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).search_users("octocat").await);
    assert_eq!(
        err,
        ApiError::Api {
            status: 500,
            message: Some("Internal Server Error".into())
        }
    );
    assert_eq!(err.user_message(), "Internal Server Error");
}

#[tokio::test]
async fn test_search_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 127.0.0.1. (But here's the good news: Authenticated requests get a higher rate limit.)",
            "documentation_url": "https://docs.github.com/rest/overview/resources-in-the-rest-api#rate-limiting"
        })))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).search_users("octocat").await);
    assert!(matches!(err, ApiError::Api { status: 403, .. }));
    assert!(policy::is_rate_limit_message(&err.user_message()));
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).search_users("octocat").await);
    assert_eq!(
        err,
        ApiError::Api {
            status: 502,
            message: None
        }
    );
    assert_eq!(err.user_message(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Nothing listens on port 1
    let client = GithubClient::new(Some("http://127.0.0.1:1".into()));
    let err = assert_err!(client.search_users("octocat").await);
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.user_message().is_empty());
}

// ============================================================================
// Repository Listing
// ============================================================================

#[tokio::test]
async fn test_repositories_fetched_from_repos_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/testuser1/repos"))
        .and(query_param("per_page", "100"))
        .and(header("accept", GITHUB_ACCEPT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 101,
                "name": "repo-alpha",
                "full_name": "testuser1/repo-alpha",
                "html_url": "https://github.com/testuser1/repo-alpha",
                "description": "Desc A",
                "stargazers_count": 10,
                "fork": false
            },
            {
                "id": 102,
                "name": "repo-beta",
                "full_name": "testuser1/repo-beta",
                "html_url": "https://github.com/testuser1/repo-beta",
                "description": null,
                "stargazers_count": 5,
                "fork": true
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let user: UserSummary = serde_json::from_value(user_json(&server, 1, "testuser1")).unwrap();
    let repos = assert_ok!(client_for(&server).list_repositories(&user).await);

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].visible_description(), Some("Desc A"));
    assert_eq!(repos[0].star_count, 10);
    assert_eq!(repos[1].visible_description(), None);
    assert!(repos[1].is_fork);
}

#[tokio::test]
async fn test_repositories_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/ghost/repos"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let user: UserSummary = serde_json::from_value(user_json(&server, 9, "ghost")).unwrap();
    let err = assert_err!(client_for(&server).list_repositories(&user).await);
    assert_eq!(err.user_message(), "Not Found");
}

// ============================================================================
// Full Flow (reducer + task + HTTP client)
// ============================================================================

async fn run_effect(app: &mut App, api: &Arc<dyn GithubApi>, effect: Effect) {
    if let Some(action) = task::perform(api.clone(), effect).await {
        let follow_up = update(app, action);
        assert_eq!(follow_up, Effect::None);
    }
}

#[tokio::test]
async fn test_search_expand_and_collapse_flow() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "testuser",
        json!({
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                user_json(&server, 1, "testuser1"),
                user_json(&server, 2, "testuser2")
            ]
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/users/testuser1/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 101,
                "name": "repo-alpha",
                "full_name": "testuser1/repo-alpha",
                "html_url": "https://github.com/testuser1/repo-alpha",
                "description": "Desc A",
                "stargazers_count": 10,
                "fork": false
            }
        ])))
        .mount(&server)
        .await;

    let api: Arc<dyn GithubApi> = Arc::new(client_for(&server));
    let mut app = App::new();

    let effect = update(&mut app, Action::SubmitSearch("  testuser  ".into()));
    assert_eq!(app.search_panel(), SearchPanel::Searching);
    run_effect(&mut app, &api, effect).await;

    assert!(!app.searching);
    let logins: Vec<&str> = app.users.iter().map(|u| u.login.as_str()).collect();
    assert_eq!(logins, vec!["testuser1", "testuser2"]);

    let first = app.users[0].clone();
    let effect = update(&mut app, Action::ToggleUser(first.clone()));
    assert_eq!(app.repo_panel(), Some(RepoPanel::Loading));
    run_effect(&mut app, &api, effect).await;

    match app.repo_panel() {
        Some(RepoPanel::List(repos)) => assert_eq!(repos[0].name, "repo-alpha"),
        other => panic!("expected repository list, got {:?}", other),
    }

    let effect = update(&mut app, Action::ToggleUser(first));
    assert_eq!(effect, Effect::None);
    assert_eq!(app.repo_panel(), None);
}

#[tokio::test]
async fn test_not_found_flow() {
    let server = MockServer::start().await;
    mount_search(
        &server,
        "nobody",
        json!({"total_count": 0, "incomplete_results": false, "items": []}),
    )
    .await;

    let api: Arc<dyn GithubApi> = Arc::new(client_for(&server));
    let mut app = App::new();

    let effect = update(&mut app, Action::SubmitSearch("nobody".into()));
    run_effect(&mut app, &api, effect).await;

    assert_eq!(
        app.search_panel(),
        SearchPanel::NotFound("User \"nobody\" not found on GitHub.")
    );
}

#[tokio::test]
async fn test_rate_limit_flow_shows_note() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 127.0.0.1."
        })))
        .mount(&server)
        .await;

    let api: Arc<dyn GithubApi> = Arc::new(client_for(&server));
    let mut app = App::new();

    let effect = update(&mut app, Action::SubmitSearch("octocat".into()));
    run_effect(&mut app, &api, effect).await;

    assert!(app.users.is_empty());
    assert_eq!(
        app.search_panel(),
        SearchPanel::Error {
            message: "API rate limit exceeded for 127.0.0.1.",
            rate_limited: true
        }
    );
}
