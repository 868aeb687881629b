//! Execution tests for repository and tag operations.
//!
//! Uses wiremock to mock the Harbor API and check the requests the client sends.

use harborapi::{HarborClient, HarborError, ListOptions, ListRepositoriesOptions};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn tag_json(name: &str) -> serde_json::Value {
    serde_json::json!({
        "digest": "sha256:0a1b2c",
        "name": name,
        "size": 2048,
        "architecture": "amd64",
        "os": "linux",
        "docker_version": "17.12.0-ce",
        "author": "",
        "created": "2018-03-03T08:00:00Z",
        "config": { "labels": null }
    })
}

#[tokio::test]
async fn test_list_repositories_with_project_and_search() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!([
        {
            "repository_id": 10,
            "name": "library/nginx",
            "project_id": 1,
            "description": "",
            "pull_count": 12,
            "star_count": 0,
            "creation_time": "2018-03-02T08:00:00Z",
            "update_time": "2018-03-02T08:00:00Z"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/repositories"))
        .and(query_param("project_id", "1"))
        .and(query_param("q", "nginx"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "admin", "Harbor12345").unwrap();
    let options = ListRepositoriesOptions {
        list: ListOptions::for_page(3, 5),
        project_id: Some(1),
        q: Some("nginx".to_string()),
    };
    let repositories = client
        .repositories()
        .list_repositories(&options)
        .await
        .unwrap();

    assert_eq!(repositories.len(), 1);
    assert_eq!(repositories[0].name, "library/nginx");
    assert_eq!(repositories[0].pull_count, 12);
}

#[tokio::test]
async fn test_list_repository_tags() {
    let mock_server = MockServer::start().await;

    let mut signed = tag_json("1.25");
    signed["signature"] = serde_json::json!({ "tag": "1.25", "hashes": { "sha256": "3q2+7w==" } });
    let response = serde_json::json!([tag_json("latest"), signed]);

    Mock::given(method("GET"))
        .and(path("/repositories/library/nginx/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let tags = client
        .repositories()
        .list_repository_tags("library/nginx")
        .await
        .unwrap();

    assert_eq!(tags.len(), 2);
    assert!(!tags[0].is_signed());
    assert!(tags[1].is_signed());
    assert_eq!(
        tags[1].signature.as_ref().unwrap().hashes["sha256"],
        vec![0xde, 0xad, 0xbe, 0xef]
    );
}

#[tokio::test]
async fn test_get_repository_tag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repositories/library/nginx/tags/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tag_json("latest")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let tag = client
        .repositories()
        .get_repository_tag("library/nginx", "latest")
        .await
        .unwrap();

    assert_eq!(tag.name, "latest");
    assert_eq!(tag.os, "linux");
    assert!(tag.config.as_ref().unwrap().labels.is_empty());
}

#[tokio::test]
async fn test_delete_repository_tag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repositories/lib/app/tags/v1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "admin", "Harbor12345").unwrap();
    let response = client
        .repositories()
        .delete_repository_tag("lib/app", "v1")
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 200);
}

#[tokio::test]
async fn test_delete_does_not_send_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repositories/lib/app"))
        .and(|req: &Request| !req.headers.contains_key("content-type"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    client
        .repositories()
        .delete_repository("lib/app")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_non_200_is_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repositories/lib/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let err = client
        .repositories()
        .delete_repository("lib/missing")
        .await
        .unwrap_err();

    assert!(matches!(err, HarborError::UnexpectedStatus { .. }));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_base_url_with_path_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/repositories/library/redis/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base_url = format!("{}/api", mock_server.uri());
    let client = HarborClient::new(&base_url, "", "").unwrap();
    let tags = client
        .repositories()
        .list_repository_tags("library/redis")
        .await
        .unwrap();

    assert!(tags.is_empty());
}
