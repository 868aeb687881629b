//! Execution tests for project operations.
//!
//! Uses wiremock to mock the Harbor API and check the requests the client sends.

use harborapi::{Get, HarborClient, HarborError, ListOptions, ListProjectsOptions, Project};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const ADMIN_AUTH: &str = "Basic YWRtaW46SGFyYm9yMTIzNDU=";

fn project_json(project_id: i64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "project_id": project_id,
        "owner_id": 1,
        "name": name,
        "creation_time": "2018-03-01T08:00:00Z",
        "update_time": "2018-03-01T08:00:00Z",
        "deleted": 0,
        "owner_name": "admin",
        "togglable": true,
        "current_user_role_id": 1,
        "repo_count": 2,
        "metadata": { "public": "true" }
    })
}

#[tokio::test]
async fn test_get_project_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/5"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(5, "library")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "admin", "Harbor12345").unwrap();
    let response = client.projects().get_project_by_id(5).await.unwrap();

    assert_eq!(response.project_id, 5);
    assert_eq!(response.name, "library");
    assert_eq!(response.meta.status.as_u16(), 200);
}

#[tokio::test]
async fn test_get_sends_basic_auth_and_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .and(header("authorization", ADMIN_AUTH))
        .and(header("content-type", "application/json;charset=UTF-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(1, "library")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "admin", "Harbor12345").unwrap();
    let project = Project::get(&client, 1).await.unwrap();

    assert_eq!(project.data.name, "library");
}

#[tokio::test]
async fn test_empty_credentials_send_no_auth_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .and(|req: &Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(1, "library")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    client.projects().get_project_by_id(1).await.unwrap();
}

#[tokio::test]
async fn test_set_basic_auth_applies_to_next_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .and(header("authorization", ADMIN_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(1, "library")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = HarborClient::new(&mock_server.uri(), "guest", "guest").unwrap();
    client.set_basic_auth("admin", "Harbor12345");

    client.projects().get_project_by_id(1).await.unwrap();
}

#[tokio::test]
async fn test_list_projects_with_filters() {
    let mock_server = MockServer::start().await;

    let response = serde_json::json!([project_json(1, "library"), project_json(2, "library-dev")]);

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "20"))
        .and(query_param("name", "library"))
        .and(query_param("public", "true"))
        .and(|req: &Request| !req.url.query_pairs().any(|(k, _)| k == "owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "admin", "Harbor12345").unwrap();
    let options = ListProjectsOptions {
        list: ListOptions::for_page(1, 20),
        name: Some("library".to_string()),
        public: Some(true),
        owner: None,
    };
    let projects = client.projects().list_projects(&options).await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].name, "library-dev");
}

#[tokio::test]
async fn test_list_projects_default_options_send_no_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(|req: &Request| req.url.query().is_none())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let projects = client
        .projects()
        .list_projects(&Default::default())
        .await
        .unwrap();

    assert!(projects.is_empty());
}

#[tokio::test]
async fn test_non_200_returns_status_error_with_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/404"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-request-id", "abc123")
                .set_body_json(serde_json::json!({ "code": 404, "message": "not found" })),
        )
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let err = client.projects().get_project_by_id(404).await.unwrap_err();

    assert!(matches!(err, HarborError::UnexpectedStatus { .. }));
    assert!(err.to_string().contains("404"));
    assert_eq!(err.status_code(), Some(404));

    let response = err.response().expect("response should accompany the error");
    assert_eq!(
        response.headers.get("x-request-id").and_then(|v| v.to_str().ok()),
        Some("abc123")
    );
}

#[tokio::test]
async fn test_other_success_codes_are_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json(1, "library")))
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let err = client.projects().get_project_by_id(1).await.unwrap_err();

    assert_eq!(err.status_code(), Some(201));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let err = client.projects().get_project_by_id(1).await.unwrap_err();

    assert!(matches!(err, HarborError::Decode { .. }));
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_shape_mismatch_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json(1, "library")))
        .mount(&mock_server)
        .await;

    let client = HarborClient::new(&mock_server.uri(), "", "").unwrap();
    let err = client
        .projects()
        .list_projects(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, HarborError::Decode { .. }));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Bind and drop a listener so nothing accepts on the port.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = HarborClient::new(&uri, "", "").unwrap();
    let err = client.projects().get_project_by_id(1).await.unwrap_err();

    assert!(matches!(err, HarborError::Transport(_)));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn test_truncated_body_is_body_read_error() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n{\"project_id\":")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = HarborClient::new(&uri, "", "").unwrap();
    let err = client.projects().get_project_by_id(1).await.unwrap_err();

    assert!(matches!(err, HarborError::BodyRead { .. }));
    assert_eq!(err.status_code(), Some(200));
    assert!(err.response().unwrap().url.path().ends_with("/projects/1"));

    server.await.unwrap();
}
