//! Mock Harbor API server.
//!
//! Provides an axum-based HTTP server that simulates the Harbor API.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Harbor API server for testing.
///
/// The server runs in the background and can be used to test the Harbor
/// client against a realistic API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `HarborClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    /// Create the default state with common test fixtures.
    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    /// Create state from a scenario.
    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for repository in scenario.repositories {
            state = state.with_repository(repository);
        }

        for (repository, tags) in scenario.tags {
            state = state.with_tags(&repository, tags);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Project routes
            .route("/projects", get(handlers::list_projects))
            .route("/projects/:id", get(handlers::get_project))
            // Repository and tag routes
            .route("/repositories", get(handlers::list_repositories))
            .route(
                "/repositories/*rest",
                get(handlers::get_repository_path).delete(handlers::delete_repository_path),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests whose basic auth does not match the required credentials.
async fn require_auth(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = {
        let state = state.read().await;
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.is_authorized(header)
    };

    if !authorized {
        return handlers::error_response(StatusCode::UNAUTHORIZED, "unauthorized".to_string());
    }
    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
