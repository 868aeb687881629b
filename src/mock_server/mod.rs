//! Mock Harbor API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the Harbor
//! API for integration and end-to-end testing. Unlike wiremock which mocks at
//! the HTTP level per-test, this server keeps state across requests, so a
//! delete is visible to the next list.
//!
//! # Example
//!
//! ```ignore
//! use harborapi::mock_server::MockServer;
//! use harborapi::HarborClient;
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = HarborClient::new(server.url(), "", "").unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = client.projects().get_project_by_id(1).await.unwrap();
//!     assert_eq!(project.name, "library");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::Fixtures;
pub use server::MockServer;
pub use state::MockState;
