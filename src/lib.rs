//! Harbor API client library.
//!
//! A Rust library for administering projects, repositories and tags of a
//! Harbor container registry over its REST API. Every operation is one
//! request/response exchange authenticated with HTTP basic auth.
//!
//! # Quick Start
//!
//! ```no_run
//! use harborapi::{HarborClient, ListProjectsOptions, ListOptions};
//!
//! #[tokio::main]
//! async fn main() -> harborapi::Result<()> {
//!     let client = HarborClient::new("https://harbor.example.com/api", "admin", "Harbor12345")?;
//!
//!     // Get a project by ID
//!     let project = client.projects().get_project_by_id(1).await?;
//!     println!("Project: {}", project.name);
//!
//!     // List public projects, first page
//!     let options = ListProjectsOptions {
//!         list: ListOptions::for_page(1, 20),
//!         public: Some(true),
//!         ..Default::default()
//!     };
//!     let projects = client.projects().list_projects(&options).await?;
//!     println!("Found {} projects", projects.len());
//!
//!     // Tags of a repository
//!     let tags = client.repositories().list_repository_tags("library/nginx").await?;
//!     for tag in tags.iter() {
//!         println!("{} signed={}", tag.detail.name, tag.is_signed());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`HarborClient`] holds the base URL, transport and credentials and
//!   executes requests.
//! - [`Query`] turns options (raw text, records or maps) into
//!   [`QueryParams`].
//! - [`Get`], [`List`] and [`Delete`] are implemented by the model types;
//!   [`ProjectsService`] and [`RepositoriesService`] group them per
//!   resource family.
//!
//! Successful calls return an [`ApiResponse`] carrying the decoded value and
//! the [`ResponseMeta`]; errors that follow a response carry it too.

mod client;
mod config;
mod error;
mod models;
pub mod query;
mod response;
mod services;
mod traits;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::HarborClient;
pub use config::{Credentials, TransportConfig};
pub use error::{HarborError, Result};
pub use query::{Query, QueryParams};
pub use response::{ApiResponse, ResponseMeta};
pub use services::{ProjectsService, RepositoriesService};

// Re-export traits
pub use traits::{Delete, Get, List};

// Re-export models
pub use models::{
    // Shared options
    ListOptions,
    // Project types
    ListProjectsOptions,
    Project,
    // Repository types
    ComponentsOverview,
    ComponentsOverviewEntry,
    ImgScanOverview,
    ListRepositoriesOptions,
    RepoRecord,
    Signature,
    TagConfig,
    TagDetail,
    TagRef,
    TagResp,
};
