//! Project model and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};

use crate::client::HarborClient;
use crate::error::Result;
use crate::models::ListOptions;
use crate::query::Query;
use crate::response::ApiResponse;
use crate::traits::{Get, List};

/// A Harbor project.
///
/// Projects group repositories and carry access control. Fields absent
/// from the payload take their empty value.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Numeric project ID.
    pub project_id: i64,

    /// ID of the owning user.
    pub owner_id: i64,

    /// Project name.
    pub name: String,

    pub creation_time: Option<DateTime<Utc>>,

    pub update_time: Option<DateTime<Utc>>,

    /// Deletion marker; older servers send a number, newer ones a boolean.
    pub deleted: serde_json::Value,

    /// Name of the owning user.
    pub owner_name: String,

    /// Whether the current user may toggle the project's visibility.
    pub togglable: bool,

    /// Role of the current user in this project.
    #[serde(rename = "current_user_role_id")]
    pub role: i64,

    /// Number of repositories in the project.
    pub repo_count: i64,

    /// Project metadata (e.g., `public`, `enable_content_trust`).
    #[serde_as(as = "DefaultOnNull")]
    pub metadata: HashMap<String, String>,
}

impl Project {
    /// Check the `public` metadata flag.
    pub fn is_public(&self) -> bool {
        self.metadata
            .get("public")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Check the deletion marker in either of its wire forms.
    pub fn is_deleted(&self) -> bool {
        match &self.deleted {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
            _ => false,
        }
    }
}

/// Filters for listing projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProjectsOptions {
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,

    /// Filter by project name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Filter by visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Filter by owner name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[async_trait]
impl Get for Project {
    type Id = i64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarborClient, project_id: i64) -> Result<ApiResponse<Self>> {
        let path = format!("projects/{project_id}");
        client.get_json(&path, None).await
    }
}

#[async_trait]
impl List for Project {
    type Query = ListProjectsOptions;

    #[tracing::instrument(skip(client))]
    async fn list(
        client: &HarborClient,
        query: &Self::Query,
    ) -> Result<ApiResponse<Vec<Self>>> {
        let params = Query::record(query)?.encode()?;
        client.get_json("projects", Some(&params)).await
    }
}
