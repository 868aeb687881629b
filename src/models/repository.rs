//! Repository and tag models and trait implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as, DefaultOnNull};

use crate::client::HarborClient;
use crate::error::Result;
use crate::models::ListOptions;
use crate::query::Query;
use crate::response::{ApiResponse, ResponseMeta};
use crate::traits::{Delete, Get, List};

/// A repository record as returned by the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoRecord {
    pub repository_id: i64,
    /// Full repository name, including the project (e.g., "library/nginx").
    pub name: String,
    pub project_id: i64,
    pub description: String,
    pub pull_count: i64,
    pub star_count: i64,
    pub creation_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

impl RepoRecord {
    /// The project part of the repository name.
    pub fn project_name(&self) -> Option<&str> {
        self.name.split_once('/').map(|(project, _)| project)
    }
}

/// Filters for listing repositories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRepositoriesOptions {
    /// Pagination.
    #[serde(flatten)]
    pub list: ListOptions,

    /// Restrict to one project.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,

    /// Repository name search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

/// Image configuration labels.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    #[serde_as(as = "DefaultOnNull")]
    pub labels: HashMap<String, String>,
}

/// Image details for one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagDetail {
    pub digest: String,
    pub name: String,
    /// Image size in bytes.
    pub size: i64,
    pub architecture: String,
    pub os: String,
    pub docker_version: String,
    pub author: String,
    pub created: Option<DateTime<Utc>>,
    pub config: Option<TagConfig>,
}

/// Content-trust signature of a tag. Hash bytes are base64 on the wire.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub tag: String,
    #[serde_as(as = "DefaultOnNull<HashMap<_, Base64>>")]
    pub hashes: HashMap<String, Vec<u8>>,
}

/// Vulnerability counts by severity.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsOverview {
    pub total: i64,
    #[serde_as(as = "DefaultOnNull")]
    pub summary: Vec<ComponentsOverviewEntry>,
}

/// Number of components at one severity level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsOverviewEntry {
    pub severity: i64,
    pub count: i64,
}

/// Summary of the latest vulnerability scan of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImgScanOverview {
    #[serde(rename = "image_digest")]
    pub digest: String,
    #[serde(rename = "scan_status")]
    pub status: String,
    pub job_id: i64,
    pub severity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentsOverview>,
    pub details_key: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

/// A tag as returned by the tag listing: details plus signature and scan
/// overview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResp {
    #[serde(flatten)]
    pub detail: TagDetail,

    /// Present only when the image is signed.
    #[serde(default)]
    pub signature: Option<Signature>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_overview: Option<ImgScanOverview>,
}

impl TagResp {
    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

/// Identifies one tag of one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub repository: String,
    pub tag: String,
}

impl TagRef {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            tag: tag.into(),
        }
    }

    fn path(&self) -> String {
        format!("repositories/{}/tags/{}", self.repository, self.tag)
    }
}

#[async_trait]
impl List for RepoRecord {
    type Query = ListRepositoriesOptions;

    #[tracing::instrument(skip(client))]
    async fn list(
        client: &HarborClient,
        query: &Self::Query,
    ) -> Result<ApiResponse<Vec<Self>>> {
        let params = Query::record(query)?.encode()?;
        client.get_json("repositories", Some(&params)).await
    }
}

#[async_trait]
impl Delete for RepoRecord {
    type Id = String; // Full repository name

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarborClient, name: String) -> Result<ResponseMeta> {
        client.delete(&format!("repositories/{name}")).await
    }
}

#[async_trait]
impl List for TagResp {
    type Query = str; // Full repository name

    #[tracing::instrument(skip(client))]
    async fn list(client: &HarborClient, repository: &str) -> Result<ApiResponse<Vec<Self>>> {
        let path = format!("repositories/{repository}/tags");
        client.get_json(&path, None).await
    }
}

#[async_trait]
impl Get for TagDetail {
    type Id = TagRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &HarborClient, id: TagRef) -> Result<ApiResponse<Self>> {
        client.get_json(&id.path(), None).await
    }
}

#[async_trait]
impl Delete for TagDetail {
    type Id = TagRef;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &HarborClient, id: TagRef) -> Result<ResponseMeta> {
        client.delete(&id.path()).await
    }
}
