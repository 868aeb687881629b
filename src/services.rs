//! Resource accessors grouping operations per API family.
//!
//! Handles borrow the client, so they are free to create and share its
//! configuration. Each method delegates to the operation traits on the
//! model types.

use crate::client::HarborClient;
use crate::error::Result;
use crate::models::{
    ListProjectsOptions, ListRepositoriesOptions, Project, RepoRecord, TagDetail, TagRef, TagResp,
};
use crate::response::{ApiResponse, ResponseMeta};
use crate::traits::{Delete, Get, List};

/// Project operations.
#[derive(Debug, Clone, Copy)]
pub struct ProjectsService<'a> {
    client: &'a HarborClient,
}

impl<'a> ProjectsService<'a> {
    pub(crate) fn new(client: &'a HarborClient) -> Self {
        Self { client }
    }

    /// Return a project by its numeric ID (`GET projects/{id}`).
    pub async fn get_project_by_id(&self, project_id: i64) -> Result<ApiResponse<Project>> {
        Project::get(self.client, project_id).await
    }

    /// List projects, optionally filtered by name, visibility and owner
    /// (`GET projects`).
    pub async fn list_projects(
        &self,
        options: &ListProjectsOptions,
    ) -> Result<ApiResponse<Vec<Project>>> {
        Project::list(self.client, options).await
    }
}

/// Repository and tag operations.
///
/// Repository names include their project (e.g., `library/nginx`) and are
/// placed into request paths as-is.
#[derive(Debug, Clone, Copy)]
pub struct RepositoriesService<'a> {
    client: &'a HarborClient,
}

impl<'a> RepositoriesService<'a> {
    pub(crate) fn new(client: &'a HarborClient) -> Self {
        Self { client }
    }

    /// Search repositories by project and name (`GET repositories`).
    pub async fn list_repositories(
        &self,
        options: &ListRepositoriesOptions,
    ) -> Result<ApiResponse<Vec<RepoRecord>>> {
        RepoRecord::list(self.client, options).await
    }

    /// List the tags of a repository (`GET repositories/{name}/tags`).
    ///
    /// A tag whose `signature` is `None` is unsigned.
    pub async fn list_repository_tags(&self, repository: &str) -> Result<ApiResponse<Vec<TagResp>>> {
        TagResp::list(self.client, repository).await
    }

    /// Return one tag (`GET repositories/{name}/tags/{tag}`).
    pub async fn get_repository_tag(
        &self,
        repository: &str,
        tag: &str,
    ) -> Result<ApiResponse<TagDetail>> {
        TagDetail::get(self.client, TagRef::new(repository, tag)).await
    }

    /// Delete one tag (`DELETE repositories/{name}/tags/{tag}`).
    pub async fn delete_repository_tag(&self, repository: &str, tag: &str) -> Result<ResponseMeta> {
        TagDetail::delete(self.client, TagRef::new(repository, tag)).await
    }

    /// Delete a repository and all its tags (`DELETE repositories/{name}`).
    pub async fn delete_repository(&self, repository: &str) -> Result<ResponseMeta> {
        RepoRecord::delete(self.client, repository.to_string()).await
    }
}
