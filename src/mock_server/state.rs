//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Harbor API server.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::sync::RwLock;

use crate::{Credentials, Project, RepoRecord, TagDetail, TagResp};

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug, Default)]
pub struct MockState {
    /// Projects indexed by ID.
    pub projects: BTreeMap<i64, Project>,

    /// Repositories indexed by full name (e.g., "library/nginx").
    pub repositories: BTreeMap<String, RepoRecord>,

    /// Tags indexed by repository name.
    pub tags: BTreeMap<String, Vec<TagResp>>,

    /// Optional credentials. If set, requests must carry matching basic auth.
    pub required_credentials: Option<Credentials>,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a project to the state.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.project_id, project);
        self
    }

    /// Add a repository to the state.
    pub fn with_repository(mut self, repository: RepoRecord) -> Self {
        self.repositories.insert(repository.name.clone(), repository);
        self
    }

    /// Add tags for a repository.
    pub fn with_tags(mut self, repository: &str, tags: Vec<TagResp>) -> Self {
        self.tags.entry(repository.to_string()).or_default().extend(tags);
        self
    }

    /// Require basic-auth credentials on every request.
    pub fn with_required_credentials(mut self, username: &str, password: &str) -> Self {
        self.required_credentials = Some(Credentials::new(username, password));
        self
    }

    /// Check an `Authorization` header value against the required credentials.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        let Some(required) = &self.required_credentials else {
            return true;
        };

        authorization
            .and_then(|value| value.strip_prefix("Basic "))
            .and_then(|encoded| STANDARD.decode(encoded).ok())
            .and_then(|decoded| String::from_utf8(decoded).ok())
            .is_some_and(|pair| pair == format!("{}:{}", required.username, required.password))
    }

    /// Get a project by ID.
    pub fn get_project(&self, project_id: i64) -> Option<&Project> {
        self.projects.get(&project_id)
    }

    /// List projects matching every given filter.
    pub fn list_projects(
        &self,
        name: Option<&str>,
        public: Option<bool>,
        owner: Option<&str>,
    ) -> Vec<&Project> {
        self.projects
            .values()
            .filter(|p| name.map_or(true, |n| p.name.contains(n)))
            .filter(|p| public.map_or(true, |flag| p.is_public() == flag))
            .filter(|p| owner.map_or(true, |o| p.owner_name == o))
            .collect()
    }

    /// List repositories, optionally restricted to a project and a name term.
    pub fn list_repositories(&self, project_id: Option<i64>, q: Option<&str>) -> Vec<&RepoRecord> {
        self.repositories
            .values()
            .filter(|r| project_id.map_or(true, |id| r.project_id == id))
            .filter(|r| q.map_or(true, |term| r.name.contains(term)))
            .collect()
    }

    /// List tags of a repository; `None` if the repository is unknown.
    pub fn list_tags(&self, repository: &str) -> Option<Vec<&TagResp>> {
        if !self.repositories.contains_key(repository) {
            return None;
        }
        Some(self.tags.get(repository).map(|t| t.iter().collect()).unwrap_or_default())
    }

    /// Get one tag's details.
    pub fn get_tag(&self, repository: &str, tag: &str) -> Option<&TagDetail> {
        self.tags
            .get(repository)?
            .iter()
            .find(|t| t.detail.name == tag)
            .map(|t| &t.detail)
    }

    /// Remove one tag. Returns false if it did not exist.
    pub fn delete_tag(&mut self, repository: &str, tag: &str) -> bool {
        let Some(tags) = self.tags.get_mut(repository) else {
            return false;
        };
        let before = tags.len();
        tags.retain(|t| t.detail.name != tag);
        tags.len() != before
    }

    /// Remove a repository and its tags. Returns false if it did not exist.
    pub fn delete_repository(&mut self, repository: &str) -> bool {
        self.tags.remove(repository);
        match self.repositories.remove(repository) {
            Some(record) => {
                if let Some(project) = self.projects.get_mut(&record.project_id) {
                    project.repo_count = (project.repo_count - 1).max(0);
                }
                true
            }
            None => false,
        }
    }
}
