//! Repository and tag endpoint handlers.
//!
//! Repository names contain `/`, so everything below `/repositories/` is
//! captured as one wildcard and split on the last `/tags` segment.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error_response;
use super::projects::paginate;
use crate::mock_server::state::MockState;
use crate::{RepoRecord, TagResp};

/// Query parameters for listing repositories.
#[derive(Debug, Default, Deserialize)]
pub struct ListRepositoriesQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub project_id: Option<i64>,
    pub q: Option<String>,
}

/// What a path below `/repositories/` refers to.
#[derive(Debug, PartialEq, Eq)]
enum RepositoryPath<'a> {
    Repository(&'a str),
    Tags(&'a str),
    Tag(&'a str, &'a str),
}

impl<'a> RepositoryPath<'a> {
    fn parse(rest: &'a str) -> Self {
        let rest = rest.trim_start_matches('/');
        if let Some(repository) = rest.strip_suffix("/tags") {
            Self::Tags(repository)
        } else if let Some((repository, tag)) = rest.rsplit_once("/tags/") {
            Self::Tag(repository, tag)
        } else {
            Self::Repository(rest)
        }
    }
}

/// GET /repositories
pub async fn list_repositories(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListRepositoriesQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let matching = state.list_repositories(query.project_id, query.q.as_deref());
    let repositories: Vec<RepoRecord> = paginate(&matching, query.page, query.page_size);

    (StatusCode::OK, Json(repositories))
}

/// GET /repositories/{name}/tags and GET /repositories/{name}/tags/{tag}
pub async fn get_repository_path(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(rest): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match RepositoryPath::parse(&rest) {
        RepositoryPath::Tags(repository) => match state.list_tags(repository) {
            Some(tags) => {
                let tags: Vec<TagResp> = tags.into_iter().cloned().collect();
                (StatusCode::OK, Json(tags)).into_response()
            }
            None => error_response(
                StatusCode::NOT_FOUND,
                format!("repository {repository} not found"),
            ),
        },
        RepositoryPath::Tag(repository, tag) => match state.get_tag(repository, tag) {
            Some(detail) => (StatusCode::OK, Json(detail.clone())).into_response(),
            None => error_response(
                StatusCode::NOT_FOUND,
                format!("tag {tag} of repository {repository} not found"),
            ),
        },
        RepositoryPath::Repository(repository) => error_response(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("GET is not supported on repository {repository}"),
        ),
    }
}

/// DELETE /repositories/{name} and DELETE /repositories/{name}/tags/{tag}
pub async fn delete_repository_path(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(rest): Path<String>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match RepositoryPath::parse(&rest) {
        RepositoryPath::Tag(repository, tag) => {
            if state.delete_tag(repository, tag) {
                StatusCode::OK.into_response()
            } else {
                error_response(
                    StatusCode::NOT_FOUND,
                    format!("tag {tag} of repository {repository} not found"),
                )
            }
        }
        RepositoryPath::Repository(repository) => {
            if state.delete_repository(repository) {
                StatusCode::OK.into_response()
            } else {
                error_response(
                    StatusCode::NOT_FOUND,
                    format!("repository {repository} not found"),
                )
            }
        }
        RepositoryPath::Tags(repository) => error_response(
            StatusCode::BAD_REQUEST,
            format!("tag name required to delete from {repository}"),
        ),
    }
}
