//! Project endpoint handlers.

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
use crate::mock_server::state::MockState;
use crate::Project;

/// Query parameters for listing projects.
#[derive(Debug, Default, Deserialize)]
pub struct ListProjectsQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub name: Option<String>,
    pub public: Option<bool>,
    pub owner: Option<String>,
}

/// Slice one page out of `items`; pages are 1-indexed.
pub(crate) fn paginate<T: Clone>(items: &[&T], page: Option<usize>, page_size: Option<usize>) -> Vec<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.unwrap_or(10).max(1);

    items
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .map(|item| (*item).clone())
        .collect()
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(project_id): Path<i64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_project(project_id) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("project {project_id} not found"),
        ),
    }
}

/// GET /projects
pub async fn list_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<ListProjectsQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let matching = state.list_projects(
        query.name.as_deref(),
        query.public,
        query.owner.as_deref(),
    );
    let projects: Vec<Project> = paginate(&matching, query.page, query.page_size);

    (StatusCode::OK, Json(projects))
}
