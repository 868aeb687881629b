//! Harbor API model types.

mod project;
mod repository;

pub use project::*;
pub use repository::*;

use serde::{Deserialize, Serialize};

/// Pagination options shared by the list endpoints.
///
/// Embedded (flattened) into resource-specific option types; unset fields
/// are left out of the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Page of results to retrieve (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of results per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl ListOptions {
    /// Options for a specific page.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }
}
