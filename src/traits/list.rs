//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::HarborClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// List entities matching a query.
///
/// Pagination is passed through to the server via the query; one call
/// fetches one page.
#[async_trait]
pub trait List: Sized + Send {
    /// Filter and pagination parameters.
    type Query: Send + Sync + ?Sized;

    /// List entities matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be encoded, the request fails,
    /// or the body does not decode.
    async fn list(client: &HarborClient, query: &Self::Query) -> Result<ApiResponse<Vec<Self>>>;
}
