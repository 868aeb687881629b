//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::HarborClient;
use crate::error::Result;
use crate::response::ApiResponse;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use harborapi::{HarborClient, Project, Get};
///
/// let client = HarborClient::new("https://harbor.example.com/api", "admin", "pw")?;
/// let project = Project::get(&client, 5).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (e.g., a numeric project ID).
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// status other than 200, or the body does not decode.
    async fn get(client: &HarborClient, id: Self::Id) -> Result<ApiResponse<Self>>;
}
