//! Delete trait for removing entities.

use async_trait::async_trait;

use crate::client::HarborClient;
use crate::error::Result;
use crate::response::ResponseMeta;

/// Delete an entity by ID.
#[async_trait]
pub trait Delete: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Delete the entity. The response body is not read.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with a
    /// status other than 200.
    async fn delete(client: &HarborClient, id: Self::Id) -> Result<ResponseMeta>;
}
