//! Trait definitions for Harbor operations.
//!
//! Each model type implements the traits its endpoints support; the
//! service handles on [`HarborClient`](crate::HarborClient) delegate here.

mod delete;
mod get;
mod list;

pub use delete::Delete;
pub use get::Get;
pub use list::List;
