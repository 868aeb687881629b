//! Harbor API client.
//!
//! Low-level HTTP client that handles authentication and raw requests.
//! Resource operations are implemented via traits on model types and
//! grouped into service handles (see [`HarborClient::projects`] and
//! [`HarborClient::repositories`]).

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{Credentials, TransportConfig};
use crate::error::{HarborError, Result};
use crate::query::QueryParams;
use crate::response::{ApiResponse, ResponseMeta};
use crate::services::{ProjectsService, RepositoriesService};

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Low-level Harbor API client.
///
/// Holds the base URL, the HTTP transport and basic-auth credentials.
/// Cloning is cheap; clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use harborapi::HarborClient;
///
/// # async fn example() -> harborapi::Result<()> {
/// let client = HarborClient::new("https://harbor.example.com/api", "admin", "Harbor12345")?;
/// let project = client.projects().get_project_by_id(1).await?;
/// println!("{}", project.name);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HarborClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Credentials,
}

impl std::fmt::Debug for HarborClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarborClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.credentials.username)
            .finish_non_exhaustive()
    }
}

impl HarborClient {
    /// Create a client with the default transport.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Harbor API root (e.g., `https://harbor.example.com/api`)
    /// * `username` - Basic-auth user; empty together with `password` disables auth
    /// * `password` - Basic-auth password
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the transport cannot
    /// be built.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let http = TransportConfig::default().build_http_client()?;
        Self::with_http_client(http, base_url, username, password)
    }

    /// Create a client that sends requests through `http`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_http_client(
        http: Client,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        // Ensure base URL ends with / so relative paths append to it
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut client = Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Credentials::default(),
        };
        client.set_basic_auth(username, password);
        Ok(client)
    }

    /// Replace the basic-auth credentials.
    pub fn set_basic_auth(&mut self, username: &str, password: &str) -> &mut Self {
        self.credentials = Credentials::new(username, password);
        self
    }

    /// Current basic-auth credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService<'_> {
        ProjectsService::new(self)
    }

    /// Repository and tag operations.
    pub fn repositories(&self) -> RepositoriesService<'_> {
        RepositoriesService::new(self)
    }

    /// Absolute URL for `path` with `query` appended to any existing query.
    pub fn endpoint(&self, path: &str, query: Option<&QueryParams>) -> Result<Url> {
        let mut url = self.base_url.join(path)?;

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.pairs());
        }

        Ok(url)
    }

    /// Make a GET request and return the full response body.
    #[tracing::instrument(skip(self, query))]
    pub async fn get(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<Vec<u8>>> {
        let url = self.endpoint(path, query)?;
        let request = self.http.get(url).header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        let response = self.send(request).await?;
        let meta = ResponseMeta::from_response(&response);

        match response.bytes().await {
            Ok(body) => Ok(ApiResponse {
                data: body.to_vec(),
                meta,
            }),
            Err(source) => Err(HarborError::BodyRead {
                source,
                response: meta,
            }),
        }
    }

    /// Make a GET request and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&QueryParams>,
    ) -> Result<ApiResponse<T>> {
        let ApiResponse { data, meta } = self.get(path, query).await?;

        match serde_json::from_slice(&data) {
            Ok(data) => Ok(ApiResponse { data, meta }),
            Err(source) => Err(HarborError::Decode {
                source,
                response: meta,
            }),
        }
    }

    /// Make a DELETE request. No body is read.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<ResponseMeta> {
        let url = self.endpoint(path, None)?;
        let response = self.send(self.http.delete(url)).await?;
        Ok(ResponseMeta::from_response(&response))
    }

    /// Attach credentials, send, and check the status.
    ///
    /// A failed response is dropped here, which releases its connection.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let request = if self.credentials.is_empty() {
            request
        } else {
            request.basic_auth(&self.credentials.username, Some(&self.credentials.password))
        };

        let response = request.send().await.map_err(HarborError::Transport)?;
        Self::check_response(response)
    }

    /// Check response status and convert errors.
    fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "received response");

        if status == StatusCode::OK {
            return Ok(response);
        }

        tracing::warn!(url = %response.url(), %status, "unexpected status code");
        Err(HarborError::UnexpectedStatus {
            response: ResponseMeta::from_response(&response),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = HarborClient::new("https://harbor.example.com/api", "admin", "s3cret").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("HarborClient"));
        assert!(debug.contains("base_url"));
        // Password should not be in debug output
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = HarborClient::new("https://harbor.example.com/api", "", "").unwrap();
        let client2 = HarborClient::new("https://harbor.example.com/api/", "", "").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HarborClient::new("not a url", "", "").unwrap_err();
        assert!(matches!(err, HarborError::InvalidUrl(_)));
    }

    #[test]
    fn test_set_basic_auth_is_fluent() {
        let mut client = HarborClient::new("https://harbor.example.com/api", "", "").unwrap();
        assert!(client.credentials().is_empty());

        let username = client
            .set_basic_auth("admin", "Harbor12345")
            .credentials()
            .username
            .clone();
        assert_eq!(username, "admin");
        assert_eq!(client.credentials().password, "Harbor12345");
    }

    #[test]
    fn test_endpoint_appends_path() {
        let client = HarborClient::new("https://harbor.example.com/api", "", "").unwrap();
        let url = client.endpoint("repositories/lib/app/tags/v1", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://harbor.example.com/api/repositories/lib/app/tags/v1"
        );
    }

    #[test]
    fn test_endpoint_repeats_multi_valued_params() {
        let client = HarborClient::new("https://harbor.example.com/api", "", "").unwrap();
        let query: QueryParams = [("page", "1"), ("tag", "a"), ("tag", "b c")]
            .into_iter()
            .collect();

        let url = client.endpoint("projects", Some(&query)).unwrap();
        assert_eq!(url.query(), Some("page=1&tag=a&tag=b+c"));
    }

    #[test]
    fn test_endpoint_keeps_base_query() {
        let client = HarborClient::new("https://harbor.example.com/api/", "", "").unwrap();
        let query: QueryParams = [("name", "lib")].into_iter().collect();

        let url = client.endpoint("projects?detail=1", Some(&query)).unwrap();
        assert_eq!(url.query(), Some("detail=1&name=lib"));
    }

    #[test]
    fn test_endpoint_empty_query_adds_nothing() {
        let client = HarborClient::new("https://harbor.example.com/api", "", "").unwrap();
        let url = client.endpoint("projects/5", Some(&QueryParams::new())).unwrap();
        assert_eq!(url.query(), None);
    }
}
