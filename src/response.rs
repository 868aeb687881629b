//! Response metadata returned alongside every result.

use std::ops::Deref;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use url::Url;

/// Status line and headers of a completed exchange.
///
/// The body is never kept here; it has already been drained (or dropped)
/// by the time this value reaches the caller.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Final URL of the request.
    pub url: Url,
}

impl ResponseMeta {
    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    #[cfg(test)]
    pub(crate) fn for_status(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            url: Url::parse("http://localhost/").expect("static URL"),
        }
    }
}

/// A decoded value together with the response it came from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// The decoded body.
    pub data: T,
    /// Status and headers of the response.
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// Discard the response metadata.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Transform the decoded value, keeping the metadata.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiResponse<U> {
        ApiResponse {
            data: f(self.data),
            meta: self.meta,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}
