//! HTTP client for the SortingHat GraphQL endpoint.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{ApiError, Error, Result};
use crate::models::{Country, Individual, Organization, Page, SearchFilter};
use crate::query::{decode_page, Collection, GraphQlRequest, GraphQlResponse, QueryVariables};

/// Default GraphQL endpoint of a local SortingHat server.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the SortingHat GraphQL API.
///
/// Each call issues exactly one request; failures are returned to the caller
/// as-is, with no retry and no caching.
#[derive(Clone)]
pub struct SortingHatClient {
    http_client: reqwest::Client,
    endpoint: String,
    request_timeout: Duration,
}

/// Builder for [`SortingHatClient`].
#[derive(Debug, Clone)]
pub struct SortingHatClientBuilder {
    endpoint: String,
    request_timeout: Duration,
}

impl SortingHatClientBuilder {
    /// Creates a builder targeting the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the per-request timeout.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute URL or the HTTP
    /// client cannot be initialized.
    pub fn build(self) -> Result<SortingHatClient> {
        if let Err(e) = reqwest::Url::parse(&self.endpoint) {
            return Err(Error::InvalidEndpoint {
                endpoint: self.endpoint,
                reason: e.to_string(),
            });
        }

        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(SortingHatClient {
            http_client,
            endpoint: self.endpoint,
            request_timeout: self.request_timeout,
        })
    }
}

impl SortingHatClient {
    /// Creates a client for the given GraphQL endpoint with default settings.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        SortingHatClientBuilder::new(endpoint).build()
    }

    /// Returns a builder for custom settings.
    pub fn builder(endpoint: impl Into<String>) -> SortingHatClientBuilder {
        SortingHatClientBuilder::new(endpoint)
    }

    /// Returns the GraphQL endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Returns a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Fetches one page of individuals.
    pub async fn individuals(
        &self,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Individual>> {
        let variables = QueryVariables::new(page, page_size, filter.cloned());
        self.fetch_page(Collection::Individuals, &variables).await
    }

    /// Fetches one page of organizations.
    pub async fn organizations(
        &self,
        page: u32,
        page_size: u32,
        filter: Option<&SearchFilter>,
    ) -> Result<Page<Organization>> {
        let variables = QueryVariables::new(page, page_size, filter.cloned());
        self.fetch_page(Collection::Organizations, &variables).await
    }

    /// Fetches countries. Search filters do not apply to this collection.
    pub async fn countries(&self, page: u32, page_size: u32) -> Result<Page<Country>> {
        let variables = QueryVariables::new(page, page_size, None);
        self.fetch_page(Collection::Countries, &variables).await
    }

    /// Runs the collection's paginated query and decodes the page.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        collection: Collection,
        variables: &QueryVariables,
    ) -> Result<Page<T>> {
        let variables = variables.clone().for_collection(collection);
        tracing::debug!(
            %collection,
            page = variables.page,
            page_size = variables.page_size,
            filtered = variables.filter.is_some(),
            "fetching page"
        );

        let value = self.query(collection.document(), collection.field(), &variables).await?;
        let page = decode_page::<T>(value, &variables)?;

        tracing::debug!(
            %collection,
            page = page.page_info.page,
            num_pages = page.page_info.num_pages,
            received = page.entities.len(),
            "page received"
        );
        Ok(page)
    }

    /// Posts a GraphQL document and returns the value of its root field.
    async fn query(&self, document: &str, field: &str, variables: &QueryVariables) -> Result<serde_json::Value> {
        let body = GraphQlRequest {
            query: document,
            variables,
        };

        let response = self.http_client.post(&self.endpoint).json(&body).send().await?;

        let result = self.handle_response(response).await.and_then(|r| r.into_field(field));
        if let Err(e) = &result {
            tracing::warn!(root_field = field, error = %e, "query failed");
        }
        result
    }

    /// Handles the HTTP response, converting it to our error types.
    async fn handle_response(&self, response: reqwest::Response) -> Result<GraphQlResponse> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            let body = serde_json::from_slice::<GraphQlResponse>(&bytes)?;
            return Ok(body);
        }

        Err(self.parse_error_response(response).await)
    }

    /// Parses an error response into our error types.
    async fn parse_error_response(&self, response: reqwest::Response) -> Error {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();

        ApiError::Http {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                message
            },
        }
        .into()
    }
}

impl fmt::Debug for SortingHatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortingHatClient")
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
