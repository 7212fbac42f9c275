//! Relationship server HTTP client implementation.
//!
//! Handles list, detail, article search and CSV export requests.

use crate::api::error::ApiError;
use crate::api::models::{Link, Page, RelationshipDetail};
use crate::query::PageQuery;
use crate::view::TableOptions;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;

/// Operations the table and detail views need from the server.
///
/// Implemented by [`GenieClient`] over HTTP and by in-memory fakes in tests.
pub trait Backend: Clone + Send + Sync + 'static {
    /// Fetch one page of rows for `query`.
    fn fetch_page(&self, query: &PageQuery)
    -> impl Future<Output = Result<Page, ApiError>> + Send;

    /// Fetch the same page as a CSV file body.
    fn export_csv(&self, query: &PageQuery)
    -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Fetch the detail payload for the row with identifier `id`.
    fn fetch_detail(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<RelationshipDetail, ApiError>> + Send;

    /// Search related articles for a gene or disease name.
    fn search_articles(&self, term: &str)
    -> impl Future<Output = Result<Vec<Link>, ApiError>> + Send;
}

/// HTTP client for the relationship server.
#[derive(Debug, Clone)]
pub struct GenieClient {
    /// HTTP client for API requests
    client: Client,
    /// Server root, e.g. `http://localhost:5000`
    base_url: Url,
    /// Endpoint paths and parameter names of the active view
    options: TableOptions,
}

impl GenieClient {
    /// Create a new client for the given server and view.
    ///
    /// # Arguments
    /// * `server_url` - Server root URL
    /// * `options` - Table view options carrying the endpoint paths
    ///
    /// # Returns
    /// * `Result<GenieClient>` - New client or error
    pub fn new(server_url: &str, options: TableOptions) -> anyhow::Result<Self> {
        use anyhow::Context;

        let base_url = Url::parse(server_url)
            .with_context(|| format!("Invalid server URL: {}", server_url))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            options,
        })
    }

    /// Join an endpoint path (and optional escaped segment) onto the server root.
    fn endpoint(&self, path: &str, segment: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(segment) = segment {
                segments.push(segment);
            }
        }
        url
    }

    /// Issue a GET and fail on transport errors or non-success statuses.
    async fn get(&self, url: Url, params: &[(String, String)]) -> Result<Response, ApiError> {
        tracing::debug!(%url, ?params, "GET");

        let response = self
            .client
            .get(url.clone())
            .query(params)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self.get(url.clone(), params).await?;
        let bytes = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl Backend for GenieClient {
    async fn fetch_page(&self, query: &PageQuery) -> Result<Page, ApiError> {
        let url = self.endpoint(&self.options.list_path, None);
        self.get_json(url, &query.to_params(&self.options)).await
    }

    async fn export_csv(&self, query: &PageQuery) -> Result<String, ApiError> {
        let url = self.endpoint(&self.options.list_path, None);
        let mut params = query.to_params(&self.options);
        params.push(("format".to_string(), "csv".to_string()));

        let response = self.get(url.clone(), &params).await?;
        response.text().await.map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })
    }

    async fn fetch_detail(&self, id: &str) -> Result<RelationshipDetail, ApiError> {
        let Some(detail_path) = self.options.detail_path() else {
            return Err(ApiError::NoEndpoint {
                view: self.options.title.clone(),
                operation: "detail",
            });
        };
        let url = self.endpoint(detail_path, Some(id));
        self.get_json(url, &[]).await
    }

    async fn search_articles(&self, term: &str) -> Result<Vec<Link>, ApiError> {
        let url = self.endpoint(&self.options.search_path, None);
        self.get_json(url, &[("q".to_string(), term.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TableOptions;

    #[test]
    fn test_client_new_rejects_bad_url() {
        assert!(GenieClient::new("not a url", TableOptions::relationships()).is_err());
    }

    #[test]
    fn test_endpoint_joins_paths() {
        let client =
            GenieClient::new("http://localhost:5000/", TableOptions::relationships()).unwrap();
        assert_eq!(
            client.endpoint("/relationships", None).as_str(),
            "http://localhost:5000/relationships"
        );
        assert_eq!(
            client.endpoint("/relationships", Some("BRCA1/D001")).as_str(),
            "http://localhost:5000/relationships/BRCA1%2FD001"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let client =
            GenieClient::new("http://example.org/genie", TableOptions::journals()).unwrap();
        assert_eq!(
            client.endpoint("/journals", None).as_str(),
            "http://example.org/genie/journals"
        );
    }
}
