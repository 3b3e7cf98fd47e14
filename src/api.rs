//! Storefront API client.
//!
//! Two calls make up the whole remote surface: the product listing and the
//! order submission. [`StorefrontApi`] is the seam the catalog and checkout
//! code depend on; [`HttpStorefrontApi`] is the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::ProductFilter,
    config::ApiConfig,
    orders::{OrderConfirmation, OrderRequest},
    products::ProductRecord,
};

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or decoding error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// Response status
        status: StatusCode,

        /// Compacted preview of the response body
        body: String,
    },
}

/// Remote operations the storefront needs.
#[automock]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// List the products matching `filter`.
    async fn list_products(&self, filter: &ProductFilter)
    -> Result<Vec<ProductRecord>, ApiError>;

    /// Submit an order.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ApiError>;
}

/// HTTP client for the storefront API.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    base_url: String,
    timeout: Duration,
    http: Client,
}

impl HttpStorefrontApi {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            timeout: config.timeout(),
            http: Client::new(),
        }
    }

    fn products_request(&self, filter: &ProductFilter) -> RequestBuilder {
        self.http
            .get(format!("{}/products", self.base_url))
            .query(&filter.query_pairs())
            .timeout(self.timeout)
    }

    fn orders_request(&self, order: &OrderRequest) -> RequestBuilder {
        self.http
            .post(format!("{}/orders", self.base_url))
            .json(order)
            .timeout(self.timeout)
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductRecord>, ApiError> {
        debug!(?filter, "listing products");

        let response = self.products_request(filter).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(response).await;

            warn!(%status, body = %body, "product listing failed");

            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        debug!(lines = order.items.len(), total = %order.total, "submitting order");

        let response = self.orders_request(order).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = error_body(response).await;

            warn!(%status, body = %body, "order submission failed");

            return Err(ApiError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

/// Read a failed response's body as a preview, empty if it cannot be read.
async fn error_body(response: Response) -> String {
    match response.text().await {
        Ok(body) => body_preview(&body),
        Err(error) => {
            debug!(%error, "failed to read error response body");

            String::new()
        }
    }
}

/// Collapse whitespace and cap the length of an error body for display.
fn body_preview(body: &str) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = body.split_whitespace().collect::<Vec<_>>().join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();

    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
