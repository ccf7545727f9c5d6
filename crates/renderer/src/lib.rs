//! HTTP client for the PDF renderer service.
//!
//! The renderer owns spreadsheet ingestion and PDF layout; this crate only
//! speaks its wire contract. `POST {base_url}/render` with the generation
//! request returns a tagged outcome: either the rendered artifact paths or
//! the distinguished "no orders for this date" result.

use std::time::Duration;

use async_trait::async_trait;
use printq_core::generate::{DocumentGenerator, GenerateOutcome, GeneratedArtifacts};
use printq_core::payload::GenerateRequest;
use printq_core::types::BoxError;
use serde::Deserialize;

/// HTTP request timeout for a render call. Rendering reads spreadsheet
/// data and lays out PDFs, so this is generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Wire shape of a renderer response body.
#[derive(Debug, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum RenderResponse {
    Rendered {
        shipping_list_path: Option<String>,
        guides_path: Option<String>,
        orders_count: i64,
    },
    NoOrders {
        message: String,
    },
}

/// Errors from the renderer HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The renderer returned a non-2xx status code.
    #[error("Renderer error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the renderer service.
pub struct RendererClient {
    client: reqwest::Client,
    base_url: String,
}

impl RendererClient {
    /// Create a new client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8700`.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, base_url }
    }

    async fn render(&self, request: &GenerateRequest) -> Result<RenderResponse, RendererError> {
        let response = self
            .client
            .post(format!("{}/render", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RendererError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<RenderResponse>().await?)
    }
}

#[async_trait]
impl DocumentGenerator for RendererClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateOutcome, BoxError> {
        tracing::info!(
            what = request.what.as_str(),
            date = %request.date,
            "Render requested",
        );

        let outcome = match self.render(request).await? {
            RenderResponse::Rendered {
                shipping_list_path,
                guides_path,
                orders_count,
            } => GenerateOutcome::Rendered(GeneratedArtifacts {
                shipping_list_path,
                guides_path,
                orders_count,
            }),
            RenderResponse::NoOrders { message } => GenerateOutcome::NoOrders { note: message },
        };

        Ok(outcome)
    }
}
