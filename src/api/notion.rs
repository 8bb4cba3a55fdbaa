// src/api/notion.rs
//! Thin HTTP client for the Notion API.
//!
//! Handles authentication and the single database-query request this
//! gateway needs. Parsing stays next to the request so the error
//! envelope and the success payload are handled in one place.

use crate::config::ApiToken;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::{GatewayError, UpstreamErrorCode};
use crate::model::RowPage;
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around a reqwest `Client` with Notion authentication.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(token: &ApiToken) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(token: &ApiToken) -> Result<header::HeaderMap, GatewayError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                GatewayError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    async fn post<T: serde::Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, GatewayError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::WorkspaceSource for NotionHttpClient {
    async fn query_rows(&self, database_id: &str) -> Result<RowPage, GatewayError> {
        let endpoint = format!("databases/{}/query", database_id);
        let body = json!({ "page_size": NOTION_API_PAGE_SIZE });

        let response = self.post(&endpoint, &body).await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            parse_row_page(&text)
        } else {
            Err(parse_error_envelope(&text, status))
        }
    }
}

/// Wire shape of the Notion error envelope.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    code: String,
    message: String,
}

fn parse_row_page(body: &str) -> Result<RowPage, GatewayError> {
    serde_json::from_str(body).map_err(|e| {
        let preview = if body.len() > 500 {
            format!("{}...", &body[..500])
        } else {
            body.to_string()
        };
        log::error!("failed to parse query response: {} (body: {})", e, preview);
        GatewayError::MalformedResponse(e.to_string())
    })
}

/// Classifies a non-success response into the typed error vocabulary,
/// falling back to the bare HTTP status when the envelope is unparseable.
fn parse_error_envelope(body: &str, status: StatusCode) -> GatewayError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => GatewayError::UpstreamService {
            code: UpstreamErrorCode::from_api_response(&envelope.code),
            message: envelope.message,
            status: status.as_u16(),
        },
        Err(_) => GatewayError::UpstreamService {
            code: UpstreamErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {}", status),
            status: status.as_u16(),
        },
    }
}
