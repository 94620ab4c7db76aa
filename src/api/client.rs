// src/api/client.rs
//! HTTP implementation of [`NotionTransport`] on top of reqwest.
//!
//! Handles authentication and request plumbing; decoding lives in
//! [`super::parser`].

use super::parser::parse_api_response;
use super::responses::{
    CreateDatabaseRequest, CreatePageRequest, PaginatedResponse, QueryDatabaseRequest,
    UpdatePageRequest,
};
use super::NotionTransport;
use crate::config::BackendConfig;
use crate::constants::{NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::BackendError;
use crate::model::{ChildBlock, Database, Page};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client authenticated with the configured integration token.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(&config.api_key)?)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.as_base().to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, BackendError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            BackendError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

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

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Makes a GET request to `endpoint` (path without base URL).
    pub async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, BackendError> {
        let url = self.url(endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Makes a POST request with a JSON body.
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, BackendError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send().await?)
    }

    /// Makes a PATCH request with a JSON body.
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response, BackendError> {
        let url = self.url(endpoint);
        log::debug!("PATCH {}", url);
        Ok(self.client.patch(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl NotionTransport for NotionHttpClient {
    async fn retrieve_page(&self, id: &NotionId) -> Result<Page, BackendError> {
        let response = self.get(&format!("pages/{}", id.to_hyphenated()), &[]).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn retrieve_database(&self, id: &NotionId) -> Result<Database, BackendError> {
        let response = self
            .get(&format!("databases/{}", id.to_hyphenated()), &[])
            .await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn list_children(
        &self,
        parent: &NotionId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<ChildBlock>, BackendError> {
        let mut query = vec![("page_size", NOTION_API_PAGE_SIZE.to_string())];
        if let Some(cursor) = cursor {
            query.push(("start_cursor", cursor));
        }
        let response = self
            .get(&format!("blocks/{}/children", parent.to_hyphenated()), &query)
            .await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn create_page(&self, request: &CreatePageRequest) -> Result<Page, BackendError> {
        let response = self.post("pages", request).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn create_database(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<Database, BackendError> {
        let response = self.post("databases", request).await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn update_page(
        &self,
        id: &NotionId,
        request: &UpdatePageRequest,
    ) -> Result<Page, BackendError> {
        let response = self
            .patch(&format!("pages/{}", id.to_hyphenated()), request)
            .await?;
        parse_api_response(extract_response_text(response).await?)
    }

    async fn query_database(
        &self,
        id: &NotionId,
        request: &QueryDatabaseRequest,
    ) -> Result<PaginatedResponse<Page>, BackendError> {
        let response = self
            .post(&format!("databases/{}/query", id.to_hyphenated()), request)
            .await?;
        parse_api_response(extract_response_text(response).await?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, BackendError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
