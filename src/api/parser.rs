// src/api/parser.rs
//! Turns raw Notion responses into typed values or typed errors.

use super::client::ApiResponse;
use super::responses::NotionError;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{BackendError, NotionErrorCode};
use reqwest::StatusCode;

/// Parse any Notion API response body into `T`.
///
/// Non-2xx responses become [`BackendError::NotionApi`], using the code from
/// Notion's error body when it has one and the HTTP status otherwise.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, BackendError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, BackendError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        BackendError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> BackendError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion error from {}: {} ({})",
            url,
            notion_error.code,
            notion_error.message
        );
        return BackendError::NotionApi {
            status: status.as_u16(),
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            request_id: notion_error.request_id,
        };
    }

    BackendError::NotionApi {
        status: status.as_u16(),
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, preview(body)),
        request_id: None,
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn response(status: StatusCode, body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status,
            url: "https://api.notion.com/v1/pages/abc".to_string(),
        }
    }

    #[test]
    fn notion_error_body_maps_to_typed_code() {
        let body = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: abc123",
            "request_id": "req_123"
        }"#;

        let result = parse_api_response::<Page>(response(StatusCode::NOT_FOUND, body));
        match result {
            Err(BackendError::NotionApi {
                status,
                code,
                request_id,
                ..
            }) => {
                assert_eq!(status, 404);
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(request_id.as_deref(), Some("req_123"));
            }
            other => panic!("Expected NotionApi error, got {:?}", other),
        }
    }

    #[test]
    fn non_notion_error_body_falls_back_to_status() {
        let result = parse_api_response::<Page>(response(
            StatusCode::BAD_GATEWAY,
            "<html>upstream down</html>",
        ));
        match result {
            Err(err @ BackendError::NotionApi { .. }) => {
                assert!(!err.is_not_found());
                assert!(err.to_string().contains("http_502"));
            }
            other => panic!("Expected NotionApi error, got {:?}", other),
        }
    }

    #[test]
    fn bad_success_body_is_malformed() {
        let result = parse_api_response::<Page>(response(StatusCode::OK, "{\"id\": 42}"));
        assert!(matches!(result, Err(BackendError::MalformedResponse(_))));
    }

    #[test]
    fn preview_is_char_safe() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        assert_eq!(preview(&body).chars().count(), ERROR_BODY_PREVIEW_LENGTH);
    }
}
