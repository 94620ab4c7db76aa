// src/api/pagination.rs
//! Cursor pagination loop shared by block listings and database queries.

use super::responses::PaginatedResponse;
use crate::error::BackendError;

/// Items accumulated over every page of a listing.
#[derive(Debug)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Fetches every page, strictly one after another.
///
/// `fetch_fn` receives the cursor of the page to fetch (`None` for the
/// first). Stops once a page reports `has_more == false` or carries no
/// cursor. Any failure aborts the walk and discards what was collected.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<PaginationResult<T>, BackendError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, BackendError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;

        pages_fetched += 1;
        log::debug!(
            "Fetched page {} with {} items (has_more: {})",
            pages_fetched,
            response.results.len(),
            response.has_more
        );

        let has_more = response.has_more;
        cursor = response.next_cursor;
        items.extend(response.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    Ok(PaginationResult {
        items,
        pages_fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test]
    async fn follows_cursors_until_has_more_is_false() {
        let seen = Mutex::new(Vec::new());
        let result = fetch_all_pages(|cursor: Option<String>| {
            seen.lock().unwrap().push(cursor.clone());
            async move {
                Ok(match cursor.as_deref() {
                    None => PaginatedResponse::with_more(vec![1, 2], "c1"),
                    Some("c1") => PaginatedResponse::with_more(vec![3], "c2"),
                    _ => PaginatedResponse::last(vec![4]),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(result.items, vec![1, 2, 3, 4]);
        assert_eq!(result.pages_fetched, 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn stops_when_cursor_is_missing() {
        let result = fetch_all_pages(|_cursor| async {
            Ok(PaginatedResponse {
                object: "list".to_string(),
                results: vec!["only"],
                next_cursor: None,
                has_more: true,
            })
        })
        .await
        .unwrap();

        assert_eq!(result.items, vec!["only"]);
        assert_eq!(result.pages_fetched, 1);
    }

    #[tokio::test]
    async fn failure_mid_walk_returns_no_partial_result() {
        let result: Result<PaginationResult<u8>, _> =
            fetch_all_pages(|cursor: Option<String>| async move {
                match cursor {
                    None => Ok(PaginatedResponse::with_more(vec![1], "next")),
                    Some(_) => Err(BackendError::MalformedResponse("boom".to_string())),
                }
            })
            .await;

        assert!(matches!(result, Err(BackendError::MalformedResponse(_))));
    }
}
