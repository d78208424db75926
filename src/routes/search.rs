use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;
use tracing::info;

use super::ApiError;
use crate::models::responses::SearchResponse;
use crate::services::openlibrary::search_external;
use crate::services::search::{filter_local, paginate};
use crate::AppState;

/// Raw query parameters. Kept as strings so a non-numeric `page`/`size` is
/// rejected by `validate` with the JSON error envelope instead of axum's
/// plain-text extraction rejection.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub size: Option<String>,
}

fn parse_param(raw: &Option<String>, name: &str, default: usize) -> Result<usize, ApiError> {
    match raw {
        Some(value) => value.trim().parse::<usize>().map_err(|_| {
            ApiError::Validation(format!("{} must be a positive integer", name))
        }),
        None => Ok(default),
    }
}

fn validate(params: &SearchParams) -> Result<(String, usize, usize), ApiError> {
    let q = params
        .q
        .as_deref()
        .ok_or_else(|| ApiError::Validation("q is required".to_string()))?;
    let query_len = q.chars().count();
    if !(3..=100).contains(&query_len) {
        return Err(ApiError::Validation(
            "q must be between 3 and 100 characters".to_string(),
        ));
    }

    let page = parse_param(&params.page, "page", 1)?;
    if page < 1 {
        return Err(ApiError::Validation("page must be at least 1".to_string()));
    }

    let size = parse_param(&params.size, "size", 10)?;
    if !(1..=50).contains(&size) {
        return Err(ApiError::Validation(
            "size must be between 1 and 50".to_string(),
        ));
    }

    Ok((q.to_string(), page, size))
}

/// Merges catalog matches with OpenLibrary results (local first) and returns
/// one page of the concatenation. External failures degrade silently to
/// local-only results.
pub async fn search_books(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<SearchResponse>, ApiError> {
    let (query, page, size) = validate(&params)?;

    info!("Search query: {:?}", params);

    let local = filter_local(&state.catalog.all().await, &query);
    let external = search_external(&state.http, &state.config.search_url, &query).await;

    let mut combined = local;
    combined.extend(external);

    Ok(Json(paginate(&query, combined, page, size)))
}
