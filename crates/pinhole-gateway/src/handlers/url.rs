use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pinhole_core::{
    BatchError, EntryStatus, RegistryStats, Resolution, ShortCode, ShortenParams,
};

use crate::error::{AppError, Result};
use crate::model::{
    BatchCreateRequest, BatchCreateResponse, BatchItem, CreateUrlRequest, CreateUrlResponse,
    ListUrlsResponse, UrlResponse,
};
use crate::state::AppState;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;
    let params = ShortenParams::try_from(request)?;
    let shortened = state.shortener().shorten(params)?;

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse::new(shortened, &state)),
    ))
}

pub async fn batch_create_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<BatchCreateRequest>, JsonRejection>,
) -> Result<Json<BatchCreateResponse>> {
    let Json(request) = payload?;
    let batch = request
        .urls
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            ShortenParams::try_from(entry)
                .map_err(|source| BatchError::InvalidEntry { index, source })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let outcome = state.shortener().shorten_batch(batch)?;
    let succeeded = outcome.iter().filter(|r| r.is_ok()).count();

    Ok(Json(BatchCreateResponse {
        succeeded,
        failed: outcome.len() - succeeded,
        results: outcome
            .into_iter()
            .map(|r| BatchItem::new(r, &state))
            .collect(),
    }))
}

pub async fn list_urls_handler(State(state): State<AppState>) -> Json<ListUrlsResponse> {
    let snapshot = state.shortener().snapshot();
    Json(ListUrlsResponse::new(snapshot, &state))
}

/// Reports one entry without counting a click.
pub async fn get_url_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>> {
    let Ok(short_code) = ShortCode::new(code.as_str()) else {
        return Err(AppError::NotFound(code));
    };

    // Read before classifying, so an active entry never reports negative
    // time left.
    let now = state.shortener().now();
    let (entry, status) = match state.shortener().inspect(&short_code) {
        Resolution::Active(entry) => (entry, EntryStatus::Active),
        Resolution::Expired(entry) => (entry, EntryStatus::Expired),
        Resolution::NotFound => return Err(AppError::NotFound(code)),
    };

    Ok(Json(UrlResponse::new(entry, status, now, &state)))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.shortener().stats())
}
