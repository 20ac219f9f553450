use axum::extract::{Path, State};
use axum::response::Redirect;
use pinhole_core::{Resolution, ShortCode};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Sends the caller on to the original URL, counting one click.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    // a malformed code can never have been issued
    let Ok(short_code) = ShortCode::new(code.as_str()) else {
        return Err(AppError::NotFound(code));
    };

    match state.redirector().redirect(&short_code) {
        Resolution::Active(entry) => Ok(Redirect::temporary(&entry.original_url)),
        Resolution::Expired(_) => Err(AppError::Expired(code)),
        Resolution::NotFound => Err(AppError::NotFound(code)),
    }
}
