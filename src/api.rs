use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::{ErrorKind, VlrError};
use crate::model::{MatchDetail, MatchSummary};
use crate::VlrClient;

const STATUS_OK: &str = "OK";
const STATUS_ERROR: &str = "ERROR";

#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub status: &'static str,
    pub size: usize,
    pub skipped: usize,
    pub data: Vec<MatchSummary>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub status: &'static str,
    pub data: MatchDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
    pub message: String,
}

/// A [`VlrError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(VlrError);

impl From<VlrError> for ApiError {
    fn from(err: VlrError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.0.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream | ErrorKind::Extraction => StatusCode::BAD_GATEWAY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match kind {
            ErrorKind::Internal => error!(error = %self.0, "request failed"),
            _ => warn!(error = %self.0, %kind, "request failed"),
        }

        let body = ErrorResponse {
            status: STATUS_ERROR,
            error: kind.to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(client: Arc<VlrClient>) -> Router {
    Router::new()
        .route("/matches", get(matches_handler))
        .route("/matches/{id}", get(match_handler))
        .with_state(client)
}

#[axum::debug_handler]
pub async fn matches_handler(
    State(client): State<Arc<VlrClient>>,
) -> Result<Json<MatchesResponse>, ApiError> {
    let list = client.get_matches().await?;
    Ok(Json(MatchesResponse {
        status: STATUS_OK,
        size: list.size,
        skipped: list.skipped,
        data: list.matches,
    }))
}

#[axum::debug_handler]
pub async fn match_handler(
    State(client): State<Arc<VlrClient>>,
    Path(id): Path<String>,
) -> Result<Json<MatchResponse>, ApiError> {
    // match pages live at /<numeric id>; anything else is another kind of page
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VlrError::MatchNotFound { id }.into());
    }
    let detail = client.get_match(&id).await?;
    Ok(Json(MatchResponse {
        status: STATUS_OK,
        data: detail,
    }))
}
