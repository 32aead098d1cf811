//! Page and API handlers.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{
        Query, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::StatusCode,
    response::Html,
};

use crate::analysis::{AnalyzeError, EMPTY_TEXT, TEXT_REQUIRED, validate_text};
use crate::classifier::Sentiment;
use crate::web::server::AppState;
use crate::web::types::*;
use crate::web::view::{HomeView, render_home};

/// Upper bound for `GET /api/history?limit=`.
const MAX_HISTORY_PAGE: usize = 100;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a workflow failure to a status and JSON error body.
///
/// Classifier and storage failures are logged here and reported without detail.
fn error_response(err: AnalyzeError) -> ApiError {
    match err {
        AnalyzeError::EmptyText(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
        }
        AnalyzeError::Classifier(e) => {
            tracing::error!(error = %e, "Request failed: classifier unavailable");
            internal_error()
        }
        AnalyzeError::Storage(e) => {
            tracing::error!(error = %e, "Request failed: history store unavailable");
            internal_error()
        }
    }
}

fn body_too_large() -> ApiError {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorResponse::new("Request body too large")),
    )
}

fn internal_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

pub async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let history = state.analyzer.recent().await.map_err(error_response)?;
    Ok(Html(render_home(&HomeView {
        sentiment: None,
        history,
    })))
}

pub async fn analyze_form_handler(
    State(state): State<Arc<AppState>>,
    form: Result<Form<AnalyzeForm>, FormRejection>,
) -> Result<Html<String>, ApiError> {
    // No body, or a body that is not a form, submits no text.
    let text = match form {
        Ok(Form(form)) => form.text,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(body_too_large());
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected analyze form body");
            String::new()
        }
    };
    let text = validate_text(&text, EMPTY_TEXT).map_err(error_response)?;
    let sentiment = state.analyzer.analyze(text).await.map_err(error_response)?;
    let history = state.analyzer.recent().await.map_err(error_response)?;

    Ok(Html(render_home(&HomeView {
        sentiment: Some(sentiment),
        history,
    })))
}

pub async fn api_analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Sentiment>, ApiError> {
    // A malformed body carries no usable text either.
    let text = match payload {
        Ok(Json(req)) => req.text.unwrap_or_default(),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(body_too_large());
        }
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "Rejected analyze request body");
            String::new()
        }
    };
    let text = validate_text(&text, TEXT_REQUIRED).map_err(error_response)?;
    let sentiment = state.analyzer.analyze(text).await.map_err(error_response)?;
    Ok(Json(sentiment))
}

pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(state.analyzer.history_limit())
        .min(MAX_HISTORY_PAGE);
    let records = state
        .analyzer
        .recent_with_limit(limit)
        .await
        .map_err(error_response)?;
    Ok(Json(HistoryResponse { records }))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
