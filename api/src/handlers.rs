use axum::{
    extract::{Multipart, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::query_payload::QueryPayload;
use crate::rag_response::{ErrorResponse, RagResponse};
use crate::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "ocr_enabled": state.query_service.ocr_enabled(),
    }))
}

pub async fn handle_query(State(state): State<AppState>, multipart: Multipart) -> Response {
    let payload = match QueryPayload::from_multipart(multipart).await {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("Malformed query form: {}", e);
            return (e.status(), Json(ErrorResponse::new(e.body_text()))).into_response();
        }
    };

    log::info!(
        "Query received (image: {}, text: {} characters)",
        payload.image.as_ref().map(|i| i.filename.as_str()).unwrap_or("none"),
        payload.query.as_deref().map(str::len).unwrap_or(0)
    );

    let outcome = state.query_service.submit(payload.into()).await;
    RagResponse(outcome).into_response()
}
