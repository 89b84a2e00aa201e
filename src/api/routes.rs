//! HTTP route handlers for Axum.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    api::types::{ContextRequest, HealthDto},
    data::normalize::normalize_text,
    nlp::assemble::{AssemblyReport, ContextAssembler, Document},
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn health(State(state): State<AppState>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok",
        terms: state.matcher.len(),
    })
}

pub async fn build_contexts(
    State(state): State<AppState>,
    Json(request): Json<ContextRequest>,
) -> ApiResult<AssemblyReport> {
    let settings = state
        .settings
        .context_settings(request.nwords, request.prop_before)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let assembler = ContextAssembler::new(state.matcher.clone(), settings)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    let documents: Vec<Document> = request
        .documents
        .into_iter()
        .map(|doc| Document {
            id: doc.id,
            text: doc.text.as_deref().map(normalize_text),
        })
        .collect();

    let report = tokio::task::spawn_blocking(move || assembler.assemble(&documents))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    report.summary().log();
    Ok(Json(report))
}
