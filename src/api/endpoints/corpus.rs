//! Corpus inspection endpoint, kept for frontend testing.

use axum::extract::State;
use axum::Json;

use crate::api::types::{AppContext, CorpusResponse};

/// `GET /mock-data` — the full resolver corpus.
pub async fn mock_data(State(ctx): State<AppContext>) -> Json<CorpusResponse> {
    Json(CorpusResponse {
        success: true,
        count: ctx.corpus.len(),
        data: ctx.corpus.records().to_vec(),
        message: "Available mock medical data for testing",
    })
}
