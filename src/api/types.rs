//! Shared state and wire types for the HTTP layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::corpus::{Corpus, CorpusRecord};
use crate::summarize::{SummaryPair, Summarizer};

/// Fixed disclaimer attached to every successful summary response.
pub const DISCLAIMER: &str = "This is an AI-generated summary for educational purposes only. \
     Always consult with qualified healthcare professionals for medical advice.";

/// Shared context for all request handlers.
#[derive(Clone)]
pub struct AppContext {
    pub corpus: Arc<Corpus>,
    /// `None` when no model credential is configured; the deterministic
    /// resolver then serves every request.
    pub summarizer: Option<Arc<Summarizer>>,
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(
        corpus: Arc<Corpus>,
        summarizer: Option<Arc<Summarizer>>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            corpus,
            summarizer,
            config,
        }
    }
}

/// JSON body accepted by `POST /summarize`.
#[derive(Debug, Default, Deserialize)]
pub struct SummarizeBody {
    #[serde(rename = "userInput", default)]
    pub user_input: Option<String>,
    #[serde(rename = "summaryType", default)]
    pub summary_type: Option<String>,
}

/// Success envelope for `POST /summarize`.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub success: bool,
    pub input: String,
    pub summaries: SummaryPair,
    pub timestamp: String,
    pub disclaimer: &'static str,
}

/// `GET /health` envelope.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub endpoints: Value,
}

/// `GET /mock-data` envelope.
#[derive(Debug, Serialize)]
pub struct CorpusResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<CorpusRecord>,
    pub message: &'static str,
}

/// Directory of served endpoints, embedded in the health response and the
/// 404 envelope.
pub fn endpoint_directory() -> Value {
    json!({
        "GET /health": "Health check endpoint",
        "POST /summarize": "Generate medical summaries",
        "GET /mock-data": "View available mock data (for testing)",
    })
}
