use serde::{Deserialize, Serialize};

use super::SummarizeError;

/// The two summaries every resolution produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPair {
    pub patient_summary: String,
    pub clinician_summary: String,
}

impl SummaryPair {
    /// Blank the fields the caller did not ask for.
    pub fn filtered(mut self, summary_type: SummaryType) -> Self {
        match summary_type {
            SummaryType::Patient => self.clinician_summary.clear(),
            SummaryType::Clinician => self.patient_summary.clear(),
            SummaryType::Both => {}
        }
        self
    }
}

/// Caller-selected filter for which summary fields are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryType {
    Patient,
    Clinician,
    #[default]
    Both,
}

impl SummaryType {
    /// Lenient parse: unknown or absent values fall back to `Both`, the
    /// way the HTTP surface has always treated the field.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("patient") => Self::Patient,
            Some(v) if v.eq_ignore_ascii_case("clinician") => Self::Clinician,
            _ => Self::Both,
        }
    }
}

/// Which decode path produced a parsed summary pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePath {
    /// The reply carried a decodable JSON object.
    Structured,
    /// Labeled sections were carved out of plain prose.
    Heuristic,
}

/// Generative model client abstraction (allows mocking).
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a text prompt and return the model's raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizeError>;

    /// Send a prompt alongside a raw document (e.g. a scanned PDF with no
    /// text layer) for the model to read directly.
    async fn generate_with_document(
        &self,
        prompt: &str,
        document: &[u8],
        mime_type: &str,
    ) -> Result<String, SummarizeError>;
}
