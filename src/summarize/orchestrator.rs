use super::parser::parse_summary_response;
use super::prompt::{build_document_prompt, build_text_prompt};
use super::types::{DecodePath, LlmClient, SummaryPair};
use super::SummarizeError;

/// Media type sent with the direct-binary document variant.
const PDF_MIME_TYPE: &str = "application/pdf";

/// Drives one model round trip: build the prompt, call the client, decode
/// the reply. Every error is recoverable; callers fall back to the
/// deterministic resolver.
pub struct Summarizer {
    client: Box<dyn LlmClient>,
}

impl Summarizer {
    pub fn new(client: Box<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Summarize free text.
    pub async fn summarize_text(
        &self,
        text: &str,
    ) -> Result<(SummaryPair, DecodePath), SummarizeError> {
        let prompt = build_text_prompt(text);
        let reply = self.client.generate(&prompt).await?;
        let (pair, path) = parse_summary_response(&reply)?;
        tracing::debug!(decode_path = ?path, "model reply decoded");
        Ok((pair, path))
    }

    /// Summarize a PDF the model reads directly (no usable text layer).
    pub async fn summarize_pdf(
        &self,
        document: &[u8],
    ) -> Result<(SummaryPair, DecodePath), SummarizeError> {
        let prompt = build_document_prompt();
        let reply = self
            .client
            .generate_with_document(&prompt, document, PDF_MIME_TYPE)
            .await?;
        let (pair, path) = parse_summary_response(&reply)?;
        tracing::debug!(decode_path = ?path, "model reply decoded (document variant)");
        Ok((pair, path))
    }
}
