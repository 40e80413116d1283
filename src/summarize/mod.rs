//! Model-backed summarization: prompt construction, the Gemini client
//! behind the [`LlmClient`] seam, and best-effort parsing of the model's
//! free-text reply into a summary pair.

pub mod gemini;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod types;

pub use gemini::*;
pub use orchestrator::*;
pub use parser::*;
pub use prompt::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingApiKey,

    #[error("model request failed: {0}")]
    Http(String),

    #[error("model endpoint returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model response contained no candidate text")]
    EmptyResponse,

    #[error("could not locate summaries in model response")]
    Unparseable,
}
