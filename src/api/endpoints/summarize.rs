//! `POST /summarize` — the input-to-summary resolution pipeline: acquire
//! text from the JSON body or an uploaded file, try the model, fall back
//! to the corpus resolver on any model failure, filter and envelope.

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{AppContext, SummarizeBody, SummarizeResponse, DISCLAIMER};
use crate::extract::{self, ExtractError};
use crate::resolver;
use crate::summarize::{SummaryPair, SummaryType};

/// Echoed input is truncated to keep response sizes predictable.
const MAX_ECHOED_INPUT_CHARS: usize = 5000;

/// File part of a multipart request.
struct Upload {
    filename: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// Handler for `POST /summarize`. Accepts either a JSON body or a
/// multipart form with an optional `file` part.
pub async fn summarize(
    State(ctx): State<AppContext>,
    req: Request,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let is_multipart = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false);

    let (inline_text, summary_type, upload) = if is_multipart {
        read_multipart(req).await?
    } else {
        let Json(body) = Json::<SummarizeBody>::from_request(req, &())
            .await
            .map_err(|_| ApiError::invalid_input())?;
        (
            body.user_input,
            SummaryType::parse(body.summary_type.as_deref()),
            None,
        )
    };

    let response = process(&ctx, inline_text, summary_type, upload).await?;
    Ok(Json(response))
}

/// Drain the multipart stream into its three recognized fields. Unknown
/// fields are ignored.
async fn read_multipart(
    req: Request,
) -> Result<(Option<String>, SummaryType, Option<Upload>), ApiError> {
    let mut multipart = Multipart::from_request(req, &())
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart request: {e}")))?;

    let mut user_input: Option<String> = None;
    let mut summary_type: Option<String> = None;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidInput(format!("Malformed multipart field: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("userInput") => {
                user_input = Some(field.text().await.map_err(|e| {
                    ApiError::InvalidInput(format!("Unreadable userInput field: {e}"))
                })?);
            }
            Some("summaryType") => {
                summary_type = Some(field.text().await.map_err(|e| {
                    ApiError::InvalidInput(format!("Unreadable summaryType field: {e}"))
                })?);
            }
            Some("file") => {
                let filename = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::InvalidInput(format!("Unreadable file upload: {e}"))
                })?;
                upload = Some(Upload {
                    filename,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok((
        user_input,
        SummaryType::parse(summary_type.as_deref()),
        upload,
    ))
}

/// Orchestrate one request: normalize inputs, resolve, filter, envelope.
async fn process(
    ctx: &AppContext,
    inline_text: Option<String>,
    summary_type: SummaryType,
    upload: Option<Upload>,
) -> Result<SummarizeResponse, ApiError> {
    let inline = inline_text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let (text, document) = match upload {
        Some(upload) => acquire_from_upload(inline, upload)?,
        // No file attached: a non-empty text field is mandatory.
        None => (inline.ok_or_else(ApiError::invalid_input)?, None),
    };

    let summaries = resolve_summaries(ctx, &text, document.as_deref()).await;

    Ok(SummarizeResponse {
        success: true,
        input: truncate_chars(&text, MAX_ECHOED_INPUT_CHARS),
        summaries: summaries.filtered(summary_type),
        timestamp: chrono::Utc::now().to_rfc3339(),
        disclaimer: DISCLAIMER,
    })
}

/// Turn an upload into resolution input: either combined text, or the raw
/// bytes of a PDF with no text layer for the model to read directly.
fn acquire_from_upload(
    inline: Option<String>,
    upload: Upload,
) -> Result<(String, Option<Bytes>), ApiError> {
    if extract::is_pdf(upload.content_type.as_deref(), upload.filename.as_deref()) {
        match extract::pdf_text(&upload.bytes) {
            Ok(text) => Ok((join_inputs(inline, Some(text)), None)),
            Err(ExtractError::NoTextLayer) => {
                tracing::info!("PDF has no text layer, deferring to the model's document reader");
                Ok((inline.unwrap_or_default(), Some(upload.bytes)))
            }
            Err(e) => Err(ApiError::Internal(e.to_string())),
        }
    } else {
        let text =
            extract::utf8_text(&upload.bytes).map_err(|e| ApiError::Internal(e.to_string()))?;
        Ok((join_inputs(inline, Some(text)), None))
    }
}

/// Inline text first, extracted file text second.
fn join_inputs(inline: Option<String>, extracted: Option<String>) -> String {
    match (inline, extracted.filter(|t| !t.is_empty())) {
        (Some(a), Some(b)) => format!("{a}\n\n{b}"),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => String::new(),
    }
}

/// Two-stage resolution: the model first, the corpus resolver on any
/// model failure. Model errors never surface to the client.
async fn resolve_summaries(
    ctx: &AppContext,
    text: &str,
    document: Option<&[u8]>,
) -> SummaryPair {
    if let Some(summarizer) = &ctx.summarizer {
        let primary = match document {
            Some(bytes) => summarizer.summarize_pdf(bytes).await,
            None => summarizer.summarize_text(text).await,
        };
        match primary {
            Ok((pair, path)) => {
                tracing::info!(decode_path = ?path, "summaries produced by model");
                return pair;
            }
            Err(e) => {
                tracing::warn!(error = %e, "model stage failed, using corpus resolver");
            }
        }
    } else {
        tracing::debug!("no model credential configured, using corpus resolver");
    }

    let resolution = resolver::resolve(text, &ctx.corpus);
    tracing::info!(rule = ?resolution.rule, "summaries produced by corpus resolver");
    resolution.pair
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
