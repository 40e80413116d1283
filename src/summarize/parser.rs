//! Best-effort decoding of the model's free-text reply into a summary
//! pair. Structured JSON is tried first; labeled prose sections are the
//! recovery path.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::types::{DecodePath, SummaryPair};
use super::SummarizeError;

static PATIENT_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)patient[\s_-]*friendly").unwrap());
static CLINICIAN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)clinician").unwrap());

/// How far into a labeled span the `label:` colon may sit before we stop
/// treating it as part of the label.
const LABEL_PREFIX_MAX_BYTES: usize = 64;

/// Decode a model reply. Returns the pair plus which path produced it so
/// callers and tests can tell structured replies from recovered ones.
pub fn parse_summary_response(
    response: &str,
) -> Result<(SummaryPair, DecodePath), SummarizeError> {
    if let Some(pair) = decode_json_span(response) {
        return Ok((pair, DecodePath::Structured));
    }
    let pair = extract_labeled_sections(response)?;
    Ok((pair, DecodePath::Heuristic))
}

/// Locate the span between the first `{` and the last `}` and decode it
/// as a JSON object, coercing missing fields to empty strings. A decode
/// that yields two empty fields is treated as a miss so the labeled-
/// section recovery gets its turn.
fn decode_json_span(response: &str) -> Option<SummaryPair> {
    #[derive(Deserialize)]
    struct RawPair {
        #[serde(rename = "patientSummary", default)]
        patient_summary: String,
        #[serde(rename = "clinicianSummary", default)]
        clinician_summary: String,
    }

    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }

    let raw: RawPair = serde_json::from_str(&response[start..=end]).ok()?;
    if raw.patient_summary.is_empty() && raw.clinician_summary.is_empty() {
        return None;
    }
    Some(SummaryPair {
        patient_summary: raw.patient_summary,
        clinician_summary: raw.clinician_summary,
    })
}

/// Carve labeled sections out of prose: the patient span runs from a
/// "patient-friendly"-like label up to the clinician label (or the end of
/// text), the clinician span from its label to the end of text.
fn extract_labeled_sections(response: &str) -> Result<SummaryPair, SummarizeError> {
    let patient_start = PATIENT_LABEL.find(response).map(|m| m.start());
    let clinician_start = CLINICIAN_LABEL.find(response).map(|m| m.start());

    let patient_summary = patient_start
        .map(|start| {
            let end = clinician_start
                .filter(|&c| c > start)
                .unwrap_or(response.len());
            strip_label_prefix(&response[start..end])
        })
        .unwrap_or_default();

    let clinician_summary = clinician_start
        .map(|start| strip_label_prefix(&response[start..]))
        .unwrap_or_default();

    if patient_summary.is_empty() && clinician_summary.is_empty() {
        return Err(SummarizeError::Unparseable);
    }

    Ok(SummaryPair {
        patient_summary,
        clinician_summary,
    })
}

/// Drop a leading `Label:` fragment from a span, keeping everything after
/// the colon. Spans without a near-start colon are returned trimmed.
fn strip_label_prefix(span: &str) -> String {
    match span.find(':') {
        Some(idx) if idx < LABEL_PREFIX_MAX_BYTES => span[idx + 1..].trim().to_string(),
        _ => span.trim().to_string(),
    }
}
