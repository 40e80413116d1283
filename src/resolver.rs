//! Deterministic fallback resolver: maps a free-text query to a summary
//! pair by scanning the corpus with exact, substring, and keyword-overlap
//! heuristics. Pure function over immutable data, serving whenever the
//! model stage is unavailable or fails.

use crate::corpus::Corpus;
use crate::summarize::SummaryPair;

/// Queries shorter than this (after trimming) skip the corpus entirely.
const MIN_QUERY_CHARS: usize = 3;
/// Minimum shared-word count for a keyword match.
const MIN_COMMON_WORDS: usize = 2;
/// Words at or below this length never count toward keyword overlap.
const SHORT_WORD_CHARS: usize = 3;

const INSUFFICIENT_INPUT_PATIENT: &str =
    "Please provide more detailed information about your medical concern for a better summary.";
const INSUFFICIENT_INPUT_CLINICIAN: &str =
    "Insufficient input provided. Request additional patient information for proper clinical assessment.";

/// Which rule produced the resolution. Diagnostic only; never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    InsufficientInput,
    Exact,
    Substring,
    Keyword,
    Default,
}

/// A resolved summary pair plus the rule that produced it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub pair: SummaryPair,
    pub rule: MatchRule,
}

/// Resolve a query against the corpus.
///
/// Records are scanned in corpus order and the first record satisfying any
/// rule wins; within one record the rules apply as exact, then substring
/// containment in either direction, then keyword overlap. The scan is not
/// a global best-match: an earlier record's substring hit beats a later
/// record's exact match.
pub fn resolve(query: &str, corpus: &Corpus) -> Resolution {
    let normalized = query.trim().to_lowercase();

    if normalized.chars().count() < MIN_QUERY_CHARS {
        tracing::debug!("query below minimum length, returning insufficient-input pair");
        return Resolution {
            pair: SummaryPair {
                patient_summary: INSUFFICIENT_INPUT_PATIENT.into(),
                clinician_summary: INSUFFICIENT_INPUT_CLINICIAN.into(),
            },
            rule: MatchRule::InsufficientInput,
        };
    }

    for record in corpus.records() {
        let record_input = record.input.to_lowercase();

        if normalized == record_input {
            tracing::debug!(record = %record.input, "exact match");
            return Resolution { pair: record.pair(), rule: MatchRule::Exact };
        }

        if normalized.contains(&record_input) || record_input.contains(&normalized) {
            tracing::debug!(record = %record.input, "substring match");
            return Resolution { pair: record.pair(), rule: MatchRule::Substring };
        }

        if common_word_count(&normalized, &record_input) >= MIN_COMMON_WORDS {
            tracing::debug!(record = %record.input, "keyword match");
            return Resolution { pair: record.pair(), rule: MatchRule::Keyword };
        }
    }

    tracing::debug!(query = %query, "no corpus match, synthesizing default pair");
    Resolution { pair: default_pair(query), rule: MatchRule::Default }
}

/// Count query words that relate to some record word: the query word is
/// longer than three characters and contained in a record word, or a
/// record word longer than three characters is contained in it.
fn common_word_count(query: &str, record_input: &str) -> usize {
    let record_words: Vec<&str> = record_input.split_whitespace().collect();

    query
        .split_whitespace()
        .filter(|word| {
            record_words.iter().any(|record_word| {
                (word.chars().count() > SHORT_WORD_CHARS && record_word.contains(*word))
                    || (record_word.chars().count() > SHORT_WORD_CHARS
                        && word.contains(record_word))
            })
        })
        .count()
}

/// Generic pair synthesized when no record matches; embeds the caller's
/// original query text verbatim.
fn default_pair(query: &str) -> SummaryPair {
    SummaryPair {
        patient_summary: format!(
            "Based on your input about \"{query}\", here's a general patient summary. \
             This is for educational purposes only - please consult with your healthcare \
             provider for personalized medical advice and proper diagnosis."
        ),
        clinician_summary: format!(
            "Patient input: \"{query}\". Generate appropriate clinical assessment based on \
             presented symptoms. Consider differential diagnosis, order relevant diagnostic \
             tests, and develop treatment plan according to clinical guidelines and \
             patient-specific factors."
        ),
    }
}
