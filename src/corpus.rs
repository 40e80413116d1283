//! Static reference corpus of example queries and their curated summary
//! pairs. Loaded once at startup and shared read-only for the process
//! lifetime.

use serde::{Deserialize, Serialize};

use crate::summarize::SummaryPair;

/// Corpus data bundled into the binary at compile time.
const BUNDLED_CORPUS: &str = include_str!("../data/corpus.json");

/// One curated example: an input phrase and the two summaries it maps to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusRecord {
    pub input: String,
    pub patient_summary: String,
    pub clinician_summary: String,
}

impl CorpusRecord {
    /// The summary pair this record resolves to.
    pub fn pair(&self) -> SummaryPair {
        SummaryPair {
            patient_summary: self.patient_summary.clone(),
            clinician_summary: self.clinician_summary.clone(),
        }
    }
}

/// Ordered, immutable set of corpus records.
#[derive(Debug, Clone)]
pub struct Corpus {
    records: Vec<CorpusRecord>,
}

impl Corpus {
    /// Deserialize the bundled corpus. A malformed data file is replaced
    /// wholesale by a single fallback record rather than failing startup.
    pub fn load() -> Self {
        match serde_json::from_str::<Vec<CorpusRecord>>(BUNDLED_CORPUS) {
            Ok(records) => {
                tracing::info!(count = records.len(), "loaded bundled corpus");
                Self { records }
            }
            Err(e) => {
                tracing::error!(error = %e, "bundled corpus is malformed, using fallback record");
                Self::fallback()
            }
        }
    }

    /// Single-record corpus used when the bundled data cannot be read.
    pub fn fallback() -> Self {
        Self {
            records: vec![CorpusRecord {
                input: "fallback".into(),
                patient_summary: "Based on your input, here's a patient-friendly summary. \
                    Please consult with your healthcare provider for personalized medical advice."
                    .into(),
                clinician_summary: "Patient input received. Generate appropriate clinical \
                    assessment and treatment plan based on presented symptoms and medical history."
                    .into(),
            }],
        }
    }

    /// Build a corpus from explicit records. Lets tests inject synthetic data.
    pub fn from_records(records: Vec<CorpusRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CorpusRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_corpus_parses() {
        let corpus = Corpus::load();
        assert!(corpus.len() >= 10, "bundled corpus should not be the fallback");
        for record in corpus.records() {
            assert!(!record.input.is_empty());
            assert!(!record.patient_summary.is_empty());
            assert!(!record.clinician_summary.is_empty());
        }
    }

    #[test]
    fn bundled_corpus_covers_common_presentations() {
        let corpus = Corpus::load();
        let inputs: Vec<&str> = corpus.records().iter().map(|r| r.input.as_str()).collect();
        assert!(inputs.contains(&"Patient has high blood pressure"));
        assert!(inputs.contains(&"Patient has diabetes type 2"));
    }

    #[test]
    fn fallback_is_single_record() {
        let corpus = Corpus::fallback();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.records()[0].input, "fallback");
    }

    #[test]
    fn record_pair_copies_both_fields() {
        let record = CorpusRecord {
            input: "x".into(),
            patient_summary: "p".into(),
            clinician_summary: "c".into(),
        };
        let pair = record.pair();
        assert_eq!(pair.patient_summary, "p");
        assert_eq!(pair.clinician_summary, "c");
    }

    #[test]
    fn corpus_record_uses_camel_case_on_the_wire() {
        let record = CorpusRecord {
            input: "x".into(),
            patient_summary: "p".into(),
            clinician_summary: "c".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("patientSummary").is_some());
        assert!(json.get("clinicianSummary").is_some());
    }
}
