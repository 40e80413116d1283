/// Instructions shared by both prompt variants: the model must answer with
/// one JSON object carrying the two summary fields.
const RESPONSE_FORMAT_INSTRUCTIONS: &str = r#"Produce two summaries of the medical content:
1. A patient-friendly summary: plain language, no jargon, reassuring but accurate,
   suitable for patients and their families.
2. A clinician-focused summary: precise clinical language covering assessment,
   differential considerations, and next steps for a healthcare professional.

Respond with a single JSON object with exactly these two string fields and nothing else:
{"patientSummary": "...", "clinicianSummary": "..."}

Do not wrap the JSON in markdown fences. Do not add commentary before or after it.
Never invent findings that are not present in the source content."#;

/// Build the prompt for free-text input. The source text is delimited so
/// the model cannot confuse it with the instructions.
pub fn build_text_prompt(text: &str) -> String {
    format!(
        "You are a medical summarization assistant.\n\n{RESPONSE_FORMAT_INSTRUCTIONS}\n\n\
         <content>\n{text}\n</content>"
    )
}

/// Prompt for the document variant: the document itself travels as an
/// attached part, so the prompt carries only the instructions.
pub fn build_document_prompt() -> String {
    format!(
        "You are a medical summarization assistant. Read the attached medical document.\n\n\
         {RESPONSE_FORMAT_INSTRUCTIONS}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_prompt_embeds_source_content() {
        let prompt = build_text_prompt("Patient has high blood pressure");
        assert!(prompt.contains("Patient has high blood pressure"));
        assert!(prompt.contains("<content>"));
        assert!(prompt.contains("</content>"));
    }

    #[test]
    fn both_prompts_request_the_two_fields() {
        for prompt in [build_text_prompt("x"), build_document_prompt()] {
            assert!(prompt.contains("patientSummary"));
            assert!(prompt.contains("clinicianSummary"));
        }
    }

    #[test]
    fn document_prompt_references_attachment() {
        assert!(build_document_prompt().contains("attached"));
    }
}
