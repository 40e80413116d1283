//! Text extraction from uploaded files. PDFs go through the pdf-extract
//! text layer; everything else is decoded as UTF-8.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("PDF has no extractable text layer")]
    NoTextLayer,

    #[error("file is not valid UTF-8 text: {0}")]
    InvalidEncoding(String),
}

/// Whether an upload should be treated as a PDF, judged by the declared
/// media type first and the filename extension second.
pub fn is_pdf(content_type: Option<&str>, filename: Option<&str>) -> bool {
    if let Some(ct) = content_type {
        if ct.to_ascii_lowercase().contains("pdf") {
            return true;
        }
    }
    if let Some(name) = filename {
        return mime_guess::from_path(name)
            .first()
            .map(|m| m == mime_guess::mime::APPLICATION_PDF)
            .unwrap_or(false);
    }
    false
}

/// Extract the text layer from a PDF. Scanned documents parse fine but
/// yield no text; that case is reported as [`ExtractError::NoTextLayer`]
/// so the caller can hand the raw bytes to the model instead.
pub fn pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractError::PdfParsing(e.to_string()))?;

    let text = pages.join("\n").trim().to_string();
    if text.is_empty() {
        return Err(ExtractError::NoTextLayer);
    }
    Ok(text)
}

/// Decode a non-PDF upload as UTF-8 text.
pub fn utf8_text(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec())
        .map(|s| s.trim().to_string())
        .map_err(|e| ExtractError::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Generate a valid single-page PDF with embedded text using lopdf.
    fn make_test_pdf(text: &str) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let content = format!("BT /F1 12 Tf 100 700 Td ({text}) Tj ET");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(ref mut dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn detects_pdf_by_content_type() {
        assert!(is_pdf(Some("application/pdf"), None));
        assert!(is_pdf(Some("Application/PDF"), Some("scan.bin")));
    }

    #[test]
    fn detects_pdf_by_filename() {
        assert!(is_pdf(None, Some("discharge-summary.pdf")));
        assert!(is_pdf(Some("application/octet-stream"), Some("notes.PDF")));
    }

    #[test]
    fn plain_text_is_not_pdf() {
        assert!(!is_pdf(Some("text/plain"), Some("notes.txt")));
        assert!(!is_pdf(None, None));
    }

    #[test]
    fn extracts_text_from_digital_pdf() {
        let pdf = make_test_pdf("Patient has high blood pressure");
        let text = pdf_text(&pdf).unwrap();
        assert!(
            text.contains("Patient") || text.contains("pressure"),
            "unexpected extraction output: {text}"
        );
    }

    #[test]
    fn invalid_pdf_is_a_parsing_error() {
        let err = pdf_text(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractError::PdfParsing(_)));
    }

    #[test]
    fn utf8_decode_trims_whitespace() {
        let text = utf8_text(b"  Patient reports headaches \n").unwrap();
        assert_eq!(text, "Patient reports headaches");
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = utf8_text(&[0xFF, 0xFE, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidEncoding(_)));
    }
}
