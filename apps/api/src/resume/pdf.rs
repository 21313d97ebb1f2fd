//! PDF intake for uploaded resumes.

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts the text layer of an in-memory PDF.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::Validation(
            "Uploaded file is not a PDF document".to_string(),
        ));
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Validation(format!("Failed to extract text from PDF: {e}")))?;

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "PDF contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}

/// Collapses runs of blank lines and trailing spaces left by the extractor.
fn normalize_whitespace(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
