use crate::documents::DocumentError;

const PDF_MAGIC: &[u8] = b"%PDF";
const UTF8_BOM: &str = "\u{feff}";

/// Extracts plain text from a PDF or UTF-8 text document.
pub fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let text = if bytes.starts_with(PDF_MAGIC) {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| DocumentError::Extraction(e.to_string()))?
    } else {
        let text = std::str::from_utf8(bytes).map_err(|_| DocumentError::UnsupportedFormat)?;
        text.trim_start_matches(UTF8_BOM).to_string()
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(DocumentError::Extraction(
            "document contains no text".to_string(),
        ));
    }
    Ok(text.to_string())
}
