//! Document loading: turns an uploaded resume / job file into normalized text.
//! Text extraction itself is delegated to `pdf-extract`.

use std::path::Path;

use tracing::{debug, warn};

use crate::errors::AppError;
use crate::extraction::normalize::normalize;

/// Reads `path` and returns its normalized text.
///
/// - `.pdf`: extracted with `pdf-extract`; an extraction failure degrades to `""`
/// - `.docx` / `.doc`: rejected
/// - anything else: read as text, invalid UTF-8 replaced
pub fn load_document(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::NotFound(format!("Document {} not found", path.display())));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let raw = match ext.as_deref() {
        Some("pdf") => match pdf_extract::extract_text(path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Error parsing file {}: {e}", path.display());
                String::new()
            }
        },
        Some("docx") | Some("doc") => {
            return Err(AppError::UnsupportedDocument(format!(
                "{}: Word documents are not supported, export to PDF or text",
                path.display()
            )))
        }
        _ => {
            let bytes = std::fs::read(path)?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
    };

    let text = normalize(&raw);
    debug!("Loaded {} ({} chars normalized)", path.display(), text.len());
    Ok(text)
}
