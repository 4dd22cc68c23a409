// ============================================================
// RAW LOADER
// ============================================================
// Upload validation and text decoding, before any parsing runs

use crate::domain::csv::{ProgressSink, RawFile};
use crate::domain::error::{AppError, Result};

/// Validate an upload and decode its content to text.
///
/// Rejects by extension, size and emptiness before touching the bytes.
/// Emits a 10% progress checkpoint once validation passes.
pub fn load(
    name: &str,
    bytes: &[u8],
    max_file_bytes: u64,
    progress: &dyn ProgressSink,
) -> Result<RawFile> {
    if !name.to_lowercase().ends_with(".csv") {
        return Err(AppError::ValidationError(
            "Please select a CSV file (.csv extension)".to_string(),
        ));
    }

    let size = bytes.len() as u64;
    if size > max_file_bytes {
        return Err(AppError::ValidationError(format!(
            "File size too large. Please select a file smaller than {} MB.",
            max_file_bytes / (1024 * 1024)
        )));
    }

    if size == 0 {
        return Err(AppError::ValidationError(
            "The selected file is empty.".to_string(),
        ));
    }

    progress.progress(10);

    Ok(RawFile {
        name: name.to_string(),
        size,
        content: decode_text(bytes),
    })
}

/// Decode bytes to text: UTF-8 first, Windows-1252 fallback for the
/// irregular encodings spreadsheet exports tend to produce.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(content) => content.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}
