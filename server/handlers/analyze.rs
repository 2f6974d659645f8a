use std::io::{Cursor, Read};
use tiny_http::{Request, Response};
use tracing::{error, info, warn};

use soil_analyzer::{Analysis, Classifier};

use crate::error::ApiError;
use crate::routes::{error_response, header_value, json_response};
use crate::util::multipart::{extract_boundary, extract_file_part};

/// File extensions accepted for upload, compared case-insensitively.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".jpg", ".jpeg", ".png"];

// ---------------------------------------------------------------------------
// POST /analyze/
// ---------------------------------------------------------------------------

pub fn handle(request: &mut Request, classifier: &Classifier) -> Response<Cursor<Vec<u8>>> {
    let content_type = header_value(request, "Content-Type").unwrap_or_default();

    let mut body = Vec::new();
    let outcome = match request.as_reader().read_to_end(&mut body) {
        Ok(_) => analyze_upload(&content_type, &body, classifier),
        Err(e) => Err(ApiError::BodyRead(e)),
    };

    match outcome {
        Ok(analysis) => json_response(200, &analysis),
        Err(e) => error_response(&e),
    }
}

/// Validates the upload and runs it through the classifier.
///
/// The extension check happens before any bytes are decoded.
pub fn analyze_upload(
    content_type: &str,
    body: &[u8],
    classifier: &Classifier,
) -> Result<Analysis, ApiError> {
    let part = extract_boundary(content_type)
        .filter(|_| content_type.trim_start().to_ascii_lowercase().starts_with("multipart/form-data"))
        .and_then(|boundary| extract_file_part(body, &boundary))
        .ok_or(ApiError::MissingFile)?;

    if !has_accepted_extension(&part.filename) {
        warn!(filename = %part.filename, "rejected upload with unsupported extension");
        return Err(ApiError::UnsupportedExtension);
    }

    match classifier.analyze(&part.data) {
        Ok(analysis) => {
            info!(
                field = ?part.field_name,
                filename = %part.filename,
                bytes = part.data.len(),
                deficiency = %analysis.deficiency,
                "classified soil image"
            );
            Ok(analysis)
        }
        Err(e) => {
            error!(filename = %part.filename, error = %e, "failed to decode upload");
            Err(e.into())
        }
    }
}

pub fn has_accepted_extension(filename: &str) -> bool {
    let lower = filename.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
