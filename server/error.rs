use serde_json::{json, Value};
use thiserror::Error;

use soil_analyzer::ClassifierError;

/// Request-scoped failures, each mapped to an HTTP status and a JSON
/// `{"detail": ...}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Only JPG/PNG images are supported.")]
    UnsupportedExtension,
    #[error("Field required")]
    MissingFile,
    #[error("There was an error parsing the body")]
    BodyRead(#[source] std::io::Error),
    #[error("Failed to process image: {0}")]
    Processing(#[from] ClassifierError),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::UnsupportedExtension | ApiError::BodyRead(_) => 400,
            ApiError::MissingFile      => 422,
            ApiError::Processing(_)    => 500,
            ApiError::NotFound         => 404,
            ApiError::MethodNotAllowed => 405,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            ApiError::MissingFile => json!({
                "detail": [{
                    "type": "missing",
                    "loc": ["body", "file"],
                    "msg": self.to_string(),
                    "input": null,
                }]
            }),
            _ => json!({ "detail": self.to_string() }),
        }
    }
}

/// Startup failures returned from `main`.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to bind HTTP server on {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("invalid log level {0:?} (expected trace, debug, info, warn or error)")]
    InvalidLogLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_extension_is_bad_request() {
        let err = ApiError::UnsupportedExtension;
        assert_eq!(err.status(), 400);
        assert_eq!(err.body(), json!({ "detail": "Only JPG/PNG images are supported." }));
    }

    #[test]
    fn decode_failure_is_server_error_with_prefix() {
        let decode_err = soil_analyzer::decode(b"junk").unwrap_err();
        let message = decode_err.to_string();
        let err = ApiError::from(decode_err);

        assert_eq!(err.status(), 500);
        let detail = err.body()["detail"].as_str().unwrap().to_owned();
        assert_eq!(detail, format!("Failed to process image: {}", message));
    }

    #[test]
    fn missing_file_reports_field_location() {
        let body = ApiError::MissingFile.body();
        assert_eq!(ApiError::MissingFile.status(), 422);
        assert_eq!(body["detail"][0]["loc"], json!(["body", "file"]));
        assert_eq!(body["detail"][0]["msg"], "Field required");
    }

    #[test]
    fn routing_errors() {
        assert_eq!(ApiError::NotFound.body(), json!({ "detail": "Not Found" }));
        assert_eq!(ApiError::MethodNotAllowed.status(), 405);
    }
}
