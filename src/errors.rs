use serde::Deserialize;

/// Body shape the backend uses for every non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Picks the most specific message out of a raw response body.
    ///
    /// Falls back to the trimmed body text when it is not the expected JSON,
    /// so plain-text failures still reach the user verbatim.
    pub fn message_from(body: &str) -> Option<String> {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed
                .error
                .or(parsed.message)
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty()),
            Err(_) => {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("This PO number has already been used. Please use a unique PO number. ({0})")]
    DuplicatePurchaseOrder(String),

    #[error("#{labels} Labels Uploaded | {cases} Cases Selected - NOT MATCH")]
    LabelMismatch { labels: usize, cases: u64 },

    #[error("{0}")]
    MixedLabelTypes(String),

    #[error("Unsupported label file '{0}': upload PDF, PNG or JPG files")]
    UnsupportedLabel(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{message} (locked for {remaining_seconds}s)")]
    LockedOut {
        message: String,
        remaining_seconds: u64,
    },

    #[error("Request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<url::ParseError> for ServiceError {
    fn from(err: url::ParseError) -> Self {
        ServiceError::ConfigError(format!("invalid URL: {}", err))
    }
}

impl ServiceError {
    /// Builds the error for a failed HTTP exchange from its status and body.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let message = ErrorBody::message_from(body).unwrap_or_else(|| {
            format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        });

        match status {
            reqwest::StatusCode::UNAUTHORIZED => ServiceError::Unauthorized(message),
            reqwest::StatusCode::NOT_FOUND => ServiceError::NotFound(message),
            _ => ServiceError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// The text shown to the user for this failure.
    ///
    /// Backend failures surface the server-provided message without the
    /// status prefix.
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::Api { message, .. }
            | ServiceError::Unauthorized(message)
            | ServiceError::NotFound(message)
            | ServiceError::ValidationError(message)
            | ServiceError::InvalidOperation(message)
            | ServiceError::MixedLabelTypes(message) => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ServiceError::Unauthorized(_))
    }
}
