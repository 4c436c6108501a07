//! # Error Handling
//!
//! Error types for the secretfs cache using `thiserror`.
//!
//! Cache lookups never fail; a missing or late backend answer is reported
//! as absence. These errors only come out of construction-time paths:
//! loading configuration and decoding secrets handed over by a backend.

/// Custom result type for secretfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for secretfs
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values outside their permitted range
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Secret JSON or base64 payload could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A decoded secret carries an unusable attribute
    #[error("Invalid secret '{name}': {reason}")]
    InvalidSecret { name: String, reason: String },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error with field information
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create an invalid secret error
    pub fn invalid_secret<N: Into<String>, R: Into<String>>(name: N, reason: R) -> Self {
        Self::InvalidSecret { name: name.into(), reason: reason.into() }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut failures = Vec::new();
        collect_validation_messages("", &errors, &mut failures);
        failures.sort();

        let messages: Vec<String> =
            failures.iter().map(|(path, message)| format!("{}: {}", path, message)).collect();
        let message = format!("Validation failed: {}", messages.join("; "));

        match failures.as_slice() {
            [(path, _)] => Self::validation_field(message, path.clone()),
            _ => Self::validation(message),
        }
    }
}

/// Flatten nested validation errors into `(path.to.field, message)` pairs.
fn collect_validation_messages(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<(String, String)>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path =
            if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                out.push((path, error_messages.join(", ")));
            }
            ValidationErrorsKind::Struct(inner) => collect_validation_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_validation_messages(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}
