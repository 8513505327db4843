//! Document Validator Port - Upload document validation interface.
//!
//! This port defines the contract for validating uploaded problem
//! documents against their JSON Schemas. The application depends on this
//! trait, while adapters (like JsonDocumentValidator) provide the
//! implementation.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// The kinds of document the service accepts, one per schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Problem,
    ProblemConnection,
    ProblemConnectionRating,
}

impl DocumentKind {
    /// All document kinds.
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Problem,
        DocumentKind::ProblemConnection,
        DocumentKind::ProblemConnectionRating,
    ];

    /// Returns the schema name for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Problem => "problem",
            DocumentKind::ProblemConnection => "problem_connection",
            DocumentKind::ProblemConnectionRating => "problem_connection_rating",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Port for validating uploaded documents against their schemas.
///
/// # Contract
///
/// Implementations must:
/// - Load JSON Schemas for all document kinds
/// - Enforce required fields, types, ranges, and length limits
/// - Reject unrecognized properties at every nesting level
/// - Report the path of the offending field, e.g.
///   `drivers[2].problem_connection_ratings[0].rating`
/// - Apply declared defaults only through `apply_defaults`, never
///   implicitly during validation
///
/// # Usage
///
/// ```rust,ignore
/// let validator: &dyn DocumentValidator = get_validator();
///
/// // Validation first: a document missing required fields must fail
/// // even when the schema declares a default for one of them.
/// validator.validate(DocumentKind::Problem, &document)?;
///
/// // Then fill declared defaults before decoding.
/// validator.apply_defaults(DocumentKind::Problem, &mut document);
///
/// // Get raw schema for client-side validation
/// let schema = validator.schema_for(DocumentKind::Problem);
/// ```
pub trait DocumentValidator: Send + Sync {
    /// Validate a document against its kind's schema.
    ///
    /// Returns `Ok(())` if valid, `Err` with validation errors if not.
    /// Nested connection and rating documents are validated in place with
    /// path-qualified field names.
    fn validate(&self, kind: DocumentKind, document: &Value) -> Result<(), SchemaValidationError>;

    /// Get the JSON Schema for a document kind.
    ///
    /// Returns the raw schema JSON for introspection or client-side
    /// validation. Schemas are considered public and safe to expose.
    fn schema_for(&self, kind: DocumentKind) -> &Value;

    /// Fill in defaults the schema declares for absent fields.
    ///
    /// Only fields with a declared default and no required marker are
    /// filled; validation remains the sole gate on required fields.
    fn apply_defaults(&self, kind: DocumentKind, document: &mut Value);
}

/// Errors that can occur during schema validation.
///
/// # Security
///
/// These errors contain detailed information for debugging. When returning
/// errors to clients, use `to_client_message()` to get sanitized versions
/// that don't expose internal schema structure.
#[derive(Debug, Clone, Error)]
pub enum SchemaValidationError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Unrecognized field: {field}")]
    UnknownProperty { field: String },

    #[error("Value out of range for field {field}: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Value too long for field {field}: maximum {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Invalid format for field {field}: expected {format}")]
    InvalidFormat { field: String, format: String },

    #[error("Schema validation failed: {message}")]
    Generic { message: String },

    #[error("Validation errors: {0:?}")]
    Multiple(Vec<SchemaValidationError>),
}

impl SchemaValidationError {
    /// Convert to client-safe error message.
    ///
    /// Sanitizes error details to avoid exposing internal schema structure
    /// or implementation details that could aid in exploitation.
    pub fn to_client_message(&self) -> String {
        match self {
            SchemaValidationError::MissingRequired { field } => {
                format!("Missing required field: {}", field)
            }
            SchemaValidationError::InvalidType { field, expected, .. } => {
                format!("Invalid type for field '{}': expected {}", field, expected)
            }
            SchemaValidationError::UnknownProperty { field } => {
                format!("Unrecognized field: {}", field)
            }
            SchemaValidationError::OutOfRange { field, min, max, .. } => {
                format!("Field '{}' must be between {} and {}", field, min, max)
            }
            SchemaValidationError::TooLong { field, max, .. } => {
                format!("Field '{}' must be at most {} characters", field, max)
            }
            SchemaValidationError::InvalidFormat { field, format } => {
                format!("Field '{}' must be a valid {}", field, format)
            }
            SchemaValidationError::Generic { message } => {
                // Truncate potentially long messages
                if message.len() > 100 {
                    format!("Validation failed: {}...", &message[..97])
                } else {
                    format!("Validation failed: {}", message)
                }
            }
            SchemaValidationError::Multiple(errors) => {
                // Return first error only to avoid information leakage
                errors
                    .first()
                    .map(|e| e.to_client_message())
                    .unwrap_or_else(|| "Validation failed".to_string())
            }
        }
    }

    /// The path of the offending field, when one is identified.
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaValidationError::MissingRequired { field }
            | SchemaValidationError::InvalidType { field, .. }
            | SchemaValidationError::UnknownProperty { field }
            | SchemaValidationError::OutOfRange { field, .. }
            | SchemaValidationError::TooLong { field, .. }
            | SchemaValidationError::InvalidFormat { field, .. } => Some(field),
            SchemaValidationError::Generic { .. } => None,
            SchemaValidationError::Multiple(errors) => errors.first().and_then(|e| e.field()),
        }
    }

    /// Returns true if this error contains multiple validation failures.
    pub fn is_multiple(&self) -> bool {
        matches!(self, SchemaValidationError::Multiple(_))
    }

    /// Get the count of validation errors.
    pub fn error_count(&self) -> usize {
        match self {
            SchemaValidationError::Multiple(errors) => errors.len(),
            _ => 1,
        }
    }
}

impl PartialEq for SchemaValidationError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by error message for testing purposes
        self.to_string() == other.to_string()
    }
}

impl From<SchemaValidationError> for DomainError {
    fn from(error: SchemaValidationError) -> Self {
        let mut domain =
            DomainError::new(ErrorCode::ValidationFailed, error.to_client_message());
        if let Some(field) = error.field() {
            domain = domain.with_detail("field", field);
        }
        domain
    }
}
