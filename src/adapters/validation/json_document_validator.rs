//! JSON Document Validator - Implementation of DocumentValidator.
//!
//! Uses manual validation against embedded JSON Schema definitions.
//! Validates uploaded documents without external schema validation
//! dependencies.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::ports::{DocumentKind, DocumentValidator, SchemaValidationError};

/// JSON Schema-based validator implementation.
///
/// Loads the problem, connection, and rating schemas and validates
/// documents manually. Schemas are embedded in the binary via
/// `include_str!` for reliability.
///
/// Required fields are enforced even when the schema declares a default
/// for them; defaults are filled separately through `apply_defaults`.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` and can be shared across threads.
pub struct JsonDocumentValidator {
    // No runtime state needed - all validation is based on static schema definitions
}

impl Default for JsonDocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonDocumentValidator {
    /// Create a new validator with all schemas loaded.
    pub fn new() -> Self {
        Self {}
    }

    /// Load raw schema JSON for a document kind.
    fn load_raw_schema(kind: DocumentKind) -> Value {
        let schema_str = match kind {
            DocumentKind::Problem => {
                include_str!("../../domain/problem/schemas/problem.json")
            }
            DocumentKind::ProblemConnection => {
                include_str!("../../domain/problem/schemas/problem_connection.json")
            }
            DocumentKind::ProblemConnectionRating => {
                include_str!("../../domain/problem/schemas/problem_connection_rating.json")
            }
        };

        serde_json::from_str(schema_str)
            .unwrap_or_else(|e| panic!("Failed to parse schema for {:?}: {}", kind, e))
    }

    /// Validate a value against a document kind's schema.
    fn validate_document(
        &self,
        kind: DocumentKind,
        document: &Value,
    ) -> Result<(), SchemaValidationError> {
        match kind {
            DocumentKind::Problem => self.validate_problem(document),
            DocumentKind::ProblemConnection => self.validate_connection(document, "root"),
            DocumentKind::ProblemConnectionRating => self.validate_rating(document, "root"),
        }
    }

    // =========================================================================
    // Document-specific validators
    // =========================================================================

    fn validate_problem(&self, document: &Value) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(document, "root")?;

        self.require_known_keys(
            obj,
            &[
                "name",
                "definition",
                "definition_url",
                "sponsor",
                "images",
                "drivers",
                "impacts",
                "broader",
                "narrower",
            ],
            "root",
        )?;

        // name is the only required field
        self.require_non_empty_string(obj, "name", "root")?;
        self.require_max_length(obj, "name", 60, "root")?;

        // Optional scalar fields
        if obj.contains_key("definition") {
            self.require_string_field(obj, "definition", "root")?;
            self.require_max_length(obj, "definition", 200, "root")?;
        }
        if obj.contains_key("definition_url") {
            self.require_string_field(obj, "definition_url", "root")?;
            self.require_max_length(obj, "definition_url", 2048, "root")?;
        }
        if obj.contains_key("sponsor") {
            self.require_string_field(obj, "sponsor", "root")?;
            self.require_max_length(obj, "sponsor", 60, "root")?;
        }

        // Image URLs
        if let Some(images) = obj.get("images") {
            let arr = self.require_array(images, "images")?;
            for (i, item) in arr.iter().enumerate() {
                let path = format!("images[{}]", i);
                let url = item.as_str().ok_or_else(|| SchemaValidationError::InvalidType {
                    field: path.clone(),
                    expected: "string".to_string(),
                    actual: Self::type_name(item),
                })?;
                if url.chars().count() > 2048 {
                    return Err(SchemaValidationError::TooLong {
                        field: path,
                        max: 2048,
                        actual: url.chars().count(),
                    });
                }
            }
        }

        // Connection lists, one per category
        for field in &["drivers", "impacts", "broader", "narrower"] {
            if let Some(list) = obj.get(*field) {
                let arr = self.require_array(list, field)?;
                for (i, item) in arr.iter().enumerate() {
                    self.validate_connection(item, &format!("{}[{}]", field, i))?;
                }
            }
        }

        Ok(())
    }

    fn validate_connection(
        &self,
        value: &Value,
        path: &str,
    ) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(value, path)?;

        self.require_known_keys(obj, &["adjacent_problem", "problem_connection_ratings"], path)?;

        self.require_non_empty_string(obj, "adjacent_problem", path)?;
        self.require_max_length(obj, "adjacent_problem", 60, path)?;

        if let Some(ratings) = obj.get("problem_connection_ratings") {
            let ratings_path = Self::qualify(path, "problem_connection_ratings");
            let arr = self.require_array(ratings, &ratings_path)?;
            for (i, item) in arr.iter().enumerate() {
                self.validate_rating(item, &format!("{}[{}]", ratings_path, i))?;
            }
        }

        Ok(())
    }

    fn validate_rating(&self, value: &Value, path: &str) -> Result<(), SchemaValidationError> {
        let obj = self.require_object(value, path)?;

        self.require_known_keys(obj, &["rating", "weight", "user", "org", "geo"], path)?;

        // Required fields; geo's declared default does not waive presence
        let mut errors = Vec::new();
        for field in &["rating", "user", "org", "geo"] {
            if !obj.contains_key(*field) {
                errors.push(SchemaValidationError::MissingRequired {
                    field: Self::qualify(path, field),
                });
            }
        }
        if !errors.is_empty() {
            return Err(Self::collect_errors(errors));
        }

        // rating must be an integer from 0 to 4
        if let Some(rating) = obj.get("rating") {
            let rating_path = Self::qualify(path, "rating");
            if let Some(r) = rating.as_i64() {
                if !(0..=4).contains(&r) {
                    return Err(SchemaValidationError::OutOfRange {
                        field: rating_path,
                        value: r.to_string(),
                        min: "0".to_string(),
                        max: "4".to_string(),
                    });
                }
            } else {
                return Err(SchemaValidationError::InvalidType {
                    field: rating_path,
                    expected: "integer".to_string(),
                    actual: Self::type_name(rating),
                });
            }
        }

        // weight is optional but must be a non-negative integer when present
        if let Some(weight) = obj.get("weight") {
            let weight_path = Self::qualify(path, "weight");
            if let Some(w) = weight.as_i64() {
                if w < 0 {
                    return Err(SchemaValidationError::Generic {
                        message: format!("{} must be at least 0, got {}", weight_path, w),
                    });
                }
            } else {
                return Err(SchemaValidationError::InvalidType {
                    field: weight_path,
                    expected: "integer".to_string(),
                    actual: Self::type_name(weight),
                });
            }
        }

        self.require_non_empty_string(obj, "user", path)?;
        self.require_max_length(obj, "user", 60, path)?;
        self.require_non_empty_string(obj, "org", path)?;
        self.require_max_length(obj, "org", 256, path)?;
        self.require_non_empty_string(obj, "geo", path)?;
        self.require_max_length(obj, "geo", 256, path)?;

        Ok(())
    }

    // =========================================================================
    // Default filling
    // =========================================================================

    fn fill_problem_defaults(obj: &mut serde_json::Map<String, Value>) {
        for field in ["images", "drivers", "impacts", "broader", "narrower"] {
            obj.entry(field).or_insert_with(|| Value::Array(Vec::new()));
        }
        for field in ["drivers", "impacts", "broader", "narrower"] {
            if let Some(entries) = obj.get_mut(field).and_then(|v| v.as_array_mut()) {
                for entry in entries {
                    if let Some(entry_obj) = entry.as_object_mut() {
                        Self::fill_connection_defaults(entry_obj);
                    }
                }
            }
        }
    }

    fn fill_connection_defaults(obj: &mut serde_json::Map<String, Value>) {
        obj.entry("problem_connection_ratings")
            .or_insert_with(|| Value::Array(Vec::new()));
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    /// Qualify a field name with its parent path. Top-level fields keep
    /// their bare name.
    fn qualify(parent: &str, field: &str) -> String {
        if parent == "root" {
            field.to_string()
        } else {
            format!("{}.{}", parent, field)
        }
    }

    fn require_object<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a serde_json::Map<String, Value>, SchemaValidationError> {
        value.as_object().ok_or_else(|| SchemaValidationError::InvalidType {
            field: path.to_string(),
            expected: "object".to_string(),
            actual: Self::type_name(value),
        })
    }

    fn require_array<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a Vec<Value>, SchemaValidationError> {
        value.as_array().ok_or_else(|| SchemaValidationError::InvalidType {
            field: path.to_string(),
            expected: "array".to_string(),
            actual: Self::type_name(value),
        })
    }

    /// Reject properties the schema does not declare.
    fn require_known_keys(
        &self,
        obj: &serde_json::Map<String, Value>,
        allowed: &[&str],
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        let mut errors = Vec::new();
        for key in obj.keys() {
            if !allowed.contains(&key.as_str()) {
                errors.push(SchemaValidationError::UnknownProperty {
                    field: Self::qualify(parent, key),
                });
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::collect_errors(errors))
        }
    }

    fn require_field(
        &self,
        obj: &serde_json::Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        if !obj.contains_key(field) {
            Err(SchemaValidationError::MissingRequired {
                field: Self::qualify(parent, field),
            })
        } else {
            Ok(())
        }
    }

    fn require_string_field(
        &self,
        obj: &serde_json::Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        self.require_field(obj, field, parent)?;
        if let Some(val) = obj.get(field) {
            if !val.is_string() {
                return Err(SchemaValidationError::InvalidType {
                    field: Self::qualify(parent, field),
                    expected: "string".to_string(),
                    actual: Self::type_name(val),
                });
            }
        }
        Ok(())
    }

    fn require_non_empty_string(
        &self,
        obj: &serde_json::Map<String, Value>,
        field: &str,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        self.require_string_field(obj, field, parent)?;
        if let Some(val) = obj.get(field).and_then(|v| v.as_str()) {
            if val.is_empty() {
                return Err(SchemaValidationError::Generic {
                    message: format!("{} must not be empty", Self::qualify(parent, field)),
                });
            }
        }
        Ok(())
    }

    fn require_max_length(
        &self,
        obj: &serde_json::Map<String, Value>,
        field: &str,
        max_length: usize,
        parent: &str,
    ) -> Result<(), SchemaValidationError> {
        if let Some(val) = obj.get(field).and_then(|v| v.as_str()) {
            let actual = val.chars().count();
            if actual > max_length {
                return Err(SchemaValidationError::TooLong {
                    field: Self::qualify(parent, field),
                    max: max_length,
                    actual,
                });
            }
        }
        Ok(())
    }

    fn type_name(value: &Value) -> String {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
        .to_string()
    }

    fn collect_errors(errors: Vec<SchemaValidationError>) -> SchemaValidationError {
        if errors.len() == 1 {
            errors.into_iter().next().unwrap()
        } else {
            SchemaValidationError::Multiple(errors)
        }
    }
}

/// Static storage for raw schemas (for `schema_for` method).
static RAW_SCHEMAS: Lazy<HashMap<DocumentKind, Value>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in DocumentKind::ALL {
        map.insert(kind, JsonDocumentValidator::load_raw_schema(kind));
    }
    map
});

impl DocumentValidator for JsonDocumentValidator {
    fn validate(&self, kind: DocumentKind, document: &Value) -> Result<(), SchemaValidationError> {
        self.validate_document(kind, document)
    }

    fn schema_for(&self, kind: DocumentKind) -> &Value {
        RAW_SCHEMAS
            .get(&kind)
            .expect("Schema must exist for all document kinds")
    }

    fn apply_defaults(&self, kind: DocumentKind, document: &mut Value) {
        let Some(obj) = document.as_object_mut() else {
            return;
        };
        match kind {
            DocumentKind::Problem => Self::fill_problem_defaults(obj),
            DocumentKind::ProblemConnection => Self::fill_connection_defaults(obj),
            // geo and weight have defaults, but geo is required and weight's
            // default belongs to decoding, so nothing is filled here.
            DocumentKind::ProblemConnectionRating => {}
        }
    }
}
