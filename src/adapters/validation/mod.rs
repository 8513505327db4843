//! Validation Adapters - Schema validation implementations.
//!
//! Contains adapters for validating uploaded documents against JSON Schemas.

mod json_document_validator;

pub use json_document_validator::JsonDocumentValidator;
