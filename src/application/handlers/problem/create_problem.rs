//! CreateProblemHandler - Command handler for creating a problem from a document.
//!
//! A thin wrapper over the shared upload pipeline that refuses to merge into
//! a problem that already exists. Everything else, including validation and
//! connection vivification, is delegated.

use std::sync::Arc;

use serde_json::Value;

use crate::application::handlers::problem::{
    UpsertProblemCommand, UpsertProblemHandler, UpsertProblemResult,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::problem::ProblemName;
use crate::ports::ProblemRepository;

/// Command to create a new problem from a raw document.
#[derive(Debug, Clone)]
pub struct CreateProblemCommand {
    pub document: Value,
}

/// Handler for creating problems.
pub struct CreateProblemHandler {
    problems: Arc<dyn ProblemRepository>,
    upsert: Arc<UpsertProblemHandler>,
}

impl CreateProblemHandler {
    pub fn new(problems: Arc<dyn ProblemRepository>, upsert: Arc<UpsertProblemHandler>) -> Self {
        Self { problems, upsert }
    }

    pub async fn handle(
        &self,
        cmd: CreateProblemCommand,
    ) -> Result<UpsertProblemResult, DomainError> {
        // 1. Refuse a name that is already taken; a missing or malformed name
        //    is left for schema validation in the shared pipeline
        if let Some(raw) = cmd.document.get("name").and_then(Value::as_str) {
            if let Ok(name) = ProblemName::new(raw) {
                let slug = name.slug();
                if self.problems.exists(&slug).await? {
                    return Err(DomainError::new(
                        ErrorCode::ProblemExists,
                        format!("Problem '{}' already exists", name),
                    )
                    .with_detail("human_id", slug.as_str()));
                }
            }
        }

        // 2. Delegate to the shared pipeline
        self.upsert
            .handle(UpsertProblemCommand {
                document: cmd.document,
            })
            .await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{
        InMemoryAggregateRepository, InMemoryConnectionRepository, InMemoryProblemRepository,
        InMemoryRatingRepository,
    };
    use crate::adapters::validation::JsonDocumentValidator;
    use crate::application::handlers::rating::RateConnectionHandler;
    use serde_json::json;

    fn handler() -> CreateProblemHandler {
        let problems = Arc::new(InMemoryProblemRepository::new());
        let connections = Arc::new(InMemoryConnectionRepository::new());
        let ratings = Arc::new(InMemoryRatingRepository::new());
        let rate_connection = Arc::new(RateConnectionHandler::new(
            connections.clone(),
            ratings,
            Arc::new(InMemoryAggregateRepository::new()),
        ));
        let upsert = Arc::new(UpsertProblemHandler::new(
            Arc::new(JsonDocumentValidator::new()),
            problems.clone(),
            connections,
            rate_connection,
        ));
        CreateProblemHandler::new(problems, upsert)
    }

    #[tokio::test]
    async fn creates_problem_with_valid_document() {
        let handler = handler();

        let result = handler
            .handle(CreateProblemCommand {
                document: json!({"name": "soil erosion"}),
            })
            .await
            .unwrap();

        assert!(result.created);
        assert_eq!(result.problem.name().as_str(), "Soil Erosion");
    }

    #[tokio::test]
    async fn fails_when_problem_already_exists() {
        let handler = handler();
        handler
            .handle(CreateProblemCommand {
                document: json!({"name": "Soil Erosion"}),
            })
            .await
            .unwrap();

        let err = handler
            .handle(CreateProblemCommand {
                document: json!({"name": "soil EROSION"}),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProblemExists);
        assert_eq!(
            err.details.get("human_id").map(String::as_str),
            Some("soil_erosion")
        );
    }

    #[tokio::test]
    async fn invalid_document_reaches_schema_validation() {
        let handler = handler();

        let err = handler
            .handle(CreateProblemCommand {
                document: json!({"definition": "no name"}),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
