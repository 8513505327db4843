//! UpdateProblemHandler - Command handler for updating a problem from a document.
//!
//! Targets an existing problem by slug and merges a document into it through
//! the shared upload pipeline. The stored name is injected into the document
//! before merging, so the name cannot be changed by an update; a document
//! that names a different problem is rejected outright.

use std::sync::Arc;

use serde_json::Value;

use crate::application::handlers::problem::{
    UpsertProblemCommand, UpsertProblemHandler, UpsertProblemResult,
};
use crate::domain::foundation::{DomainError, ErrorCode, ProblemSlug};
use crate::domain::problem::ProblemName;
use crate::ports::ProblemRepository;

/// Command to merge a document into the problem identified by `human_id`.
#[derive(Debug, Clone)]
pub struct UpdateProblemCommand {
    pub human_id: ProblemSlug,
    pub document: Value,
}

/// Handler for updating problems.
pub struct UpdateProblemHandler {
    problems: Arc<dyn ProblemRepository>,
    upsert: Arc<UpsertProblemHandler>,
}

impl UpdateProblemHandler {
    pub fn new(problems: Arc<dyn ProblemRepository>, upsert: Arc<UpsertProblemHandler>) -> Self {
        Self { problems, upsert }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProblemCommand,
    ) -> Result<UpsertProblemResult, DomainError> {
        // 1. The target must exist
        let existing = self.problems.find(&cmd.human_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::ProblemNotFound,
                format!("Problem '{}' does not exist", cmd.human_id),
            )
            .with_detail("human_id", cmd.human_id.as_str())
        })?;

        // 2. A document naming a different problem is a mistake, not a rename
        let mut document = cmd.document;
        if let Some(raw) = document.get("name").and_then(Value::as_str) {
            if let Ok(name) = ProblemName::new(raw) {
                if &name.slug() != existing.slug() {
                    return Err(DomainError::new(
                        ErrorCode::ValidationFailed,
                        format!(
                            "Document names '{}' but targets '{}'; names cannot be changed",
                            name,
                            existing.name()
                        ),
                    )
                    .with_detail("field", "name"));
                }
            }
        }

        // 3. Inject the stored name and delegate to the shared pipeline
        if let Some(object) = document.as_object_mut() {
            object.insert(
                "name".to_string(),
                Value::String(existing.name().as_str().to_string()),
            );
        }
        self.upsert.handle(UpsertProblemCommand { document }).await
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
    use crate::domain::problem::Problem;
    use serde_json::json;

    fn slug(raw: &str) -> ProblemSlug {
        ProblemSlug::new(raw).unwrap()
    }

    fn fixture() -> (UpdateProblemHandler, Arc<InMemoryProblemRepository>) {
        let problems = Arc::new(InMemoryProblemRepository::new());
        let connections = Arc::new(InMemoryConnectionRepository::new());
        let rate_connection = Arc::new(RateConnectionHandler::new(
            connections.clone(),
            Arc::new(InMemoryRatingRepository::new()),
            Arc::new(InMemoryAggregateRepository::new()),
        ));
        let upsert = Arc::new(UpsertProblemHandler::new(
            Arc::new(JsonDocumentValidator::new()),
            problems.clone(),
            connections,
            rate_connection,
        ));
        let handler = UpdateProblemHandler::new(problems.clone(), upsert);
        (handler, problems)
    }

    async fn seed(problems: &InMemoryProblemRepository, name: &str) {
        problems
            .save(&Problem::new(ProblemName::new(name).unwrap()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn updates_existing_problem_fields() {
        let (handler, problems) = fixture();
        seed(&problems, "Deforestation").await;

        let result = handler
            .handle(UpdateProblemCommand {
                human_id: slug("deforestation"),
                document: json!({"definition": "Loss of forest cover."}),
            })
            .await
            .unwrap();

        assert!(!result.created);
        assert!(result.modified);
        assert_eq!(result.problem.definition(), Some("Loss of forest cover."));
        assert_eq!(result.problem.name().as_str(), "Deforestation");
    }

    #[tokio::test]
    async fn fails_when_problem_does_not_exist() {
        let (handler, _problems) = fixture();

        let err = handler
            .handle(UpdateProblemCommand {
                human_id: slug("missing"),
                document: json!({"definition": "x"}),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProblemNotFound);
    }

    #[tokio::test]
    async fn rejects_document_naming_a_different_problem() {
        let (handler, problems) = fixture();
        seed(&problems, "Deforestation").await;

        let err = handler
            .handle(UpdateProblemCommand {
                human_id: slug("deforestation"),
                document: json!({"name": "Reforestation"}),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field").map(String::as_str), Some("name"));
    }

    #[tokio::test]
    async fn accepts_document_restating_the_same_name() {
        let (handler, problems) = fixture();
        seed(&problems, "Deforestation").await;

        let result = handler
            .handle(UpdateProblemCommand {
                human_id: slug("deforestation"),
                document: json!({"name": "deforestation", "sponsor": "Forest Fund"}),
            })
            .await
            .unwrap();

        assert_eq!(result.problem.sponsor(), Some("Forest Fund"));
    }

    #[tokio::test]
    async fn update_can_add_connections() {
        let (handler, problems) = fixture();
        seed(&problems, "Deforestation").await;

        let result = handler
            .handle(UpdateProblemCommand {
                human_id: slug("deforestation"),
                document: json!({"impacts": [{"adjacent_problem": "Soil Erosion"}]}),
            })
            .await
            .unwrap();

        assert_eq!(result.connections_created.len(), 1);
        assert_eq!(result.adjacent_created[0].name().as_str(), "Soil Erosion");
    }
}
