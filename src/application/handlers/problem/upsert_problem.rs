//! UpsertProblemHandler - Command handler for decoding a problem document.
//!
//! The shared upload pipeline. A submitted document is validated against the
//! problem schema, declared defaults are filled, and the result is decoded
//! into typed documents and merged into storage. The named problem and any
//! adjacent problems it references are created on first sight. Scalar fields
//! replace stored values (a blank clears), images append, connections are
//! vivified, and embedded ratings are recorded through the rating handler so
//! cached aggregates stay current.

use std::sync::Arc;

use serde_json::Value;

use crate::application::handlers::rating::{RateConnectionCommand, RateConnectionHandler};
use crate::domain::foundation::{
    ContributorId, DomainError, ErrorCode, GeoScope, OrgScope, ProblemSlug,
};
use crate::domain::problem::{
    Connection, ImageUrl, Problem, ProblemDocument, ProblemName, RatingDocument,
};
use crate::domain::rating::{ContributedRating, RatingValue, RatingWeight};
use crate::ports::{ConnectionRepository, DocumentKind, DocumentValidator, ProblemRepository};

/// Command carrying a raw problem document to decode and merge.
#[derive(Debug, Clone)]
pub struct UpsertProblemCommand {
    pub document: Value,
}

/// Everything a merge touched, for callers that report update sets.
#[derive(Debug, Clone)]
pub struct UpsertProblemResult {
    /// The named problem after the merge.
    pub problem: Problem,
    /// Whether the named problem was created by this merge.
    pub created: bool,
    /// Whether an existing problem's fields changed.
    pub modified: bool,
    /// Adjacent problems created because a connection referenced them.
    pub adjacent_created: Vec<Problem>,
    /// Connections newly added by this merge.
    pub connections_created: Vec<Connection>,
    /// Ratings recorded or replaced by this merge.
    pub ratings_upserted: Vec<ContributedRating>,
}

/// Handler for the document upload pipeline.
pub struct UpsertProblemHandler {
    validator: Arc<dyn DocumentValidator>,
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
    rate_connection: Arc<RateConnectionHandler>,
}

impl UpsertProblemHandler {
    pub fn new(
        validator: Arc<dyn DocumentValidator>,
        problems: Arc<dyn ProblemRepository>,
        connections: Arc<dyn ConnectionRepository>,
        rate_connection: Arc<RateConnectionHandler>,
    ) -> Self {
        Self {
            validator,
            problems,
            connections,
            rate_connection,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpsertProblemCommand,
    ) -> Result<UpsertProblemResult, DomainError> {
        // 1. Validate the raw document and fill declared defaults
        self.validator.validate(DocumentKind::Problem, &cmd.document)?;
        let mut document = cmd.document;
        self.validator
            .apply_defaults(DocumentKind::Problem, &mut document);

        // 2. Decode into the typed document; the schema guarantees the shape
        let doc: ProblemDocument = serde_json::from_value(document).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to decode problem document: {}", e),
            )
        })?;

        // 3. Find or create the named problem
        let name = ProblemName::new(&doc.name)?;
        let slug = name.slug();
        let (mut problem, created) = match self.problems.find(&slug).await? {
            Some(existing) => (existing, false),
            None => (Problem::new(name), true),
        };

        // 4. Merge scalar fields and images; absent fields are left alone
        let mut modified = false;
        if let Some(definition) = &doc.definition {
            modified |= problem.set_definition(definition)?;
        }
        if let Some(url) = &doc.definition_url {
            modified |= problem.set_definition_url(url)?;
        }
        if let Some(sponsor) = &doc.sponsor {
            modified |= problem.set_sponsor(sponsor)?;
        }
        for raw in &doc.images {
            let image = ImageUrl::new(raw)?;
            modified |= problem.add_image(image);
        }
        if created || modified {
            self.problems.save(&problem).await?;
        }

        // 5. Vivify connections and record their embedded ratings
        let mut adjacent_created = Vec::new();
        let mut connections_created = Vec::new();
        let mut ratings_upserted = Vec::new();
        for (category, docs) in doc.connection_lists() {
            for conn_doc in docs {
                let adjacent_name = ProblemName::new(&conn_doc.adjacent_problem)?;
                let adjacent_slug = adjacent_name.slug();
                if !self.problems.exists(&adjacent_slug).await? {
                    let adjacent = Problem::new(adjacent_name);
                    self.problems.save(&adjacent).await?;
                    adjacent_created.push(adjacent);
                }
                let connection = Connection::from_category(category, &slug, &adjacent_slug)?;
                if self.connections.insert(&connection).await? {
                    connections_created.push(connection.clone());
                }
                for rating_doc in &conn_doc.problem_connection_ratings {
                    let result = self
                        .rate_connection
                        .handle(self.rating_command(&connection, &slug, rating_doc)?)
                        .await?;
                    ratings_upserted.push(result.rating);
                }
            }
        }

        Ok(UpsertProblemResult {
            problem,
            created,
            modified,
            adjacent_created,
            connections_created,
            ratings_upserted,
        })
    }

    /// Decodes one embedded rating document into a rating command. The
    /// perspective problem is the document's own problem, and an omitted
    /// weight falls back to the default expertise weight.
    fn rating_command(
        &self,
        connection: &Connection,
        problem: &ProblemSlug,
        doc: &RatingDocument,
    ) -> Result<RateConnectionCommand, DomainError> {
        Ok(RateConnectionCommand {
            connection: connection.clone(),
            problem: problem.clone(),
            org: OrgScope::new(&doc.org)?,
            geo: GeoScope::new(&doc.geo)?,
            user: ContributorId::new(&doc.user)?,
            rating: RatingValue::try_from_i64(doc.rating)?,
            weight: doc
                .weight
                .map(RatingWeight::try_from_i64)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
