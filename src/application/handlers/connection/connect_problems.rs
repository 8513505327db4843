//! ConnectProblemsHandler - Command handler for connecting two problems.
//!
//! Declares a directed connection between two problems named by the caller.
//! On the causal axis problem A drives problem B; on the scoped axis A is
//! the broader problem containing B. Problems named but not yet stored are
//! created on the spot, matching how uploads vivify adjacent problems.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::problem::{Connection, ConnectionAxis, Problem, ProblemName};
use crate::ports::{ConnectionRepository, ProblemRepository};

/// Command to connect problem A to problem B along an axis.
#[derive(Debug, Clone)]
pub struct ConnectProblemsCommand {
    pub axis: ConnectionAxis,
    /// Display name of the driving or broader problem.
    pub problem_a: String,
    /// Display name of the driven or narrower problem.
    pub problem_b: String,
}

/// Result of declaring a connection.
#[derive(Debug, Clone)]
pub struct ConnectProblemsResult {
    pub connection: Connection,
    /// Problems created because they were named but not stored.
    pub problems_created: Vec<Problem>,
}

/// Handler for declaring connections.
pub struct ConnectProblemsHandler {
    problems: Arc<dyn ProblemRepository>,
    connections: Arc<dyn ConnectionRepository>,
}

impl ConnectProblemsHandler {
    pub fn new(
        problems: Arc<dyn ProblemRepository>,
        connections: Arc<dyn ConnectionRepository>,
    ) -> Self {
        Self {
            problems,
            connections,
        }
    }

    pub async fn handle(
        &self,
        cmd: ConnectProblemsCommand,
    ) -> Result<ConnectProblemsResult, DomainError> {
        // 1. Normalize both names; this also rejects connecting a problem
        //    to itself under a different spelling
        let name_a = ProblemName::new(&cmd.problem_a)?;
        let name_b = ProblemName::new(&cmd.problem_b)?;
        let connection = Connection::new(cmd.axis, name_a.slug(), name_b.slug())?;

        // 2. Create whichever endpoints are missing
        let mut problems_created = Vec::new();
        for name in [name_a, name_b] {
            if !self.problems.exists(&name.slug()).await? {
                let problem = Problem::new(name);
                self.problems.save(&problem).await?;
                problems_created.push(problem);
            }
        }

        // 3. Store the connection; redeclaring one is a conflict
        if !self.connections.insert(&connection).await? {
            return Err(DomainError::new(
                ErrorCode::DuplicateConnection,
                format!("Connection '{}' already exists", connection),
            )
            .with_detail("connection", connection.key_string()));
        }

        Ok(ConnectProblemsResult {
            connection,
            problems_created,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
