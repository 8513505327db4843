//! In-Memory Connection Repository Adapter
//!
//! Stores the connection set in memory.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProblemSlug};
use crate::domain::problem::Connection;
use crate::ports::ConnectionRepository;

/// In-memory storage for connections
#[derive(Debug, Clone)]
pub struct InMemoryConnectionRepository {
    connections: Arc<RwLock<HashSet<Connection>>>,
}

impl InMemoryConnectionRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.connections.write().await.clear();
    }
}

impl Default for InMemoryConnectionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn insert(&self, connection: &Connection) -> Result<bool, DomainError> {
        let mut connections = self.connections.write().await;
        Ok(connections.insert(connection.clone()))
    }

    async fn contains(&self, connection: &Connection) -> Result<bool, DomainError> {
        let connections = self.connections.read().await;
        Ok(connections.contains(connection))
    }

    async fn list_for_problem(
        &self,
        problem: &ProblemSlug,
    ) -> Result<Vec<Connection>, DomainError> {
        let connections = self.connections.read().await;
        let mut touching: Vec<Connection> = connections
            .iter()
            .filter(|c| c.includes(problem))
            .cloned()
            .collect();
        // HashSet iteration order is unstable; key order keeps listings deterministic.
        touching.sort_by_key(|c| c.key_string());
        Ok(touching)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let connections = self.connections.read().await;
        Ok(connections.len())
    }
}
