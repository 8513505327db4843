//! LoadDataHandler - Command handler for loading problem documents from disk.
//!
//! Reads one JSON file, or every `.json` file in a directory, and feeds each
//! document through the shared upload pipeline. A file holds an object
//! mapping problem names to documents; the key becomes the document's name.
//! Files whose name mentions `schema` are skipped so schema definitions can
//! sit next to the data they describe. Loading is idempotent: running the
//! same load twice leaves storage unchanged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::application::handlers::problem::{UpsertProblemCommand, UpsertProblemHandler};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::problem::{Connection, Problem};
use crate::domain::rating::ContributedRating;

/// Command to load documents from a file or directory path.
#[derive(Debug, Clone)]
pub struct LoadDataCommand {
    pub path: String,
}

/// Everything a load created or modified, deduplicated across files.
#[derive(Debug, Clone, Default)]
pub struct LoadDataResult {
    pub files_loaded: usize,
    pub problems: Vec<Problem>,
    pub connections: Vec<Connection>,
    pub ratings: Vec<ContributedRating>,
}

/// Handler for loading problem data.
pub struct LoadDataHandler {
    upsert: Arc<UpsertProblemHandler>,
}

impl LoadDataHandler {
    pub fn new(upsert: Arc<UpsertProblemHandler>) -> Self {
        Self { upsert }
    }

    pub async fn handle(&self, cmd: LoadDataCommand) -> Result<LoadDataResult, DomainError> {
        // 1. Resolve the path to a list of data files
        let files = self.resolve_files(&cmd.path).await?;

        // 2. Merge every document in every file
        let mut result = LoadDataResult::default();
        for file in &files {
            self.load_file(file, &mut result).await?;
            result.files_loaded += 1;
        }

        info!(
            path = %cmd.path,
            files = result.files_loaded,
            problems = result.problems.len(),
            connections = result.connections.len(),
            ratings = result.ratings.len(),
            "Loaded problem documents"
        );
        Ok(result)
    }

    /// Expands a path into data files: the file itself, or the `.json` files
    /// directly inside a directory. Schema files are never data.
    async fn resolve_files(&self, path: &str) -> Result<Vec<PathBuf>, DomainError> {
        if path.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidJsonPath,
                "Data path is empty",
            ));
        }
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidJsonPath,
                format!("Cannot read data path '{}': {}", path, e),
            )
            .with_detail("path", path)
        })?;
        if metadata.is_file() {
            return Ok(vec![PathBuf::from(path)]);
        }

        let mut entries = tokio::fs::read_dir(path).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidJsonPath,
                format!("Cannot read data directory '{}': {}", path, e),
            )
            .with_detail("path", path)
        })?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidJsonPath,
                format!("Cannot read data directory '{}': {}", path, e),
            )
        })? {
            let candidate = entry.path();
            if is_data_file(&candidate) {
                files.push(candidate);
            }
        }
        if files.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidJsonPath,
                format!("No JSON data files found in '{}'", path),
            )
            .with_detail("path", path));
        }
        files.sort();
        Ok(files)
    }

    async fn load_file(&self, file: &Path, result: &mut LoadDataResult) -> Result<(), DomainError> {
        let display = file.display().to_string();
        let contents = tokio::fs::read_to_string(file).await.map_err(|e| {
            DomainError::new(
                ErrorCode::InvalidJsonPath,
                format!("Cannot read '{}': {}", display, e),
            )
            .with_detail("path", display.clone())
        })?;
        let parsed: Value = serde_json::from_str(&contents).map_err(|e| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid JSON in '{}': {}", display, e),
            )
            .with_detail("path", display.clone())
        })?;
        let Value::Object(documents) = parsed else {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                format!(
                    "Top level of '{}' must be an object mapping problem names to documents",
                    display
                ),
            )
            .with_detail("path", display));
        };

        for (name, mut document) in documents {
            // The top-level key names the problem
            match document.as_object_mut() {
                Some(object) => {
                    object.insert("name".to_string(), Value::String(name));
                }
                None => {
                    return Err(DomainError::new(
                        ErrorCode::ValidationFailed,
                        format!("Document for '{}' in '{}' must be an object", name, display),
                    )
                    .with_detail("path", display));
                }
            }
            let merged = self
                .upsert
                .handle(UpsertProblemCommand { document })
                .await?;

            if merged.created || merged.modified {
                record_problem(&mut result.problems, merged.problem);
            }
            for problem in merged.adjacent_created {
                record_problem(&mut result.problems, problem);
            }
            for connection in merged.connections_created {
                record_connection(&mut result.connections, connection);
            }
            for rating in merged.ratings_upserted {
                record_rating(&mut result.ratings, rating);
            }
        }
        Ok(())
    }
}

fn is_data_file(path: &Path) -> bool {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let mentions_schema = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().contains("schema"))
        .unwrap_or(false);
    is_json && !mentions_schema
}

fn record_problem(set: &mut Vec<Problem>, problem: Problem) {
    if let Some(existing) = set.iter_mut().find(|p| p.slug() == problem.slug()) {
        *existing = problem;
    } else {
        set.push(problem);
    }
}

fn record_connection(set: &mut Vec<Connection>, connection: Connection) {
    if !set.contains(&connection) {
        set.push(connection);
    }
}

fn record_rating(set: &mut Vec<ContributedRating>, rating: ContributedRating) {
    if let Some(existing) = set.iter_mut().find(|r| r.scope_key() == rating.scope_key()) {
        *existing = rating;
    } else {
        set.push(rating);
    }
}

// ============================================================================
// Tests
// ============================================================================
