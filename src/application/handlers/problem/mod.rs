//! Problem command and query handlers.

mod create_problem;
mod get_problem;
mod list_problems;
mod update_problem;
mod upsert_problem;

pub use create_problem::{CreateProblemCommand, CreateProblemHandler};
pub use get_problem::{ConnectionSummary, GetProblemHandler, GetProblemQuery, GetProblemResult};
pub use list_problems::ListProblemsHandler;
pub use update_problem::{UpdateProblemCommand, UpdateProblemHandler};
pub use upsert_problem::{UpsertProblemCommand, UpsertProblemHandler, UpsertProblemResult};
