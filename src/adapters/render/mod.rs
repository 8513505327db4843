//! Render adapters - server-side HTML generation.

mod problem_page;

pub use problem_page::ProblemPageGenerator;
