//! Upload document shapes.
//!
//! These structs are decoded from JSON that has already passed schema
//! validation, so deserialization failures indicate a validator gap
//! rather than bad client input.

use serde::Deserialize;

use super::connection::ConnectionCategory;

/// A problem document as uploaded or posted.
#[derive(Debug, Clone, Deserialize)]
pub struct ProblemDocument {
    pub name: String,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub definition_url: Option<String>,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub drivers: Vec<ConnectionDocument>,
    #[serde(default)]
    pub impacts: Vec<ConnectionDocument>,
    #[serde(default)]
    pub broader: Vec<ConnectionDocument>,
    #[serde(default)]
    pub narrower: Vec<ConnectionDocument>,
}

impl ProblemDocument {
    /// Connection lists paired with their category, in canonical order.
    pub fn connection_lists(&self) -> [(ConnectionCategory, &[ConnectionDocument]); 4] {
        [
            (ConnectionCategory::Drivers, self.drivers.as_slice()),
            (ConnectionCategory::Impacts, self.impacts.as_slice()),
            (ConnectionCategory::Broader, self.broader.as_slice()),
            (ConnectionCategory::Narrower, self.narrower.as_slice()),
        ]
    }
}

/// One entry in a problem document's connection lists.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDocument {
    pub adjacent_problem: String,
    #[serde(default)]
    pub problem_connection_ratings: Vec<RatingDocument>,
}

/// A contributed rating inside a connection document.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingDocument {
    pub rating: i64,
    #[serde(default)]
    pub weight: Option<i64>,
    pub user: String,
    pub org: String,
    pub geo: String,
}
