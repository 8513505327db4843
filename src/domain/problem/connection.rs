//! Connections between problems.
//!
//! Problems connect along two axes. On the causal axis `problem_a` drives
//! `problem_b`; on the scoped axis `problem_a` is broader than `problem_b`.
//! The same connection is seen through a different category from each end:
//! the connection "Drought -> Famine" sits in Famine's drivers list and in
//! Drought's impacts list.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProblemSlug, ValidationError};

/// Axis along which two problems connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionAxis {
    Causal,
    Scoped,
}

impl ConnectionAxis {
    /// Returns the lowercase string form used in documents and keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionAxis::Causal => "causal",
            ConnectionAxis::Scoped => "scoped",
        }
    }
}

impl fmt::Display for ConnectionAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConnectionAxis {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "causal" => Ok(ConnectionAxis::Causal),
            "scoped" => Ok(ConnectionAxis::Scoped),
            other => Err(ValidationError::invalid_format(
                "axis",
                format!("unknown axis '{}'", other),
            )),
        }
    }
}

/// Perspective-dependent category of a connection.
///
/// Categories come in inverse pairs sharing an axis: a connection in one
/// problem's drivers list is in the adjacent problem's impacts list, and
/// likewise for broader and narrower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionCategory {
    Drivers,
    Impacts,
    Broader,
    Narrower,
}

impl ConnectionCategory {
    /// All categories in canonical presentation order.
    pub const ALL: [ConnectionCategory; 4] = [
        ConnectionCategory::Drivers,
        ConnectionCategory::Impacts,
        ConnectionCategory::Broader,
        ConnectionCategory::Narrower,
    ];

    /// The axis this category belongs to.
    pub fn axis(&self) -> ConnectionAxis {
        match self {
            ConnectionCategory::Drivers | ConnectionCategory::Impacts => ConnectionAxis::Causal,
            ConnectionCategory::Broader | ConnectionCategory::Narrower => ConnectionAxis::Scoped,
        }
    }

    /// The category the same connection has from the adjacent problem.
    pub fn inverse(&self) -> ConnectionCategory {
        match self {
            ConnectionCategory::Drivers => ConnectionCategory::Impacts,
            ConnectionCategory::Impacts => ConnectionCategory::Drivers,
            ConnectionCategory::Broader => ConnectionCategory::Narrower,
            ConnectionCategory::Narrower => ConnectionCategory::Broader,
        }
    }

    /// Returns the lowercase string form used in documents and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionCategory::Drivers => "drivers",
            ConnectionCategory::Impacts => "impacts",
            ConnectionCategory::Broader => "broader",
            ConnectionCategory::Narrower => "narrower",
        }
    }
}

impl fmt::Display for ConnectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConnectionCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drivers" => Ok(ConnectionCategory::Drivers),
            "impacts" => Ok(ConnectionCategory::Impacts),
            "broader" => Ok(ConnectionCategory::Broader),
            "narrower" => Ok(ConnectionCategory::Narrower),
            other => Err(ValidationError::invalid_format(
                "category",
                format!("unknown category '{}'", other),
            )),
        }
    }
}

/// Errors raised by connection construction and perspective checks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConnectionError {
    #[error("A problem cannot be connected to itself: '{problem}'")]
    SelfReferential { problem: ProblemSlug },

    #[error("Problem '{problem}' is not a member of connection '{connection}'")]
    NotOnConnection {
        problem: ProblemSlug,
        connection: String,
    },
}

impl From<ConnectionError> for DomainError {
    fn from(error: ConnectionError) -> Self {
        match &error {
            ConnectionError::SelfReferential { problem } => {
                DomainError::new(ErrorCode::CircularConnection, error.to_string())
                    .with_detail("problem", problem.as_str())
            }
            ConnectionError::NotOnConnection {
                problem,
                connection,
            } => DomainError::new(ErrorCode::InvalidProblemForConnection, error.to_string())
                .with_detail("problem", problem.as_str())
                .with_detail("connection", connection.as_str()),
        }
    }
}

/// A link between two problems along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    axis: ConnectionAxis,
    problem_a: ProblemSlug,
    problem_b: ProblemSlug,
}

impl Connection {
    /// Creates a connection, rejecting self-reference.
    pub fn new(
        axis: ConnectionAxis,
        problem_a: ProblemSlug,
        problem_b: ProblemSlug,
    ) -> Result<Self, ConnectionError> {
        if problem_a == problem_b {
            return Err(ConnectionError::SelfReferential { problem: problem_a });
        }
        Ok(Self {
            axis,
            problem_a,
            problem_b,
        })
    }

    /// Builds the connection seen from `problem` looking at `adjacent`
    /// through the given category.
    pub fn from_category(
        category: ConnectionCategory,
        problem: &ProblemSlug,
        adjacent: &ProblemSlug,
    ) -> Result<Self, ConnectionError> {
        let (problem_a, problem_b) = match category {
            ConnectionCategory::Drivers | ConnectionCategory::Broader => {
                (adjacent.clone(), problem.clone())
            }
            ConnectionCategory::Impacts | ConnectionCategory::Narrower => {
                (problem.clone(), adjacent.clone())
            }
        };
        Self::new(category.axis(), problem_a, problem_b)
    }

    pub fn axis(&self) -> ConnectionAxis {
        self.axis
    }

    pub fn problem_a(&self) -> &ProblemSlug {
        &self.problem_a
    }

    pub fn problem_b(&self) -> &ProblemSlug {
        &self.problem_b
    }

    /// Returns true when the problem is one of the two endpoints.
    pub fn includes(&self, problem: &ProblemSlug) -> bool {
        problem == &self.problem_a || problem == &self.problem_b
    }

    /// Category of this connection from the given problem's perspective.
    pub fn category_for(&self, problem: &ProblemSlug) -> Result<ConnectionCategory, ConnectionError> {
        if !self.includes(problem) {
            return Err(ConnectionError::NotOnConnection {
                problem: problem.clone(),
                connection: self.to_string(),
            });
        }
        let is_b = problem == &self.problem_b;
        Ok(match self.axis {
            ConnectionAxis::Causal => {
                if is_b {
                    ConnectionCategory::Drivers
                } else {
                    ConnectionCategory::Impacts
                }
            }
            ConnectionAxis::Scoped => {
                if is_b {
                    ConnectionCategory::Broader
                } else {
                    ConnectionCategory::Narrower
                }
            }
        })
    }

    /// The problem on the other end from the given problem.
    pub fn adjacent_to(&self, problem: &ProblemSlug) -> Result<&ProblemSlug, ConnectionError> {
        if problem == &self.problem_a {
            Ok(&self.problem_b)
        } else if problem == &self.problem_b {
            Ok(&self.problem_a)
        } else {
            Err(ConnectionError::NotOnConnection {
                problem: problem.clone(),
                connection: self.to_string(),
            })
        }
    }

    /// Stable key "axis:problem_a:problem_b" used in payload maps.
    pub fn key_string(&self) -> String {
        format!("{}:{}:{}", self.axis, self.problem_a, self.problem_b)
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joint = match self.axis {
            ConnectionAxis::Causal => "->",
            ConnectionAxis::Scoped => "::",
        };
        write!(f, "{} {} {}", self.problem_a, joint, self.problem_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(s: &str) -> ProblemSlug {
        ProblemSlug::new(s).unwrap()
    }

    fn causal(a: &str, b: &str) -> Connection {
        Connection::new(ConnectionAxis::Causal, slug(a), slug(b)).unwrap()
    }

    fn scoped(a: &str, b: &str) -> Connection {
        Connection::new(ConnectionAxis::Scoped, slug(a), slug(b)).unwrap()
    }

    #[test]
    fn connection_rejects_self_reference() {
        let result = Connection::new(ConnectionAxis::Causal, slug("poverty"), slug("poverty"));
        match result {
            Err(ConnectionError::SelfReferential { problem }) => {
                assert_eq!(problem.as_str(), "poverty")
            }
            _ => panic!("Expected SelfReferential error"),
        }
    }

    #[test]
    fn causal_connection_displays_with_arrow() {
        assert_eq!(causal("drought", "famine").to_string(), "drought -> famine");
    }

    #[test]
    fn scoped_connection_displays_with_double_colon() {
        assert_eq!(
            scoped("pollution", "smog").to_string(),
            "pollution :: smog"
        );
    }

    #[test]
    fn category_depends_on_perspective() {
        let connection = causal("drought", "famine");
        assert_eq!(
            connection.category_for(&slug("famine")).unwrap(),
            ConnectionCategory::Drivers
        );
        assert_eq!(
            connection.category_for(&slug("drought")).unwrap(),
            ConnectionCategory::Impacts
        );

        let connection = scoped("pollution", "smog");
        assert_eq!(
            connection.category_for(&slug("smog")).unwrap(),
            ConnectionCategory::Broader
        );
        assert_eq!(
            connection.category_for(&slug("pollution")).unwrap(),
            ConnectionCategory::Narrower
        );
    }

    #[test]
    fn category_rejects_outside_problem() {
        let connection = causal("drought", "famine");
        let result = connection.category_for(&slug("poverty"));
        assert!(matches!(
            result,
            Err(ConnectionError::NotOnConnection { .. })
        ));
    }

    #[test]
    fn from_category_places_endpoints_by_perspective() {
        let problem = slug("famine");
        let adjacent = slug("drought");

        let from_drivers =
            Connection::from_category(ConnectionCategory::Drivers, &problem, &adjacent).unwrap();
        assert_eq!(from_drivers.problem_a(), &adjacent);
        assert_eq!(from_drivers.problem_b(), &problem);

        let from_impacts =
            Connection::from_category(ConnectionCategory::Impacts, &problem, &adjacent).unwrap();
        assert_eq!(from_impacts.problem_a(), &problem);
        assert_eq!(from_impacts.problem_b(), &adjacent);

        let from_broader =
            Connection::from_category(ConnectionCategory::Broader, &problem, &adjacent).unwrap();
        assert_eq!(from_broader.problem_a(), &adjacent);
        assert_eq!(from_broader.axis(), ConnectionAxis::Scoped);

        let from_narrower =
            Connection::from_category(ConnectionCategory::Narrower, &problem, &adjacent).unwrap();
        assert_eq!(from_narrower.problem_a(), &problem);
    }

    #[test]
    fn from_category_round_trips_through_category_for() {
        let problem = slug("famine");
        let adjacent = slug("drought");
        for category in ConnectionCategory::ALL {
            let connection =
                Connection::from_category(category, &problem, &adjacent).unwrap();
            assert_eq!(connection.category_for(&problem).unwrap(), category);
            assert_eq!(
                connection.category_for(&adjacent).unwrap(),
                category.inverse()
            );
        }
    }

    #[test]
    fn adjacent_to_returns_other_endpoint() {
        let connection = causal("drought", "famine");
        assert_eq!(
            connection.adjacent_to(&slug("drought")).unwrap().as_str(),
            "famine"
        );
        assert_eq!(
            connection.adjacent_to(&slug("famine")).unwrap().as_str(),
            "drought"
        );
        assert!(connection.adjacent_to(&slug("poverty")).is_err());
    }

    #[test]
    fn key_string_is_axis_and_endpoints() {
        assert_eq!(
            causal("drought", "famine").key_string(),
            "causal:drought:famine"
        );
    }

    #[test]
    fn axis_parses_from_lowercase_string() {
        assert_eq!("causal".parse::<ConnectionAxis>().unwrap(), ConnectionAxis::Causal);
        assert_eq!("scoped".parse::<ConnectionAxis>().unwrap(), ConnectionAxis::Scoped);
        assert!("Causal".parse::<ConnectionAxis>().is_err());
    }

    #[test]
    fn category_inverse_pairs_share_axis() {
        for category in ConnectionCategory::ALL {
            assert_eq!(category.axis(), category.inverse().axis());
            assert_eq!(category.inverse().inverse(), category);
        }
    }

    #[test]
    fn self_reference_converts_to_circular_connection_error() {
        let error = Connection::new(ConnectionAxis::Causal, slug("poverty"), slug("poverty"))
            .unwrap_err();
        let domain: DomainError = error.into();
        assert_eq!(domain.code, ErrorCode::CircularConnection);
    }
}
