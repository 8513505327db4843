//! Community scope: a problem viewed by an org within a geo.
//!
//! Communities are not stored; any (problem, org, geo) triple names one.
//! Aggregate ratings are computed per community, so the same connection
//! can carry a different consensus in each community that views it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{GeoScope, OrgScope, ProblemSlug};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Community {
    problem: ProblemSlug,
    org: OrgScope,
    geo: GeoScope,
}

impl Community {
    pub fn new(problem: ProblemSlug, org: OrgScope, geo: GeoScope) -> Self {
        Self { problem, org, geo }
    }

    pub fn problem(&self) -> &ProblemSlug {
        &self.problem
    }

    pub fn org(&self) -> &OrgScope {
        &self.org
    }

    pub fn geo(&self) -> &GeoScope {
        &self.geo
    }

    /// Stable key "problem@org@geo" used in payload maps.
    pub fn key_string(&self) -> String {
        format!("{}@{}@{}", self.problem, self.org, self.geo)
    }

    /// URI of the community page for the given problem in this org and geo.
    pub fn uri_for(problem: &ProblemSlug, org: &OrgScope, geo: &GeoScope) -> String {
        format!(
            "/communities/{}?org={}&geo={}",
            problem,
            percent_encode_query(org.as_str()),
            percent_encode_query(geo.as_str())
        )
    }

    /// URI of this community's page.
    pub fn uri(&self) -> String {
        Self::uri_for(&self.problem, &self.org, &self.geo)
    }

    /// The community viewing the same org and geo from another problem.
    pub fn for_problem(&self, problem: ProblemSlug) -> Community {
        Community {
            problem,
            org: self.org.clone(),
            geo: self.geo.clone(),
        }
    }
}

impl fmt::Display for Community {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key_string())
    }
}

/// Percent-encodes a query component, keeping RFC 3986 unreserved characters.
fn percent_encode_query(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{:02X}", other));
            }
        }
    }
    encoded
}
