//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Characters permitted in a problem slug besides lowercase letters and digits.
const SLUG_PUNCTUATION: &str = "-+.,$'()_";

/// URL-safe identifier for a problem, derived from its display name by
/// lowercasing and replacing spaces with underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemSlug(String);

impl ProblemSlug {
    /// Creates a new ProblemSlug, validating the slug character set.
    pub fn new(slug: impl Into<String>) -> Result<Self, ValidationError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(ValidationError::empty_field("human_id"));
        }
        if slug.chars().count() > 60 {
            return Err(ValidationError::too_long("human_id", 60, slug.chars().count()));
        }
        let valid = slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || SLUG_PUNCTUATION.contains(c));
        if !valid {
            return Err(ValidationError::invalid_format(
                "human_id",
                "only lowercase letters, digits, and -+.,$'()_ are allowed",
            ));
        }
        Ok(Self(slug))
    }

    /// Wraps a string already normalized to the slug character set.
    pub(crate) fn from_normalized(slug: String) -> Self {
        Self(slug)
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProblemSlug {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Organization scope of a community, e.g. a university or nonprofit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgScope(String);

impl OrgScope {
    /// Creates a new OrgScope, returning error if empty after trimming.
    pub fn new(org: impl Into<String>) -> Result<Self, ValidationError> {
        let org = org.into().trim().to_string();
        if org.is_empty() {
            return Err(ValidationError::empty_field("org"));
        }
        Ok(Self(org))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geographic scope of a community, e.g. "us/tx/austin".
///
/// The catch-all scope is "global", used when a contributor does not
/// narrow their rating to a particular place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeoScope(String);

impl GeoScope {
    pub const GLOBAL: &'static str = "global";

    /// Creates a new GeoScope, returning error if empty after trimming.
    pub fn new(geo: impl Into<String>) -> Result<Self, ValidationError> {
        let geo = geo.into().trim().to_string();
        if geo.is_empty() {
            return Err(ValidationError::empty_field("geo"));
        }
        Ok(Self(geo))
    }

    /// Returns the catch-all "global" scope.
    pub fn global() -> Self {
        Self(Self::GLOBAL.to_string())
    }

    /// Returns true when this is the catch-all scope.
    pub fn is_global(&self) -> bool {
        self.0 == Self::GLOBAL
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GeoScope {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Display for GeoScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the contributor who placed a rating.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContributorId(String);

impl ContributorId {
    /// Creates a new ContributorId, returning error if empty after trimming.
    pub fn new(user: impl Into<String>) -> Result<Self, ValidationError> {
        let user = user.into().trim().to_string();
        if user.is_empty() {
            return Err(ValidationError::empty_field("user"));
        }
        Ok(Self(user))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContributorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
