//! Contributed ratings: one contributor's judgment of one connection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::community::Community;
use crate::domain::foundation::{ContributorId, GeoScope, OrgScope, ProblemSlug};
use crate::domain::problem::{Connection, ConnectionCategory, ConnectionError};

use super::value::RatingValue;
use super::weight::RatingWeight;

/// A rating a contributor placed on a connection from the perspective of
/// one of its problems, scoped to an org and geo.
///
/// The same contributor may rate the same connection differently from
/// each end: rating "Drought -> Famine" as a driver of Famine is a
/// separate judgment from rating it as an impact of Drought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributedRating {
    connection: Connection,
    problem: ProblemSlug,
    org: OrgScope,
    geo: GeoScope,
    user: ContributorId,
    category: ConnectionCategory,
    rating: RatingValue,
    weight: RatingWeight,
}

impl ContributedRating {
    /// Creates a contributed rating, verifying the context problem is on
    /// the connection.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connection: Connection,
        problem: ProblemSlug,
        org: OrgScope,
        geo: GeoScope,
        user: ContributorId,
        rating: RatingValue,
        weight: RatingWeight,
    ) -> Result<Self, ConnectionError> {
        let category = connection.category_for(&problem)?;
        Ok(Self {
            connection,
            problem,
            org,
            geo,
            user,
            category,
            rating,
            weight,
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
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

    pub fn user(&self) -> &ContributorId {
        &self.user
    }

    /// Category of the rated connection from the context problem.
    pub fn category(&self) -> ConnectionCategory {
        self.category
    }

    pub fn rating(&self) -> RatingValue {
        self.rating
    }

    pub fn weight(&self) -> RatingWeight {
        self.weight
    }

    /// The community this rating contributes to.
    pub fn community(&self) -> Community {
        Community::new(self.problem.clone(), self.org.clone(), self.geo.clone())
    }

    /// Key identifying the slot this rating occupies; a second rating with
    /// the same key replaces the first.
    pub fn scope_key(&self) -> RatingScopeKey {
        RatingScopeKey {
            connection: self.connection.clone(),
            problem: self.problem.clone(),
            org: self.org.clone(),
            geo: self.geo.clone(),
            user: self.user.clone(),
        }
    }

    /// True when this rating falls inside the given community's scope.
    pub fn in_community(&self, community: &Community) -> bool {
        &self.problem == community.problem()
            && &self.org == community.org()
            && &self.geo == community.geo()
    }
}

impl fmt::Display for ContributedRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} with {} weight on {} at {} in {}",
            self.rating, self.user, self.weight, self.connection, self.org, self.geo
        )
    }
}

/// Identity of a contributed rating: one slot per (connection, problem,
/// org, geo, user).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RatingScopeKey {
    pub connection: Connection,
    pub problem: ProblemSlug,
    pub org: OrgScope,
    pub geo: GeoScope,
    pub user: ContributorId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::problem::ConnectionAxis;

    fn slug(s: &str) -> ProblemSlug {
        ProblemSlug::new(s).unwrap()
    }

    fn connection() -> Connection {
        Connection::new(ConnectionAxis::Causal, slug("drought"), slug("famine")).unwrap()
    }

    fn rating_for(problem: &str, user: &str, rating: i64, weight: i64) -> ContributedRating {
        ContributedRating::new(
            connection(),
            slug(problem),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
            ContributorId::new(user).unwrap(),
            RatingValue::try_from_i64(rating).unwrap(),
            RatingWeight::try_from_i64(weight).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rating_derives_category_from_context_problem() {
        assert_eq!(
            rating_for("famine", "alice", 3, 1).category(),
            ConnectionCategory::Drivers
        );
        assert_eq!(
            rating_for("drought", "alice", 3, 1).category(),
            ConnectionCategory::Impacts
        );
    }

    #[test]
    fn rating_rejects_problem_outside_connection() {
        let result = ContributedRating::new(
            connection(),
            slug("poverty"),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
            ContributorId::new("alice").unwrap(),
            RatingValue::try_from_i64(2).unwrap(),
            RatingWeight::default(),
        );
        assert!(matches!(
            result,
            Err(ConnectionError::NotOnConnection { .. })
        ));
    }

    #[test]
    fn scope_keys_differ_by_context_problem() {
        let from_famine = rating_for("famine", "alice", 3, 1);
        let from_drought = rating_for("drought", "alice", 1, 1);
        assert_ne!(from_famine.scope_key(), from_drought.scope_key());
    }

    #[test]
    fn scope_keys_match_for_same_slot() {
        let first = rating_for("famine", "alice", 3, 1);
        let revised = rating_for("famine", "alice", 4, 10);
        assert_eq!(first.scope_key(), revised.scope_key());
    }

    #[test]
    fn in_community_checks_all_three_scopes() {
        let rating = rating_for("famine", "alice", 3, 1);
        let same = Community::new(
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
        );
        let other_geo = Community::new(
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::new("us/tx").unwrap(),
        );
        assert!(rating.in_community(&same));
        assert!(!rating.in_community(&other_geo));
    }

    #[test]
    fn rating_displays_summary_line() {
        let rating = rating_for("famine", "alice", 3, 2);
        assert_eq!(
            rating.to_string(),
            "3 by alice with 2 weight on drought -> famine at acme in global"
        );
    }
}
