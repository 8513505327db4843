//! Aggregate ratings: the weighted consensus of a community on a connection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::community::Community;
use crate::domain::foundation::{DomainError, ErrorCode, ProblemSlug, ValidationError};
use crate::domain::problem::{Connection, ConnectionCategory};

use super::contributed::ContributedRating;
use super::value::RatingValue;
use super::weight::RatingWeight;

/// How contributed ratings are folded into an aggregate.
///
/// Only `Strict` is implemented: it includes exactly the ratings placed
/// within the community's own org and geo. The other methods are parsed
/// so callers get a clear rejection rather than a format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMethod {
    Strict,
    Inclusive,
    Inherited,
}

impl AggregationMethod {
    /// Returns the lowercase string form used in keys and payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMethod::Strict => "strict",
            AggregationMethod::Inclusive => "inclusive",
            AggregationMethod::Inherited => "inherited",
        }
    }

    /// Returns true when the method has an implementation.
    pub fn is_supported(&self) -> bool {
        matches!(self, AggregationMethod::Strict)
    }
}

impl fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AggregationMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(AggregationMethod::Strict),
            "inclusive" => Ok(AggregationMethod::Inclusive),
            "inherited" => Ok(AggregationMethod::Inherited),
            other => Err(ValidationError::invalid_format(
                "aggregation",
                format!("unknown aggregation '{}'", other),
            )),
        }
    }
}

/// Weighted consensus of one community on one connection.
///
/// An aggregate with no included ratings carries `NO_RATING` and
/// `NO_WEIGHT`. Once built, an aggregate can be kept current through
/// [`AggregateRating::apply_contribution`] without revisiting the full
/// rating set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRating {
    connection: Connection,
    community: Community,
    adjacent_problem: ProblemSlug,
    category: ConnectionCategory,
    aggregation: AggregationMethod,
    rating: f64,
    weight: f64,
}

impl AggregateRating {
    /// Rating reported while no contributed ratings are included.
    pub const NO_RATING: f64 = -1.0;
    /// Weight reported while no contributed ratings are included.
    pub const NO_WEIGHT: f64 = 0.0;

    /// Builds the aggregate for a community over the given contributed
    /// ratings, keeping only those inside the community's strict scope.
    pub fn from_contributions(
        connection: Connection,
        community: Community,
        aggregation: AggregationMethod,
        contributions: &[ContributedRating],
    ) -> Result<Self, DomainError> {
        if !aggregation.is_supported() {
            return Err(DomainError::new(
                ErrorCode::InvalidAggregation,
                format!("Aggregation method '{}' is not supported", aggregation),
            )
            .with_detail("aggregation", aggregation.as_str()));
        }
        let category = connection.category_for(community.problem())?;
        let adjacent_problem = connection.adjacent_to(community.problem())?.clone();
        let (rating, weight) = Self::calculate_values(
            contributions
                .iter()
                .filter(|r| r.connection() == &connection && r.in_community(&community))
                .map(|r| (r.rating().as_f64(), r.weight().as_f64())),
        );
        Ok(Self {
            connection,
            community,
            adjacent_problem,
            category,
            aggregation,
            rating,
            weight,
        })
    }

    /// Weighted mean over (rating, weight) pairs.
    ///
    /// Returns `(NO_RATING, NO_WEIGHT)` when the total weight is zero,
    /// including the case of zero pairs.
    pub fn calculate_values(pairs: impl Iterator<Item = (f64, f64)>) -> (f64, f64) {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for (rating, weight) in pairs {
            weighted_sum += rating * weight;
            total_weight += weight;
        }
        if total_weight > 0.0 {
            (weighted_sum / total_weight, total_weight)
        } else {
            (Self::NO_RATING, Self::NO_WEIGHT)
        }
    }

    /// Folds one changed contribution into the aggregate in place.
    ///
    /// `previous` carries the values the contributor's rating held before
    /// the change, if it existed. The result equals a full recalculation
    /// over the updated rating set.
    pub fn apply_contribution(
        &mut self,
        new: (RatingValue, RatingWeight),
        previous: Option<(RatingValue, RatingWeight)>,
    ) {
        let (new_rating, new_weight) = (new.0.as_f64(), new.1.as_f64());
        let (old_rating, old_weight) = previous
            .map(|(r, w)| (r.as_f64(), w.as_f64()))
            .unwrap_or((0.0, 0.0));

        let total = if self.is_rated() {
            self.rating * self.weight
        } else {
            0.0
        };
        let next_weight = self.weight + new_weight - old_weight;
        if next_weight > 0.0 {
            self.rating = (total + new_rating * new_weight - old_rating * old_weight) / next_weight;
            self.weight = next_weight;
        } else {
            self.rating = Self::NO_RATING;
            self.weight = Self::NO_WEIGHT;
        }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub fn community(&self) -> &Community {
        &self.community
    }

    /// The problem on the other end of the connection from the community.
    pub fn adjacent_problem(&self) -> &ProblemSlug {
        &self.adjacent_problem
    }

    /// Category of the connection from the community's problem.
    pub fn category(&self) -> ConnectionCategory {
        self.category
    }

    pub fn aggregation(&self) -> AggregationMethod {
        self.aggregation
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// True when at least one contributed rating carries weight.
    pub fn is_rated(&self) -> bool {
        self.weight > 0.0
    }

    /// Stable key "connection|community|aggregation" used in payload maps.
    pub fn key_string(&self) -> String {
        format!(
            "{}|{}|{}",
            self.connection.key_string(),
            self.community.key_string(),
            self.aggregation
        )
    }
}

impl fmt::Display for AggregateRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} with {:.2} weight ({}) on {} for {}",
            self.rating, self.weight, self.aggregation, self.connection, self.community
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ContributorId, GeoScope, OrgScope};
    use crate::domain::problem::ConnectionAxis;
    use proptest::prelude::*;

    fn slug(s: &str) -> ProblemSlug {
        ProblemSlug::new(s).unwrap()
    }

    fn connection() -> Connection {
        Connection::new(ConnectionAxis::Causal, slug("drought"), slug("famine")).unwrap()
    }

    fn community() -> Community {
        Community::new(
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
        )
    }

    fn contribution(user: &str, rating: i64, weight: i64) -> ContributedRating {
        ContributedRating::new(
            connection(),
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::global(),
            ContributorId::new(user).unwrap(),
            RatingValue::try_from_i64(rating).unwrap(),
            RatingWeight::try_from_i64(weight).unwrap(),
        )
        .unwrap()
    }

    fn other_geo_contribution(user: &str, rating: i64) -> ContributedRating {
        ContributedRating::new(
            connection(),
            slug("famine"),
            OrgScope::new("acme").unwrap(),
            GeoScope::new("us/tx").unwrap(),
            ContributorId::new(user).unwrap(),
            RatingValue::try_from_i64(rating).unwrap(),
            RatingWeight::default(),
        )
        .unwrap()
    }

    #[test]
    fn aggregate_over_no_ratings_is_unrated() {
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &[],
        )
        .unwrap();
        assert_eq!(aggregate.rating(), AggregateRating::NO_RATING);
        assert_eq!(aggregate.weight(), AggregateRating::NO_WEIGHT);
        assert!(!aggregate.is_rated());
    }

    #[test]
    fn aggregate_is_weighted_mean() {
        let contributions = vec![contribution("alice", 4, 3), contribution("bob", 2, 1)];
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap();
        // (4*3 + 2*1) / (3 + 1) = 3.5
        assert!((aggregate.rating() - 3.5).abs() < f64::EPSILON);
        assert!((aggregate.weight() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strict_aggregate_excludes_other_scopes() {
        let contributions = vec![
            contribution("alice", 4, 1),
            other_geo_contribution("bob", 0),
        ];
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap();
        assert!((aggregate.rating() - 4.0).abs() < f64::EPSILON);
        assert!((aggregate.weight() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_weight_ratings_leave_aggregate_unrated() {
        let contributions = vec![contribution("alice", 4, 0)];
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap();
        assert!(!aggregate.is_rated());
        assert_eq!(aggregate.rating(), AggregateRating::NO_RATING);
    }

    #[test]
    fn unsupported_aggregation_is_rejected() {
        let result = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Inclusive,
            &[],
        );
        match result {
            Err(error) => assert_eq!(error.code, ErrorCode::InvalidAggregation),
            Ok(_) => panic!("Expected InvalidAggregation error"),
        }
    }

    #[test]
    fn aggregate_derives_category_and_adjacent_problem() {
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &[],
        )
        .unwrap();
        assert_eq!(aggregate.category(), ConnectionCategory::Drivers);
        assert_eq!(aggregate.adjacent_problem().as_str(), "drought");
    }

    #[test]
    fn apply_contribution_adds_first_rating() {
        let mut aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &[],
        )
        .unwrap();
        aggregate.apply_contribution(
            (
                RatingValue::try_from_i64(3).unwrap(),
                RatingWeight::try_from_i64(2).unwrap(),
            ),
            None,
        );
        assert!((aggregate.rating() - 3.0).abs() < f64::EPSILON);
        assert!((aggregate.weight() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn apply_contribution_replaces_previous_values() {
        let contributions = vec![contribution("alice", 4, 3), contribution("bob", 2, 1)];
        let mut aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap();
        // alice re-rates 4@3 as 0@3: (0*3 + 2*1) / 4 = 0.5
        aggregate.apply_contribution(
            (
                RatingValue::try_from_i64(0).unwrap(),
                RatingWeight::try_from_i64(3).unwrap(),
            ),
            Some((
                RatingValue::try_from_i64(4).unwrap(),
                RatingWeight::try_from_i64(3).unwrap(),
            )),
        );
        assert!((aggregate.rating() - 0.5).abs() < 1e-9);
        assert!((aggregate.weight() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn apply_contribution_dropping_all_weight_resets_to_unrated() {
        let contributions = vec![contribution("alice", 4, 3)];
        let mut aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &contributions,
        )
        .unwrap();
        aggregate.apply_contribution(
            (
                RatingValue::try_from_i64(4).unwrap(),
                RatingWeight::try_from_i64(0).unwrap(),
            ),
            Some((
                RatingValue::try_from_i64(4).unwrap(),
                RatingWeight::try_from_i64(3).unwrap(),
            )),
        );
        assert!(!aggregate.is_rated());
        assert_eq!(aggregate.rating(), AggregateRating::NO_RATING);
        assert_eq!(aggregate.weight(), AggregateRating::NO_WEIGHT);
    }

    #[test]
    fn key_string_combines_connection_community_and_method() {
        let aggregate = AggregateRating::from_contributions(
            connection(),
            community(),
            AggregationMethod::Strict,
            &[],
        )
        .unwrap();
        assert_eq!(
            aggregate.key_string(),
            "causal:drought:famine|famine@acme@global|strict"
        );
    }

    #[test]
    fn aggregation_method_parses_known_names() {
        assert_eq!(
            "strict".parse::<AggregationMethod>().unwrap(),
            AggregationMethod::Strict
        );
        assert_eq!(
            "inclusive".parse::<AggregationMethod>().unwrap(),
            AggregationMethod::Inclusive
        );
        assert!("median".parse::<AggregationMethod>().is_err());
        assert!(!AggregationMethod::Inherited.is_supported());
    }

    proptest! {
        /// Folding a changed rating into the aggregate must agree with
        /// recalculating over the full updated set.
        #[test]
        fn incremental_update_matches_full_recalculation(
            ratings in prop::collection::vec((0i64..=4, 0i64..=20), 1..8),
            new_rating in 0i64..=4,
            new_weight in 0i64..=20,
        ) {
            let users: Vec<String> = (0..ratings.len()).map(|i| format!("user{}", i)).collect();
            let mut contributions: Vec<ContributedRating> = ratings
                .iter()
                .zip(&users)
                .map(|(&(r, w), user)| contribution(user, r, w))
                .collect();

            let mut aggregate = AggregateRating::from_contributions(
                connection(),
                community(),
                AggregationMethod::Strict,
                &contributions,
            )
            .unwrap();

            // user0 re-rates.
            let previous = (
                RatingValue::try_from_i64(ratings[0].0).unwrap(),
                RatingWeight::try_from_i64(ratings[0].1).unwrap(),
            );
            aggregate.apply_contribution(
                (
                    RatingValue::try_from_i64(new_rating).unwrap(),
                    RatingWeight::try_from_i64(new_weight).unwrap(),
                ),
                Some(previous),
            );

            contributions[0] = contribution("user0", new_rating, new_weight);
            let recalculated = AggregateRating::from_contributions(
                connection(),
                community(),
                AggregationMethod::Strict,
                &contributions,
            )
            .unwrap();

            prop_assert!((aggregate.rating() - recalculated.rating()).abs() < 1e-9);
            prop_assert!((aggregate.weight() - recalculated.weight()).abs() < 1e-9);
        }
    }
}
