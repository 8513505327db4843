//! Contributed ratings and their community aggregates.

mod aggregate;
mod contributed;
mod value;
mod weight;

pub use aggregate::{AggregateRating, AggregationMethod};
pub use contributed::{ContributedRating, RatingScopeKey};
pub use value::RatingValue;
pub use weight::RatingWeight;
