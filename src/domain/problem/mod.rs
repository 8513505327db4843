//! Problem aggregate, connections, and upload documents.

mod aggregate;
mod connection;
mod document;
mod image;
mod name;

pub use aggregate::Problem;
pub use connection::{Connection, ConnectionAxis, ConnectionCategory, ConnectionError};
pub use document::{ConnectionDocument, ProblemDocument, RatingDocument};
pub use image::ImageUrl;
pub use name::ProblemName;
