//! Data loading handlers.

mod load_data;

pub use load_data::{LoadDataCommand, LoadDataHandler, LoadDataResult};
