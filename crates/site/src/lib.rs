mod catalog;
mod error;
mod query;

pub use catalog::*;
pub use error::*;
pub use query::*;
