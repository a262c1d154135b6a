mod error;
mod notifier;
mod priority;
mod query;
mod service;
mod store;
mod types;
mod validate;

pub use error::*;
pub use notifier::*;
pub use priority::classify;
pub use query::*;
pub use service::*;
pub use store::*;
pub use types::*;
pub use validate::*;
