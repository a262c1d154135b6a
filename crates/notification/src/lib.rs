mod config;
mod contact;
mod service;
pub(crate) mod template;

pub use config::EmailConfig;
pub use service::*;
