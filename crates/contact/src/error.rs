use crate::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("contact not found")]
    NotFound,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Store(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Store(value.into())
    }
}

impl From<time::error::ComponentRange> for Error {
    fn from(value: time::error::ComponentRange) -> Self {
        Self::Store(value.into())
    }
}

#[macro_export]
macro_rules! invalid {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::InvalidArgument(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::InvalidArgument(format!($fmt, $($arg)*)))
    };
}
