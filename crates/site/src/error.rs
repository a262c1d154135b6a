use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read site content from {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse site content: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("project not found")]
    ProjectNotFound,

    #[error("unknown site section: {0}")]
    UnknownSection(String),

    #[error("{0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
