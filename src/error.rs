use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("cannot enumerate workspace resources at `{}`: {reason}", path.display())]
    ResourceAccess { path: PathBuf, reason: String },

    #[error("cannot access `{}`: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("invalid target version `{0}` (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("malformed project descriptor `{}`: {reason}", path.display())]
    Descriptor { path: PathBuf, reason: String },

    #[error("no project named `{0}` in the workspace")]
    UnknownProject(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Dialog error: {0}")]
    Dialog(#[from] dialoguer::Error),
}

impl CliError {
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::FileIo {
            path: path.into(),
            source,
        }
    }

    pub fn resource_access(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CliError::ResourceAccess {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
