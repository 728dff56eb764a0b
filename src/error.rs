use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Not a git repository: {}", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: Option<Box<gix::discover::Error>>,
    },
    #[error("Failed to run git: {0}")]
    GitSpawn(#[source] std::io::Error),
    #[error("Failed to get git commits: {0}")]
    LogFailed(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    pub fn not_a_repository<P: Into<PathBuf>>(path: P) -> Self {
        StatsError::NotARepository {
            path: path.into(),
            source: None,
        }
    }

    /// True when the log source could not find a repository at all, as
    /// opposed to git failing inside one.
    pub fn is_not_a_repository(&self) -> bool {
        matches!(self, StatsError::NotARepository { .. })
    }
}
