pub mod repo;

pub use repo::{log_args, GitRepo};

use crate::error::Result;
use crate::model::LogFilter;

/// Anything that can hand back raw `git log --numstat` text for a filter.
pub trait LogSource {
    fn fetch_log(&self, filter: &LogFilter) -> Result<String>;
}

impl LogSource for GitRepo {
    fn fetch_log(&self, filter: &LogFilter) -> Result<String> {
        GitRepo::fetch_log(self, filter)
    }
}
