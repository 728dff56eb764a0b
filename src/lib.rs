pub mod cli;
pub mod error;
pub mod git;
pub mod model;
pub mod output;
pub mod parse;
pub mod report;
pub mod stats;
pub mod util;

pub use error::{Result, StatsError};
pub use git::{GitRepo, LogSource};
pub use model::{AggregateResult, AuthorAggregate, CommitRecord, DateSpan, FileDelta, LogFilter};
pub use parse::parse_log;
pub use report::collect_stats;
pub use stats::aggregate;
