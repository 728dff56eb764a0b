use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDelta {
    pub path: String,
    pub added_lines: u64,
    pub deleted_lines: u64,
    pub is_binary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    /// Date text exactly as git printed it.
    pub date: String,
    /// `None` when `date` could not be parsed.
    pub timestamp: Option<DateTime<Utc>>,
    pub subject: String,
    pub files: Vec<FileDelta>,
}

impl CommitRecord {
    pub fn added_lines(&self) -> u64 {
        self.files.iter().fold(0, |acc, f| acc.saturating_add(f.added_lines))
    }

    pub fn deleted_lines(&self) -> u64 {
        self.files.iter().fold(0, |acc, f| acc.saturating_add(f.deleted_lines))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorAggregate {
    pub author_name: String,
    pub author_email: String,
    pub commits: u64,
    pub lines_added: u64,
    pub lines_deleted: u64,
    pub files_changed: u64,
}

impl AuthorAggregate {
    pub fn new(author_name: String, author_email: String) -> Self {
        Self {
            author_name,
            author_email,
            commits: 0,
            lines_added: 0,
            lines_deleted: 0,
            files_changed: 0,
        }
    }

    pub fn lines_changed(&self) -> u64 {
        self.lines_added.saturating_add(self.lines_deleted)
    }

    pub fn net_lines(&self) -> i64 {
        net(self.lines_added, self.lines_deleted)
    }
}

/// Calendar days (`YYYY-MM-DD`, UTC) of the earliest and latest commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl DateSpan {
    pub fn is_empty(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub authors: Vec<AuthorAggregate>,
    pub total_commits: u64,
    pub total_lines_added: u64,
    pub total_lines_deleted: u64,
    pub date_range: DateSpan,
}

impl AggregateResult {
    pub fn total_files_changed(&self) -> u64 {
        self.authors.iter().fold(0, |acc, a| acc.saturating_add(a.files_changed))
    }

    pub fn total_net_lines(&self) -> i64 {
        net(self.total_lines_added, self.total_lines_deleted)
    }
}

/// `added - deleted`, clamped to the `i64` range.
fn net(added: u64, deleted: u64) -> i64 {
    (added as i128 - deleted as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    pub include_merges: bool,
}

impl LogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_since<S: Into<String>>(mut self, since: S) -> Self {
        self.since = Some(since.into());
        self
    }

    pub fn with_until<S: Into<String>>(mut self, until: S) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn with_author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_merges(mut self, include_merges: bool) -> Self {
        self.include_merges = include_merges;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub author: Option<String>,
    #[serde(flatten)]
    pub result: AggregateResult,
}
