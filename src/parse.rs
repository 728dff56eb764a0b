use crate::model::{CommitRecord, FileDelta};
use chrono::{DateTime, Utc};
use tracing::trace;

/// Separator between the fields of a commit header line.
pub const FIELD_SEPARATOR: char = '|';

/// `git log --pretty` format producing the header lines understood here.
pub const HEADER_FORMAT: &str = "%H|%an|%ae|%ad|%s";

const HEADER_FIELDS: usize = 5;
const BINARY_MARKER: &str = "-";

enum State {
    AwaitingHeader,
    InCommit(CommitRecord),
}

/// Parse `git log --numstat` output into commit records, in log order.
///
/// Never fails: malformed counts become 0, unparseable dates leave
/// `timestamp` empty and stray lines are dropped.
pub fn parse_log(text: &str) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut state = State::AwaitingHeader;

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if let Some(header) = parse_header(line) {
            if let State::InCommit(open) = std::mem::replace(&mut state, State::InCommit(header)) {
                commits.push(open);
            }
            continue;
        }

        match &mut state {
            State::AwaitingHeader => {
                trace!(line = %line, "skipping line before first commit header");
            }
            State::InCommit(commit) => match parse_file_stat(line) {
                Some(delta) => commit.files.push(delta),
                None => trace!(line = %line, commit = %commit.id, "skipping malformed file stat line"),
            },
        }
    }

    if let State::InCommit(open) = state {
        commits.push(open);
    }

    commits
}

fn parse_header(line: &str) -> Option<CommitRecord> {
    if !line.contains(FIELD_SEPARATOR) {
        return None;
    }
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() != HEADER_FIELDS {
        return None;
    }

    let date = fields[3].to_string();
    Some(CommitRecord {
        id: fields[0].to_string(),
        author_name: fields[1].to_string(),
        author_email: fields[2].to_string(),
        timestamp: parse_date(&date),
        date,
        subject: fields[4].to_string(),
        files: Vec::new(),
    })
}

fn parse_file_stat(line: &str) -> Option<FileDelta> {
    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() != 3 {
        return None;
    }
    let (added, deleted, path) = (parts[0], parts[1], parts[2]);

    Some(FileDelta {
        path: path.to_string(),
        added_lines: parse_count(added),
        deleted_lines: parse_count(deleted),
        is_binary: added == BINARY_MARKER || deleted == BINARY_MARKER,
    })
}

fn parse_count(field: &str) -> u64 {
    if field == BINARY_MARKER {
        return 0;
    }
    field.trim().parse().unwrap_or(0)
}

/// Parse a commit date as printed by `--date=iso`, or RFC 3339 as printed
/// by `--date=iso-strict`.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_needs_exactly_five_fields() {
        assert!(parse_header("a|b|c|2024-01-01 10:00:00 +0000|subject").is_some());
        assert!(parse_header("a|b|c|2024-01-01 10:00:00 +0000|fix a|b").is_none());
        assert!(parse_header("a|b|c|d").is_none());
        assert!(parse_header("10\t2\tfile.txt").is_none());
    }

    #[test]
    fn counts_normalize_to_zero() {
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-5"), 0);
        assert_eq!(parse_count("42"), 42);
    }

    #[test]
    fn binary_marker_sets_flag() {
        let delta = parse_file_stat("-\t-\tlogo.png").unwrap();
        assert!(delta.is_binary);
        assert_eq!(delta.added_lines, 0);
        assert_eq!(delta.deleted_lines, 0);
    }

    #[test]
    fn dates_in_iso_and_strict_iso() {
        let iso = parse_date("2024-01-01 10:00:00 +0200").unwrap();
        assert_eq!(iso.to_rfc3339(), "2024-01-01T08:00:00+00:00");

        let strict = parse_date("2024-01-01T10:00:00+00:00").unwrap();
        assert_eq!(strict.to_rfc3339(), "2024-01-01T10:00:00+00:00");

        assert!(parse_date("yesterday-ish").is_none());
    }
}
