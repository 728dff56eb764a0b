use crate::model::{AggregateResult, AuthorAggregate, CommitRecord, DateSpan};
use crate::util::day_key;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Fold commit records into per-author and global totals.
///
/// Authors are keyed by email; the display name comes from the first commit
/// seen for that email. The author list is ordered by lines changed
/// (added + deleted), largest first. Line sums saturate at `u64::MAX`.
pub fn aggregate(commits: &[CommitRecord]) -> AggregateResult {
    let mut authors: Vec<AuthorAggregate> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_lines_added = 0u64;
    let mut total_lines_deleted = 0u64;

    for commit in commits {
        let slot = *index.entry(commit.author_email.as_str()).or_insert_with(|| {
            authors.push(AuthorAggregate::new(
                commit.author_name.clone(),
                commit.author_email.clone(),
            ));
            authors.len() - 1
        });

        let mut paths: HashSet<&str> = HashSet::new();
        let mut added = 0u64;
        let mut deleted = 0u64;
        for file in &commit.files {
            paths.insert(file.path.as_str());
            added = added.saturating_add(file.added_lines);
            deleted = deleted.saturating_add(file.deleted_lines);
        }

        let entry = &mut authors[slot];
        entry.commits += 1;
        entry.lines_added = entry.lines_added.saturating_add(added);
        entry.lines_deleted = entry.lines_deleted.saturating_add(deleted);
        entry.files_changed += paths.len() as u64;

        total_lines_added = total_lines_added.saturating_add(added);
        total_lines_deleted = total_lines_deleted.saturating_add(deleted);
    }

    authors.sort_by(|a, b| b.lines_changed().cmp(&a.lines_changed()));

    AggregateResult {
        authors,
        total_commits: commits.len() as u64,
        total_lines_added,
        total_lines_deleted,
        date_range: date_span(commits),
    }
}

/// Earliest and latest commit day. Commits whose date did not parse are
/// left out; the span is empty when no commit has a usable timestamp.
pub fn date_span(commits: &[CommitRecord]) -> DateSpan {
    let timestamps = commits.iter().filter_map(|c| c.timestamp);

    let (earliest, latest) = timestamps.fold(
        (None::<DateTime<Utc>>, None::<DateTime<Utc>>),
        |(lo, hi), ts| {
            (
                Some(lo.map_or(ts, |lo| lo.min(ts))),
                Some(hi.map_or(ts, |hi| hi.max(ts))),
            )
        },
    );

    DateSpan {
        since: earliest.map(|ts| day_key(&ts)),
        until: latest.map(|ts| day_key(&ts)),
    }
}
