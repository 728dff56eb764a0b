use crate::cli::{CommonArgs, OutputFormat};
use crate::error::Result;
use crate::git::{GitRepo, LogSource};
use crate::model::{AggregateResult, LogFilter};
use crate::output::{output_json, output_ndjson, output_table};
use crate::parse::parse_log;
use crate::stats::aggregate;
use anyhow::Context;
use chrono::Local;
use console::Term;
use tracing::debug;

pub fn exec(common: CommonArgs, format: OutputFormat) -> anyhow::Result<()> {
    let filter = common
        .to_filter(Local::now().date_naive())
        .context("Failed to resolve date range")?;

    let progress = format == OutputFormat::Table && Term::stderr().is_term();
    let repo = GitRepo::open(common.repo.as_ref())
        .context("Failed to open git repository")?
        .with_progress(progress);

    let stats = collect_stats(&repo, &filter).context("Failed to collect commit statistics")?;

    match format {
        OutputFormat::Json => output_json(&stats, &repo, &filter)?,
        OutputFormat::Ndjson => output_ndjson(&stats)?,
        OutputFormat::Table => output_table(&stats)?,
    }

    Ok(())
}

/// Fetch, parse and aggregate the log for `filter`.
pub fn collect_stats<S: LogSource + ?Sized>(source: &S, filter: &LogFilter) -> Result<AggregateResult> {
    let text = source.fetch_log(filter)?;
    let commits = parse_log(&text);
    debug!(commits = commits.len(), "parsed git log");
    Ok(aggregate(&commits))
}
