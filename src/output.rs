use crate::error::Result;
use crate::git::GitRepo;
use crate::model::{AggregateResult, LogFilter, StatsOutput, SCHEMA_VERSION};
use chrono::Utc;
use console::{pad_str, style, truncate_str, Alignment, StyledObject};
use std::io::{self, Write};

const COLUMN_WIDTHS: [usize; 6] = [25, 8, 10, 10, 10, 8];
const AUTHOR_WIDTH: usize = 20;

pub fn output_json(stats: &AggregateResult, repo: &GitRepo, filter: &LogFilter) -> Result<()> {
    let json = render_json(stats, &repo.path().to_string_lossy(), filter)?;
    writeln!(io::stdout().lock(), "{json}")?;
    Ok(())
}

pub fn output_ndjson(stats: &AggregateResult) -> Result<()> {
    let lines = render_ndjson(stats)?;
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

pub fn render_json(stats: &AggregateResult, repository_path: &str, filter: &LogFilter) -> Result<String> {
    let output = StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository_path.to_string(),
        since: filter.since.clone(),
        until: filter.until.clone(),
        author: filter.author.clone(),
        result: stats.clone(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

/// One JSON object per author, in ranking order.
pub fn render_ndjson(stats: &AggregateResult) -> Result<Vec<String>> {
    stats
        .authors
        .iter()
        .map(|author| serde_json::to_string(author).map_err(Into::into))
        .collect()
}

pub fn output_table(stats: &AggregateResult) -> Result<()> {
    writeln!(io::stdout().lock(), "{}", render_table(stats))?;
    Ok(())
}

pub fn render_table(stats: &AggregateResult) -> String {
    let mut out: Vec<String> = Vec::new();

    out.push(format!("\n{}", style("Git Statistics Summary").bold().blue()));

    let range = &stats.date_range;
    if !range.is_empty() {
        let since = range.since.as_deref().unwrap_or("beginning");
        let until = range.until.as_deref().unwrap_or("now");
        out.push(style(format!("Date range: {since} to {until}")).dim().to_string());
    }

    out.push(style(format!("Total commits: {}", stats.total_commits)).dim().to_string());
    out.push(style(format!("Total lines added: {}", stats.total_lines_added)).dim().to_string());
    out.push(style(format!("Total lines deleted: {}", stats.total_lines_deleted)).dim().to_string());
    out.push(String::new());

    if stats.authors.is_empty() {
        out.push(style("No commits found in the specified date range.").yellow().to_string());
        return out.join("\n");
    }

    out.push(style("Author Statistics:").bold().to_string());
    out.push(String::new());

    let header = pad_columns(&[
        "Author".to_string(),
        "Commits".to_string(),
        "Lines +".to_string(),
        "Lines -".to_string(),
        "Net".to_string(),
        "Files".to_string(),
    ]);
    out.push(style(header).bold().underlined().to_string());

    for author in &stats.authors {
        let net = author.net_lines();
        out.push(pad_columns(&[
            truncate_str(&author.author_name, AUTHOR_WIDTH, "...").into_owned(),
            author.commits.to_string(),
            style(format!("+{}", author.lines_added)).green().to_string(),
            style(format!("-{}", author.lines_deleted)).red().to_string(),
            net_style(net).to_string(),
            author.files_changed.to_string(),
        ]));
    }

    if stats.authors.len() > 1 {
        out.push(String::new());
        out.push(style("─".repeat(80)).dim().to_string());
        let net = stats.total_net_lines();
        out.push(pad_columns(&[
            style("TOTAL").bold().to_string(),
            style(stats.total_commits).bold().to_string(),
            style(format!("+{}", stats.total_lines_added)).bold().green().to_string(),
            style(format!("-{}", stats.total_lines_deleted)).bold().red().to_string(),
            net_style(net).bold().to_string(),
            style(stats.total_files_changed()).bold().to_string(),
        ]));
    }

    out.push(String::new());
    out.join("\n")
}

fn net_style(net: i64) -> StyledObject<String> {
    if net > 0 {
        style(format!("+{net}")).green()
    } else if net < 0 {
        style(net.to_string()).red()
    } else {
        style(net.to_string()).dim()
    }
}

fn pad_columns(columns: &[String]) -> String {
    columns
        .iter()
        .zip(COLUMN_WIDTHS)
        .map(|(col, width)| pad_str(col, width, Alignment::Left, None).into_owned())
        .collect()
}
