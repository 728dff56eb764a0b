use crate::error::{Result, StatsError};
use crate::model::LogFilter;
use crate::util::parse_absolute_date;
use chrono::NaiveDate;
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "authorstat")]
#[command(about = "Analyze git commit statistics by author and date range")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help = "Output format")]
    pub format: OutputFormat,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(long, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(short, long, help = "Show commits since date (YYYY-MM-DD or relative like \"1 week ago\")")]
    pub since: Option<String>,

    #[arg(short, long, help = "Show commits until date (YYYY-MM-DD or relative like \"yesterday\")")]
    pub until: Option<String>,

    #[arg(short, long, help = "Filter commits by author name/email pattern")]
    pub author: Option<String>,

    #[arg(long, help = "Include merge commits", default_value_t = false)]
    pub include_merges: bool,

    #[arg(long, help = "Analyze the whole history instead of defaulting to today")]
    pub all: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Ndjson,
}

impl CommonArgs {
    /// Build the log filter. Without `--since`, `--until` or `--all` the
    /// window starts at midnight of `today`; git would otherwise read a bare
    /// date as "that day, at the current time".
    pub fn to_filter(&self, today: NaiveDate) -> Result<LogFilter> {
        let mut filter = LogFilter::new().with_merges(self.include_merges);

        match (&self.since, &self.until) {
            (None, None) if !self.all => {
                filter = filter.with_since(today.format("%Y-%m-%d 00:00:00").to_string());
            }
            (since, until) => {
                if let (Some(s), Some(u)) = (since, until) {
                    if let (Some(s_dt), Some(u_dt)) = (parse_absolute_date(s), parse_absolute_date(u)) {
                        if s_dt > u_dt {
                            return Err(StatsError::InvalidDate(format!(
                                "Invalid range: since ({s}) is after until ({u})"
                            )));
                        }
                    }
                }
                if let Some(s) = since {
                    filter = filter.with_since(s.clone());
                }
                if let Some(u) = until {
                    filter = filter.with_until(u.clone());
                }
            }
        }

        if let Some(author) = &self.author {
            filter = filter.with_author(author.clone());
        }

        Ok(filter)
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> anyhow::Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
        }
        crate::report::exec(self.common, self.format)
    }

    /// Default log filter directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CommonArgs {
        CommonArgs {
            repo: None,
            since: None,
            until: None,
            author: None,
            include_merges: false,
            all: false,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn defaults_to_today() {
        let filter = args().to_filter(today()).unwrap();
        assert_eq!(filter.since.as_deref(), Some("2024-06-01 00:00:00"));
        assert_eq!(filter.until, None);
        assert!(!filter.include_merges);
    }

    #[test]
    fn all_disables_default_window() {
        let filter = CommonArgs { all: true, ..args() }.to_filter(today()).unwrap();
        assert_eq!(filter.since, None);
    }

    #[test]
    fn until_alone_keeps_open_start() {
        let filter = CommonArgs {
            until: Some("yesterday".to_string()),
            ..args()
        }
        .to_filter(today())
        .unwrap();
        assert_eq!(filter.since, None);
        assert_eq!(filter.until.as_deref(), Some("yesterday"));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = CommonArgs {
            since: Some("2024-05-01".to_string()),
            until: Some("2024-04-01".to_string()),
            ..args()
        }
        .to_filter(today())
        .unwrap_err();
        assert!(matches!(err, StatsError::InvalidDate(_)));
    }

    #[test]
    fn relative_dates_pass_through() {
        let filter = CommonArgs {
            since: Some("2 weeks ago".to_string()),
            until: Some("2020-01-01".to_string()),
            ..args()
        }
        .to_filter(today())
        .unwrap();
        assert_eq!(filter.since.as_deref(), Some("2 weeks ago"));
    }
}
