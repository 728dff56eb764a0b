use crate::error::{Result, StatsError};
use crate::model::LogFilter;
use crate::parse::HEADER_FORMAT;
use gix::{discover, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::{debug, info};

pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
    progress: bool,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = start_dir(path, std::env::current_dir)?;

        let repo = discover(&repo_path).map_err(|e| StatsError::NotARepository {
            path: repo_path.clone(),
            source: Some(Box::new(e)),
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self {
            repo,
            path,
            progress: false,
        })
    }

    /// Show a spinner on stderr while git runs.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fetch_log(&self, filter: &LogFilter) -> Result<String> {
        if self.is_unborn() {
            debug!("HEAD is unborn, no commits to read");
            return Ok(String::new());
        }

        let args = log_args(filter);
        info!(?args, "running git");

        let pb = if self.progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message("Reading git log...");
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.path)
            .output();
        pb.finish_and_clear();
        let output = output.map_err(StatsError::GitSpawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("not a git repository") {
                return Err(StatsError::not_a_repository(&self.path));
            }
            if stderr.contains("does not have any commits") {
                debug!(%stderr, "repository has no commits");
                return Ok(String::new());
            }
            return Err(StatsError::LogFailed(stderr));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = text.len(), "git log finished");
        Ok(text)
    }

    fn is_unborn(&self) -> bool {
        matches!(self.repo.head(), Ok(head) if head.is_unborn())
    }
}

/// Directory to discover from. The working directory is only read when no
/// path is given.
fn start_dir<P, F>(path: Option<P>, cwd: F) -> Result<PathBuf>
where
    P: AsRef<Path>,
    F: FnOnce() -> std::io::Result<PathBuf>,
{
    match path {
        Some(p) => Ok(p.as_ref().to_path_buf()),
        None => Ok(cwd()?),
    }
}

/// Arguments for the `git` invocation that produces header + numstat text.
pub fn log_args(filter: &LogFilter) -> Vec<String> {
    let mut args = vec![
        "-c".to_string(),
        "core.quotePath=false".to_string(),
        "log".to_string(),
        format!("--pretty=format:{HEADER_FORMAT}"),
        "--date=iso".to_string(),
        "--numstat".to_string(),
        "--no-color".to_string(),
    ];

    if let Some(since) = &filter.since {
        args.push(format!("--since={since}"));
    }
    if let Some(until) = &filter.until {
        args.push(format!("--until={until}"));
    }
    if let Some(author) = &filter.author {
        args.push(format!("--author={author}"));
    }
    if !filter.include_merges {
        args.push("--no-merges".to_string());
    }

    args
}
