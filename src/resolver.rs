//! Log File Resolver
//!
//! Maps a calendar date to the concrete log file that covers it: the active
//! log file for today, an archived file for past dates. Future dates are
//! always rejected.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::ServiceError;

/// Date format used in archived log file names.
pub const LOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder substituted with the ISO date in the archive name pattern.
const DATE_PLACEHOLDER: &str = "{date}";

// == Resolve Error ==
/// Failure modes of a resolution attempt.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The requested date lies in the future
    #[error("Cannot request logs for future date {0}")]
    FutureDate(NaiveDate),

    /// No log file exists at the candidate path
    #[error("Log file not found at {}", .0.display())]
    Missing(PathBuf),

    /// The candidate file exists but cannot be opened for reading
    #[error("Log file is not readable at {}", .0.display())]
    Unreadable(PathBuf),
}

impl From<ResolveError> for ServiceError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::FutureDate(_) => ServiceError::BadRequest(err.to_string()),
            ResolveError::Missing(_) | ResolveError::Unreadable(_) => {
                ServiceError::NotFound(err.to_string())
            }
        }
    }
}

// == Log File Resolver ==
/// Resolves calendar dates to log file paths.
///
/// The archive name pattern is derived from the active file name, so an
/// active file `app.log` maps past dates to `archive_dir/app-<date>.log`.
#[derive(Debug, Clone)]
pub struct LogFileResolver {
    active_log: PathBuf,
    archive_dir: PathBuf,
    archive_pattern: String,
}

impl LogFileResolver {
    // == Constructor ==
    pub fn new(active_log: PathBuf, archive_dir: PathBuf) -> Self {
        let base_name = active_log
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "app.log".to_string());

        let archive_pattern = match base_name.strip_suffix(".log") {
            Some(stem) => format!("{stem}-{DATE_PLACEHOLDER}.log"),
            None => format!("{base_name}-{DATE_PLACEHOLDER}.log"),
        };

        Self {
            active_log,
            archive_dir,
            archive_pattern,
        }
    }

    /// Path of the active log file.
    pub fn active_log(&self) -> &Path {
        &self.active_log
    }

    /// Archive file name pattern with a `{date}` placeholder.
    pub fn archive_pattern(&self) -> &str {
        &self.archive_pattern
    }

    // == Resolve ==
    /// Resolves the log file path for the given date.
    ///
    /// Succeeds only if the candidate file exists and is openable for
    /// reading; the error carries the attempted path for diagnostics.
    pub fn resolve(&self, date: NaiveDate) -> Result<PathBuf, ResolveError> {
        self.resolve_on(date, Local::now().date_naive())
    }

    /// Resolution against an explicit "today", so date arithmetic is testable.
    fn resolve_on(&self, date: NaiveDate, today: NaiveDate) -> Result<PathBuf, ResolveError> {
        let candidate = if date > today {
            warn!(%date, "Rejecting log request for a future date");
            return Err(ResolveError::FutureDate(date));
        } else if date == today {
            debug!(%date, path = %self.active_log.display(), "Resolved to active log file");
            self.active_log.clone()
        } else {
            let formatted = date.format(LOG_DATE_FORMAT).to_string();
            let name = self.archive_pattern.replace(DATE_PLACEHOLDER, &formatted);
            let path = self.archive_dir.join(name);
            debug!(%date, path = %path.display(), "Resolved to archived log file");
            path
        };

        check_readable(&candidate)?;
        Ok(candidate)
    }
}

/// The existence and readability check performed at the boundary.
fn check_readable(path: &Path) -> Result<(), ResolveError> {
    match File::open(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Log file not found");
            Err(ResolveError::Missing(path.to_path_buf()))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Log file not readable");
            Err(ResolveError::Unreadable(path.to_path_buf()))
        }
    }
}
