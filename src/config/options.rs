// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;
use reqwest::Url;

use super::consts::*;
use crate::error::ScrapeError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub client: ClientOptions,
    pub output: OutputOptions,
    pub policy: ErrorPolicy,
    pub log: LogOptions,
}

impl AppOptions {
    /// Reject settings that would make the run meaningless or endless.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.scrape.window_span < 1 {
            return Err(ScrapeError::Config(format!(
                "window span must be at least 1 year (got {})",
                self.scrape.window_span
            )));
        }
        if self.scrape.window_step < 1 {
            return Err(ScrapeError::Config(format!(
                "window step must be at least 1 year (got {})",
                self.scrape.window_step
            )));
        }
        if self.client.request_timeout.is_zero() {
            return Err(ScrapeError::Config("request timeout must be non-zero".into()));
        }
        self.scrape.base_url()?;
        if self.output.path.as_os_str().is_empty() {
            return Err(ScrapeError::Config("output path is empty".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub start_year: i32,
    /// `None` → current calendar year.
    pub end_year: Option<i32>,
    pub window_span: i32,
    pub window_step: i32,
    /// Sleep between detail fetches.
    pub request_pause: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            start_year: DATABASE_START_YEAR,
            end_year: None,
            window_span: WINDOW_SPAN,
            window_step: WINDOW_STEP,
            request_pause: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

impl ScrapeOptions {
    pub fn base_url(&self) -> Result<Url, ScrapeError> {
        Url::parse(&self.base_url).map_err(|e| ScrapeError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }

    pub fn last_year(&self) -> i32 {
        self.end_year.unwrap_or_else(|| chrono::Local::now().year())
    }
}

/// When a fresh HTTP session is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientLifetime {
    /// New session (cookies, pool) for every query window.
    PerWindow,
    /// One session for the whole run.
    PerRun,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientOptions {
    pub lifetime: ClientLifetime,
    /// Pooled connections idle longer than this are dropped instead of reused.
    pub idle_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            lifetime: ClientLifetime::PerWindow,
            idle_timeout: Duration::from_millis(IDLE_TIMEOUT_MS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    pub path: PathBuf,
    /// Refuse to start when `path` already exists. Off by default: overwrite.
    pub no_clobber: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUT_FILE),
            no_clobber: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordPolicy {
    /// Log and move to the next link.
    Skip,
    Abort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Log and move to the next window.
    Continue,
    Abort,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorPolicy {
    pub on_record_error: RecordPolicy,
    pub on_window_error: WindowPolicy,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        Self {
            on_record_error: RecordPolicy::Skip,
            on_window_error: WindowPolicy::Continue,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogOptions {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Append here instead of stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}
