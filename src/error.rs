// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::specs::sections::SectionRole;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Output path is taken and the no-clobber guard is on.
    #[error("{} already exists; refusing to overwrite", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("no form with action {action:?} on {url}")]
    FormNotFound { action: String, url: String },

    #[error("detail page has no row with 3 cells (best row had {found})")]
    MissingSection { found: usize },

    #[error("{section} field {piece:?} has no label separator")]
    MalformedField { section: SectionRole, piece: String },

    #[error("{section} yielded {found} fields, expected {expected}")]
    UnexpectedShape {
        section: SectionRole,
        expected: usize,
        found: usize,
    },

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// How far an error reaches under the default policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorScope {
    /// Aborts the run: startup guards and sink failures.
    Fatal,
    /// Ends the current query window.
    Window,
    /// Only the current detail page is lost.
    Record,
}

impl ScrapeError {
    pub fn fetch(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        ScrapeError::Fetch { url: url.into(), source: source.into() }
    }

    /// Stable short name, used as the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::AlreadyExists { .. } => "already_exists",
            ScrapeError::Fetch { .. } => "fetch",
            ScrapeError::FormNotFound { .. } => "form_not_found",
            ScrapeError::MissingSection { .. } => "missing_section",
            ScrapeError::MalformedField { .. } => "malformed_field",
            ScrapeError::UnexpectedShape { .. } => "unexpected_shape",
            ScrapeError::InvalidUrl { .. } => "invalid_url",
            ScrapeError::Config(_) => "config",
            ScrapeError::Io(_) => "io",
        }
    }

    pub fn scope(&self) -> ErrorScope {
        match self {
            ScrapeError::AlreadyExists { .. } | ScrapeError::Config(_) | ScrapeError::Io(_) => {
                ErrorScope::Fatal
            }
            ScrapeError::Fetch { .. } | ScrapeError::FormNotFound { .. } | ScrapeError::InvalidUrl { .. } => {
                ErrorScope::Window
            }
            ScrapeError::MissingSection { .. }
            | ScrapeError::MalformedField { .. }
            | ScrapeError::UnexpectedShape { .. } => ErrorScope::Record,
        }
    }
}
