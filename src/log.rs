// src/log.rs
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogOptions;
use crate::error::ScrapeError;
use crate::file::ensure_directory;

/// Install the global subscriber. `RUST_LOG` overrides `opts.level`.
///
/// Lines carry the elapsed time since start. With `opts.file` set, output is
/// appended there without ANSI colours; otherwise it goes to stderr so stdout
/// stays free for the progress count.
pub fn init(opts: &LogOptions) -> Result<(), ScrapeError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(&opts.level)
            .map_err(|e| ScrapeError::Config(format!("log level {:?}: {e}", opts.level)))?,
    };

    let builder = fmt()
        .with_env_filter(filter)
        .with_timer(fmt::time::uptime())
        .with_target(false);

    let installed = match &opts.file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_directory(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| ScrapeError::Config(format!("logger: {e}")))
}
