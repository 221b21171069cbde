// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::consts::{FIELD_SEP, LINE_ENDING};
use crate::csv::write_row;
use crate::data::IncidentRecord;
use crate::error::ScrapeError;

/// Append-only row writer owning the output file for the whole run.
///
/// Every `append` is flushed before returning, so at most one record is ever
/// buffered. `close` consumes the sink, so the handle is released once.
pub struct IncidentSink {
    path: PathBuf,
    out: BufWriter<File>,
    rows: usize,
}

impl IncidentSink {
    /// Create or truncate `path`. With `no_clobber`, an existing file is an
    /// `AlreadyExists` error and is left untouched.
    pub fn open(path: &Path, no_clobber: bool) -> Result<Self, ScrapeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }

        let file = if no_clobber {
            OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .map_err(|e| match e.kind() {
                    io::ErrorKind::AlreadyExists => ScrapeError::AlreadyExists { path: path.to_path_buf() },
                    _ => ScrapeError::Io(e),
                })?
        } else {
            File::create(path)? // truncate/overwrite
        };

        debug!(path = %path.display(), no_clobber, "output opened");
        Ok(Self { path: path.to_path_buf(), out: BufWriter::new(file), rows: 0 })
    }

    pub fn append(&mut self, record: &IncidentRecord) -> Result<(), ScrapeError> {
        write_row(&mut self.out, &record.fields(), FIELD_SEP, LINE_ENDING)?;
        self.out.flush()?;
        self.rows += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and release the handle. Returns the number of rows written.
    pub fn close(mut self) -> Result<usize, ScrapeError> {
        self.out.flush()?;
        let file = self.out.into_inner().map_err(|e| ScrapeError::Io(e.into_error()))?;
        file.sync_all()?;
        debug!(path = %self.path.display(), rows = self.rows, "output closed");
        Ok(self.rows)
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Config(format!(
            "path exists but is not a directory: {}",
            dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
