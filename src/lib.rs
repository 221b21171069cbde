// src/lib.rs
//! Scraper for the RAND Worldwide Terrorism Incident Database.
//!
//! Call chain:
//! ```text
//! cli → scrape::run_to_path → scrape::run (per year window)
//!        → scrape::pagination (search form → listing → detail pages)
//!        → specs::incident::assemble (3 sections → IncidentRecord)
//!        → file::IncidentSink::append
//! ```

pub mod config;
pub mod core;
pub mod specs;
pub mod scrape;

pub mod csv;
pub mod data;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;

#[cfg(feature = "cli")]
pub mod cli;

pub use data::{DetailLink, IncidentRecord, QueryWindow};
pub use error::{ErrorScope, ScrapeError};
