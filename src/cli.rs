// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::WrapErr;

use crate::config::{AppOptions, ClientLifetime, RecordPolicy, WindowPolicy, consts};
use crate::data::{DetailLink, QueryWindow};
use crate::error::ScrapeError;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};

/// Scrape the RAND Worldwide Terrorism Incident Database into a flat CSV file
/// (no header; date, location, group, weapon, injuries, fatalities, description).
#[derive(Debug, Parser)]
#[command(name = "rwtid_scrape", version)]
pub struct Args {
    /// Output file
    #[arg(short, long, default_value = consts::DEFAULT_OUT_FILE)]
    pub out: PathBuf,

    /// Refuse to run if the output file already exists
    #[arg(long)]
    pub no_clobber: bool,

    /// First year to query
    #[arg(long, default_value_t = consts::DATABASE_START_YEAR)]
    pub start_year: i32,

    /// Last year to query [default: current year]
    #[arg(long)]
    pub end_year: Option<i32>,

    /// Years per search window
    #[arg(long, default_value_t = consts::WINDOW_SPAN)]
    pub span: i32,

    /// Years between window starts
    #[arg(long, default_value_t = consts::WINDOW_STEP)]
    pub step: i32,

    /// Search form page
    #[arg(long, default_value = consts::BASE_URL)]
    pub base_url: String,

    /// Drop pooled connections idle longer than this
    #[arg(long, default_value_t = consts::IDLE_TIMEOUT_MS)]
    pub idle_timeout_ms: u64,

    /// Per-request timeout
    #[arg(long, default_value_t = consts::REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Keep one HTTP session for the whole run instead of one per window
    #[arg(long)]
    pub reuse_client: bool,

    /// Pause between detail page requests
    #[arg(long, default_value_t = consts::REQUEST_PAUSE_MS)]
    pub pause_ms: u64,

    /// Stop the run on a detail page that cannot be parsed
    #[arg(long)]
    pub abort_on_record_error: bool,

    /// Stop the run when a window fails to load
    #[arg(long)]
    pub abort_on_window_error: bool,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, default_value = consts::DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Don't print the running count
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn into_options(self) -> AppOptions {
        let mut opts = AppOptions::default();

        opts.scrape.base_url = self.base_url;
        opts.scrape.start_year = self.start_year;
        opts.scrape.end_year = self.end_year;
        opts.scrape.window_span = self.span;
        opts.scrape.window_step = self.step;
        opts.scrape.request_pause = Duration::from_millis(self.pause_ms);

        opts.client.idle_timeout = Duration::from_millis(self.idle_timeout_ms);
        opts.client.request_timeout = Duration::from_secs(self.timeout_secs);
        if self.reuse_client {
            opts.client.lifetime = ClientLifetime::PerRun;
        }

        opts.output.path = self.out;
        opts.output.no_clobber = self.no_clobber;

        if self.abort_on_record_error {
            opts.policy.on_record_error = RecordPolicy::Abort;
        }
        if self.abort_on_window_error {
            opts.policy.on_window_error = WindowPolicy::Abort;
        }

        opts.log.level = self.log_level;
        opts.log.file = self.log_file;
        opts
    }
}

/// Prints the running record count to stdout, one number per line.
pub struct ConsoleProgress {
    quiet: bool,
}

impl ConsoleProgress {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Progress for ConsoleProgress {
    fn window_started(&mut self, window: &QueryWindow) {
        if !self.quiet {
            eprintln!("Searching {window}…");
        }
    }

    fn item_done(&mut self, written: usize) {
        if !self.quiet {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{written}");
            let _ = out.flush();
        }
    }

    fn item_failed(&mut self, link: &DetailLink, err: &ScrapeError) {
        if !self.quiet {
            eprintln!("Skipped {}: {err}", link.url);
        }
    }

    fn window_failed(&mut self, window: &QueryWindow, err: &ScrapeError) {
        eprintln!("Window {window} ended early: {err}");
    }

    fn finish(&mut self, summary: &RunSummary) {
        println!(
            "Done: {} incidents written, {} skipped, {}/{} windows complete",
            summary.written,
            summary.skipped,
            summary.windows - summary.windows_failed,
            summary.windows,
        );
    }
}

fn show_information() {
    println!(
        "Starting up the scraper for the RAND Terrorism Incident Database. \
         The numbers that will appear count written incidents. \
         It will take a few moments for the first search to load..."
    );
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let quiet = args.quiet;
    let opts = args.into_options();

    crate::log::init(&opts.log).wrap_err("could not start logging")?;

    if !quiet {
        show_information();
    }
    let mut progress = ConsoleProgress::new(quiet);
    let out = opts.output.path.display().to_string();

    scrape::run_to_path(&opts, Some(&mut progress))
        .wrap_err_with(|| format!("scrape into {out} failed"))?;
    Ok(())
}
