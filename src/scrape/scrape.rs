// src/scrape/scrape.rs
use reqwest::Url;
use scraper::Selector;
use tracing::{error, info, warn};

use crate::{
    config::{AppOptions, ClientLifetime, RecordPolicy, WindowPolicy, consts::LISTING_SELECTOR},
    core::{Browser, Connector, HttpConnector},
    data::QueryWindow,
    error::{ErrorScope, ScrapeError},
    file::IncidentSink,
    progress::Progress,
    specs::{incident, listing},
};

use super::{pagination, windows::QueryWindows};

/// What a run did. Replaces any process-wide counter: the orchestrator owns
/// the count and hands it to `Progress` as it grows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Windows attempted.
    pub windows: usize,
    /// Windows that ended early on a fetch or form error.
    pub windows_failed: usize,
    /// Records appended to the sink.
    pub written: usize,
    /// Detail pages skipped on a section/field error.
    pub skipped: usize,
}

/// Open the configured output, scrape the live site into it, close it.
pub fn run_to_path(
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    opts.validate()?;
    let mut sink = IncidentSink::open(&opts.output.path, opts.output.no_clobber)?;

    let result = run(opts, &HttpConnector, &mut sink, progress);
    let closed = sink.close();

    let summary = result?;
    closed?;
    Ok(summary)
}

/// Drive every query window from the start year through the last year.
///
/// Error handling follows `opts.policy`: section/field errors skip one record
/// (or abort), fetch/form errors end one window (or abort). Sink failures
/// always abort. Rows already written stay written either way.
pub fn run<C: Connector>(
    opts: &AppOptions,
    connector: &C,
    sink: &mut IncidentSink,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, ScrapeError> {
    opts.validate()?;
    let base = opts.scrape.base_url()?;
    let selector = listing::parse_selector(LISTING_SELECTOR)?;

    let windows = QueryWindows::new(
        opts.scrape.start_year,
        opts.scrape.last_year(),
        opts.scrape.window_span,
        opts.scrape.window_step,
    );

    info!(
        windows = windows.len(),
        first = opts.scrape.start_year,
        last = opts.scrape.last_year(),
        out = %sink.path().display(),
        "starting scrape"
    );
    if let Some(p) = progress.as_deref_mut() {
        p.begin(windows.len());
    }

    let mut summary = RunSummary::default();
    let mut kept: Option<C::Session> = None;

    for window in windows {
        summary.windows += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.window_started(&window);
        }

        let mut session = match (opts.client.lifetime, kept.take()) {
            (ClientLifetime::PerRun, Some(s)) => s,
            _ => connector.connect(&opts.client)?,
        };

        let outcome = scrape_window(
            &mut session,
            &base,
            &selector,
            window,
            opts,
            sink,
            &mut summary,
            progress.as_deref_mut(),
        );
        kept = Some(session);

        match outcome {
            Ok(()) => info!(%window, written = summary.written, "window done"),
            Err(e) if e.scope() == ErrorScope::Window && opts.policy.on_window_error == WindowPolicy::Continue => {
                summary.windows_failed += 1;
                warn!(%window, kind = e.kind(), error = %e, "window ended early");
                if let Some(p) = progress.as_deref_mut() {
                    p.window_failed(&window, &e);
                }
            }
            Err(e) => {
                error!(%window, kind = e.kind(), error = %e, "aborting run");
                return Err(e);
            }
        }
    }

    info!(
        windows = summary.windows,
        windows_failed = summary.windows_failed,
        written = summary.written,
        skipped = summary.skipped,
        "scrape finished"
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish(&summary);
    }
    Ok(summary)
}

#[allow(clippy::too_many_arguments)]
fn scrape_window<'p, B: Browser + ?Sized>(
    session: &mut B,
    base: &Url,
    selector: &Selector,
    window: QueryWindow,
    opts: &AppOptions,
    sink: &mut IncidentSink,
    summary: &mut RunSummary,
    mut progress: Option<&mut (dyn Progress + 'p)>,
) -> Result<(), ScrapeError> {
    info!(%window, "querying window");
    let pages = pagination::open_window(session, base, selector, window, opts.scrape.request_pause)?;

    for fetched in pages {
        let detail = fetched?;

        match incident::assemble(&detail.page.body) {
            Ok(record) => {
                sink.append(&record)?;
                summary.written += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(summary.written);
                }
            }
            Err(e) if e.scope() == ErrorScope::Record && opts.policy.on_record_error == RecordPolicy::Skip => {
                summary.skipped += 1;
                warn!(
                    %window,
                    link = %detail.link.url,
                    kind = e.kind(),
                    error = %e,
                    "skipping incident"
                );
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&detail.link, &e);
                }
            }
            Err(e) => {
                error!(%window, link = %detail.link.url, kind = e.kind(), error = %e, "incident failed");
                return Err(e);
            }
        }
    }
    Ok(())
}
