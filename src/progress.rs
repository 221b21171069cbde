// src/progress.rs
use crate::data::{DetailLink, QueryWindow};
use crate::error::ScrapeError;
use crate::scrape::RunSummary;

/// Observable side channel of a run. Frontends implement what they show;
/// every hook defaults to a no-op.
pub trait Progress {
    /// Called once with the number of query windows.
    fn begin(&mut self, _windows: usize) {}

    fn window_started(&mut self, _window: &QueryWindow) {}

    /// Called after each record is written, with the running count.
    fn item_done(&mut self, _written: usize) {}

    /// A detail page was skipped.
    fn item_failed(&mut self, _link: &DetailLink, _err: &ScrapeError) {}

    /// A window ended early and the run moved on.
    fn window_failed(&mut self, _window: &QueryWindow, _err: &ScrapeError) {}

    /// Called at the end of a completed run.
    fn finish(&mut self, _summary: &RunSummary) {}
}
