// tests/stub_site.rs
//
// End-to-end runs of the orchestrator against an in-memory site.
//
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use reqwest::Url;
use rwtid_scrape::config::{AppOptions, ClientLifetime, ClientOptions, RecordPolicy, WindowPolicy};
use rwtid_scrape::core::{Browser, Connector, FormSubmission, Page};
use rwtid_scrape::file::IncidentSink;
use rwtid_scrape::progress::Progress;
use rwtid_scrape::scrape::{self, RunSummary};
use rwtid_scrape::{DetailLink, QueryWindow, ScrapeError};

const BASE: &str = "http://stub.test/rwtid/search_form.php";
const LISTING: &str = "http://stub.test/rwtid/search.php";

const LANDING: &str = r#"<html><body>
  <form action="search.php" method="post">
    <select name="start_year"><option>1968</option></select>
    <select name="end_year"><option>2009</option></select>
    <input type="submit" name="submit" value="Search">
  </form>
</body></html>"#;

fn listing(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|h| format!(r#"<li><a href="{h}">incident</a></li>"#))
        .collect();
    format!(r#"<html><body><div id="content"><div id="indent"><ol>{items}</ol></div></div></body></html>"#)
}

fn detail(n: u32) -> String {
    format!(
        r#"<html><body><table><tr>
          <td>Jan {n}, 1970<br>Athens, Greece<br>Group {n}</td>
          <td>Weapon: Explosives<br>Injuries: {n}<br>Fatalities: 0</td>
          <td><p>Bomb number {n}, damaged a car.</p></td>
        </tr></table></body></html>"#
    )
}

const TWO_CELLS: &str = "<html><body><table><tr><td>a<br>b<br>c</td><td>Weapon: x</td></tr></table></body></html>";

#[derive(Default)]
struct Site {
    landing: Option<String>,
    pages: HashMap<String, String>,
    listings: HashMap<(String, String), String>,
    log: RefCell<Vec<String>>,
}

impl Site {
    fn with_landing() -> Self {
        Site { landing: Some(LANDING.to_string()), ..Site::default() }
    }

    fn page(mut self, path: &str, body: impl Into<String>) -> Self {
        self.pages.insert(format!("http://stub.test/rwtid/{path}"), body.into());
        self
    }

    fn window(mut self, start: i32, end: i32, hrefs: &[&str]) -> Self {
        self.listings.insert((start.to_string(), end.to_string()), listing(hrefs));
        self
    }

    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

struct StubSession {
    site: Rc<Site>,
}

impl Browser for StubSession {
    fn get(&mut self, url: &Url, referer: Option<&Url>) -> Result<Page, ScrapeError> {
        let from = referer.map(Url::as_str).unwrap_or("-");
        self.site.log.borrow_mut().push(format!("GET {url} from {from}"));

        let body = if url.as_str() == BASE {
            self.site.landing.clone()
        } else {
            self.site.pages.get(url.as_str()).cloned()
        };
        body.map(|body| Page { url: url.clone(), body })
            .ok_or_else(|| ScrapeError::fetch(url.as_str(), "404 Not Found"))
    }

    fn submit(&mut self, form: &FormSubmission) -> Result<Page, ScrapeError> {
        let start = form.get("start_year").unwrap_or_default().to_string();
        let end = form.get("end_year").unwrap_or_default().to_string();
        self.site.log.borrow_mut().push(format!(
            "SUBMIT {} start_year={start} end_year={end} submit={}",
            form.action,
            form.get("submit").unwrap_or("-")
        ));
        let body = self.site.listings.get(&(start, end)).cloned().unwrap_or_else(|| listing(&[]));
        Ok(Page { url: form.action.clone(), body })
    }
}

struct StubConnector {
    site: Rc<Site>,
    connects: Cell<usize>,
}

impl StubConnector {
    fn new(site: Site) -> Self {
        Self { site: Rc::new(site), connects: Cell::new(0) }
    }
}

impl Connector for StubConnector {
    type Session = StubSession;

    fn connect(&self, _opts: &ClientOptions) -> Result<StubSession, ScrapeError> {
        self.connects.set(self.connects.get() + 1);
        Ok(StubSession { site: Rc::clone(&self.site) })
    }
}

#[derive(Default)]
struct Recorder {
    windows: Vec<QueryWindow>,
    counts: Vec<usize>,
    skipped: Vec<(String, &'static str)>,
    failed_windows: Vec<(QueryWindow, &'static str)>,
    finished: Option<RunSummary>,
}

impl Progress for Recorder {
    fn window_started(&mut self, window: &QueryWindow) {
        self.windows.push(*window);
    }
    fn item_done(&mut self, written: usize) {
        self.counts.push(written);
    }
    fn item_failed(&mut self, link: &DetailLink, err: &ScrapeError) {
        self.skipped.push((link.href.clone(), err.kind()));
    }
    fn window_failed(&mut self, window: &QueryWindow, err: &ScrapeError) {
        self.failed_windows.push((*window, err.kind()));
    }
    fn finish(&mut self, summary: &RunSummary) {
        self.finished = Some(*summary);
    }
}

fn options(end_year: i32) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.base_url = BASE.to_string();
    opts.scrape.start_year = 1968;
    opts.scrape.end_year = Some(end_year);
    opts
}

fn run_into(
    path: &Path,
    opts: &AppOptions,
    connector: &StubConnector,
    progress: &mut Recorder,
) -> Result<RunSummary, ScrapeError> {
    let mut sink = IncidentSink::open(path, false).unwrap();
    let result = scrape::run(opts, connector, &mut sink, Some(progress));
    sink.close().unwrap();
    result
}

fn lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path).unwrap().lines().map(str::to_string).collect()
}

#[test]
fn one_window_two_pages_writes_two_rows() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1", "incident.php?id=2"])
        .page("incident.php?id=1", detail(1))
        .page("incident.php?id=2", detail(2));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut progress = Recorder::default();

    let summary = run_into(&out, &options(1972), &connector, &mut progress).unwrap();

    let rows = lines(&out);
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.split(',').count(), 7, "{row}");
    }
    assert_eq!(rows[0], "Jan 1 1970,Athens Greece,Group 1,Explosives,1,0,Bomb number 1 damaged a car.");
    assert_eq!(progress.counts, vec![1, 2]);
    assert_eq!(progress.windows, vec![QueryWindow { start_year: 1968, end_year: 1973 }]);
    assert_eq!(summary, RunSummary { windows: 1, windows_failed: 0, written: 2, skipped: 0 });
    assert_eq!(progress.finished, Some(summary));
}

#[test]
fn form_carries_window_bounds_and_links_keep_listing_referer() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1"])
        .page("incident.php?id=1", detail(1));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");

    run_into(&out, &options(1972), &connector, &mut Recorder::default()).unwrap();

    assert_eq!(
        connector.site.log(),
        vec![
            format!("GET {BASE} from -"),
            format!("SUBMIT {LISTING} start_year=1968 end_year=1973 submit=Search"),
            format!("GET http://stub.test/rwtid/incident.php?id=1 from {LISTING}"),
        ]
    );
}

#[test]
fn two_cell_page_is_skipped_without_a_row() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1", "incident.php?id=bad", "incident.php?id=2"])
        .page("incident.php?id=1", detail(1))
        .page("incident.php?id=bad", TWO_CELLS)
        .page("incident.php?id=2", detail(2));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut progress = Recorder::default();

    let summary = run_into(&out, &options(1972), &connector, &mut progress).unwrap();

    assert_eq!(lines(&out).len(), 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(progress.skipped, vec![("incident.php?id=bad".to_string(), "missing_section")]);
    assert_eq!(progress.counts, vec![1, 2]);
}

#[test]
fn fetch_failure_ends_window_and_next_window_runs() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1", "incident.php?id=404", "incident.php?id=2"])
        .window(1973, 1978, &["incident.php?id=3"])
        .page("incident.php?id=1", detail(1))
        .page("incident.php?id=2", detail(2))
        .page("incident.php?id=3", detail(3));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut progress = Recorder::default();

    let summary = run_into(&out, &options(1977), &connector, &mut progress).unwrap();

    let rows = lines(&out);
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("Jan 1 1970,"));
    assert!(rows[1].starts_with("Jan 3 1970,"));
    assert_eq!(summary.windows, 2);
    assert_eq!(summary.windows_failed, 1);
    assert_eq!(
        progress.failed_windows,
        vec![(QueryWindow { start_year: 1968, end_year: 1973 }, "fetch")]
    );
    // id=2 is never requested once the window is abandoned
    assert!(!connector.site.log().iter().any(|l| l.contains("id=2 ")));
}

#[test]
fn abort_on_window_error_keeps_written_rows() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1", "incident.php?id=404"])
        .window(1973, 1978, &["incident.php?id=3"])
        .page("incident.php?id=1", detail(1))
        .page("incident.php?id=3", detail(3));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut opts = options(1977);
    opts.policy.on_window_error = WindowPolicy::Abort;

    let err = run_into(&out, &opts, &connector, &mut Recorder::default()).unwrap_err();

    assert_eq!(err.kind(), "fetch");
    assert_eq!(lines(&out).len(), 1);
}

#[test]
fn abort_on_record_error_stops_at_bad_page() {
    let site = Site::with_landing()
        .window(1968, 1973, &["incident.php?id=1", "incident.php?id=bad", "incident.php?id=2"])
        .page("incident.php?id=1", detail(1))
        .page("incident.php?id=bad", TWO_CELLS)
        .page("incident.php?id=2", detail(2));
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut opts = options(1972);
    opts.policy.on_record_error = RecordPolicy::Abort;

    let err = run_into(&out, &opts, &connector, &mut Recorder::default()).unwrap_err();

    assert!(matches!(err, ScrapeError::MissingSection { found: 2 }));
    assert_eq!(lines(&out).len(), 1);
}

#[test]
fn missing_search_form_fails_only_that_window() {
    let site = Site { landing: Some("<p>down for maintenance</p>".into()), ..Site::default() };
    let connector = StubConnector::new(site);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut progress = Recorder::default();

    let summary = run_into(&out, &options(1977), &connector, &mut progress).unwrap();

    assert_eq!(summary.windows_failed, 2);
    assert!(progress.failed_windows.iter().all(|(_, kind)| *kind == "form_not_found"));
    assert!(lines(&out).is_empty());
}

#[test]
fn fresh_session_per_window_by_default() {
    let connector = StubConnector::new(Site::with_landing());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");

    let summary = run_into(&out, &options(1982), &connector, &mut Recorder::default()).unwrap();

    assert_eq!(summary.windows, 3);
    assert_eq!(connector.connects.get(), 3);
}

#[test]
fn per_run_lifetime_reuses_one_session() {
    let connector = StubConnector::new(Site::with_landing());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut opts = options(1982);
    opts.client.lifetime = ClientLifetime::PerRun;

    run_into(&out, &opts, &connector, &mut Recorder::default()).unwrap();

    assert_eq!(connector.connects.get(), 1);
}

#[test]
fn invalid_options_fail_before_any_request() {
    let connector = StubConnector::new(Site::with_landing());
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    let mut opts = options(1972);
    opts.scrape.window_step = 0;

    let err = run_into(&out, &opts, &connector, &mut Recorder::default()).unwrap_err();

    assert!(matches!(err, ScrapeError::Config(_)));
    assert_eq!(connector.connects.get(), 0);
    assert!(connector.site.log().is_empty());
}

#[test]
fn existing_output_with_no_clobber_stops_before_any_request() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("incidents.csv");
    fs::write(&out, "earlier run\n").unwrap();
    let mut opts = options(1972);
    // nothing listens here; reaching the network would surface as a fetch error
    opts.scrape.base_url = "http://127.0.0.1:9/rwtid/search_form.php".to_string();
    opts.output.path = out.clone();
    opts.output.no_clobber = true;
    let mut progress = Recorder::default();

    let err = scrape::run_to_path(&opts, Some(&mut progress)).unwrap_err();

    match err {
        ScrapeError::AlreadyExists { path } => assert_eq!(path, out),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_to_string(&out).unwrap(), "earlier run\n");
    assert!(progress.windows.is_empty());
    assert_eq!(progress.finished, None);
}
