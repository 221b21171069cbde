// src/config/consts.rs

// Site
pub const BASE_URL: &str = "http://smapp.rand.org/rwtid/search_form.php";
pub const SEARCH_ACTION: &str = "search.php";
pub const START_YEAR_FIELD: &str = "start_year";
pub const END_YEAR_FIELD: &str = "end_year";
pub const LISTING_SELECTOR: &str = "div#content > div#indent > ol > li > a";

// Query windows
pub const DATABASE_START_YEAR: i32 = 1968;
pub const WINDOW_SPAN: i32 = 6; // [y, y+5]
pub const WINDOW_STEP: i32 = 5; // overlaps the previous window by one year

// Client
pub const IDLE_TIMEOUT_MS: u64 = 100; // avoids "too many connection resets" on the target server
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const REQUEST_PAUSE_MS: u64 = 0;
pub const USER_AGENT: &str = concat!("rwtid_scrape/", env!("CARGO_PKG_VERSION"));

// Output
pub const DEFAULT_OUT_FILE: &str = "randTerrorismIncidents.csv";
pub const FIELD_SEP: char = ',';
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";
