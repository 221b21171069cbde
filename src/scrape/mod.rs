// src/scrape/mod.rs
pub mod pagination;
pub mod windows;
mod scrape;

pub use pagination::{DetailPage, WindowPages, open_window};
pub use scrape::{RunSummary, run, run_to_path};
pub use windows::QueryWindows;
