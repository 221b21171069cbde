// src/scrape/windows.rs
use std::iter::FusedIterator;

use crate::data::QueryWindow;

/// Year windows `[y, y + span - 1]` for `y = first, first + step, ...` while
/// `y <= last`. With the site defaults (span 6, step 5) neighbouring windows
/// share one year.
#[derive(Clone, Debug)]
pub struct QueryWindows {
    next: Option<i32>,
    last: i32,
    span: i32,
    step: i32,
}

impl QueryWindows {
    /// `span` and `step` below 1 are treated as 1.
    pub fn new(first: i32, last: i32, span: i32, step: i32) -> Self {
        Self {
            next: Some(first),
            last,
            span: span.max(1),
            step: step.max(1),
        }
    }
}

impl Iterator for QueryWindows {
    type Item = QueryWindow;

    fn next(&mut self) -> Option<QueryWindow> {
        let start = self.next.filter(|y| *y <= self.last)?;
        self.next = start.checked_add(self.step);
        Some(QueryWindow {
            start_year: start,
            end_year: start.saturating_add(self.span - 1),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = match self.next {
            Some(y) if y <= self.last => ((self.last as i64 - y as i64) / self.step as i64 + 1) as usize,
            _ => 0,
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for QueryWindows {}
impl FusedIterator for QueryWindows {}
