// src/scrape/pagination.rs
//! One query window: landing page → filled search form → results listing →
//! detail pages, one per link, fetched lazily as the caller pulls them.

use std::iter::FusedIterator;
use std::thread;
use std::time::Duration;

use reqwest::Url;
use scraper::Selector;
use tracing::{debug, info};

use crate::config::consts::{END_YEAR_FIELD, SEARCH_ACTION, START_YEAR_FIELD};
use crate::core::{Browser, Page};
use crate::data::{DetailLink, QueryWindow};
use crate::error::ScrapeError;
use crate::specs::{listing, search_form};

/// A fetched detail page and the link it came from.
#[derive(Clone, Debug)]
pub struct DetailPage {
    pub link: DetailLink,
    pub page: Page,
}

/// Detail pages of one window, in listing order.
///
/// Finite and single-pass. A failed fetch is yielded once and ends the
/// sequence; nothing is retried.
pub struct WindowPages<'s, B: Browser + ?Sized> {
    session: &'s mut B,
    window: QueryWindow,
    listing: Url,
    links: std::vec::IntoIter<DetailLink>,
    pause: Duration,
    fetched: usize,
    done: bool,
}

/// Submit the search form for `window` and read the listing.
pub fn open_window<'s, B: Browser + ?Sized>(
    session: &'s mut B,
    base: &Url,
    selector: &Selector,
    window: QueryWindow,
    pause: Duration,
) -> Result<WindowPages<'s, B>, ScrapeError> {
    let landing = session.get(base, None)?;

    let mut form = search_form::find_form(&landing, SEARCH_ACTION)?;
    form.set(START_YEAR_FIELD, window.start_year.to_string());
    form.set(END_YEAR_FIELD, window.end_year.to_string());

    let results = session.submit(&form)?;
    let links = listing::detail_links(&results, selector);
    info!(%window, links = links.len(), listing = %results.url, "listing read");

    Ok(WindowPages {
        session,
        window,
        listing: results.url,
        links: links.into_iter(),
        pause,
        fetched: 0,
        done: false,
    })
}

impl<B: Browser + ?Sized> WindowPages<'_, B> {
    /// Links not yet pulled.
    pub fn remaining(&self) -> usize {
        if self.done { 0 } else { self.links.len() }
    }
}

impl<B: Browser + ?Sized> Iterator for WindowPages<'_, B> {
    type Item = Result<DetailPage, ScrapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let link = self.links.next()?;

        if self.fetched > 0 && !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        self.fetched += 1;

        debug!(window = %self.window, link = %link, "following");
        match self.session.get(&link.url, Some(&self.listing)) {
            Ok(page) => Some(Ok(DetailPage { link, page })),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<B: Browser + ?Sized> FusedIterator for WindowPages<'_, B> {}
