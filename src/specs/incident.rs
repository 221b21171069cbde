// src/specs/incident.rs
//! Detail page → [`IncidentRecord`].
//!
//! Selection rule: the first `<tr>` in document order with at least three
//! direct `<td>` children; its first three cells are the lead, metrics and
//! narrative sections.

use scraper::{ElementRef, Html};

use super::sections::{self, SectionRole};
use crate::data::IncidentRecord;
use crate::error::ScrapeError;

pub const SECTION_CELLS: usize = 3;

pub fn assemble(body: &str) -> Result<IncidentRecord, ScrapeError> {
    let doc = Html::parse_document(body);
    assemble_doc(&doc)
}

pub fn assemble_doc(doc: &Html) -> Result<IncidentRecord, ScrapeError> {
    let [lead, metrics, narrative] = section_cells(doc)?;

    IncidentRecord::from_sections(
        sections::extract(&lead, SectionRole::Lead)?,
        sections::extract(&metrics, SectionRole::Metrics)?,
        sections::extract(&narrative, SectionRole::Narrative)?,
    )
}

/// Inner HTML of the three section cells.
pub fn section_cells(doc: &Html) -> Result<[String; SECTION_CELLS], ScrapeError> {
    let mut best = 0usize;

    let rows = doc
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr");

    for row in rows {
        let cells: Vec<ElementRef> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "td")
            .collect();

        if let [a, b, c, ..] = cells.as_slice() {
            return Ok([a.inner_html(), b.inner_html(), c.inner_html()]);
        }
        best = best.max(cells.len());
    }

    Err(ScrapeError::MissingSection { found: best })
}
