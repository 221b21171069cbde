// src/specs/sections.rs
//! Field extraction for the three cells of a detail page.
//!
//! Cell shapes, as served by the site:
//! ```text
//! Lead:      Mar 3 1970<br>Paris, France<br>Unknown
//! Metrics:   Weapon: Bomb<br>Injuries: 3<br>Fatalities: 1
//! Narrative: <p>A device exploded outside the embassy, ...</p>
//! ```
//! Extraction only splits and cleans; it does not check how many fields come out.
//! Pure functions: the same fragment always yields the same strings.

use std::fmt;

use crate::core::html::{split_on_breaks, strip_tags};
use crate::core::sanitize::{clean_field, normalize_entities, normalize_ws, strip_chars};
use crate::error::ScrapeError;

/// Meaning of a detail cell, by its position in the row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionRole {
    /// Date, location, responsible group.
    Lead,
    /// Weapon type, injuries, fatalities as `Label: value` lines.
    Metrics,
    /// Free-text description.
    Narrative,
}

impl SectionRole {
    /// Row order.
    pub const ALL: [SectionRole; 3] = [SectionRole::Lead, SectionRole::Metrics, SectionRole::Narrative];

    pub fn name(self) -> &'static str {
        match self {
            SectionRole::Lead => "lead",
            SectionRole::Metrics => "metrics",
            SectionRole::Narrative => "narrative",
        }
    }
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn extract(fragment: &str, role: SectionRole) -> Result<Vec<String>, ScrapeError> {
    match role {
        SectionRole::Lead => Ok(extract_lead(fragment)),
        SectionRole::Metrics => extract_metrics(fragment),
        SectionRole::Narrative => Ok(vec![extract_narrative(fragment)]),
    }
}

/// One field per line; inline markup such as `<b>` is dropped.
pub fn extract_lead(fragment: &str) -> Vec<String> {
    split_on_breaks(fragment)
        .into_iter()
        .map(|piece| clean_field(&strip_tags(piece)))
        .collect()
}

/// Value after the first `:` of each line, markup dropped first so a bold
/// label leaves nothing behind. A line without a colon is an error.
pub fn extract_metrics(fragment: &str) -> Result<Vec<String>, ScrapeError> {
    split_on_breaks(fragment)
        .into_iter()
        .map(|piece| {
            let text = strip_tags(piece);
            match text.split_once(':') {
                Some((_label, value)) => Ok(clean_field(value)),
                None => Err(ScrapeError::MalformedField {
                    section: SectionRole::Metrics,
                    piece: normalize_ws(&text),
                }),
            }
        })
        .collect()
}

/// Tags dropped, entities decoded; backslashes, slashes and commas removed.
pub fn extract_narrative(fragment: &str) -> String {
    let text = normalize_entities(&strip_tags(fragment));
    normalize_ws(&strip_chars(&text, &['\\', '/', ',']))
}
