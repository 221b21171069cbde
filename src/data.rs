// src/data.rs
use std::fmt;

use reqwest::Url;

use crate::error::ScrapeError;
use crate::specs::sections::SectionRole;

pub const LEAD_FIELDS: usize = 3;
pub const METRICS_FIELDS: usize = 3;
pub const RECORD_FIELDS: usize = LEAD_FIELDS + METRICS_FIELDS + 1;

/// One scraped incident, in output column order.
///
/// Fields never contain a comma or a line break: the extractors strip commas
/// (lossy, not escaped) and fold line breaks to spaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IncidentRecord {
    pub date: String,
    pub location: String,
    pub responsible_group: String,
    pub weapon_type: String,
    /// Free text after the label; not validated as a number.
    pub injuries: String,
    pub fatalities: String,
    pub description: String,
}

impl IncidentRecord {
    /// Build from the three section extractions, rejecting wrong-shaped input
    /// instead of emitting a short or long row.
    pub fn from_sections(
        lead: Vec<String>,
        metrics: Vec<String>,
        narrative: Vec<String>,
    ) -> Result<Self, ScrapeError> {
        let [date, location, responsible_group] = exact::<LEAD_FIELDS>(SectionRole::Lead, lead)?;
        let [weapon_type, injuries, fatalities] = exact::<METRICS_FIELDS>(SectionRole::Metrics, metrics)?;
        let [description] = exact::<1>(SectionRole::Narrative, narrative)?;

        Ok(Self {
            date,
            location,
            responsible_group,
            weapon_type,
            injuries,
            fatalities,
            description,
        })
    }

    pub fn fields(&self) -> [&str; RECORD_FIELDS] {
        [
            &self.date,
            &self.location,
            &self.responsible_group,
            &self.weapon_type,
            &self.injuries,
            &self.fatalities,
            &self.description,
        ]
    }
}

fn exact<const N: usize>(section: SectionRole, pieces: Vec<String>) -> Result<[String; N], ScrapeError> {
    let found = pieces.len();
    pieces
        .try_into()
        .map_err(|_| ScrapeError::UnexpectedShape { section, expected: N, found })
}

/// Inclusive year range submitted to the search form in one batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QueryWindow {
    pub start_year: i32,
    pub end_year: i32,
}

impl fmt::Display for QueryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.end_year)
    }
}

/// Anchor found on a results listing; consumed once to fetch one detail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailLink {
    /// Position on the listing, 0-based.
    pub index: usize,
    /// Raw `href` as written in the listing.
    pub href: String,
    /// `href` resolved against the listing page.
    pub url: Url,
    pub label: String,
}

impl fmt::Display for DetailLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.href)
    }
}
