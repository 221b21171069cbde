// src/specs/mod.rs
//! # Page specs
//!
//! Each module here knows how to read **one kind of page** of the incident
//! database and nothing else. Input is an HTML string (or a [`Page`]), output is
//! plain data or a typed error. No networking, no files, no logging policy.
//!
//! - [`search_form`]: locate the year-range search form and its default controls.
//! - [`listing`]: pull detail links out of a results listing, in document order.
//! - [`sections`]: split one detail cell into raw field strings by section role.
//! - [`incident`]: find the three-cell row of a detail page and build an
//!   [`IncidentRecord`](crate::IncidentRecord).
//!
//! ## Conventions
//! - Site drift surfaces as an error (`FormNotFound`, `MissingSection`,
//!   `MalformedField`, `UnexpectedShape`), never as a silently wrong row.
//! - Everything is testable offline against captured or synthetic fixtures.
//!
//! [`Page`]: crate::core::Page
pub mod incident;
pub mod listing;
pub mod search_form;
pub mod sections;
