// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use net::{Browser, Connector, FormSubmission, HttpConnector, HttpSession, Method, Page};
