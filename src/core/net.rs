// src/core/net.rs
// Session capability used by the scraper: plain GETs, form submissions, and
// link follows that carry the originating page as referer.

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::REFERER;
use tracing::debug;

use crate::config::ClientOptions;
use crate::error::ScrapeError;

/// A fetched document and the URL it was finally served from (after redirects).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub url: Url,
    pub body: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A filled-in form, ready to send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub method: Method,
    pub action: Url,
    pub fields: Vec<(String, String)>,
    pub referer: Option<Url>,
}

impl FormSubmission {
    /// Replace every value named `name`, or append the pair if absent.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        let mut found = false;
        for (_, v) in self.fields.iter_mut().filter(|(k, _)| k == name) {
            *v = value.clone();
            found = true;
        }
        if !found {
            self.fields.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Blocking navigation over one session (shared cookies and connections).
pub trait Browser {
    fn get(&mut self, url: &Url, referer: Option<&Url>) -> Result<Page, ScrapeError>;
    fn submit(&mut self, form: &FormSubmission) -> Result<Page, ScrapeError>;
}

/// Opens sessions; called once per query window or once per run.
pub trait Connector {
    type Session: Browser;
    fn connect(&self, opts: &ClientOptions) -> Result<Self::Session, ScrapeError>;
}

/// `reqwest` blocking client with a cookie jar.
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    pub fn new(opts: &ClientOptions) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .cookie_store(true)
            .pool_idle_timeout(opts.idle_timeout)
            .timeout(opts.request_timeout)
            .user_agent(opts.user_agent.as_str())
            .build()
            .map_err(|e| ScrapeError::Config(format!("http client: {e}")))?;
        Ok(Self { client })
    }

    fn send(&self, req: RequestBuilder, url: &Url) -> Result<Page, ScrapeError> {
        let resp = req
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::fetch(url.as_str(), e))?;
        let final_url = resp.url().clone();
        let body = resp.text().map_err(|e| ScrapeError::fetch(url.as_str(), e))?;
        debug!(url = %final_url, bytes = body.len(), "fetched");
        Ok(Page { url: final_url, body })
    }
}

impl Browser for HttpSession {
    fn get(&mut self, url: &Url, referer: Option<&Url>) -> Result<Page, ScrapeError> {
        let mut req = self.client.get(url.clone());
        if let Some(r) = referer {
            req = req.header(REFERER, r.as_str());
        }
        self.send(req, url)
    }

    fn submit(&mut self, form: &FormSubmission) -> Result<Page, ScrapeError> {
        let mut req = match form.method {
            Method::Get => self.client.get(form.action.clone()).query(&form.fields),
            Method::Post => self.client.post(form.action.clone()).form(&form.fields),
        };
        if let Some(r) = &form.referer {
            req = req.header(REFERER, r.as_str());
        }
        self.send(req, &form.action)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    type Session = HttpSession;

    fn connect(&self, opts: &ClientOptions) -> Result<HttpSession, ScrapeError> {
        HttpSession::new(opts)
    }
}
