// src/specs/search_form.rs
//! Locate the search form on the landing page and collect what a browser would
//! send if the first submit button were clicked without touching anything.

use reqwest::Url;
use scraper::{ElementRef, Html};

use crate::core::sanitize::normalize_ws;
use crate::core::{FormSubmission, Method, Page};
use crate::error::ScrapeError;

pub fn find_form(page: &Page, action: &str) -> Result<FormSubmission, ScrapeError> {
    let doc = Html::parse_document(&page.body);
    let wanted = page.url.join(action).ok();

    let form = elements(doc.root_element(), "form")
        .find(|f| {
            let attr = f.value().attr("action").map(str::trim).unwrap_or_default();
            attr == action || (wanted.is_some() && page.url.join(attr).ok() == wanted)
        })
        .ok_or_else(|| ScrapeError::FormNotFound {
            action: action.to_string(),
            url: page.url.to_string(),
        })?;

    let raw_action = form.value().attr("action").map(str::trim).unwrap_or_default();
    let action_url: Url = page.url.join(raw_action).map_err(|e| ScrapeError::InvalidUrl {
        url: raw_action.to_string(),
        reason: e.to_string(),
    })?;

    let method = match form.value().attr("method") {
        Some(m) if m.trim().eq_ignore_ascii_case("post") => Method::Post,
        _ => Method::Get,
    };

    Ok(FormSubmission {
        method,
        action: action_url,
        fields: default_fields(form),
        referer: Some(page.url.clone()),
    })
}

fn elements<'a>(root: ElementRef<'a>, name: &'static str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().name() == name)
}

/// Successful controls in document order, plus the first submit button.
fn default_fields(form: ElementRef<'_>) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    let mut button: Option<(String, String)> = None;

    for el in form.descendants().filter_map(ElementRef::wrap) {
        let v = el.value();
        if v.attr("disabled").is_some() {
            continue;
        }
        let name = v.attr("name").unwrap_or_default();

        match v.name() {
            "input" => {
                let kind = v.attr("type").unwrap_or("text").to_ascii_lowercase();
                let value = v.attr("value").unwrap_or_default();
                match kind.as_str() {
                    "submit" => {
                        if button.is_none() {
                            button = Some((name.to_string(), value.to_string()));
                        }
                    }
                    "checkbox" | "radio" => {
                        if v.attr("checked").is_some() && !name.is_empty() {
                            let value = if value.is_empty() { "on" } else { value };
                            fields.push((name.to_string(), value.to_string()));
                        }
                    }
                    "image" | "button" | "reset" | "file" => {}
                    _ if !name.is_empty() => fields.push((name.to_string(), value.to_string())),
                    _ => {}
                }
            }
            "button" => {
                let kind = v.attr("type").unwrap_or("submit");
                if kind.eq_ignore_ascii_case("submit") && button.is_none() {
                    let value = v.attr("value").unwrap_or_default();
                    button = Some((name.to_string(), value.to_string()));
                }
            }
            "select" if !name.is_empty() => {
                let options: Vec<ElementRef> = elements(el, "option").collect();
                let multiple = v.attr("multiple").is_some();
                let mut selected: Vec<&ElementRef> =
                    options.iter().filter(|o| o.value().attr("selected").is_some()).collect();
                if selected.is_empty() && !multiple {
                    selected.extend(options.first());
                }
                if !multiple {
                    selected.truncate(1);
                }
                for o in selected {
                    fields.push((name.to_string(), option_value(o)));
                }
            }
            "textarea" if !name.is_empty() => {
                fields.push((name.to_string(), el.text().collect()));
            }
            _ => {}
        }
    }

    if let Some((name, value)) = button.filter(|(n, _)| !n.is_empty()) {
        fields.push((name, value));
    }
    fields
}

fn option_value(option: &ElementRef<'_>) -> String {
    match option.value().attr("value") {
        Some(v) => v.to_string(),
        None => normalize_ws(&option.text().collect::<String>()),
    }
}
