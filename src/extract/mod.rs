//! Link extraction from fetched bodies
//!
//! Extractors are plain functions that turn a body into raw candidate
//! strings. They do no validation at all: every string they return still
//! goes through [`Scope::classify`](crate::url::Scope::classify).

mod generic;
mod html;
mod robots;
mod script;

pub use generic::scan_absolute_urls;
pub use html::extract_html;
pub use robots::extract_robots;
pub use script::extract_script;

use crate::url::Extension;

/// Picks the extractor matching a target's extension and runs it
///
/// `.txt` targets whose URL ends in `robots.txt` get the robots parser;
/// every other non-page, non-script body falls back to the absolute-URL
/// scanner.
pub fn extract_links(body: &str, url: &str, extension: Option<&Extension>) -> Vec<String> {
    match extension {
        Some(Extension::Html) => extract_html(body),
        Some(Extension::Script) => extract_script(body),
        Some(Extension::Other(ext)) if ext == "txt" && is_robots_file(url) => {
            extract_robots(body)
        }
        _ => scan_absolute_urls(body),
    }
}

fn is_robots_file(url: &str) -> bool {
    url.strip_suffix('/').unwrap_or(url).ends_with("robots.txt")
}
