//! robots.txt path scraper
//!
//! Disallowed and allowed paths are often the most interesting part of a
//! site, so every `Allow`, `Disallow` and `Sitemap` value is surfaced as a
//! candidate. Agent groups are ignored.

/// Extracts candidate paths and sitemap URLs from a robots.txt body
///
/// # Examples
///
/// ```
/// use scopecrawl::extract::extract_robots;
///
/// let body = "User-agent: *\nDisallow: /admin\nSitemap: https://x.com/s.xml";
/// assert_eq!(extract_robots(body), vec!["/admin", "https://x.com/s.xml"]);
/// ```
pub fn extract_robots(body: &str) -> Vec<String> {
    body.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (directive, value) = line.split_once(':')?;
    let directive = directive.trim().to_ascii_lowercase();
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match directive.as_str() {
        "allow" | "disallow" if value.starts_with('/') => Some(value.to_string()),
        "sitemap" => Some(value.to_string()),
        _ => None,
    }
}
