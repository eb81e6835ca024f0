//! Absolute-URL scraper for free text

use crate::url::heuristics::ABSOLUTE_URL_REGEX;

/// Finds every `https://` URL in `text`
///
/// A match glued to a preceding word character or slash (`xhttps://`,
/// `/https://`) is discarded and the search resumes one character later, so
/// a genuine URL starting inside a rejected match is still found.
///
/// # Examples
///
/// ```
/// use scopecrawl::extract::scan_absolute_urls;
///
/// let found = scan_absolute_urls(r#"see "https://example.com/a" and xhttps://no"#);
/// assert_eq!(found, vec!["https://example.com/a"]);
/// ```
pub fn scan_absolute_urls(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut start = 0;

    while let Some(m) = ABSOLUTE_URL_REGEX.find_at(text, start) {
        if is_glued(&text[..m.start()]) {
            start = next_char_boundary(text, m.start());
            continue;
        }
        found.push(m.as_str().to_string());
        start = m.end().max(next_char_boundary(text, m.start()));
    }

    found
}

fn is_glued(preceding: &str) -> bool {
    preceding
        .chars()
        .next_back()
        .is_some_and(|c| c == '/' || c == '_' || c.is_alphanumeric())
}

fn next_char_boundary(text: &str, idx: usize) -> usize {
    text[idx..]
        .chars()
        .next()
        .map(|c| idx + c.len_utf8())
        .unwrap_or(text.len())
}
