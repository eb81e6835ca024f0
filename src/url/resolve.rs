//! String-to-URL stages of the classification pipeline
//!
//! Each stage takes the output of the previous one: `sanitize` discards
//! strings that cannot be URLs, `canonicalize` trims them into a stable key,
//! and `resolve` turns the key into an absolute URL and decides locality.

use crate::url::domain::registered_domain_of;
use crate::url::{Locality, Rejection};
use url::Url;

const MIN_CANDIDATE_LEN: usize = 3;
const MAX_CANDIDATE_LEN: usize = 300;

/// An absolute URL that still has to pass the local or external policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub locality: Locality,
}

/// Rejects obvious non-URLs: too short, too long, prose, mail links
pub fn sanitize(raw: &str) -> Result<&str, Rejection> {
    let trimmed = raw.trim();

    let len = trimmed.chars().count();
    if !(MIN_CANDIDATE_LEN..=MAX_CANDIDATE_LEN).contains(&len) {
        return Err(Rejection::Length(len));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(Rejection::Whitespace);
    }

    if trimmed
        .get(..6)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto"))
    {
        return Err(Rejection::MailLink);
    }

    Ok(trimmed)
}

/// Drops fragments and wildcard tails, completes `//host` links and strips
/// one trailing slash
pub fn canonicalize(sanitized: &str) -> Result<String, Rejection> {
    let mut url = sanitized;

    if let Some(idx) = url.find('#') {
        url = &url[..idx];
    }
    if let Some(idx) = url.find('*') {
        url = &url[..idx];
    }

    let mut canonical = if url.starts_with("//") {
        format!("https:{}", url)
    } else {
        url.to_string()
    };

    if canonical.ends_with('/') {
        canonical.pop();
    }

    if canonical.is_empty() {
        return Err(Rejection::Empty);
    }

    Ok(canonical)
}

/// Makes a canonical string absolute and decides whether it belongs to the crawl
///
/// Strings starting with `/` are relative to the crawl domain and always
/// local. Anything else is local only when its registered domain equals the
/// crawl's, so every subdomain of the target counts as local. The host is
/// read with the same parser the transport uses, and a string it cannot
/// parse is rejected.
pub fn resolve(
    canonical: String,
    domain: &str,
    crawl_registered_domain: &str,
) -> Result<Candidate, Rejection> {
    if canonical.starts_with('/') {
        return Ok(Candidate {
            url: format!("https://{}{}", domain, canonical),
            locality: Locality::Local,
        });
    }

    let url = if has_http_scheme(&canonical) {
        canonical
    } else {
        format!("https://{}", canonical)
    };

    let parsed = Url::parse(&url).map_err(|_| Rejection::Unparseable)?;
    let found = registered_domain_of(&parsed);
    let locality = if !found.is_empty() && found == crawl_registered_domain {
        Locality::Local
    } else {
        Locality::External
    };

    Ok(Candidate { url, locality })
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
