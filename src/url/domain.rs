use url::{Host, Url};

/// Extracts the lowercased host of a parsed URL
///
/// The host comes from the same WHATWG parser reqwest uses, so it is the
/// host a fetch of this URL would actually contact.
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Registered domain (domain + public suffix) of a parsed URL
///
/// IP hosts and bare public suffixes have none and yield "".
pub fn registered_domain_of(url: &Url) -> String {
    match url.host() {
        Some(Host::Domain(host)) => {
            let host = host.trim_end_matches('.').to_lowercase();
            psl::domain_str(&host)
                .map(|domain| domain.to_string())
                .unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// Computes the registered domain (domain + public suffix) of a URL or host
///
/// Subdomains are ignored, so `https://api.example.co.uk/x` and
/// `www.example.co.uk` both yield `example.co.uk`. A bare host is read as
/// `https://{host}`. Returns an empty string when no registered domain can
/// be determined (IP addresses, bare public suffixes, unparseable input).
///
/// # Examples
///
/// ```
/// use scopecrawl::url::registered_domain;
///
/// assert_eq!(registered_domain("https://mail.api.example.com/x"), "example.com");
/// assert_eq!(registered_domain("www.example.co.uk"), "example.co.uk");
/// assert_eq!(registered_domain(""), "");
/// ```
pub fn registered_domain(url_or_host: &str) -> String {
    let parsed = if url_or_host.contains("://") {
        Url::parse(url_or_host)
    } else {
        Url::parse(&format!("https://{}", url_or_host))
    };

    parsed
        .map(|url| registered_domain_of(&url))
        .unwrap_or_default()
}
