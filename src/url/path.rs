use url::Url;

/// Splits an absolute URL into its path and file extension
///
/// The extension is taken from the last path segment and keeps its leading
/// dot (`".js"`). Leading dots of a segment never start an extension, so
/// `/.htaccess` has none. Returns `None` if the URL cannot be parsed.
///
/// # Examples
///
/// ```
/// use scopecrawl::url::path_and_extension;
///
/// let (path, ext) = path_and_extension("https://example.com/a/app.min.js?v=2").unwrap();
/// assert_eq!(path, "/a/app.min.js");
/// assert_eq!(ext, ".js");
/// ```
pub fn path_and_extension(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url).ok()?;
    let path = parsed.path().to_string();
    let extension = file_extension(&path).to_string();
    Some((path, extension))
}

/// Returns the extension of the last path segment, or "" if there is none
pub fn file_extension(path: &str) -> &str {
    let segment = path.rsplit('/').next().unwrap_or("");
    let stem_start = segment.len() - segment.trim_start_matches('.').len();

    match segment[stem_start..].rfind('.') {
        Some(dot) => &segment[stem_start + dot..],
        None => "",
    }
}

/// Counts the non-empty segments of a URL path
pub fn path_depth(path: &str) -> usize {
    path.split('/').filter(|segment| !segment.is_empty()).count()
}
