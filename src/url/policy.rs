//! Acceptance policies applied once a candidate is absolute
//!
//! Local URLs are filtered on extension, path depth and library noise.
//! External URLs are only kept when they point at an allowed host.

use crate::url::heuristics::is_common_library_script;
use crate::url::path::{path_and_extension, path_depth};
use crate::url::resolve::Candidate;
use crate::url::{AcceptedUrl, Extension, Rejection, Scope};

/// Applies the local-URL policy
///
/// - an extension outside the allow-list is rejected
/// - pages (no extension, `.html`, `.htm`) must be shallow enough, unless
///   their path contains a sensitive pattern
/// - scripts are rejected when they look like a common library bundle
/// - any other allow-listed file is accepted as-is
pub fn apply_local(candidate: Candidate, scope: &Scope) -> Result<AcceptedUrl, Rejection> {
    let (path, suffix) = path_and_extension(&candidate.url).ok_or(Rejection::Unparseable)?;

    if !suffix.is_empty() && !scope.allows_extension(&suffix) {
        return Err(Rejection::DisallowedExtension(suffix));
    }

    let extension = match suffix.as_str() {
        "" | ".html" | ".htm" => {
            let depth = path_depth(&path);
            if depth > scope.max_path_depth() && !scope.has_sensitive_pattern(&path) {
                return Err(Rejection::TooDeep {
                    depth,
                    max: scope.max_path_depth(),
                });
            }
            Extension::Html
        }
        ".js" => {
            if is_common_library_script(&path) {
                return Err(Rejection::VendorScript);
            }
            Extension::Script
        }
        other => Extension::from_suffix(other).ok_or(Rejection::Unparseable)?,
    };

    Ok(AcceptedUrl {
        url: candidate.url,
        locality: candidate.locality,
        extension: Some(extension),
    })
}

/// Applies the external-URL policy: keep only allow-listed hosts
pub fn apply_external(candidate: Candidate, scope: &Scope) -> Result<AcceptedUrl, Rejection> {
    if !scope.is_allowed_external(&candidate.url) {
        return Err(Rejection::ExternalNotAllowed);
    }

    let (_, suffix) = path_and_extension(&candidate.url).ok_or(Rejection::Unparseable)?;

    Ok(AcceptedUrl {
        extension: Extension::from_suffix(&suffix),
        url: candidate.url,
        locality: candidate.locality,
    })
}
