//! Built-in heuristic tables
//!
//! Defaults for the allow-listed extensions, sensitive path substrings and
//! external domains, plus the patterns used to spot third-party script
//! bundles and absolute URLs in free text.

use regex::{Regex, RegexBuilder};
use once_cell::sync::Lazy;

/// Browser-like user agent sent when the configuration names none
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:140.0) Gecko/20100101 Firefox/140.0";

/// File extensions worth following; "" stands for "no extension"
pub const ALLOWED_FILE_EXTENSIONS: &[&str] = &[
    ".html",
    "",
    ".htm",
    ".txt",
    ".js",
    ".xml",
    ".php",
    ".json",
    ".env",
    ".yaml",
    ".yml",
    ".ini",
    ".cfg",
    ".toml",
    ".config",
    ".log",
    ".rb",
    ".htaccess",
    ".gitignore",
    ".git/config",
    ".git",
];

/// Path substrings that make a page interesting regardless of its depth
pub const SENSITIVE_PATTERNS: &[&str] = &[
    "admin",
    ".env",
    "api",
    "config",
    "backup",
    ".dev",
    ".git",
    "internal",
    "private",
    "test",
    "secret",
    "auth",
    "beta",
    "v1",
    "v2",
    "v3",
    "debug",
    "dashboard",
    "panel",
    "htaccess",
    "graphql",
    "backend",
    "endpoint",
    "token",
    "key",
    ".exe",
    "code",
    "func",
    "command",
    "script",
    "root",
    ".tmp",
    "validate",
    "settings",
];

/// Off-domain hosts that are still worth following
pub const VALID_EXTERNAL_DOMAINS: &[&str] = &["github.com"];

/// Subdomains guessed on the registered domain at seed time
pub const PRIVILEGED_SUBDOMAINS: &[&str] = &["dev", "staging", "admin", "test", "internal"];

/// File names of widely shipped libraries, trackers and ad scripts.
/// Adapted from the katana crawler's common-library list.
const COMMON_JS_LIBRARY_FILE_PATTERN: &str = r"
    (?:amplify|quantserve|slideshow|jquery|modernizr|polyfill|vendor|modules|gtm|underscore?|tween|retina|
    selectivizr|cufon|angular|swf|sha1|freestyle|bootstrap|d3|backbone|videojs|google[-_]analytics|material|
    redux|knockout|datepicker|datetimepicker|ember|react|ng|fusion|analytics|libs?|vendors?|node[-_]modules|
    lodash|moment|chart|highcharts|raphael|prototype|mootools|dojo|ext|yui|web[-_]?components|polymer|vue|
    svelte|next|nuxt|gatsby|express|koa|hapi|socket[-_.]?io|axios|superagent|request|bluebird|rxjs|ramda|
    immutable|flux|redux[-_]saga|mobx|relay|apollo|graphql|three|phaser|pixi|babylon|cannon|hammer|howler|
    gsap|velocity|mo[-_.]?js|popper|shepherd|prism|highlight|markdown[-_]?it|codemirror|ace[-_]?editor|
    tinymce|ckeditor|quill|simplemde|monaco[-_]?editor|pdf[-_.]?js|jspdf|fabric|paper|konva|p5|processing|
    matter[-_.]?js|box2d|planck|chart[-_.]?js|plotly|echarts|d3[-_.]?force|sigma|c3|nvd3|amcharts|vis[-_.]?js|
    dagre[-_.]?d3|cytoscape|leaflet|openlayers|ol3|mapbox|cesium|turf|moment[-_.]?timezone|luxon|dayjs|
    date[-_.]?fns|date[-_.]?io|flatpickr|pikaday|fullcalendar|draggable|interact|sortable|dragula|dropzone|
    filepond|uppy|fine[-_.]?uploader|plyr|mediaelement|flowplayer|jwplayer|video[-_.]?js|mediaelement[-_.]?js|
    dash[-_.]?js|hls[-_.]?js|videojs|wavesurfer|soundmanager|amplitude|pizzicato|tone|adroll|doubleclick|
    facebook-pixel|ga-audiences|googlesyndication|adsbygoogle|gpt|amazon-adsystem|criteo|taboola|outbrain|
    bidswitch|bidswitch.net|spotxchange|yahoo|media.net|contextweb|openx|pubmatic|rubiconproject|indexexchange|
    appnexus|liveintent|triplelift|verizonmedia|synacor|sonobi|yieldmo|gumgum|smartadserver|mopub|pubnative|
    inmobi|chartboost|tapjoy|admob|unityads|vungle|flurry|matomy|altitude|dataxu|thetradedesk|exponential|
    zypmedia|quantcast|mediamath|bidswitch|mgid|revcontent|powerlinks|rhythmone|airpush|smaato|adcolony|
    mopub|leadbolt|mobfox|nativo|revjet|smartyads|avocarrot|epom|imobile|supersonicads|loopme|applovin|
    pandora|mytarget|bidvertiser|chitika|popads|propellerads|buysellads|adhit|hilltopads|plugrush|popcash|
    popunder|revenuehits|trafficjunky|trafficfactory|zero-|smartoasis)
    (?:[-._][\w\d]*)*\.js$
";

/// Matches script paths that belong to a vendor or common library bundle
pub static COMMON_JS_LIBRARY_FILE_REGEX: Lazy<Regex> = Lazy::new(|| {
    RegexBuilder::new(COMMON_JS_LIBRARY_FILE_PATTERN)
        .ignore_whitespace(true)
        .case_insensitive(true)
        .size_limit(1 << 25)
        .build()
        .expect("hardcoded regex pattern is valid")
});

/// Matches an absolute https URL up to the first quote, bracket or space.
/// Callers must still reject matches glued to a preceding word character or slash.
pub static ABSOLUTE_URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https://[^\s"'<>)]*"#).expect("hardcoded regex pattern is valid")
});

/// Returns true if the path names a common library script
pub fn is_common_library_script(path: &str) -> bool {
    COMMON_JS_LIBRARY_FILE_REGEX.is_match(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_scripts_detected() {
        assert!(is_common_library_script("/libs/jquery.min.js"));
        assert!(is_common_library_script("/jquery.min.js"));
        assert!(is_common_library_script("/static/react-dom.production.min.js"));
        assert!(is_common_library_script("/assets/BOOTSTRAP.bundle.js"));
        assert!(is_common_library_script("/js/google-analytics.js"));
    }

    #[test]
    fn test_first_party_scripts_kept() {
        assert!(!is_common_library_script("/a/b/c.js"));
        assert!(!is_common_library_script("/static/app.js"));
        assert!(!is_common_library_script("/checkout.js"));
    }

    #[test]
    fn test_vendor_regex_requires_js_suffix() {
        assert!(!is_common_library_script("/libs/jquery.min.css"));
        assert!(!is_common_library_script("/jquery"));
    }

    #[test]
    fn test_default_tables() {
        assert!(ALLOWED_FILE_EXTENSIONS.contains(&""));
        assert!(ALLOWED_FILE_EXTENSIONS.contains(&".js"));
        assert!(SENSITIVE_PATTERNS.contains(&"dashboard"));
        assert_eq!(VALID_EXTERNAL_DOMAINS, &["github.com"]);
        assert_eq!(PRIVILEGED_SUBDOMAINS.len(), 5);
    }
}
