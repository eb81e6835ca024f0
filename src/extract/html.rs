//! HTML link extractor
//!
//! Walks every element and comment of a parsed document. Link-bearing
//! attributes are collected as-is, except event-handler style values (those
//! containing a call) which are scanned for absolute URLs instead. Comments
//! are always scanned, since they often leak staging hosts and old endpoints.

use super::generic::scan_absolute_urls;
use scraper::{Html, Node};
use std::collections::HashSet;

/// Attributes worth reading, per element name
fn link_attributes(element: &str) -> &'static [&'static str] {
    match element {
        "a" => &["href"],
        "script" => &[
            "src",
            "content",
            "href",
            "onclick",
            "action",
            "formaction",
            "codebase",
        ],
        "link" => &["href", "src"],
        "form" => &["action"],
        "object" => &["data"],
        "button" => &["onclick", "formaction"],
        "embed" => &["src"],
        "iframe" => &["src"],
        _ => &[],
    }
}

/// Elements whose attribute values may hold inline code
fn may_hold_code(element: &str) -> bool {
    matches!(element, "a" | "script" | "button")
}

/// Extracts candidate links from an HTML body, deduplicated in document order
pub fn extract_html(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    let mut push = |link: String| {
        if seen.insert(link.clone()) {
            links.push(link);
        }
    };

    for node in document.tree.root().descendants() {
        match node.value() {
            Node::Element(element) => {
                let name = element.name();
                for attribute in link_attributes(name) {
                    let Some(value) = element.attr(attribute) else {
                        continue;
                    };
                    if may_hold_code(name) && value.contains('(') {
                        scan_absolute_urls(value).into_iter().for_each(&mut push);
                    } else {
                        push(value.to_string());
                    }
                }
            }
            Node::Comment(comment) => {
                scan_absolute_urls(comment).into_iter().for_each(&mut push);
            }
            _ => {}
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_mapped_attributes() {
        let body = r#"
            <html><head>
              <link rel="stylesheet" href="/css/site.css">
              <script src="/static/app.js"></script>
            </head><body>
              <a href="/about">About</a>
              <form action="/login"></form>
              <iframe src="https://frame.example.com/embed"></iframe>
              <object data="/movie.swf"></object>
              <embed src="/clip.mp4">
              <img src="/logo.png">
            </body></html>
        "#;

        assert_eq!(
            extract_html(body),
            vec![
                "/css/site.css",
                "/static/app.js",
                "/about",
                "/login",
                "https://frame.example.com/embed",
                "/movie.swf",
                "/clip.mp4",
            ]
        );
    }

    #[test]
    fn test_inline_code_is_scanned() {
        let body = r#"
            <button onclick="window.open('https://app.example.com/go')">Go</button>
            <a href="javascript:open('https://popup.example.com/x')">x</a>
            <a href="/plain(1)">plain</a>
        "#;

        assert_eq!(
            extract_html(body),
            vec![
                "https://app.example.com/go",
                "https://popup.example.com/x",
            ]
        );
    }

    #[test]
    fn test_form_action_with_parenthesis_is_verbatim() {
        let body = r#"<form action="/submit(1)"></form>"#;
        assert_eq!(extract_html(body), vec!["/submit(1)"]);
    }

    #[test]
    fn test_comments_are_scanned() {
        let body = r#"
            <html><body>
            <!-- old endpoint: https://staging.example.com/api/v1 -->
            <p>text https://not-in-comment.example.com</p>
            </body></html>
        "#;

        assert_eq!(
            extract_html(body),
            vec!["https://staging.example.com/api/v1"]
        );
    }

    #[test]
    fn test_output_is_deduplicated() {
        let body = r#"<a href="/a">1</a><a href="/b">2</a><a href="/a">3</a>"#;
        assert_eq!(extract_html(body), vec!["/a", "/b"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract_html("").is_empty());
    }
}
