//! JavaScript link extractor
//!
//! A small lexer that only understands what matters for finding URLs:
//! string literals, template literals, comments and regex literals. The
//! first three are scanned for absolute URLs; regex literals are skipped so
//! a quote inside `/["']/` does not desynchronize the lexer.

use super::generic::scan_absolute_urls;

/// Literals this long are usually embedded data blobs, not endpoints
const MAX_LITERAL_LEN: usize = 1000;

/// Punctuation after which a `/` starts a regex literal rather than a division
const REGEX_PRECEDERS: &[u8] = b"(,=:[!&|?{};";

/// Keywords after which a `/` starts a regex literal
const REGEX_KEYWORDS: &[&[u8]] = &[
    b"return", b"typeof", b"case", b"in", b"of", b"delete", b"void", b"throw", b"new",
    b"instanceof", b"else", b"do", b"yield", b"await",
];

/// Last significant token before the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Punct(u8),
    /// Identifier, number, literal or `)`-like token: `/` divides it
    Operand,
    /// A keyword that expects an expression next
    Keyword,
}

/// Extracts absolute URLs from string literals and comments of a script
pub fn extract_script(body: &str) -> Vec<String> {
    let bytes = body.as_bytes();
    let mut links = Vec::new();
    let mut prev = Prev::Start;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'"' | b'\'' | b'`' => {
                let end = skip_quoted(bytes, i + 1, b);
                let literal = body[i + 1..end].trim();
                if !literal.is_empty() && literal.chars().count() < MAX_LITERAL_LEN {
                    links.extend(scan_absolute_urls(literal));
                }
                i = (end + 1).min(bytes.len());
                prev = Prev::Operand;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                let end = find_from(bytes, i + 2, b"\n").unwrap_or(bytes.len());
                links.extend(scan_absolute_urls(&body[i + 2..end]));
                i = end;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                let close = find_from(bytes, i + 2, b"*/");
                let end = close.unwrap_or(bytes.len());
                links.extend(scan_absolute_urls(&body[i + 2..end]));
                i = close.map(|c| c + 2).unwrap_or(bytes.len());
            }
            b'/' if starts_regex(prev) => {
                i = skip_regex(bytes, i + 1);
                prev = Prev::Operand;
            }
            _ if is_word_byte(b) => {
                let end = skip_word(bytes, i);
                prev = if REGEX_KEYWORDS.contains(&&bytes[i..end]) {
                    Prev::Keyword
                } else {
                    Prev::Operand
                };
                i = end;
            }
            _ => {
                if !b.is_ascii_whitespace() {
                    prev = Prev::Punct(b);
                }
                i += 1;
            }
        }
    }

    links
}

fn starts_regex(prev: Prev) -> bool {
    match prev {
        Prev::Start | Prev::Keyword => true,
        Prev::Punct(c) => REGEX_PRECEDERS.contains(&c),
        Prev::Operand => false,
    }
}

/// Identifier or number characters; non-ASCII bytes count so UTF-8 stays whole
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

fn skip_word(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_word_byte(bytes[i]) {
        i += 1;
    }
    i
}

/// Returns the index of the closing quote, or the end of input
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return i,
            // plain strings cannot span lines
            b'\n' if quote != b'`' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Returns the index just past a regex literal body and its flags
fn skip_regex(bytes: &[u8], mut i: usize) -> usize {
    let mut in_class = false;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' => {
                in_class = true;
                i += 1;
            }
            b']' => {
                in_class = false;
                i += 1;
            }
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return i;
            }
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn find_from(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(start..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| start + pos)
}
