// src/normalize.rs
//! Plain-text cleanup for search-result fields (`<b>` highlight tags, entities).
//!
//! Entities are decoded by `html_escape`, which only recognizes the terminated
//! form (`&lt;`, `&#65;`). Legacy unterminated forms such as `&lt` or `&amp` are
//! left as literal text. Naver always sends terminated entities.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));

/// Normalize a raw field into plain text. `None` yields an empty string.
///
/// Steps, repeated until the text stops changing:
/// 1) HTML entity decode
/// 2) strip `<tag>` markup
/// 3) collapse leftover `&quot;` / `&amp;` (double-escaped input)
/// 4) trim
pub fn clean_text(raw: Option<&str>) -> String {
    let mut cur = raw.unwrap_or_default().to_string();
    // Every pass that changes the text also shortens it, so this terminates.
    loop {
        let next = clean_once(&cur);
        if next == cur {
            break cur;
        }
        cur = next;
    }
}

fn clean_once(s: &str) -> String {
    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, "");
    stripped
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
