//! Title and body sharing one content field

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("valid regex"));

/// Split at the first blank line. Without one, everything is body.
pub fn split_title_body(content: &str) -> (Option<String>, String) {
    match BLANK_LINE.find(content) {
        Some(found) => {
            let title = content[..found.start()].trim();
            let body = content[found.end()..].trim();
            let title = (!title.is_empty()).then(|| title.to_string());
            (title, body.to_string())
        }
        None => (None, content.trim().to_string()),
    }
}

pub fn join_title_body(title: &str, body: &str) -> String {
    match (title.trim(), body.trim()) {
        ("", body) => body.to_string(),
        (title, "") => title.to_string(),
        (title, body) => format!("{}\n\n{}", title, body),
    }
}
