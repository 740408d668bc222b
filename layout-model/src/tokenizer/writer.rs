//! Writing bracket tags back out
//!
//! The inverse of the tokenizer: attribute lists are written with double quotes, switching
//! to single quotes when a value contains a double quote, and entity-encoding when it
//! contains both. A `]` in a value is encoded so the tag cannot end early. In body text, a
//! `[` that would read as the start of a tag is written as `&#91;`; [unescape_text] undoes it.

use super::lexer::is_positional_key;
use std::borrow::Cow;

const OPEN_BRACKET_ENTITY: &str = "&#91;";

/// Encode every `[` in body text that the tokenizer would take for a tag opener.
pub fn escape_text(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    let starts_tag = |i: usize| {
        bytes
            .get(i + 1)
            .is_some_and(|&b| b == b'/' || b.is_ascii_alphabetic() || b == b'_')
    };
    if !(0..bytes.len()).any(|i| bytes[i] == b'[' && starts_tag(i)) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for (i, ch) in text.char_indices() {
        if ch == '[' && starts_tag(i) {
            out.push_str(OPEN_BRACKET_ENTITY);
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Inverse of [escape_text].
pub fn unescape_text(text: &str) -> Cow<'_, str> {
    if text.contains(OPEN_BRACKET_ENTITY) {
        Cow::Owned(text.replace(OPEN_BRACKET_ENTITY, "["))
    } else {
        Cow::Borrowed(text)
    }
}

/// Quote a value for use in an attribute list.
pub fn quote_value(value: &str) -> String {
    let value = value.replace(']', "&#93;");
    match (value.contains('"'), value.contains('\'')) {
        (false, _) => format!("\"{}\"", value),
        (true, false) => format!("'{}'", value),
        (true, true) => format!("\"{}\"", value.replace('"', "&quot;")),
    }
}

/// Render ` key="value" ...` (with a leading space when non-empty).
pub fn write_attributes<K, V>(attributes: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (key, value) in attributes {
        out.push(' ');
        if !is_positional_key(key.as_ref()) {
            out.push_str(key.as_ref());
            out.push('=');
        }
        out.push_str(&quote_value(value.as_ref()));
    }
    out
}

/// Incremental builder for bracket-tag markup
#[derive(Debug, Default)]
pub struct TagWriter {
    output: String,
}

impl TagWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<K: AsRef<str>, V: AsRef<str>>(&mut self, name: &str, attributes: &[(K, V)]) {
        self.output.push('[');
        self.output.push_str(name);
        self.output.push_str(&write_attributes(attributes));
        self.output.push(']');
    }

    /// A tag with no closing counterpart. `explicit` writes the `[name /]` form, needed for
    /// names the reading side does not know to be void.
    pub fn void<K: AsRef<str>, V: AsRef<str>>(
        &mut self,
        name: &str,
        attributes: &[(K, V)],
        explicit: bool,
    ) {
        self.output.push('[');
        self.output.push_str(name);
        self.output.push_str(&write_attributes(attributes));
        if explicit {
            self.output.push_str(" /");
        }
        self.output.push(']');
    }

    pub fn close(&mut self, name: &str) {
        self.output.push_str("[/");
        self.output.push_str(name);
        self.output.push(']');
    }

    /// Body text; tag-like brackets are escaped.
    pub fn text(&mut self, text: &str) {
        self.output.push_str(&escape_text(text));
    }

    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn finish(self) -> String {
        self.output
    }
}
