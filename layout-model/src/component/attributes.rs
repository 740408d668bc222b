//! Canonical attribute vocabulary
//!
//!     Attributes are keyed by [AttrKey], a closed set of names every dialect agrees on once
//!     parsed. Native keys a dialect table does not know are carried as [AttrKey::Other] so a
//!     same-dialect conversion can put them back.
//!
//!     Values stay typed: booleans are real booleans (dialect tokens like "on" or "yes" are
//!     coerced by the parsers), numbers are numbers, and anything that is neither a scalar nor
//!     a list of strings is kept as raw JSON.

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical attribute key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrKey {
    Url,
    Target,
    Rel,
    ImageUrl,
    AltText,
    Width,
    BackgroundColor,
    BackgroundImage,
    TextColor,
    Alignment,
    Level,
    Heading,
    Icon,
    VideoUrl,
    Open,
    FullWidth,
    CssClass,
    CssId,
    Height,
    Size,
    ButtonStyle,
    Number,
    Percent,
    Author,
    JobTitle,
    Images,
    Columns,
    Address,
    Zoom,
    Email,
    Menu,
    /// Pass-through for native keys outside the canonical vocabulary.
    Other(String),
}

const KNOWN: [AttrKey; 31] = [
    AttrKey::Url,
    AttrKey::Target,
    AttrKey::Rel,
    AttrKey::ImageUrl,
    AttrKey::AltText,
    AttrKey::Width,
    AttrKey::BackgroundColor,
    AttrKey::BackgroundImage,
    AttrKey::TextColor,
    AttrKey::Alignment,
    AttrKey::Level,
    AttrKey::Heading,
    AttrKey::Icon,
    AttrKey::VideoUrl,
    AttrKey::Open,
    AttrKey::FullWidth,
    AttrKey::CssClass,
    AttrKey::CssId,
    AttrKey::Height,
    AttrKey::Size,
    AttrKey::ButtonStyle,
    AttrKey::Number,
    AttrKey::Percent,
    AttrKey::Author,
    AttrKey::JobTitle,
    AttrKey::Images,
    AttrKey::Columns,
    AttrKey::Address,
    AttrKey::Zoom,
    AttrKey::Email,
    AttrKey::Menu,
];

impl AttrKey {
    pub fn as_str(&self) -> &str {
        match self {
            AttrKey::Url => "url",
            AttrKey::Target => "target",
            AttrKey::Rel => "rel",
            AttrKey::ImageUrl => "image_url",
            AttrKey::AltText => "alt_text",
            AttrKey::Width => "width",
            AttrKey::BackgroundColor => "background_color",
            AttrKey::BackgroundImage => "background_image",
            AttrKey::TextColor => "text_color",
            AttrKey::Alignment => "alignment",
            AttrKey::Level => "level",
            AttrKey::Heading => "heading",
            AttrKey::Icon => "icon",
            AttrKey::VideoUrl => "video_url",
            AttrKey::Open => "open",
            AttrKey::FullWidth => "full_width",
            AttrKey::CssClass => "css_class",
            AttrKey::CssId => "css_id",
            AttrKey::Height => "height",
            AttrKey::Size => "size",
            AttrKey::ButtonStyle => "button_style",
            AttrKey::Number => "number",
            AttrKey::Percent => "percent",
            AttrKey::Author => "author",
            AttrKey::JobTitle => "job_title",
            AttrKey::Images => "images",
            AttrKey::Columns => "columns",
            AttrKey::Address => "address",
            AttrKey::Zoom => "zoom",
            AttrKey::Email => "email",
            AttrKey::Menu => "menu",
            AttrKey::Other(name) => name,
        }
    }

    /// Resolve a canonical name; anything else becomes `Other`.
    pub fn parse(name: &str) -> AttrKey {
        KNOWN
            .iter()
            .find(|key| key.as_str() == name)
            .cloned()
            .unwrap_or_else(|| AttrKey::Other(name.to_string()))
    }

    pub fn is_other(&self) -> bool {
        matches!(self, AttrKey::Other(_))
    }

    /// Keys whose values are coerced to booleans by parsers.
    pub fn is_boolean(&self) -> bool {
        matches!(self, AttrKey::Open | AttrKey::FullWidth)
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AttrKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AttrKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        if name.is_empty() {
            return Err(de::Error::custom("attribute key cannot be empty"));
        }
        Ok(AttrKey::parse(&name))
    }
}

/// Typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Json(serde_json::Value),
}

impl AttrValue {
    pub fn text(value: impl Into<String>) -> Self {
        AttrValue::Text(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            AttrValue::Text(s) => parse_bool_token(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Flatten to the string a bracket-tag attribute would carry.
    pub fn to_plain_string(&self) -> String {
        match self {
            AttrValue::Bool(b) => b.to_string(),
            AttrValue::Number(n) => format_number(*n),
            AttrValue::Text(s) => s.clone(),
            AttrValue::List(items) => items.join(","),
            AttrValue::Json(value) => match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    /// Convert to the JSON value a JSON-tree dialect would carry.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttrValue::Bool(b) => serde_json::Value::Bool(*b),
            AttrValue::Number(n) => number_to_json(*n),
            AttrValue::Text(s) => serde_json::Value::String(s.clone()),
            AttrValue::List(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|s| serde_json::Value::String(s.clone()))
                    .collect(),
            ),
            AttrValue::Json(value) => value.clone(),
        }
    }

    /// Lift an arbitrary JSON value into the closest typed variant.
    pub fn from_json(value: &serde_json::Value) -> AttrValue {
        match value {
            serde_json::Value::Bool(b) => AttrValue::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_f64()
                .map(AttrValue::Number)
                .unwrap_or_else(|| AttrValue::Json(value.clone())),
            serde_json::Value::String(s) => AttrValue::Text(s.clone()),
            serde_json::Value::Array(items) if items.iter().all(|v| v.is_string()) => {
                AttrValue::List(
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect(),
                )
            }
            other => AttrValue::Json(other.clone()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

/// Recognize the boolean spellings page builders use.
pub fn parse_bool_token(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Some(true),
        "off" | "no" | "false" | "0" | "" => Some(false),
        _ => None,
    }
}

/// Render a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Insertion-ordered canonical attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<AttrKey, AttrValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace, keeping the original position of a replaced key.
    pub fn insert(&mut self, key: AttrKey, value: impl Into<AttrValue>) {
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &AttrKey) -> Option<&AttrValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &AttrKey) -> Option<&str> {
        self.0.get(key).and_then(AttrValue::as_str)
    }

    pub fn get_bool(&self, key: &AttrKey) -> Option<bool> {
        self.0.get(key).and_then(AttrValue::as_bool)
    }

    pub fn get_number(&self, key: &AttrKey) -> Option<f64> {
        self.0.get(key).and_then(AttrValue::as_number)
    }

    pub fn contains(&self, key: &AttrKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &AttrKey) -> Option<AttrValue> {
        self.0.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AttrKey, &AttrValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a AttrKey, &'a AttrValue);
    type IntoIter = indexmap::map::Iter<'a, AttrKey, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(AttrKey, AttrValue)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (AttrKey, AttrValue)>>(iter: T) -> Self {
        Attributes(iter.into_iter().collect())
    }
}

/// CSS-like properties, independent of attributes.
pub type Styles = IndexMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(AttrKey::parse("image_url"), AttrKey::ImageUrl);
        assert_eq!(
            AttrKey::parse("_builder_version"),
            AttrKey::Other("_builder_version".to_string())
        );
        for key in KNOWN.iter() {
            assert_eq!(&AttrKey::parse(key.as_str()), key);
        }
    }

    #[test]
    fn test_bool_tokens() {
        assert_eq!(parse_bool_token("on"), Some(true));
        assert_eq!(parse_bool_token("Yes"), Some(true));
        assert_eq!(parse_bool_token("off"), Some(false));
        assert_eq!(parse_bool_token("no"), Some(false));
        assert_eq!(parse_bool_token("maybe"), None);
    }

    #[test]
    fn test_insert_keeps_order() {
        let mut attrs = Attributes::new();
        attrs.insert(AttrKey::Url, "https://example.com");
        attrs.insert(AttrKey::Target, "_blank");
        attrs.insert(AttrKey::Url, "https://example.org");

        let keys: Vec<_> = attrs.iter().map(|(k, _)| k.as_str().to_string()).collect();
        assert_eq!(keys, vec!["url", "target"]);
        assert_eq!(attrs.get_str(&AttrKey::Url), Some("https://example.org"));
    }

    #[test]
    fn test_plain_strings() {
        assert_eq!(AttrValue::Number(50.0).to_plain_string(), "50");
        assert_eq!(AttrValue::Number(33.33).to_plain_string(), "33.33");
        assert_eq!(
            AttrValue::List(vec!["a.jpg".into(), "b.jpg".into()]).to_plain_string(),
            "a.jpg,b.jpg"
        );
    }

    #[test]
    fn test_json_lifting() {
        let value = serde_json::json!({"unit": "px", "size": 10});
        assert_eq!(AttrValue::from_json(&value), AttrValue::Json(value.clone()));
        assert_eq!(
            AttrValue::from_json(&serde_json::json!(["x", "y"])),
            AttrValue::List(vec!["x".into(), "y".into()])
        );
        assert_eq!(AttrValue::Number(50.0).to_json(), serde_json::json!(50));
    }

    #[test]
    fn test_serialize_as_map() {
        let mut attrs = Attributes::new();
        attrs.insert(AttrKey::Open, true);
        attrs.insert(AttrKey::Other("data-x".into()), "1");
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json, serde_json::json!({"open": true, "data-x": "1"}));

        let back: Attributes = serde_json::from_value(json).unwrap();
        assert_eq!(back, attrs);
    }
}
