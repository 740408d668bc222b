//! Attribute values in and out of native form
//!
//!     [Codec] applies a dialect's [Vocabulary] to one component at a time. Decoding takes a
//!     native key and value and writes canonical attributes or styles; encoding walks the
//!     canonical attributes and styles and produces the native key/value map.
//!
//!     Values are handled as `serde_json::Value` on both sides. Bracket dialects wrap their
//!     string values before decoding and flatten the encoded values back to strings, so the
//!     compound encodings (link strings, link objects, CSS blocks, spacing lists) have one
//!     implementation shared by every dialect.

use super::ids::IdGenerator;
use super::rules::{is_box_property, AttrRule, BoolStyle, ValueKind, Vocabulary};
use indexmap::IndexMap;
use layout_model::component::attributes::{format_number, parse_bool_token};
use layout_model::json::{lenient_f64, lenient_string};
use layout_model::{AttrKey, AttrValue, Component, WidthTable};
use once_cell::sync::Lazy;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use serde_json::{json, Map, Value};

/// Characters WPBakery leaves unescaped in link and font strings
const URL_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

static VC_CSS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*\.(vc_custom_[A-Za-z0-9_-]*)\s*\{(.*)\}\s*$").expect("valid regex")
});

static CSS_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?[0-9]*\.?[0-9]+)\s*([a-z%]*)\s*$").expect("valid regex"));

const SIDES: [&str; 4] = ["top", "right", "bottom", "left"];

/// Native key/value pairs in output order
pub type NativeAttributes = IndexMap<String, Value>;

/// One dialect's vocabulary plus the value conventions it needs.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    pub dialect: &'a str,
    pub vocabulary: &'a Vocabulary,
    pub bools: BoolStyle,
    pub widths: &'a WidthTable,
}

impl<'a> Codec<'a> {
    /// Decode one native key of `element` into `into`. Keys without a rule are kept as
    /// [AttrKey::Other].
    pub fn decode(&self, element: &str, native: &str, value: &Value, into: &mut Component) {
        match self.vocabulary.rule_for_native(element, native) {
            Some(rule) => self.decode_rule(rule, value, into),
            None if !value.is_null() => {
                into.attributes
                    .insert(AttrKey::Other(native.to_string()), AttrValue::from_json(value));
            }
            None => {}
        }
    }

    fn decode_rule(&self, rule: &AttrRule, value: &Value, into: &mut Component) {
        let key = rule.key.clone();
        match rule.kind {
            ValueKind::Text => {
                if let Some(decoded) = self.decode_scalar(&key, value) {
                    into.attributes.insert(key, decoded);
                }
            }
            ValueKind::Bool => {
                let decoded = match value {
                    Value::Bool(b) => Some(AttrValue::Bool(*b)),
                    other => lenient_string(other).map(|s| self.decode_bool(&s)),
                };
                if let Some(decoded) = decoded {
                    into.attributes.insert(key, decoded);
                }
            }
            ValueKind::Number => match lenient_f64(value) {
                Some(n) => into.attributes.insert(key, n),
                None => {
                    if let Some(s) = lenient_string(value) {
                        into.attributes.insert(key, s);
                    }
                }
            },
            ValueKind::Width => {
                if let Some(token) = lenient_string(value) {
                    into.attributes
                        .insert(key, self.widths.token_to_canonical(&token));
                }
            }
            ValueKind::List => {
                let items: Vec<String> = match value {
                    Value::Array(items) => items.iter().filter_map(lenient_string).collect(),
                    other => lenient_string(other)
                        .map(|s| split_list(&s))
                        .unwrap_or_default(),
                };
                if !items.is_empty() {
                    into.attributes.insert(key, AttrValue::List(items));
                }
            }
            ValueKind::LevelNumber => {
                if let Some(level) = lenient_string(value).and_then(|s| level_from_number(&s)) {
                    into.attributes.insert(key, level);
                }
            }
            ValueKind::Style(property) => {
                if let Some(s) = lenient_string(value) {
                    into.styles.insert(property.to_string(), s);
                }
            }
            ValueKind::InlineCss => {
                if let Some(s) = value.as_str() {
                    into.styles.extend(parse_declarations(s));
                }
            }
            ValueKind::VcCss => {
                if let Some(s) = value.as_str() {
                    into.styles.extend(parse_vc_css(s));
                }
            }
            ValueKind::Spacing(property) => {
                if let Some(s) = value.as_str() {
                    into.styles.extend(parse_spacing(property, s));
                }
            }
            ValueKind::VcLink => {
                if let Some(s) = value.as_str() {
                    for (key, value) in parse_vc_link(s) {
                        into.attributes.insert(key, value);
                    }
                }
            }
            ValueKind::FontContainer => {
                if let Some(s) = value.as_str() {
                    for (key, value) in parse_font_container(s) {
                        into.attributes.insert(key, value);
                    }
                }
            }
            ValueKind::NewWindow => {
                if lenient_string(value).and_then(|s| parse_bool_token(&s)) == Some(true) {
                    into.attributes.insert(AttrKey::Target, "_blank");
                }
            }
            ValueKind::LinkObject => decode_link_object(value, into),
            ValueKind::ImageObject => {
                if let Some(url) = value.get("url").and_then(lenient_string) {
                    into.attributes.insert(AttrKey::ImageUrl, url);
                }
                if let Some(alt) = value.get("alt").and_then(lenient_string) {
                    into.attributes.insert(AttrKey::AltText, alt);
                }
            }
            ValueKind::SizeObject => {
                let decoded = match value {
                    Value::Object(object) => decode_size(&key, object),
                    other => self.decode_scalar(&key, other),
                };
                if let Some(decoded) = decoded {
                    into.attributes.insert(key, decoded);
                }
            }
            ValueKind::Dimensions(property) => {
                if let Value::Object(object) = value {
                    into.styles.extend(decode_dimensions(property, object));
                }
            }
            ValueKind::IconObject => {
                let icon = match value {
                    Value::Object(object) => object.get("value").and_then(lenient_string),
                    other => lenient_string(other),
                };
                if let Some(icon) = icon {
                    into.attributes.insert(key, icon);
                }
            }
            ValueKind::GalleryArray => {
                let urls: Vec<String> = value
                    .as_array()
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|item| match item {
                                Value::Object(image) => image.get("url").and_then(lenient_string),
                                other => lenient_string(other),
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                if !urls.is_empty() {
                    into.attributes.insert(key, AttrValue::List(urls));
                }
            }
        }
    }

    fn decode_scalar(&self, key: &AttrKey, value: &Value) -> Option<AttrValue> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() && !key.is_boolean() => None,
            Value::String(s) if key.is_boolean() => Some(self.decode_bool(s)),
            Value::String(s) => Some(AttrValue::Text(s.clone())),
            other => Some(AttrValue::from_json(other)),
        }
    }

    fn decode_bool(&self, token: &str) -> AttrValue {
        if token == self.bools.truthy {
            return AttrValue::Bool(true);
        }
        if token == self.bools.falsy {
            return AttrValue::Bool(false);
        }
        parse_bool_token(token)
            .map(AttrValue::Bool)
            .unwrap_or_else(|| AttrValue::Text(token.to_string()))
    }

    /// Encode the attributes and styles of `component` for `element`.
    ///
    /// `skip` names canonical keys the caller writes itself. `passthrough` re-emits
    /// [AttrKey::Other] keys, which only makes sense when the node came from this dialect.
    pub fn encode(
        &self,
        component: &Component,
        element: &str,
        skip: &[AttrKey],
        passthrough: bool,
        ids: &mut IdGenerator,
    ) -> NativeAttributes {
        let mut out = NativeAttributes::new();

        for (key, value) in &component.attributes {
            if skip.contains(key) {
                continue;
            }
            if let AttrKey::Other(name) = key {
                if passthrough {
                    out.entry(name.clone()).or_insert_with(|| value.to_json());
                }
                continue;
            }
            let Some(rule) = self.vocabulary.rule_for_key(element, key) else {
                tracing::trace!(dialect = self.dialect, element, key = %key, "no native slot; dropped");
                continue;
            };
            if out.contains_key(rule.native) {
                continue;
            }
            if let Some(encoded) = self.encode_rule(rule, component, value) {
                out.insert(rule.native.to_string(), encoded);
            }
        }

        let mut groups: IndexMap<&'static str, (&AttrRule, Vec<(&str, &str)>)> = IndexMap::new();
        for (property, value) in &component.styles {
            match self.vocabulary.rule_for_style(element, property) {
                Some(rule) => groups
                    .entry(rule.native)
                    .or_insert_with(|| (rule, Vec::new()))
                    .1
                    .push((property.as_str(), value.as_str())),
                None => {
                    tracing::trace!(dialect = self.dialect, element, property = %property, "no native style slot; dropped")
                }
            }
        }
        for (native, (rule, declarations)) in groups {
            if out.contains_key(native) {
                continue;
            }
            if let Some(encoded) = encode_styles(rule.kind, &declarations, ids) {
                out.insert(native.to_string(), encoded);
            }
        }
        out
    }

    fn encode_rule(&self, rule: &AttrRule, component: &Component, value: &AttrValue) -> Option<Value> {
        let attrs = &component.attributes;
        match rule.kind {
            ValueKind::Text => Some(match value {
                AttrValue::Bool(b) => Value::String(self.bools.encode(*b).to_string()),
                other => other.to_json(),
            }),
            ValueKind::Bool => value
                .as_bool()
                .map(|b| Value::String(self.bools.encode(b).to_string())),
            ValueKind::Number => Some(
                value
                    .as_number()
                    .map(|n| AttrValue::Number(n).to_json())
                    .unwrap_or_else(|| value.to_json()),
            ),
            ValueKind::Width => Some(Value::String(
                self.widths
                    .canonical_to_token(&value.to_plain_string())
                    .to_string(),
            )),
            ValueKind::List => Some(Value::String(value.to_plain_string())),
            ValueKind::LevelNumber => {
                let level = value.to_plain_string();
                Some(Value::String(
                    level.strip_prefix('h').unwrap_or(&level).to_string(),
                ))
            }
            ValueKind::VcLink => {
                let mut parts = Vec::new();
                if let Some(url) = attrs.get(&AttrKey::Url) {
                    parts.push(format!("url:{}", encode_component(&url.to_plain_string())));
                }
                if let Some(target) = attrs.get(&AttrKey::Target) {
                    parts.push(format!("target:{}", encode_component(&target.to_plain_string())));
                }
                if let Some(rel) = attrs.get(&AttrKey::Rel) {
                    parts.push(format!("rel:{}", encode_component(&rel.to_plain_string())));
                }
                (!parts.is_empty()).then(|| Value::String(parts.join("|")))
            }
            ValueKind::FontContainer => {
                let mut parts = Vec::new();
                if let Some(level) = attrs.get(&AttrKey::Level) {
                    parts.push(format!("tag:{}", level.to_plain_string()));
                }
                if let Some(align) = attrs.get(&AttrKey::Alignment) {
                    parts.push(format!("text_align:{}", encode_component(&align.to_plain_string())));
                }
                if let Some(color) = attrs.get(&AttrKey::TextColor) {
                    parts.push(format!("color:{}", encode_component(&color.to_plain_string())));
                }
                (!parts.is_empty()).then(|| Value::String(parts.join("|")))
            }
            ValueKind::NewWindow => attrs
                .get_str(&AttrKey::Target)
                .map(|target| Value::String(self.bools.encode(target == "_blank").to_string())),
            ValueKind::LinkObject => {
                let url = attrs.get(&AttrKey::Url)?.to_plain_string();
                let external = attrs.get_str(&AttrKey::Target) == Some("_blank");
                let nofollow = attrs
                    .get_str(&AttrKey::Rel)
                    .is_some_and(|rel| rel.contains("nofollow"));
                Some(json!({
                    "url": url,
                    "is_external": if external { "on" } else { "" },
                    "nofollow": if nofollow { "on" } else { "" },
                }))
            }
            ValueKind::ImageObject => {
                let url = attrs.get(&AttrKey::ImageUrl)?.to_plain_string();
                let alt = attrs.get(&AttrKey::AltText).map(AttrValue::to_plain_string);
                Some(json!({
                    "url": url,
                    "id": "",
                    "alt": alt.unwrap_or_default(),
                }))
            }
            ValueKind::SizeObject => Some(encode_size(&rule.key, value)),
            ValueKind::IconObject => Some(json!({
                "value": value.to_plain_string(),
                "library": "fa-solid",
            })),
            ValueKind::GalleryArray => {
                let urls = value
                    .as_list()
                    .map(<[String]>::to_vec)
                    .unwrap_or_else(|| split_list(&value.to_plain_string()));
                Some(Value::Array(
                    urls.into_iter()
                        .map(|url| json!({"id": "", "url": url}))
                        .collect(),
                ))
            }
            ValueKind::Style(_)
            | ValueKind::InlineCss
            | ValueKind::VcCss
            | ValueKind::Spacing(_)
            | ValueKind::Dimensions(_) => None,
        }
    }
}

/// Flatten an encoded value to the string a bracket attribute carries.
pub fn to_native_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn encode_styles(
    kind: ValueKind,
    declarations: &[(&str, &str)],
    ids: &mut IdGenerator,
) -> Option<Value> {
    let encoded = match kind {
        ValueKind::Style(_) => declarations.first()?.1.to_string(),
        ValueKind::InlineCss => declarations
            .iter()
            .map(|(p, v)| format!("{}:{}", p, v))
            .collect::<Vec<_>>()
            .join(";"),
        ValueKind::VcCss => {
            let body: String = declarations
                .iter()
                .map(|(p, v)| format!("{}: {} !important;", p, v))
                .collect();
            format!(".{}{{{}}}", ids.css_class(), body)
        }
        ValueKind::Spacing(property) => {
            let sides = box_sides(property, declarations);
            if sides.iter().all(Option::is_none) {
                return None;
            }
            sides
                .iter()
                .map(|side| side.unwrap_or_default())
                .collect::<Vec<_>>()
                .join("|")
        }
        ValueKind::Dimensions(property) => {
            let sides = box_sides(property, declarations);
            let mut object = Map::new();
            let mut unit = None;
            for (name, side) in SIDES.iter().zip(sides) {
                let (number, side_unit) = side.map(split_length).unwrap_or_default();
                if unit.is_none() && !side_unit.is_empty() {
                    unit = Some(side_unit);
                }
                object.insert(name.to_string(), Value::String(number));
            }
            object.insert(
                "unit".to_string(),
                Value::String(unit.unwrap_or_else(|| "px".to_string())),
            );
            object.insert("isLinked".to_string(), Value::Bool(false));
            return Some(Value::Object(object));
        }
        _ => return None,
    };
    Some(Value::String(encoded))
}

/// Per-side values of a box property, with a shorthand filling every side.
fn box_sides<'d>(property: &str, declarations: &[(&str, &'d str)]) -> [Option<&'d str>; 4] {
    let mut sides = [None; 4];
    for (name, value) in declarations {
        if !is_box_property(property, name) {
            continue;
        }
        if *name == property {
            sides = [Some(*value); 4];
            continue;
        }
        if let Some(i) = SIDES.iter().position(|side| name.ends_with(side)) {
            sides[i] = Some(*value);
        }
    }
    sides
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URL_COMPONENT).to_string()
}

fn decode_component(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

fn decode_link_object(value: &Value, into: &mut Component) {
    let Value::Object(link) = value else {
        if let Some(url) = lenient_string(value) {
            into.attributes.insert(AttrKey::Url, url);
        }
        return;
    };
    if let Some(url) = link.get("url").and_then(lenient_string) {
        into.attributes.insert(AttrKey::Url, url);
    }
    let flag = |name: &str| {
        link.get(name).is_some_and(|v| match v {
            Value::Bool(b) => *b,
            other => lenient_string(other).is_some_and(|s| parse_bool_token(&s) == Some(true)),
        })
    };
    if flag("is_external") {
        into.attributes.insert(AttrKey::Target, "_blank");
    }
    if flag("nofollow") {
        into.attributes.insert(AttrKey::Rel, "nofollow");
    }
}

fn is_numeric_key(key: &AttrKey) -> bool {
    matches!(
        key,
        AttrKey::Number | AttrKey::Percent | AttrKey::Zoom | AttrKey::Columns
    )
}

fn decode_size(key: &AttrKey, object: &Map<String, Value>) -> Option<AttrValue> {
    let size = object.get("size")?;
    let number = lenient_f64(size)?;
    if is_numeric_key(key) {
        return Some(AttrValue::Number(number));
    }
    let unit = object.get("unit").and_then(Value::as_str).unwrap_or("px");
    Some(AttrValue::Text(format!("{}{}", format_number(number), unit)))
}

fn encode_size(key: &AttrKey, value: &AttrValue) -> Value {
    let default_unit = if *key == AttrKey::Percent { "%" } else { "px" };
    let (size, unit) = match value {
        AttrValue::Number(n) => (AttrValue::Number(*n).to_json(), default_unit.to_string()),
        other => {
            let (number, unit) = split_length(&other.to_plain_string());
            let size = number
                .parse::<f64>()
                .map(|n| AttrValue::Number(n).to_json())
                .unwrap_or(Value::String(number));
            let unit = if unit.is_empty() { default_unit.to_string() } else { unit };
            (size, unit)
        }
    };
    json!({"unit": unit, "size": size})
}

fn decode_dimensions(property: &str, object: &Map<String, Value>) -> Vec<(String, String)> {
    let unit = object.get("unit").and_then(Value::as_str).unwrap_or("px");
    SIDES
        .iter()
        .filter_map(|side| {
            let value = object.get(*side).and_then(lenient_string)?;
            let value = if CSS_LENGTH.is_match(&value) && split_length(&value).1.is_empty() {
                format!("{}{}", value, unit)
            } else {
                value
            };
            Some((format!("{}-{}", property, side), value))
        })
        .collect()
}

/// "10px" into ("10", "px"); values that are not lengths come back whole.
pub fn split_length(value: &str) -> (String, String) {
    match CSS_LENGTH.captures(value) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (value.trim().to_string(), String::new()),
    }
}

/// "h2" for "2"; existing "h2" passes through.
fn level_from_number(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let digits = raw.strip_prefix('h').unwrap_or(raw);
    match digits.parse::<u8>() {
        Ok(n) if (1..=6).contains(&n) => Some(format!("h{}", n)),
        _ => None,
    }
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// `color: red; margin-top: 10px` into property/value pairs.
pub fn parse_declarations(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            (!property.is_empty() && !value.is_empty())
                .then(|| (property, value.to_string()))
        })
        .collect()
}

/// `.vc_custom_1596{margin-top: 10px !important;}` into declarations.
pub fn parse_vc_css(css: &str) -> Vec<(String, String)> {
    match VC_CSS.captures(css) {
        Some(caps) => parse_declarations(&caps[2]),
        None => parse_declarations(css),
    }
}

/// Divi `10px|0|10px|0|false|false` into per-side declarations.
pub fn parse_spacing(property: &str, raw: &str) -> Vec<(String, String)> {
    raw.split('|')
        .zip(SIDES)
        .filter(|(value, _)| !value.trim().is_empty())
        .map(|(value, side)| (format!("{}-{}", property, side), value.trim().to_string()))
        .collect()
}

/// WPBakery `url:http%3A%2F%2Fx|target:_blank|rel:nofollow`.
pub fn parse_vc_link(raw: &str) -> Vec<(AttrKey, AttrValue)> {
    compound_pairs(raw)
        .filter_map(|(name, value)| {
            let key = match name {
                "url" => AttrKey::Url,
                "target" => AttrKey::Target,
                "rel" => AttrKey::Rel,
                _ => return None,
            };
            let value = decode_component(value);
            let value = value.trim();
            (!value.is_empty()).then(|| (key, AttrValue::text(value)))
        })
        .collect()
}

/// WPBakery `tag:h2|text_align:left|color:%23333333`.
pub fn parse_font_container(raw: &str) -> Vec<(AttrKey, AttrValue)> {
    compound_pairs(raw)
        .filter_map(|(name, value)| {
            let value = decode_component(value);
            match name {
                "tag" => level_from_number(&value).map(|level| (AttrKey::Level, AttrValue::text(level))),
                "text_align" if !value.is_empty() => Some((AttrKey::Alignment, AttrValue::text(value))),
                "color" if !value.is_empty() => Some((AttrKey::TextColor, AttrValue::text(value))),
                _ => None,
            }
        })
        .collect()
}

fn compound_pairs(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.split('|')
        .filter_map(|pair| pair.split_once(':'))
        .map(|(name, value)| (name.trim(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ids::IdStyle;
    use crate::common::rules::{ElementSpec, STYLE_KEY};
    use layout_model::ComponentType;
    use rstest::rstest;

    static WIDTHS: WidthTable = WidthTable::new(&[(100.0, "1/1"), (50.0, "1/2")]);

    static ATTRIBUTES: &[AttrRule] = &[
        AttrRule::scoped("button", "link", AttrKey::Url, ValueKind::VcLink),
        AttrRule::scoped("widget", "link", AttrKey::Url, ValueKind::LinkObject),
        AttrRule::scoped("widget", "image", AttrKey::ImageUrl, ValueKind::ImageObject),
        AttrRule::global("url_new_window", AttrKey::Target, ValueKind::NewWindow),
        AttrRule::global("url", AttrKey::Url, ValueKind::Text),
        AttrRule::global("open", AttrKey::Open, ValueKind::Bool),
        AttrRule::global("width", AttrKey::Width, ValueKind::Width),
        AttrRule::global("size", AttrKey::Level, ValueKind::LevelNumber),
        AttrRule::style("custom_margin", ValueKind::Spacing("margin")),
        AttrRule::style("css", ValueKind::VcCss),
    ];

    static ELEMENTS: &[ElementSpec] = &[ElementSpec::new("text", ComponentType::Text)];

    const VOCAB: Vocabulary = Vocabulary {
        elements: ELEMENTS,
        attributes: ATTRIBUTES,
    };

    fn codec() -> Codec<'static> {
        Codec {
            dialect: "test",
            vocabulary: &VOCAB,
            bools: BoolStyle::ON_OFF,
            widths: &WIDTHS,
        }
    }

    fn decoded(element: &str, pairs: &[(&str, &str)]) -> Component {
        let mut component = Component::new(ComponentType::Text);
        for (key, value) in pairs {
            codec().decode(element, key, &Value::String(value.to_string()), &mut component);
        }
        component
    }

    #[test]
    fn test_decode_simple_and_passthrough() {
        let c = decoded(
            "text",
            &[("url", "https://x.test"), ("open", "on"), ("width", "1/2"), ("admin_label", "Hero")],
        );
        assert_eq!(c.attributes.get_str(&AttrKey::Url), Some("https://x.test"));
        assert_eq!(c.attributes.get_bool(&AttrKey::Open), Some(true));
        assert_eq!(c.attributes.get_str(&AttrKey::Width), Some("50%"));
        assert_eq!(
            c.attributes.get_str(&AttrKey::Other("admin_label".into())),
            Some("Hero")
        );
    }

    #[test]
    fn test_new_window_flag() {
        let c = decoded("text", &[("url_new_window", "on")]);
        assert_eq!(c.attributes.get_str(&AttrKey::Target), Some("_blank"));
        let c = decoded("text", &[("url_new_window", "off")]);
        assert!(!c.attributes.contains(&AttrKey::Target));
    }

    #[test]
    fn test_vc_link_round_trip() {
        let c = decoded(
            "button",
            &[("link", "url:https%3A%2F%2Fexample.com%2Fa%3Fb%3D1|title:Go|target:_blank|rel:nofollow")],
        );
        assert_eq!(
            c.attributes.get_str(&AttrKey::Url),
            Some("https://example.com/a?b=1")
        );
        assert_eq!(c.attributes.get_str(&AttrKey::Target), Some("_blank"));
        assert_eq!(c.attributes.get_str(&AttrKey::Rel), Some("nofollow"));

        let out = codec().encode(&c, "button", &[], false, &mut IdGenerator::new(IdStyle::Timestamp));
        assert_eq!(
            out.get("link").and_then(Value::as_str),
            Some("url:https%3A%2F%2Fexample.com%2Fa%3Fb%3D1|target:_blank|rel:nofollow")
        );
        // Target is carried inside the link string, not as a separate flag
        assert!(!out.contains_key("url_new_window"));
    }

    #[test]
    fn test_encode_bool_and_width() {
        let c = Component::new(ComponentType::Text)
            .with_attr(AttrKey::Open, false)
            .with_attr(AttrKey::Width, "33.33%")
            .with_attr(AttrKey::Other("admin_label".into()), "Hero");
        let mut ids = IdGenerator::new(IdStyle::Timestamp);
        let out = codec().encode(&c, "text", &[], false, &mut ids);
        assert_eq!(out.get("open"), Some(&Value::String("off".into())));
        assert_eq!(out.get("width"), Some(&Value::String("1/2".into())));
        assert!(!out.contains_key("admin_label"));

        let out = codec().encode(&c, "text", &[], true, &mut ids);
        assert_eq!(out.get("admin_label"), Some(&Value::String("Hero".into())));
    }

    #[test]
    fn test_level_number() {
        let c = decoded("text", &[("size", "3")]);
        assert_eq!(c.attributes.get_str(&AttrKey::Level), Some("h3"));
        let c = decoded("text", &[("size", "9")]);
        assert!(!c.attributes.contains(&AttrKey::Level));
    }

    #[test]
    fn test_spacing_styles() {
        let c = decoded("text", &[("custom_margin", "10px||20px||false|false")]);
        assert_eq!(c.styles.get("margin-top").map(String::as_str), Some("10px"));
        assert_eq!(c.styles.get("margin-bottom").map(String::as_str), Some("20px"));
        assert!(!c.styles.contains_key("margin-right"));

        let out = codec().encode(&c, "text", &[], false, &mut IdGenerator::new(IdStyle::Timestamp));
        assert_eq!(
            out.get("custom_margin").and_then(Value::as_str),
            Some("10px||20px|")
        );
    }

    #[test]
    fn test_vc_css_collects_remaining_styles() {
        let c = decoded(
            "text",
            &[("css", ".vc_custom_1596548123{padding-top: 20px !important;background-color: #fff !important;}")],
        );
        assert_eq!(c.styles.get("padding-top").map(String::as_str), Some("20px"));
        assert_eq!(
            c.styles.get("background-color").map(String::as_str),
            Some("#fff")
        );

        let mut ids = IdGenerator::new(IdStyle::Timestamp);
        let out = codec().encode(&c, "text", &[], false, &mut ids);
        let css = out.get("css").and_then(Value::as_str).unwrap();
        assert!(css.starts_with(".vc_custom_"));
        assert_eq!(
            parse_vc_css(css),
            vec![
                ("padding-top".to_string(), "20px".to_string()),
                ("background-color".to_string(), "#fff".to_string()),
            ]
        );
    }

    #[test]
    fn test_style_key_is_placeholder() {
        assert!(STYLE_KEY.is_other());
    }

    #[rstest]
    #[case("10px", ("10", "px"))]
    #[case("1.5em", ("1.5", "em"))]
    #[case("50%", ("50", "%"))]
    #[case("12", ("12", ""))]
    #[case("auto", ("auto", ""))]
    fn test_split_length(#[case] raw: &str, #[case] expected: (&str, &str)) {
        let (number, unit) = split_length(raw);
        assert_eq!((number.as_str(), unit.as_str()), expected);
    }

    #[test]
    fn test_link_and_size_objects() {
        let mut c = Component::new(ComponentType::Button);
        let link = json!({"url": "https://x.test", "is_external": "on", "nofollow": ""});
        decode_link_object(&link, &mut c);
        assert_eq!(c.attributes.get_str(&AttrKey::Target), Some("_blank"));
        assert!(!c.attributes.contains(&AttrKey::Rel));

        let size = json!({"unit": "px", "size": 40});
        assert_eq!(
            decode_size(&AttrKey::Height, size.as_object().unwrap()),
            Some(AttrValue::Text("40px".into()))
        );
        assert_eq!(
            decode_size(&AttrKey::Percent, size.as_object().unwrap()),
            Some(AttrValue::Number(40.0))
        );
        assert_eq!(
            encode_size(&AttrKey::Percent, &AttrValue::Number(75.0)),
            json!({"unit": "%", "size": 75})
        );
        assert_eq!(
            encode_size(&AttrKey::Height, &AttrValue::text("40px")),
            json!({"unit": "px", "size": 40})
        );
    }

    #[test]
    fn test_link_and_image_objects_need_a_url() {
        let mut ids = IdGenerator::new(IdStyle::Timestamp);
        let loose = Component::new(ComponentType::Button)
            .with_attr(AttrKey::Target, "_blank")
            .with_attr(AttrKey::Rel, "nofollow")
            .with_attr(AttrKey::AltText, "Logo");
        let out = codec().encode(&loose, "widget", &[], false, &mut ids);
        assert!(!out.contains_key("link"), "{:?}", out);
        assert!(!out.contains_key("image"), "{:?}", out);

        let linked = loose
            .with_attr(AttrKey::Url, "https://x.test")
            .with_attr(AttrKey::ImageUrl, "https://x.test/a.png");
        let out = codec().encode(&linked, "widget", &[], false, &mut ids);
        assert_eq!(
            out.get("link"),
            Some(&json!({"url": "https://x.test", "is_external": "on", "nofollow": "on"}))
        );
        assert_eq!(
            out.get("image"),
            Some(&json!({"url": "https://x.test/a.png", "id": "", "alt": "Logo"}))
        );
    }

    #[test]
    fn test_font_container() {
        let pairs = parse_font_container("tag:h2|text_align:center|color:%23333333");
        assert_eq!(
            pairs,
            vec![
                (AttrKey::Level, AttrValue::text("h2")),
                (AttrKey::Alignment, AttrValue::text("center")),
                (AttrKey::TextColor, AttrValue::text("#333333")),
            ]
        );
    }

    #[test]
    fn test_to_native_string() {
        assert_eq!(to_native_string(&json!(5)), "5");
        assert_eq!(to_native_string(&json!(2.5)), "2.5");
        assert_eq!(to_native_string(&json!("x")), "x");
        assert_eq!(to_native_string(&Value::Null), "");
    }
}
