//! JSON tree helpers
//!
//!     JSON-tree dialects describe a page as nested objects with a children array. Before a
//!     parser trusts such a document it checks the shape recursively: every node must be an
//!     object, carry its required keys with the right kinds, and have a well-formed children
//!     array. A [TreeShape] declares those rules; [validate_nodes] applies them. Trees
//!     nested deeper than [MAX_DEPTH] are rejected, so the readers that walk a validated
//!     tree recursively stay bounded.
//!
//!     The remaining helpers read values leniently, since builders are loose about whether a
//!     number is stored as `50` or `"50"`.

use crate::component::MAX_DEPTH;
use crate::error::{JsonError, ShapeError};
use serde_json::{Map, Value};

/// Expected kind of a key's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    String,
    Number,
    /// String or number
    Scalar,
    Array,
    Object,
    Any,
}

impl KeyKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            KeyKind::String => value.is_string(),
            KeyKind::Number => value.is_number(),
            KeyKind::Scalar => value.is_string() || value.is_number(),
            KeyKind::Array => value.is_array(),
            KeyKind::Object => value.is_object(),
            KeyKind::Any => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            KeyKind::String => "a string",
            KeyKind::Number => "a number",
            KeyKind::Scalar => "a string or number",
            KeyKind::Array => "an array",
            KeyKind::Object => "an object",
            KeyKind::Any => "any value",
        }
    }
}

/// One key rule of a node shape
#[derive(Debug, Clone, Copy)]
pub struct KeyRule {
    pub key: &'static str,
    pub kind: KeyKind,
    pub required: bool,
}

impl KeyRule {
    pub const fn required(key: &'static str, kind: KeyKind) -> Self {
        Self {
            key,
            kind,
            required: true,
        }
    }

    pub const fn optional(key: &'static str, kind: KeyKind) -> Self {
        Self {
            key,
            kind,
            required: false,
        }
    }
}

/// Extra per-node check, for rules that depend on other keys.
pub type NodeCheck = fn(&Map<String, Value>) -> Result<(), String>;

/// Shape every node of a JSON tree must have
#[derive(Debug, Clone, Copy)]
pub struct TreeShape {
    pub keys: &'static [KeyRule],
    /// Key holding the children array
    pub children: &'static str,
    pub check: Option<NodeCheck>,
}

/// Validate a list of nodes and, recursively, their children.
pub fn validate_nodes(nodes: &[Value], shape: &TreeShape, path: &str) -> Result<(), ShapeError> {
    check_nodes(nodes, shape, path, 1)
}

/// Validate one node and its subtree.
pub fn validate_node(node: &Value, shape: &TreeShape, path: &str) -> Result<(), ShapeError> {
    check_node(node, shape, path, 1)
}

fn check_nodes(nodes: &[Value], shape: &TreeShape, path: &str, depth: usize) -> Result<(), ShapeError> {
    nodes
        .iter()
        .enumerate()
        .try_for_each(|(i, node)| check_node(node, shape, &format!("{}[{}]", path, i), depth))
}

fn check_node(node: &Value, shape: &TreeShape, path: &str, depth: usize) -> Result<(), ShapeError> {
    if depth > MAX_DEPTH {
        return Err(ShapeError::TooDeep {
            path: path.to_string(),
            limit: MAX_DEPTH,
        });
    }
    let object = node.as_object().ok_or_else(|| ShapeError::NotAnObject {
        path: path.to_string(),
    })?;

    for rule in shape.keys {
        match object.get(rule.key) {
            Some(value) if !rule.kind.accepts(value) => {
                return Err(ShapeError::WrongKind {
                    path: path.to_string(),
                    key: rule.key.to_string(),
                    expected: rule.kind.describe(),
                })
            }
            None if rule.required => {
                return Err(ShapeError::MissingKey {
                    path: path.to_string(),
                    key: rule.key.to_string(),
                })
            }
            _ => {}
        }
    }

    if let Some(check) = shape.check {
        check(object).map_err(|message| ShapeError::Invalid {
            path: path.to_string(),
            message,
        })?;
    }

    match object.get(shape.children) {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(children)) => {
            check_nodes(children, shape, &format!("{}.{}", path, shape.children), depth + 1)
        }
        Some(_) => Err(ShapeError::WrongKind {
            path: path.to_string(),
            key: shape.children.to_string(),
            expected: KeyKind::Array.describe(),
        }),
    }
}

/// Parse JSON text.
pub fn read_json(text: &str) -> Result<Value, JsonError> {
    Ok(serde_json::from_str(text)?)
}

/// A number stored either as a JSON number or a numeric string.
pub fn lenient_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        _ => None,
    }
}

/// A string, or a number rendered as one. Empty strings count as absent.
pub fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
