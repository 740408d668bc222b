//! Hierarchical tag tokenizer
//!
//!     Every bracket-tag dialect is read through this one scanner. It turns text like
//!
//!         [row][column width="1/2"]Hello[/column][/row]
//!
//!     into a forest of [TagNode]s: name, ordered attributes, the literal text found directly
//!     inside the tag, and nested tags.
//!
//! Algorithm
//!
//!     The scan runs left to right with a stack of open frames.
//!
//!     - `[name attrs]` pushes a frame, unless the name is in the caller's self-closing list
//!       or the tag ends with ` /]`, in which case the node is attached immediately.
//!     - `[/name]` pops the top frame when the names match. A closer that does not match is
//!       kept as literal text of the current frame and reported as a warning, so a damaged
//!       document still translates.
//!     - Text between tags is appended to the top frame's raw content. At the top level,
//!       non-blank text becomes a [TEXT_NODE] pseudo-node to keep document order.
//!     - Frames still open at the end of input are closed there and reported.
//!     - At most [MAX_DEPTH] frames are open at once. A tag that would go deeper is kept as
//!       literal text (its closer too) and reported.
//!
//!     Matching is done on the stack, never with a regex over the whole input, so tags of
//!     the same name nest correctly: `[a][a]x[/a][/a]` is an `a` inside an `a`.
//!
//!     Attribute lists are lexed in [lexer]; the inverse (writing tags back out) lives in
//!     [writer].

pub mod lexer;
pub mod writer;

use crate::component::MAX_DEPTH;
use indexmap::IndexMap;
use lexer::parse_attributes;

/// Name given to top-level text pseudo-nodes.
pub const TEXT_NODE: &str = "#text";

/// One bracket tag and everything nested in it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TagNode {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    /// Literal text found directly inside this tag (children excluded)
    pub raw_content: String,
    pub children: Vec<TagNode>,
    /// Written as a void tag (allow-listed or `[name /]`)
    pub self_closing: bool,
    /// False when the closing tag was missing and the tokenizer closed it
    pub closed: bool,
    /// Byte offset of the opening bracket
    pub offset: usize,
}

impl TagNode {
    fn text(content: &str, offset: usize) -> Self {
        TagNode {
            name: TEXT_NODE.to_string(),
            raw_content: content.to_string(),
            closed: true,
            offset,
            ..TagNode::default()
        }
    }

    pub fn is_text(&self) -> bool {
        self.name == TEXT_NODE
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Raw content with surrounding whitespace removed.
    pub fn content(&self) -> &str {
        self.raw_content.trim()
    }
}

/// Per-dialect scanning options
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizerOptions<'a> {
    /// Tags that never take a closing tag
    pub self_closing: &'a [&'a str],
}

impl<'a> TokenizerOptions<'a> {
    pub fn with_self_closing(self_closing: &'a [&'a str]) -> Self {
        Self { self_closing }
    }

    fn is_void(&self, name: &str) -> bool {
        self.self_closing.contains(&name)
    }
}

/// Recoverable problems found while scanning
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TokenizerWarning {
    #[error("closing tag [/{name}] at byte {offset} does not match the open tag {expected:?}; kept as text")]
    MismatchedCloser {
        name: String,
        expected: Option<String>,
        offset: usize,
    },

    #[error("tag [{name}] opened at byte {offset} was never closed; closed at end of input")]
    Unterminated { name: String, offset: usize },

    #[error("tag [{name}] at byte {offset} nests deeper than {} levels; kept as text", MAX_DEPTH)]
    TooDeep { name: String, offset: usize },

    #[error("tag [{name}] at byte {offset}: {detail}")]
    MalformedAttributes {
        name: String,
        offset: usize,
        detail: String,
    },
}

/// Output of [tokenize]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tokenized {
    pub nodes: Vec<TagNode>,
    pub warnings: Vec<TokenizerWarning>,
}

enum RawTag<'s> {
    Open {
        name: &'s str,
        attributes: &'s str,
        explicit_void: bool,
    },
    Close {
        name: &'s str,
    },
}

/// Tokenize bracket-tag markup into a forest of tags.
pub fn tokenize(text: &str, options: &TokenizerOptions<'_>) -> Tokenized {
    let mut scanner = Scanner {
        stack: Vec::new(),
        suppressed: Vec::new(),
        roots: Vec::new(),
        warnings: Vec::new(),
    };

    let mut pos = 0;
    let mut text_start = 0;
    while let Some(rel) = text[pos..].find('[') {
        let start = pos + rel;
        match scan_tag(text, start) {
            Some((tag, end)) => {
                scanner.push_text(&text[text_start..start], text_start);
                match tag {
                    RawTag::Open {
                        name,
                        attributes,
                        explicit_void,
                    } => scanner.open(
                        name,
                        attributes,
                        explicit_void,
                        &text[start..end],
                        start,
                        options,
                    ),
                    RawTag::Close { name } => scanner.close(name, &text[start..end], start),
                }
                pos = end;
                text_start = end;
            }
            None => pos = start + 1,
        }
    }
    scanner.push_text(&text[text_start..], text_start);
    scanner.finish()
}

struct Scanner {
    stack: Vec<TagNode>,
    /// Names of tags kept as text because the stack was full
    suppressed: Vec<String>,
    roots: Vec<TagNode>,
    warnings: Vec<TokenizerWarning>,
}

impl Scanner {
    fn push_text(&mut self, text: &str, offset: usize) {
        if text.is_empty() {
            return;
        }
        if let Some(top) = self.stack.last_mut() {
            top.raw_content.push_str(text);
            return;
        }
        if let Some(last) = self.roots.last_mut().filter(|n| n.is_text()) {
            last.raw_content.push_str(text);
        } else if !text.trim().is_empty() {
            self.roots.push(TagNode::text(text, offset));
        }
    }

    fn attach(&mut self, node: TagNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn open(
        &mut self,
        name: &str,
        attribute_source: &str,
        explicit_void: bool,
        literal: &str,
        offset: usize,
        options: &TokenizerOptions<'_>,
    ) {
        let void = explicit_void || options.is_void(name);
        if self.stack.len() >= MAX_DEPTH {
            tracing::debug!(tag = name, offset, "nesting limit reached; keeping tag as text");
            self.warnings.push(TokenizerWarning::TooDeep {
                name: name.to_string(),
                offset,
            });
            if !void {
                self.suppressed.push(name.to_string());
            }
            self.push_text(literal, offset);
            return;
        }
        let parsed = parse_attributes(attribute_source);
        for detail in parsed.problems {
            self.warnings.push(TokenizerWarning::MalformedAttributes {
                name: name.to_string(),
                offset,
                detail,
            });
        }
        let node = TagNode {
            name: name.to_string(),
            attributes: parsed.attributes,
            self_closing: void,
            closed: true,
            offset,
            ..TagNode::default()
        };
        if void {
            self.attach(node);
        } else {
            self.stack.push(node);
        }
    }

    fn close(&mut self, name: &str, literal: &str, offset: usize) {
        if self.suppressed.last().is_some_and(|open| open == name) {
            self.suppressed.pop();
            self.push_text(literal, offset);
            return;
        }
        if self.stack.last().is_some_and(|top| top.name == name) {
            if let Some(node) = self.stack.pop() {
                self.attach(node);
            }
            return;
        }
        // `[image /][/image]`: a closer for the void tag just emitted
        if self.last_attached_void_is(name) {
            return;
        }
        tracing::debug!(tag = name, offset, "closing tag does not match; keeping it as text");
        self.warnings.push(TokenizerWarning::MismatchedCloser {
            name: name.to_string(),
            expected: self.stack.last().map(|top| top.name.clone()),
            offset,
        });
        self.push_text(literal, offset);
    }

    fn last_attached_void_is(&self, name: &str) -> bool {
        let siblings = match self.stack.last() {
            Some(parent) => &parent.children,
            None => &self.roots,
        };
        siblings
            .last()
            .is_some_and(|node| node.self_closing && node.name == name)
    }

    fn finish(mut self) -> Tokenized {
        while let Some(mut node) = self.stack.pop() {
            tracing::debug!(tag = %node.name, offset = node.offset, "auto-closing unterminated tag");
            self.warnings.push(TokenizerWarning::Unterminated {
                name: node.name.clone(),
                offset: node.offset,
            });
            node.closed = false;
            self.attach(node);
        }
        Tokenized {
            nodes: self.roots,
            warnings: self.warnings,
        }
    }
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-')
}

/// Try to read a tag starting at the `[` at `start`. Returns the tag and the byte offset
/// just past its `]`, or `None` when the bracket is literal text.
fn scan_tag(text: &str, start: usize) -> Option<(RawTag<'_>, usize)> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    let name_start = i;
    if !bytes.get(i).copied().is_some_and(is_name_start) {
        return None;
    }
    while bytes.get(i).copied().is_some_and(is_name_byte) {
        i += 1;
    }
    let name = &text[name_start..i];

    if closing {
        while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
            i += 1;
        }
        return (bytes.get(i) == Some(&b']')).then(|| (RawTag::Close { name }, i + 1));
    }

    match bytes.get(i) {
        Some(b']') | Some(b'/') => {}
        Some(b) if b.is_ascii_whitespace() => {}
        _ => return None,
    }

    let body_start = i;
    let mut quote: Option<u8> = None;
    while let Some(&b) = bytes.get(i) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None => match b {
                b']' => break,
                b'[' => return None,
                b'"' | b'\'' if matches!(bytes[i - 1], b'=' | b' ' | b'\t' | b'\n' | b'\r') => {
                    quote = Some(b)
                }
                _ => {}
            },
        }
        i += 1;
    }
    if bytes.get(i) != Some(&b']') {
        return None;
    }

    let body = &text[body_start..i];
    let trimmed = body.trim_end();
    let explicit_void = trimmed.ends_with('/')
        && (trimmed.len() == 1 || trimmed[..trimmed.len() - 1].ends_with(char::is_whitespace));
    let attributes = if explicit_void {
        &trimmed[..trimmed.len() - 1]
    } else {
        body
    };
    Some((
        RawTag::Open {
            name,
            attributes,
            explicit_void,
        },
        i + 1,
    ))
}
