//! Attribute lexing for bracket tags
//!
//! The text between a tag's name and its closing bracket is lexed with logos into four
//! tokens: `=`, double-quoted strings, single-quoted strings, and bare runs. Pairing them
//! into key/value attributes happens in [parse_attributes].

use indexmap::IndexMap;
use logos::Logos;
use std::ops::Range;

/// Tokens found inside a bracket tag's attribute list
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum AttrToken {
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    #[regex(r"'[^']*'")]
    SingleQuoted,

    // Anything else up to whitespace, a double quote or an equals sign. A single quote
    // only opens a quoted value at the start of a run, so `alt=it's` stays one value.
    #[regex(r#"[^ \t\r\n\f"'=][^ \t\r\n\f"=]*"#)]
    Bare,
}

type Spanned = (Result<AttrToken, ()>, Range<usize>);

/// Result of lexing one attribute list
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ParsedAttributes {
    pub attributes: IndexMap<String, String>,
    /// Human-readable notes about input that had to be guessed at
    pub problems: Vec<String>,
}

/// Parse `key="value" key='value' key=value positional` into an ordered map.
///
/// Keyless values are stored under their position ("0", "1", ...). Bare values may contain
/// `=` (as in query strings) as long as there is no whitespace in between.
pub fn parse_attributes(source: &str) -> ParsedAttributes {
    let tokens: Vec<Spanned> = AttrToken::lexer(source).spanned().collect();
    let mut parsed = ParsedAttributes::default();
    let mut positional = 0usize;
    let mut i = 0;

    while i < tokens.len() {
        let (token, span) = &tokens[i];
        match token {
            Ok(AttrToken::Bare) if matches!(tokens.get(i + 1), Some((Ok(AttrToken::Equals), _))) => {
                let key = source[span.clone()].to_string();
                let eq_end = tokens[i + 1].1.end;
                i += 2;
                let value = match tokens.get(i) {
                    Some((Ok(AttrToken::DoubleQuoted | AttrToken::SingleQuoted), value_span)) => {
                        i += 1;
                        strip_quotes(&source[value_span.clone()]).to_string()
                    }
                    Some((Ok(AttrToken::Bare), value_span)) if value_span.start == eq_end => {
                        let start = value_span.start;
                        let mut end = value_span.end;
                        i += 1;
                        // Glue `a=b=c` runs back together
                        while let Some((Ok(AttrToken::Bare | AttrToken::Equals), next)) =
                            tokens.get(i)
                        {
                            if next.start != end {
                                break;
                            }
                            end = next.end;
                            i += 1;
                        }
                        source[start..end].to_string()
                    }
                    Some((Err(()), value_span)) => {
                        // An opening quote that never closes: take the rest verbatim
                        parsed
                            .problems
                            .push(format!("unterminated quote in value of '{}'", key));
                        let rest = &source[value_span.start..];
                        i = tokens.len();
                        rest.trim_start_matches(['"', '\'']).trim_end().to_string()
                    }
                    _ => String::new(),
                };
                parsed.attributes.insert(key, value);
            }
            Ok(AttrToken::Bare) => {
                parsed
                    .attributes
                    .insert(positional.to_string(), source[span.clone()].to_string());
                positional += 1;
                i += 1;
            }
            Ok(AttrToken::DoubleQuoted | AttrToken::SingleQuoted) => {
                parsed.attributes.insert(
                    positional.to_string(),
                    strip_quotes(&source[span.clone()]).to_string(),
                );
                positional += 1;
                i += 1;
            }
            Ok(AttrToken::Equals) => {
                parsed.problems.push("'=' without a key".to_string());
                i += 1;
            }
            Err(()) => {
                parsed.problems.push(format!(
                    "unreadable attribute text '{}'",
                    &source[span.clone()]
                ));
                i += 1;
            }
        }
    }

    parsed
}

fn strip_quotes(quoted: &str) -> &str {
    &quoted[1..quoted.len() - 1]
}

/// True when every key is positional (as produced by [parse_attributes]).
pub fn is_positional_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}
