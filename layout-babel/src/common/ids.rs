//! Native id generation
//!
//!     Converters never reuse ids from the source tree. Each conversion owns one
//!     [IdGenerator] and draws fresh ids from it in the style the target dialect uses; ids
//!     are unique within one conversion.

use std::collections::HashSet;
use uuid::Uuid;

/// Shape of a dialect's element ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStyle {
    /// `prefix-1`, `prefix-2`, ...
    Sequential(&'static str),
    /// Random lowercase hex of the given length (Elementor uses 7)
    Hex(usize),
    /// Hyphenated v4 UUID
    Uuid,
    /// Millisecond timestamp plus a counter (WPBakery tab ids)
    Timestamp,
}

#[derive(Debug)]
pub struct IdGenerator {
    style: IdStyle,
    counter: u64,
    epoch_millis: i64,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new(style: IdStyle) -> Self {
        Self {
            style,
            counter: 0,
            epoch_millis: chrono::Utc::now().timestamp_millis(),
            issued: HashSet::new(),
        }
    }

    pub fn next_id(&mut self) -> String {
        loop {
            let candidate = self.candidate();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Next value of the per-conversion counter.
    pub fn next_number(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    /// A `vc_custom_...` class name for WPBakery design options.
    pub fn css_class(&mut self) -> String {
        let n = self.next_number();
        format!("vc_custom_{}{}", self.epoch_millis, n)
    }

    fn candidate(&mut self) -> String {
        let n = self.next_number();
        match self.style {
            IdStyle::Sequential(prefix) => format!("{}-{}", prefix, n),
            IdStyle::Hex(len) => {
                let hex = Uuid::new_v4().simple().to_string();
                hex[..len.clamp(1, hex.len())].to_string()
            }
            IdStyle::Uuid => Uuid::new_v4().to_string(),
            IdStyle::Timestamp => {
                let hex = Uuid::new_v4().simple().to_string();
                format!("{}-{}-{}", self.epoch_millis, n, &hex[..4])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_sequential() {
        let mut ids = IdGenerator::new(IdStyle::Sequential("node"));
        assert_eq!(ids.next_id(), "node-1");
        assert_eq!(ids.next_id(), "node-2");
    }

    #[rstest]
    #[case(IdStyle::Hex(7))]
    #[case(IdStyle::Uuid)]
    #[case(IdStyle::Timestamp)]
    fn test_unique_within_generator(#[case] style: IdStyle) {
        let mut ids = IdGenerator::new(style);
        let drawn: HashSet<String> = (0..500).map(|_| ids.next_id()).collect();
        assert_eq!(drawn.len(), 500);
    }

    #[test]
    fn test_hex_shape() {
        let mut ids = IdGenerator::new(IdStyle::Hex(7));
        let id = ids.next_id();
        assert_eq!(id.len(), 7);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_css_class_shape() {
        let mut ids = IdGenerator::new(IdStyle::Uuid);
        let first = ids.css_class();
        assert!(first.starts_with("vc_custom_"));
        assert_ne!(first, ids.css_class());
    }
}
