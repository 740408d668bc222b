//! Width and grid conversion
//!
//!     Page builders disagree on how a column states its share of a row: fractions ("1/2"),
//!     underscore fractions ("1_2"), integer column sizes (50) or percentages ("50%"). The
//!     canonical form is a percentage string truncated to two decimals, so 1/3 is "33.33%"
//!     and 2/3 is "66.66%".
//!
//!     Each dialect owns a [WidthTable] of the widths it can express natively. Going to a
//!     percentage is a table lookup with a generic parser as fallback; going back is a
//!     nearest match over the table, which guarantees a valid native token even when the two
//!     grids are not isomorphic (a 5/12 column going into a grid of sixths lands on 2/5).
//!
//!     Properties:
//!         - to_token(to_percentage(T)) == T for every token T in the table
//!         - ties between two entries go to the one listed first

/// A dialect's native widths, as (percentage, token) pairs.
#[derive(Debug, Clone, Copy)]
pub struct WidthTable {
    entries: &'static [(f64, &'static str)],
}

impl WidthTable {
    /// Tables are static; an empty one is rejected at compile time.
    pub const fn new(entries: &'static [(f64, &'static str)]) -> Self {
        assert!(!entries.is_empty(), "width table cannot be empty");
        Self { entries }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(_, token)| *token)
    }

    /// Percentage for a native token. Tokens outside the table go through the generic
    /// parser; anything unreadable is treated as full width.
    pub fn to_percentage(&self, token: &str) -> f64 {
        let token = token.trim();
        self.entries
            .iter()
            .find(|(_, t)| *t == token)
            .map(|(p, _)| *p)
            .or_else(|| parse_width_token(token))
            .unwrap_or(100.0)
    }

    /// Native token closest to `percent`.
    pub fn to_token(&self, percent: f64) -> &'static str {
        let mut best = self.entries[0];
        let mut best_diff = (best.0 - percent).abs();
        for entry in &self.entries[1..] {
            let diff = (entry.0 - percent).abs();
            if diff < best_diff {
                best = *entry;
                best_diff = diff;
            }
        }
        best.1
    }

    /// Canonical percentage string for a native token.
    pub fn token_to_canonical(&self, token: &str) -> String {
        format_percentage(self.to_percentage(token))
    }

    /// Native token for a canonical percentage string.
    pub fn canonical_to_token(&self, canonical: &str) -> &'static str {
        self.to_token(parse_percentage(canonical).unwrap_or(100.0))
    }
}

/// Truncate to two decimals. The epsilon keeps values like 0.29 * 100 from dropping a cent.
pub fn truncate2(value: f64) -> f64 {
    (value * 100.0 + 1e-9).floor() / 100.0
}

/// Parse "50%", "50" or "33.33 %" into a number of percent.
pub fn parse_percentage(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Render a percentage the canonical way: "50%", "33.33%", "12.5%".
pub fn format_percentage(percent: f64) -> String {
    let truncated = truncate2(percent);
    if truncated.fract() == 0.0 {
        format!("{}%", truncated as i64)
    } else {
        let text = format!("{:.2}", truncated);
        format!("{}%", text.trim_end_matches('0'))
    }
}

/// Generic width parsing: "a/b", "a_b", "50%", "50".
pub fn parse_width_token(token: &str) -> Option<f64> {
    let token = token.trim();
    if let Some((num, den)) = token.split_once(['/', '_']) {
        let num: f64 = num.trim().parse().ok()?;
        let den: f64 = den.trim().parse().ok()?;
        if den <= 0.0 || num < 0.0 {
            return None;
        }
        return Some(truncate2(num / den * 100.0));
    }
    parse_percentage(token)
}
