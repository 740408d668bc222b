//! Width conversion through the public helpers

use layout_babel::{percentage_to_dialect_token, width_to_percentage, BabelError, DialectRegistry};
use proptest::prelude::*;
use rstest::rstest;

const DIALECTS: [&str; 6] = ["shortcode", "wpbakery", "divi", "avada", "elementor", "oxygen"];

#[test]
fn test_native_tokens_round_trip() {
    let registry = DialectRegistry::with_defaults();
    for dialect in DIALECTS {
        let table = registry.get(dialect).unwrap().width_table();
        for token in table.tokens() {
            let percent = width_to_percentage(token, dialect).unwrap();
            assert_eq!(
                percentage_to_dialect_token(&percent, dialect).unwrap(),
                token,
                "{} token {} went through {}",
                dialect,
                token,
                percent
            );
        }
    }
}

#[rstest]
#[case("shortcode", "1/3", "33.33%")]
#[case("wpbakery", "2/3", "66.66%")]
#[case("divi", "4_4", "100%")]
#[case("avada", "1_5", "20%")]
#[case("elementor", "33", "33.33%")]
#[case("oxygen", "62.5", "62.5%")]
#[case("shortcode", "3/8", "37.5%")]
#[case("divi", "wide", "100%")]
fn test_width_to_percentage(#[case] dialect: &str, #[case] token: &str, #[case] expected: &str) {
    assert_eq!(width_to_percentage(token, dialect).unwrap(), expected);
}

#[rstest]
#[case("divi", "41.66%", "2_5")]
#[case("wpbakery", "41.66%", "5/12")]
#[case("elementor", "45.5%", "50")]
#[case("avada", "not a number", "1_1")]
fn test_nearest_token(#[case] dialect: &str, #[case] percent: &str, #[case] expected: &str) {
    assert_eq!(percentage_to_dialect_token(percent, dialect).unwrap(), expected);
}

#[test]
fn test_unknown_dialect() {
    assert_eq!(
        width_to_percentage("1/2", "gutenberg"),
        Err(BabelError::UnknownDialect("gutenberg".to_string()))
    );
    assert!(percentage_to_dialect_token("50%", "gutenberg").is_err());
}

proptest! {
    #[test]
    fn test_token_choice_is_idempotent(percent in 0.0f64..=100.0, index in 0usize..6) {
        let dialect = DIALECTS[index];
        let token = percentage_to_dialect_token(&format!("{}%", percent), dialect).unwrap();
        let back = width_to_percentage(&token, dialect).unwrap();
        prop_assert_eq!(percentage_to_dialect_token(&back, dialect).unwrap(), token);
    }
}
