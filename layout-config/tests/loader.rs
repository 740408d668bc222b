//! Layering user files over the defaults and feeding the result to the registry

use layout_babel::{Content, DialectRegistry};
use layout_config::Loader;
use rstest::rstest;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_user_file_overrides_only_its_keys() {
    let config = Loader::new()
        .with_file(fixture("strict.toml"))
        .build()
        .expect("config to build");
    assert_eq!(config.confidence.base, 0.7);
    assert_eq!(config.confidence.child_threshold, 3);
    assert_eq!(config.confidence.fallback.form, 0.0);
    assert_eq!(config.confidence.same_dialect, 0.95);
    assert_eq!(config.confidence.fallback.media, 0.4);
    assert!(config.convert.emit_ids);
}

#[test]
fn test_missing_required_file_is_an_error() {
    assert!(Loader::new().with_file(fixture("absent.toml")).build().is_err());
}

#[test]
fn test_missing_optional_file_is_ignored() {
    let config = Loader::new()
        .with_optional_file(fixture("absent.toml"))
        .build()
        .expect("config to build");
    assert_eq!(config.confidence.base, 0.8);
}

#[rstest]
#[case("out_of_range.toml", "confidence.same_dialect")]
fn test_invalid_scores_are_rejected(#[case] file: &str, #[case] key: &str) {
    let err = Loader::new().with_file(fixture(file)).build().unwrap_err();
    assert!(err.to_string().contains(key), "{}", err);
}

#[test]
fn test_options_reach_the_registry() {
    let config = Loader::new()
        .with_file(fixture("strict.toml"))
        .set_override("convert.emit_ids", false)
        .expect("override to apply")
        .build()
        .expect("config to build");
    let registry = DialectRegistry::with_options(config.engine_options());

    let translation = registry
        .translate("shortcode", "divi", &Content::from("[text]Hi[/text]"))
        .expect("translation");
    assert!((translation.confidence - 0.7).abs() < 1e-9);
    assert!(!translation.output.to_text(false).contains("_unique_id"));
}

#[test]
fn test_pretty_json_reaches_rendering() {
    let config = Loader::new()
        .set_override("convert.pretty_json", true)
        .expect("override to apply")
        .build()
        .expect("config to build");
    let registry = DialectRegistry::with_options(config.engine_options());
    let translation = registry
        .translate("shortcode", "elementor", &Content::from("[text]Hi[/text]"))
        .expect("translation");
    let rendered = registry.render(&translation.output).expect("render");
    assert!(rendered.starts_with("{\n"), "{}", rendered);
}
