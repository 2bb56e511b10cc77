//! Tests for configuration building, validation and loading

use kodegen_tools_readable::ReadableConfig;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn test_defaults() {
    let config = ReadableConfig::default();

    assert_eq!(config.base_url(), None);
    assert!(!config.section_dividers());
    assert_eq!(config.max_nav_links(), 10);
    assert_eq!(config.max_ctas(), 3);
    assert_eq!(config.max_footer_links(), 20);
    assert_eq!(config.max_associated_items(), 5);
    assert_eq!(config.max_structural_rows(), 14);
    assert_eq!(config.max_custom_rows(), 15);
    assert_eq!(config.max_custom_tables(), 10);
    assert_eq!(config.max_fallback_items(), 10);
    assert_eq!(config.min_content_items(), 5);
    assert_eq!(config.dynamic_content_timeout(), Duration::from_secs(2));
    assert_eq!(config.max_html_bytes(), 10 * 1024 * 1024);
}

#[test]
fn test_builder_sets_fields() {
    let config = ReadableConfig::builder()
        .base_url("https://example.com/docs/")
        .section_dividers(true)
        .max_nav_links(4)
        .dynamic_content_timeout_ms(250)
        .build()
        .expect("valid config");

    assert_eq!(config.base_url(), Some("https://example.com/docs/"));
    assert_eq!(
        config.parsed_base_url().map(|url| url.host_str().map(str::to_string)),
        Some(Some("example.com".to_string()))
    );
    assert!(config.section_dividers());
    assert_eq!(config.max_nav_links(), 4);
    assert_eq!(config.dynamic_content_timeout(), Duration::from_millis(250));
}

#[test]
fn test_builder_rejects_invalid_values() {
    assert!(ReadableConfig::builder().base_url("not a url").build().is_err());
    assert!(ReadableConfig::builder().max_ctas(0).build().is_err());
    assert!(ReadableConfig::builder().max_html_bytes(0).build().is_err());
    assert!(ReadableConfig::builder().dynamic_content_timeout_ms(0).build().is_err());

    let err = ReadableConfig::builder()
        .max_footer_links(0)
        .build()
        .expect_err("zero cap rejected");
    assert!(err.to_string().contains("max_footer_links"));
}

#[test]
fn test_partial_json_file_keeps_defaults() {
    let file = write_config(r#"{ "base_url": "https://acme.io/", "max_ctas": 1 }"#);
    let config = ReadableConfig::from_json_file(file.path()).expect("loads");

    assert_eq!(config.base_url(), Some("https://acme.io/"));
    assert_eq!(config.max_ctas(), 1);
    assert_eq!(config.max_nav_links(), 10);
}

#[test]
fn test_json_file_is_validated() {
    let file = write_config(r#"{ "max_structural_rows": 0 }"#);
    assert!(ReadableConfig::from_json_file(file.path()).is_err());

    let malformed = write_config("{ not json");
    let err = ReadableConfig::from_json_file(malformed.path()).expect_err("malformed JSON");
    assert!(err.to_string().contains("Invalid config JSON"));
}

#[test]
fn test_missing_file_reports_path() {
    let err = ReadableConfig::from_json_file("/nonexistent/readable.json").expect_err("missing file");
    assert!(err.to_string().contains("/nonexistent/readable.json"));
}
