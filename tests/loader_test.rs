use mold::error::Error;
use mold::loader::load_data_file;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"pkg": "main", "port": 8080, "debug": true}"#).unwrap();

    let data = load_data_file(&path).unwrap();
    assert_eq!(data, json!({"pkg": "main", "port": 8080, "debug": true}));
}

#[test]
fn test_load_yaml_data_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.yaml");
    fs::write(&path, "pkg: main\nauthor:\n  name: jo\n").unwrap();

    let data = load_data_file(&path).unwrap();
    assert_eq!(data, json!({"pkg": "main", "author": {"name": "jo"}}));
}

#[test]
fn test_yml_extension_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.yml");
    fs::write(&path, "key: value\n").unwrap();

    let data = load_data_file(&path).unwrap();
    assert_eq!(data, json!({"key": "value"}));
}

#[test]
fn test_missing_data_file_is_not_found() {
    let err = load_data_file("no/such/data.json").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_unrecognized_extension_is_unsupported_format() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.toml");
    fs::write(&path, "key = 'value'\n").unwrap();

    let err = load_data_file(&path).unwrap_err();
    match err {
        Error::UnsupportedFormat { extension } => assert_eq!(extension, "toml"),
        other => panic!("expected UnsupportedFormat, got {:?}", other),
    }
}

#[test]
fn test_malformed_json_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, r#"{"key": "value""#).unwrap();

    let err = load_data_file(&path).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_non_mapping_top_level_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = load_data_file(&path).unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}
