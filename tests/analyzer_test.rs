use mold::analyzer::{analyze_file, identify_placeholders, scan_tree};
use mold::error::Error;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn set_of(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_duplicates_collapse_and_chains_stay_whole() {
    let found = identify_placeholders("{{.a}} {{.a.b}} {{.a}}").unwrap();
    assert_eq!(found, set_of(&["a", "a.b"]));
}

#[test]
fn test_helper_arguments_are_recorded() {
    let found = identify_placeholders("{{snake .project_name}}").unwrap();
    assert_eq!(found, set_of(&["project_name"]));
}

#[test]
fn test_literal_text_and_string_literals_record_nothing() {
    let found = identify_placeholders(r#"plain {{camel "literal"}} text"#).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_implicit_context_records_nothing() {
    let found = identify_placeholders("{{range .items}}{{.}}{{end}}").unwrap();
    assert_eq!(found, set_of(&["items"]));
}

#[test]
fn test_conditional_bodies_and_else_bodies_are_walked() {
    let found =
        identify_placeholders("{{if .flag}}{{.yes}}{{else}}{{.no}}{{end}}").unwrap();
    assert_eq!(found, set_of(&["flag", "yes", "no"]));
}

#[test]
fn test_names_are_case_sensitive() {
    let found = identify_placeholders("{{.Name}} {{.name}}").unwrap();
    assert_eq!(found, set_of(&["Name", "name"]));
}

#[test]
fn test_no_data_needed_for_analysis() {
    // Analysis is purely syntactic; fields that no data file could satisfy
    // are still discovered.
    let found = identify_placeholders("{{.surely.missing.everywhere}}").unwrap();
    assert_eq!(found, set_of(&["surely.missing.everywhere"]));
}

#[test]
fn test_malformed_template_is_parse_error() {
    let err = identify_placeholders("{{.unterminated").unwrap_err();
    assert!(matches!(err, Error::ParseError(_)));
}

#[test]
fn test_analyze_missing_file_is_not_found() {
    let err = analyze_file("definitely/not/here.tmpl").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}

#[test]
fn test_analyze_file_reads_placeholders() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("main.go.tmpl");
    fs::write(&path, "package {{.pkg}}\n// {{usnake .project_name}}\n").unwrap();

    let found = analyze_file(&path).unwrap();
    assert_eq!(found, set_of(&["pkg", "project_name"]));
}

#[test]
fn test_scan_tree_unions_files_and_path_segments() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir(root.join("{{.project_name}}")).unwrap();
    fs::write(root.join("{{.project_name}}/main.go.tmpl"), "package {{.pkg}}").unwrap();
    fs::write(root.join("README.md"), "# plain file, never analyzed {{broken").unwrap();

    let report = scan_tree(root).unwrap();
    assert_eq!(report.placeholders, set_of(&["project_name", "pkg"]));
    assert!(report.failures.is_empty());
}

#[test]
fn test_scan_tree_is_advisory_about_broken_templates() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("good.txt.tmpl"), "{{.greeting}}").unwrap();
    fs::write(root.join("bad.txt.tmpl"), "{{.oops").unwrap();

    let report = scan_tree(root).unwrap();
    // The valid file still contributes, the broken one is reported.
    assert_eq!(report.placeholders, set_of(&["greeting"]));
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].0.ends_with("bad.txt.tmpl"));
    assert!(matches!(report.failures[0].1, Error::ParseError(_)));
}

#[test]
fn test_scan_tree_missing_root_is_not_found() {
    let err = scan_tree("no/such/root").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
