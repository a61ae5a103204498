//! End-to-end tests for the `lg` binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MIT: &str = "Permission is hereby granted.\n\nTHE SOFTWARE IS PROVIDED \"AS IS\".";

const BSD: &str = "Redistribution and use in source and binary forms are permitted.\n\n\
THIS SOFTWARE IS PROVIDED WITHOUT ANY WARRANTY.\n\n\
IN NO EVENT SHALL THE COPYRIGHT HOLDER BE LIABLE.";

const ISC: &str = "Permission to use, copy, modify is granted.\n\n\
THE SOFTWARE IS PROVIDED WITH NO WARRANTY, express or implied.";

/// Workspace with `text/` corpus and `out/` output directory
fn setup() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let corpus = temp.path().join("text");
    fs::create_dir_all(&corpus).unwrap();
    fs::write(corpus.join("MIT.txt"), MIT).unwrap();
    fs::write(corpus.join("BSD-2-Clause.txt"), BSD).unwrap();
    fs::write(corpus.join("ISC.txt"), ISC).unwrap();
    fs::write(corpus.join("README.md"), "not a license").unwrap();

    let out = temp.path().join("out");
    fs::create_dir_all(&out).unwrap();
    (temp, out)
}

/// `lg` running in `root`, with logs and user config kept inside it
fn lg_bare(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lg").unwrap();
    cmd.current_dir(root)
        .env("XDG_DATA_HOME", root.join("data"))
        .env("XDG_CONFIG_HOME", root.join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn lg(root: &Path) -> Command {
    let mut cmd = lg_bare(root);
    cmd.args(["--corpus", "text", "--output", "out"]);
    cmd
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new().has_headers(false).from_path(path).unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

#[test]
fn test_search_single_match_with_context() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "as is"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded 3 licenses"))
        .stdout(predicate::str::contains("Found 1 match in 1 license"))
        .stdout(predicate::str::contains("results.csv"));

    let rows = read_rows(&out.join("as is").join("results.csv"));
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["License ID", "Paragraph Before", "Paragraph With Hit", "Paragraph After"]
    );
    assert_eq!(
        rows[1],
        vec![
            "MIT",
            "Permission is hereby granted.",
            "THE SOFTWARE IS PROVIDED \"AS IS\".",
            "N/A"
        ]
    );
}

#[test]
fn test_search_rows_follow_file_name_order() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "warranty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches in 2 licenses"));

    let rows = read_rows(&out.join("warranty").join("results.csv"));
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1][0], "BSD-2-Clause");
    assert_eq!(rows[1][1], "Redistribution and use in source and binary forms are permitted.");
    assert_eq!(rows[1][3], "IN NO EVENT SHALL THE COPYRIGHT HOLDER BE LIABLE.");
    assert_eq!(rows[2][0], "ISC");
    assert_eq!(rows[2][1], "Permission to use, copy, modify is granted.");
    assert_eq!(rows[2][3], "N/A");
}

#[test]
fn test_search_twice_is_byte_identical() {
    let (temp, out) = setup();
    let report = out.join("warranty").join("results.csv");

    lg(temp.path()).args(["search", "warranty"]).assert().success();
    let first = fs::read(&report).unwrap();
    lg(temp.path()).args(["search", "warranty"]).assert().success();
    let second = fs::read(&report).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_search_no_results_leaves_nothing() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "sublicense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found for 'sublicense'"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_search_blank_term_rejected() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "   "])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Please enter a valid search term"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_search_invalid_pattern_reported() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "warranty("])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search pattern"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_search_term_is_a_pattern() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["search", "provided (with|without)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches"));

    // `|` is dropped from the folder name
    assert!(out.join("provided (withwithout)").join("results.csv").exists());
}

#[test]
fn test_literal_flag_escapes_term() {
    let (temp, out) = setup();

    lg(temp.path())
        .args(["--literal", "search", "warrant."])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found"));

    lg(temp.path())
        .args(["--literal", "search", "WARRANTY."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 match"));

    assert!(out.join("WARRANTY.").join("results.csv").exists());
}

#[test]
fn test_missing_corpus_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("out")).unwrap();

    lg(temp.path())
        .args(["search", "warranty"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Corpus directory not found"));
}

#[test]
fn test_output_inside_corpus_rejected() {
    let (temp, _out) = setup();

    lg_bare(temp.path())
        .args(["--corpus", "text", "--output", "text/results", "search", "warranty"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inside the corpus directory"));
}

#[test]
fn test_list_prints_ids() {
    let (temp, _out) = setup();

    lg(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("BSD-2-Clause (3 paragraphs)"))
        .stdout(predicate::str::contains("MIT (2 paragraphs)"))
        .stdout(predicate::str::contains("README").not());
}

#[test]
fn test_config_file_sets_exit_keyword() {
    let (temp, out) = setup();
    let config = temp.path().join("custom.yml");
    fs::write(&config, "exit_keyword: quit\nreport_file_name: hits.csv\n").unwrap();

    lg(temp.path())
        .args(["--config", config.to_str().unwrap()])
        .write_stdin("warranty\nQUIT\nas is\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 matches"))
        .stdout(predicate::str::contains("Goodbye!"));

    assert!(out.join("warranty").join("hits.csv").exists());
    assert!(!out.join("as is").exists());
}

#[test]
fn test_interactive_session() {
    let (temp, out) = setup();

    lg(temp.path())
        .write_stdin("   \nas is\nsublicense\nwarranty(\nExit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter a valid search term"))
        .stdout(predicate::str::contains("Found 1 match in 1 license"))
        .stdout(predicate::str::contains("No results found for 'sublicense'"))
        .stderr(predicate::str::contains("Invalid search pattern"))
        .stdout(predicate::str::contains("Goodbye!"));

    let mut folders: Vec<String> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    folders.sort();
    assert_eq!(folders, vec!["as is".to_string()]);
}

#[test]
fn test_interactive_session_ends_at_eof() {
    let (temp, out) = setup();

    lg(temp.path())
        .write_stdin("warranty\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Goodbye!"));

    assert!(out.join("warranty").join("results.csv").exists());
}
