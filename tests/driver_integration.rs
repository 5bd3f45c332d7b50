//! Integration tests for batch scraping of files on disk

use headerscan::header::driver::{scrape_files_logged, scrape_files_with};
use headerscan::prelude::*;
use std::fs;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("headerscan-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &PathBuf, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_results_follow_input_order() {
    let dir = temp_dir("order");
    let paths: Vec<PathBuf> = (0..6)
        .map(|i| write(&dir, &format!("h{}.h", i), &format!("struct S{};", i)))
        .collect();

    let parallel = ParallelConfig::new().with_num_threads(3);
    let scraped = scrape_files_with(&paths, &ScraperConfig::default(), &NullDiagnostics, &parallel);

    for (i, header) in scraped.iter().enumerate() {
        assert_eq!(header.path, paths[i]);
        let names = header.result.as_ref().unwrap().declarations.names();
        assert_eq!(names, vec![format!("S{}", i)]);
    }
}

#[test]
fn test_failures_are_reported_and_skipped() {
    let dir = temp_dir("failures");
    let good = write(&dir, "good.h", "#include <map>\nnamespace ark { class Good {}; }\n");
    let comment = write(&dir, "comment.h", "class A; /* never closed\n");
    let include = write(&dir, "include.h", "#include <vector\n");

    let diag = CollectingDiagnostics::new();
    let scraped = scrape_files(&[&good, &comment, &include], &ScraperConfig::default(), &diag);

    assert!(scraped[0].is_ok());
    assert!(matches!(scraped[1].result, Err(HeaderError::UnterminatedComment { .. })));
    assert!(matches!(scraped[2].result, Err(HeaderError::UnterminatedInclude { .. })));

    let failures = diag.messages(Severity::Failure);
    assert_eq!(failures.len(), 2);
    assert!(failures[0].contains("comment.h"));
    assert!(failures[1].contains("include.h"));
}

#[test]
fn test_error_log_records_failed_files() {
    let dir = temp_dir("errorlog");
    let log = dir.join("errors.log");
    let _ = fs::remove_file(&log);
    let bad = write(&dir, "bad.h", "struct Bad { int x;");
    let good = write(&dir, "good.h", "struct Good;");

    let config = ScraperConfig::default().with_error_log(&log);
    let scraped = scrape_files_logged(&[&good, &bad], &config);
    assert!(scraped[0].is_ok());
    assert!(!scraped[1].is_ok());

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("bad.h"));
    assert!(!contents.contains("good.h"));
}

#[test]
fn test_header_file_json() {
    let dir = temp_dir("json");
    let path = write(&dir, "api.h", "#include \"base.h\"\nusing Id = uint32_t;\n");
    let scraped = scrape_files(&[&path], &ScraperConfig::default(), &NullDiagnostics);

    let file = scraped[0].result.as_ref().unwrap();
    let json: serde_json::Value = serde_json::from_str(&file.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["includes"], serde_json::json!(["\"base.h\""]));
    assert_eq!(json["declarations"]["Id"]["type"]["name"], "uint32_t");
}
