//! Integration tests for logger behavior.

use fleet_graph::logger::{enabled, level, log_to_file, set_level, Level};
use fleet_graph::{debug, error, info, verbose, warn};
use std::fs;
use tempfile::TempDir;

// Level is process-wide, so every level assertion lives in one test
#[test]
fn level_set_and_filter() {
    set_level(Level::Error);
    assert_eq!(level(), Level::Error);
    assert!(enabled(Level::Error));
    assert!(!enabled(Level::Warn));

    set_level(Level::parse("WARNING").unwrap());
    assert_eq!(level(), Level::Warn);
    assert!(enabled(Level::Warn));
    assert!(!enabled(Level::Info));

    assert_eq!(Level::parse("invalid"), None);
    assert_eq!(Level::parse(""), None);

    set_level(Level::Info);
    assert_eq!(level(), Level::Info);
    assert_eq!(enabled(Level::Info), cfg!(feature = "log-info"));
    // debug records also need the debug switch
    assert!(!enabled(Level::Debug));
}

#[test]
fn logs_do_not_panic() {
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_appends_tagged_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fleetgraph.log");

    log_to_file(&path).unwrap();
    error!("written to file");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[ERROR] written to file"));
}

#[test]
fn file_logging_fails_for_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("fleetgraph.log");
    assert!(log_to_file(&path).is_err());
}
