//! Transcript integration: a configured mock writes one JSONL line per
//! registration and invocation, and config loading feeds the writer.

mod common;

use std::fs;

use common::{read_transcript, transcript_config};
use understudy::args;
use understudy::logger::transcript::TranscriptWriter;
use understudy::prelude::*;

#[test]
fn invocations_are_transcribed_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let mut mock = Mock::from_config(&transcript_config(&path));

    mock.when("next", args![any()])
        .returns(args!["First"])
        .raises("Second");
    mock.called("next", args![1]).unwrap();
    mock.called("next", args![2]).unwrap_err();
    mock.called("other", args![]).unwrap_err();
    mock.flush_transcript();

    let lines = read_transcript(&path);
    let events: Vec<&str> = lines
        .iter()
        .map(|line| line["event"].as_str().unwrap())
        .collect();
    assert_eq!(events, ["register", "invoke", "raise", "unmatched"]);

    assert_eq!(lines[0]["call"], "next");
    assert_eq!(lines[0]["args"][0], "<any>");
    assert_eq!(lines[1]["cursor"], 0);
    assert_eq!(lines[1]["results"][0], "First");
    assert_eq!(lines[2]["cursor"], 1);
    assert_eq!(lines[2]["error_code"], "UDY-3001");
    assert_eq!(lines[3]["error_code"], "UDY-1001");
    assert!(lines[3].get("cursor").is_none());
    assert!(lines.iter().all(|line| line["ts"].is_string()));
}

#[test]
fn results_can_be_left_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let mut config = transcript_config(&path);
    config.transcript.include_results = false;

    let mut mock = Mock::from_config(&config);
    mock.when("f", args![]).returns(args!["secret"]);
    mock.called("f", args![]).unwrap();
    mock.flush_transcript();

    let lines = read_transcript(&path);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].get("results").is_none());
}

#[test]
fn long_values_are_truncated_by_render_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let mut config = transcript_config(&path);
    config.display.max_render_len = 8;

    let mut mock = Mock::from_config(&config);
    mock.when("f", args![any()]).returns(args![]);
    mock.called("f", args!["a rather long argument value"]).unwrap();
    mock.flush_transcript();

    let lines = read_transcript(&path);
    let rendered = lines[1]["args"][0].as_str().unwrap();
    assert!(rendered.chars().count() < "a rather long argument value".len());
    assert!(rendered.starts_with("a rather"));
}

#[test]
fn disabled_transcript_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let mut config = transcript_config(&path);
    config.transcript.enabled = false;

    let mut mock = Mock::from_config(&config);
    mock.when("f", args![]).returns(args![]);
    mock.called("f", args![]).unwrap();
    mock.flush_transcript();

    assert!(!path.exists());
}

#[test]
fn config_file_drives_the_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let transcript = dir.path().join("from-file.jsonl");
    let config_path = dir.path().join("understudy.toml");
    fs::write(
        &config_path,
        format!(
            "[transcript]\nenabled = true\npath = {:?}\n",
            transcript.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load_with(Some(&config_path), |_| None).unwrap();
    let mut mock = Mock::from_config(&config);
    mock.when("f", args![]).returns(args![]);
    mock.flush_transcript();

    let lines = read_transcript(&transcript);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["event"], "register");
}

#[test]
fn mocks_sharing_a_path_respect_the_size_cap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.jsonl");
    let mut config = transcript_config(&path);
    config.transcript.max_size_bytes = 1024;

    let mut first = Mock::from_config(&config);
    let mut second = Mock::from_config(&config);
    first.when("f", args![any()]).returns(args![]);
    second.when("g", args![any()]).returns(args![]);
    for index in 0..40 {
        first.called("f", args![index]).unwrap();
        second.called("g", args![index]).unwrap();
    }

    let size = fs::metadata(&path).unwrap().len();
    assert!(size <= 1024, "transcript grew to {size} bytes");
    let lines = read_transcript(&path);
    assert!(!lines.is_empty());
    assert!(!dir.path().join("shared.jsonl.1").exists());
}

#[test]
fn reopening_a_transcript_starts_it_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calls.jsonl");
    let config = transcript_config(&path);

    let mut earlier = Mock::from_config(&config);
    earlier.when("old", args![]).returns(args![]);
    drop(earlier);

    let mut later = Mock::from_config(&config);
    later.when("new", args![]).returns(args![]);

    let lines = read_transcript(&path);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["call"], "new");
}

#[test]
fn attached_writer_reports_to_stderr_when_path_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file in the way").unwrap();

    let config = transcript_config(&blocker.join("calls.jsonl"));
    let writer = TranscriptWriter::open(&config.transcript);
    assert_eq!(writer.state(), "stderr");

    let mut mock = Mock::new().with_transcript(writer);
    mock.when("f", args![]).returns(args![]);
    assert!(mock.called("f", args![]).unwrap().is_empty());
}
