//! Tests for output module

use super::*;
use crate::error::Error;
use crate::types::{OutputFormat, Record};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn sample_records() -> Vec<Record> {
    vec![
        json!({"id": "p1", "comments": [{"id": "c1"}]}),
        json!({"id": "p2", "comments": []}),
    ]
    .into_iter()
    .map(|v| match v {
        Value::Object(map) => map,
        _ => unreachable!(),
    })
    .collect()
}

#[test]
fn test_path_for_adds_extension_once() {
    let sink = FileSink::new("/tmp/out", OutputFormat::Json);
    assert_eq!(sink.path_for("users").to_str(), Some("/tmp/out/users.json"));
    assert_eq!(
        sink.path_for("users.json").to_str(),
        Some("/tmp/out/users.json")
    );

    let sink = FileSink::new("/tmp/out", OutputFormat::Jsonl);
    assert_eq!(sink.path_for("posts").to_str(), Some("/tmp/out/posts.jsonl"));
}

#[test]
fn test_default_sink() {
    let sink = FileSink::default();
    assert_eq!(sink.dir().to_str(), Some("data"));
    assert_eq!(sink.format(), OutputFormat::Json);
}

#[test]
fn test_save_json_creates_directory() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested").join("data");
    let sink = FileSink::new(&out, OutputFormat::Json);

    let path = sink.save(&sample_records(), "posts").unwrap();

    assert_eq!(path, out.join("posts.json"));
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("[\n    {"));

    let parsed: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0]["comments"][0]["id"], "c1");
}

#[test]
fn test_save_jsonl() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), OutputFormat::Jsonl);

    let path = sink.save(&sample_records(), "posts").unwrap();

    let content = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["id"], "p1");
}

#[test]
fn test_save_empty_result() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), OutputFormat::Json);

    let path = sink.save(&[], "users").unwrap();
    let parsed: Vec<Value> = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert!(parsed.is_empty());
}

#[test]
fn test_save_overwrites_previous_run() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), OutputFormat::Jsonl);

    sink.save(&sample_records(), "users").unwrap();
    let path = sink.save(&sample_records()[..1], "users").unwrap();

    assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 1);
}

#[test]
fn test_save_rejects_empty_name() {
    let dir = tempdir().unwrap();
    let sink = FileSink::new(dir.path(), OutputFormat::Json);

    let err = sink.save(&sample_records(), " ").unwrap_err();
    assert!(matches!(err, Error::Output { .. }));
}
