use std::path::Path;
use std::process::{Command, Output};

use httpmock::{Method::GET, Method::POST, MockServer};
use serde_json::{Value, json};
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "GEMINI_API_KEY",
    "GEMINI_BASE_URL",
    "GEMINI_MODEL",
    "GEMINI_TEMPERATURE",
    "PRODUCT_EXTRACTOR_FETCH_TIMEOUT_SECS",
    "PRODUCT_EXTRACTOR_MODEL_TIMEOUT_SECS",
];

/// Runs the binary from `dir` (which holds no `.env`) with every setting it
/// reads scrubbed from the environment.
fn command(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_product_extractor"));
    cmd.current_dir(dir).env("RUST_LOG", "warn");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn files_in(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn missing_url_prints_usage_and_exits_2() {
    let dir = TempDir::new().unwrap();

    let output = command(dir.path()).output().unwrap();

    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Usage"), "stderr: {}", stderr(&output));
    assert_eq!(files_in(dir.path()), 0);
}

#[test]
fn missing_api_key_refuses_to_run_before_fetching() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/p/lipstick");
        then.status(200)
            .body(r#"<html><script>{"name":"Rouge"}</script></html>"#);
    });
    let dir = TempDir::new().unwrap();

    let output = command(dir.path())
        .arg(server.url("/p/lipstick"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("GEMINI_API_KEY"), "stderr: {}", stderr(&output));
    assert_eq!(files_in(dir.path()), 0, "nothing is fetched or written without a key");
}

#[test]
fn blank_api_key_refuses_to_run() {
    let dir = TempDir::new().unwrap();

    let output = command(dir.path())
        .env("GEMINI_API_KEY", "  ")
        .arg("http://127.0.0.1:1/p/lipstick")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("GEMINI_API_KEY"), "stderr: {}", stderr(&output));
}

#[test]
fn fetch_failure_exits_1() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/p/gone");
        then.status(404);
    });
    let dir = TempDir::new().unwrap();

    let output = command(dir.path())
        .env("GEMINI_API_KEY", "fake-key")
        .env("GEMINI_BASE_URL", server.base_url())
        .arg(server.url("/p/gone"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("failed to fetch"), "stderr: {}", stderr(&output));
    assert_eq!(files_in(dir.path()), 0);
}

#[test]
fn successful_run_exits_0_and_writes_product() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/products/gloss-bomb");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(r#"<html><script>{"product":{"name":"Gloss Bomb","brand":"Fenty"}}</script><script>x()</script></html>"#);
    });
    server.mock(|when, then| {
        when.method(POST)
            .path("/v1beta/models/gemini-test:generateContent")
            .header("x-goog-api-key", "fake-key");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "```json\n{\"name\": \"Gloss Bomb\", \"brand\": \"Fenty\"}\n```"}]}
                }],
                "usageMetadata": {"promptTokenCount": 40, "candidatesTokenCount": 12, "totalTokenCount": 52}
            }));
    });
    let dir = TempDir::new().unwrap();

    let output = command(dir.path())
        .env("GEMINI_API_KEY", "fake-key")
        .env("GEMINI_BASE_URL", server.base_url())
        .args(["--model", "gemini-test"])
        .arg(server.url("/products/gloss-bomb"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let written: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("gloss-bomb.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(written, json!({"name": "Gloss Bomb", "brand": "Fenty"}));
    assert!(dir.path().join("gloss-bomb.html").exists());
    assert!(dir.path().join("script_data.txt").exists());
}
