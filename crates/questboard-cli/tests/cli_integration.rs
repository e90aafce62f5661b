//! CLI Integration Tests
//!
//! These tests run the `questboard` binary against an in-process stub of
//! the backend. They test the wiring between the CLI and the core library.

use std::net::SocketAddr;
use std::sync::Arc;

use assert_cmd::Command;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Requests the stub received, as `METHOD path?query player-header`
#[derive(Default)]
struct Stub {
    log: Mutex<Vec<String>>,
}

impl Stub {
    fn record(&self, line: &str, headers: &HeaderMap) {
        let player = headers
            .get("x-player-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        self.log.lock().push(format!("{} {}", line, player));
    }

    fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }
}

fn player_state() -> Value {
    json!({
        "stats": { "agency": 2, "courage": 5, "order": 1 },
        "flags": ["steady"],
        "timeContext": { "range": "gap", "nowMs": 1760572800000i64 }
    })
}

fn receipt(id: &str) -> Value {
    json!({
        "id": id,
        "createdAtMs": 1760572800000i64,
        "questId": "q1",
        "questType": "courage",
        "tone": "warm",
        "title": "You went first",
        "line": "Someone had to.",
        "shareText": "I went first today."
    })
}

fn with_player(mut body: Value) -> Json<Value> {
    body["playerId"] = json!("p-cli");
    Json(body)
}

fn router(stub: Arc<Stub>) -> Router {
    Router::new()
        .route(
            "/api/state",
            get(|State(s): State<Arc<Stub>>, h: HeaderMap| async move {
                s.record("GET /api/state", &h);
                with_player(json!({ "state": player_state() }))
            }),
        )
        .route(
            "/api/quests",
            get(|State(s): State<Arc<Stub>>, h: HeaderMap| async move {
                s.record("GET /api/quests", &h);
                with_player(json!({
                    "quests": [{
                        "id": "q1",
                        "type": "courage",
                        "context": "The kettle is on.",
                        "realWorldAction": "Call someone you owe a call.",
                        "constraint": "Under ten minutes."
                    }]
                }))
            }),
        )
        .route(
            "/api/quests/{id}/start",
            post(
                |State(s): State<Arc<Stub>>, Path(id): Path<String>, h: HeaderMap| async move {
                    s.record(&format!("POST /api/quests/{}/start", id), &h);
                    if id != "q1" {
                        return StatusCode::NOT_FOUND.into_response();
                    }
                    with_player(json!({
                        "state": player_state(),
                        "events": [],
                        "narrative": { "tone": "warm", "line": "The door is open." }
                    }))
                    .into_response()
                },
            ),
        )
        .route(
            "/api/quests/{id}/complete",
            post(
                |State(s): State<Arc<Stub>>, Path(id): Path<String>, h: HeaderMap| async move {
                    s.record(&format!("POST /api/quests/{}/complete", id), &h);
                    with_player(json!({
                        "state": player_state(),
                        "events": [],
                        "narrative": { "tone": "firm", "line": "Done is done." },
                        "receipt": receipt("r1")
                    }))
                },
            ),
        )
        .route(
            "/api/quests/{id}/action",
            post(
                |State(s): State<Arc<Stub>>,
                 Path(id): Path<String>,
                 h: HeaderMap,
                 Json(body): Json<Value>| async move {
                    s.record(
                        &format!("POST /api/quests/{}/action {}", id, body["text"]),
                        &h,
                    );
                    with_player(json!({ "ok": true }))
                },
            ),
        )
        .route(
            "/api/receipts",
            get(
                |State(s): State<Arc<Stub>>, RawQuery(q): RawQuery, h: HeaderMap| async move {
                    let line = match q {
                        Some(q) => format!("GET /api/receipts?{}", q),
                        None => "GET /api/receipts".to_string(),
                    };
                    s.record(&line, &h);
                    with_player(json!({ "receipts": [receipt("r1")] }))
                },
            ),
        )
        .route(
            "/api/receipts/{id}/share",
            post(
                |State(s): State<Arc<Stub>>, Path(id): Path<String>, h: HeaderMap| async move {
                    s.record(&format!("POST /api/receipts/{}/share", id), &h);
                    with_player(json!({ "url": format!("https://share.test/{}", id), "token": "t" }))
                },
            ),
        )
        .with_state(stub)
}

/// Serve the stub on a background runtime; returns its base URL.
fn spawn_stub() -> (Arc<Stub>, String) {
    let stub = Arc::new(Stub::default());
    let app = router(stub.clone());
    let (tx, rx) = std::sync::mpsc::channel::<SocketAddr>();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    let addr = rx.recv().unwrap();
    (stub, format!("http://{}", addr))
}

/// Create a CLI command with a temporary data directory
fn cli_cmd(data_dir: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("questboard").expect("Failed to find questboard binary");
    cmd.env_remove("RUST_LOG")
        .env_remove("QUESTBOARD_API_URL")
        .env_remove("QUESTBOARD_ENV")
        .env_remove("QUESTBOARD_TIMEOUT_SECS")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--api-url")
        .arg(api_url);
    cmd
}

// ============================================================================
// Basics
// ============================================================================

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("questboard")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("quests"))
        .stdout(predicate::str::contains("complete"))
        .stdout(predicate::str::contains("identity"));
}

#[test]
fn test_info_shows_configuration() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, "http://127.0.0.1:9/")
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("API: http://127.0.0.1:9\n"))
        .stdout(predicate::str::contains("Data directory:"))
        .stdout(predicate::str::contains("Player ID: (not assigned yet)"));
}

#[test]
fn test_verbose_logs_resolved_configuration() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, "http://127.0.0.1:9")
        .arg("-vv")
        .arg("info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved configuration"));
}

#[test]
fn test_quiet_run_keeps_stderr_clean() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, "http://127.0.0.1:9")
        .arg("info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved configuration").not());
}

#[test]
fn test_invalid_api_url_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, "not a url")
        .arg("quests")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid API URL"));
}

// ============================================================================
// Quests
// ============================================================================

#[test]
fn test_quests_lists_available() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .arg("quests")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available quests (1):"))
        .stdout(predicate::str::contains("q1 [Courage] The kettle is on."))
        .stdout(predicate::str::contains("Constraint: Under ten minutes."));
}

#[test]
fn test_quests_json_output() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    let output = cli_cmd(&data_dir, &url)
        .args(["quests", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let quests: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(quests[0]["id"], "q1");
    assert_eq!(quests[0]["type"], "courage");
}

#[test]
fn test_start_prints_narrative() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["start", "q1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Started quest q1"))
        .stdout(predicate::str::contains("\"The door is open.\" (warm)"));
}

#[test]
fn test_start_unknown_quest_reports_status() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["start", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to start quest: Not Found"));
}

#[test]
fn test_complete_prints_receipt_and_refetches_quests() {
    let (stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["complete", "q1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed quest q1"))
        .stdout(predicate::str::contains("Receipt:"))
        .stdout(predicate::str::contains("r1 2025-10-16 [Courage] You went first"));

    let log = stub.log();
    assert!(log[0].starts_with("POST /api/quests/q1/complete"));
    assert!(log[1].starts_with("GET /api/quests"));
}

#[test]
fn test_record_sends_trimmed_text() {
    let (stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["record", "q1", "  Called my sister  "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded action for q1"));

    assert!(stub.log()[0].starts_with("POST /api/quests/q1/action \"Called my sister\""));
}

#[test]
fn test_record_rejects_blank_text_without_request() {
    let (stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["record", "q1", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Action text must not be empty"));

    assert!(stub.log().is_empty());
}

// ============================================================================
// Receipts
// ============================================================================

#[test]
fn test_receipts_all_uses_bulk_query() {
    let (stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["receipts", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Receipts (1):"));

    cli_cmd(&data_dir, &url).arg("receipts").assert().success();

    let log = stub.log();
    assert!(log[0].starts_with("GET /api/receipts?all=true "));
    assert!(log[1].starts_with("GET /api/receipts "));
}

#[test]
fn test_share_prints_url() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["share", "r1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://share.test/r1"));
}

// ============================================================================
// Identity mirror
// ============================================================================

#[test]
fn test_identity_persists_across_invocations() {
    let (stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url)
        .args(["identity", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No player id stored yet."));

    cli_cmd(&data_dir, &url).arg("quests").assert().success();

    cli_cmd(&data_dir, &url)
        .args(["identity", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Player ID: p-cli"));

    // The next process sends the mirrored id
    cli_cmd(&data_dir, &url).arg("state").assert().success();

    let log = stub.log();
    assert_eq!(log[0], "GET /api/quests -");
    assert_eq!(log[1], "GET /api/state p-cli");
}

#[test]
fn test_identity_forget() {
    let (_stub, url) = spawn_stub();
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir, &url).arg("quests").assert().success();

    cli_cmd(&data_dir, &url)
        .args(["identity", "forget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forgot player id."));

    cli_cmd(&data_dir, &url)
        .args(["identity", "forget"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No player id stored."));
}

#[test]
fn test_unreachable_backend_fails_with_operation() {
    let data_dir = TempDir::new().unwrap();
    // Bind then drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    cli_cmd(&data_dir, &format!("http://127.0.0.1:{}", port))
        .arg("quests")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command failed"))
        .stderr(predicate::str::contains("Failed to fetch quests"));
}
