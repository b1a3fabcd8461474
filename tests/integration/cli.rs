//! The `stats-probe` binary: configuration precedence and exit codes

use std::io::Write;
use std::process::Output;

use pretty_assertions::assert_eq;
use stats_probe::monitors::poller::FATAL_MESSAGE;
use tokio::process::Command;
use wiremock::MockServer;

use crate::helpers::*;

const PROBE_VARS: [&str; 4] = [
    "PROBE_URL",
    "PROBE_INTERVAL_MS",
    "PROBE_TIMEOUT_MS",
    "PROBE_MAX_ERRORS",
];

/// The binary with every `PROBE_*` variable removed from its environment
fn probe_command() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_stats-probe"));
    for key in PROBE_VARS {
        command.env_remove(key);
    }
    command.kill_on_drop(true);
    command
}

async fn run_binary(command: &mut Command) -> Output {
    tokio::time::timeout(std::time::Duration::from_secs(20), command.output())
        .await
        .expect("binary should exit")
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stats_url(mock_server: &MockServer) -> String {
    format!("{}{STATS_PATH}", mock_server.uri())
}

#[tokio::test]
async fn test_once_success_exits_zero() {
    let mock_server = MockServer::start().await;
    serve_body(&mock_server, "1,100,85,100,10,100,10").await;

    let url = stats_url(&mock_server);
    let output = run_binary(probe_command().args(["--once", "--url", url.as_str()])).await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "Memory usage too high: 85%\n");
}

#[tokio::test]
async fn test_once_failure_exits_one() {
    let mock_server = MockServer::start().await;
    serve_sequence(&mock_server, vec![server_error()]).await;

    let url = stats_url(&mock_server);
    let output = run_binary(probe_command().args(["--once", "--url", url.as_str()])).await;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
}

#[tokio::test]
async fn test_invalid_url_is_a_startup_error() {
    for url in ["http://", "http:// bad host/_stats", "ftp://example.com/_stats"] {
        let output = run_binary(probe_command().args(["--url", url])).await;

        assert_eq!(output.status.code(), Some(1), "{url} should be rejected");
        assert_eq!(stdout(&output), "");
    }
}

#[tokio::test]
async fn test_giving_up_prints_fatal_line_and_exits_zero() {
    let mock_server = MockServer::start().await;
    serve_sequence(&mock_server, vec![server_error()]).await;

    let output = run_binary(probe_command().args([
        "--url",
        stats_url(&mock_server).as_str(),
        "--interval-ms",
        "10",
    ]))
    .await;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), format!("{FATAL_MESSAGE}\n"));
}

#[tokio::test]
async fn test_cli_beats_env_beats_file() {
    let mock_server = MockServer::start().await;
    serve_body(&mock_server, QUIET_BODY).await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "url": "http://127.0.0.1:9/_stats", "max_errors": 1, "interval_ms": 10 }}"#
    )
    .unwrap();
    let file_path = file.path().to_str().unwrap().to_string();

    // file and env both point at nothing, the CLI URL wins
    let output = run_binary(
        probe_command()
            .env("PROBE_URL", "http://127.0.0.1:9/_env")
            .args(["-f", file_path.as_str(), "--once"])
            .args(["--url", stats_url(&mock_server).as_str()]),
    )
    .await;
    assert_eq!(output.status.code(), Some(0));

    // env wins over the file
    let output = run_binary(
        probe_command()
            .env("PROBE_URL", stats_url(&mock_server))
            .args(["-f", file_path.as_str(), "--once"]),
    )
    .await;
    assert_eq!(output.status.code(), Some(0));

    // the file alone points at nothing
    let output = run_binary(probe_command().args(["-f", file_path.as_str(), "--once"])).await;
    assert_eq!(output.status.code(), Some(1));
}

#[tokio::test]
async fn test_unparseable_env_value_is_ignored() {
    let mock_server = MockServer::start().await;
    serve_sequence(&mock_server, vec![server_error()]).await;

    let output = run_binary(
        probe_command()
            .env("PROBE_MAX_ERRORS", "abc")
            .env("PROBE_INTERVAL_MS", "10")
            .args(["--url", stats_url(&mock_server).as_str()]),
    )
    .await;

    // falls back to the default of 3 errors and still gives up normally
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), format!("{FATAL_MESSAGE}\n"));
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 3);
}
