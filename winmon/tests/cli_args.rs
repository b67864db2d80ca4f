//! CLI arg parsing tests for the winmon binary
use std::process::Command;

fn run_winmon(args: &[&str]) -> (bool, String, String) {
    let td = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_winmon"))
        .arg("--data-dir")
        .arg(td.path())
        .args(args)
        .env_remove("WINMON_BACKEND_URL")
        .env_remove("WINMON_PASSWORD")
        .output()
        .expect("run winmon");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_help_mentions_global_flags_and_commands() {
    let (ok, out, _) = run_winmon(&["--help"]);
    assert!(ok);
    for needle in ["--backend", "--timeout", "--data-dir", "monitor", "list", "export", "delete", "clear"] {
        assert!(out.contains(needle), "help text missing {needle}\n{out}");
    }
}

#[test]
fn test_monitor_help_mentions_short_and_long_flags() {
    let (ok, out, _) = run_winmon(&["monitor", "--help"]);
    assert!(ok);
    for needle in ["--server", "-s", "--username", "-u", "--password", "--port", "--transport", "--saved", "--no-save"] {
        assert!(out.contains(needle), "monitor help missing {needle}\n{out}");
    }
    assert!(out.contains("kerberos"));
}

#[test]
fn test_out_of_range_port_rejected_before_network() {
    // the backend points at a closed port; a network attempt would say "Network error"
    let (ok, _out, err) = run_winmon(&[
        "--backend",
        "http://127.0.0.1:9",
        "--timeout",
        "2",
        "monitor",
        "-s",
        "10.0.0.5",
        "-u",
        "admin",
        "-p",
        "x",
        "--port",
        "70000",
    ]);
    assert!(!ok);
    assert!(err.contains("Valid port number (1-65535) is required"), "{err}");
    assert!(!err.contains("Network error"), "{err}");
}

#[test]
fn test_blank_server_rejected_before_network() {
    let (ok, _out, err) = run_winmon(&[
        "--backend",
        "http://127.0.0.1:9",
        "monitor",
        "-s",
        "  ",
        "-u",
        "admin",
        "-p",
        "x",
    ]);
    assert!(!ok);
    assert!(err.contains("Server IP or hostname is required"), "{err}");
}

#[test]
fn test_bad_backend_url_is_reported() {
    let (ok, _out, err) = run_winmon(&["--backend", "not a url", "list"]);
    assert!(!ok);
    assert!(err.contains("invalid --backend"), "{err}");
}

#[test]
fn test_unreachable_backend_reports_network_error() {
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let backend = format!("http://127.0.0.1:{port}");
    let (ok, _out, err) = run_winmon(&[
        "--backend", &backend, "monitor", "-s", "10.0.0.5", "-u", "admin", "-p", "x",
    ]);
    assert!(!ok);
    assert!(err.contains("Network error. Make sure the backend server is running on"), "{err}");
}

#[test]
fn test_version_flag() {
    let assert = assert_cmd::Command::cargo_bin("winmon")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(out.starts_with("winmon "), "{out}");
}
