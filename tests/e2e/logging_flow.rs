//! End-to-end tests driving the `logline` binary.

use std::io;
use std::process::{Command, Output};

const ENV_CONFIG_PATH: &str = "LOGLINE_CONFIG_PATH";

fn run_logline(args: &[&str]) -> io::Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_logline"))
        .args(args)
        .env_remove(ENV_CONFIG_PATH)
        .output()
}

fn stdout_json(output: &Output) -> io::Result<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim())
        .map_err(|error| io::Error::other(format!("stdout is not JSON: {error}\n{stdout}")))
}

fn record_line(stderr: &str) -> Option<&str> {
    stderr
        .lines()
        .find(|line| line.trim_start().starts_with('{') && line.contains("\"severity\""))
}

#[test]
fn emit_pushes_a_structured_record_through_the_pipeline() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("logging.toml");
    std::fs::write(&config, "rootLevel = \"debug\"\n")?;
    let config_arg = config.to_string_lossy().to_string();

    let output = run_logline(&[
        "emit",
        "--config",
        config_arg.as_str(),
        "--level",
        "info",
        "--message",
        "e2e check",
        "--component",
        "api",
        "--operation",
        "fetch",
        "--context",
        "traceId=t-1",
        "--context",
        "attempt=2",
        "--context",
        "cacheHit=true",
        "--output",
        "json",
        "--no-progress",
    ])?;

    assert_eq!(output.status.code(), Some(0));

    let summary = stdout_json(&output)?;
    assert_eq!(summary["status"], "ok");
    assert_eq!(summary["published"], true);
    assert_eq!(summary["configSource"], "explicit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let line = record_line(&stderr)
        .ok_or_else(|| io::Error::other(format!("no record on stderr:\n{stderr}")))?;
    let record: serde_json::Value = serde_json::from_str(line).map_err(io::Error::other)?;

    assert_eq!(record["severity"], "INFO");
    assert_eq!(record["message"], "api fetch: e2e check");
    assert_eq!(record["traceId"], "t-1");
    assert_eq!(record["attempt"], 2);
    assert_eq!(record["cacheHit"], true);
    assert!(record["thread"].is_string());
    assert!(record["timestamp"]["seconds"].is_i64());
    let nanos = record["timestamp"]["nanos"].as_i64().unwrap_or(-1);
    assert!((0..1_000_000_000).contains(&nanos));
    Ok(())
}

#[test]
fn emit_below_the_effective_level_is_dropped() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("logging.toml");
    std::fs::write(&config, "rootLevel = \"error\"\n")?;
    let config_arg = config.to_string_lossy().to_string();

    let output = run_logline(&[
        "emit",
        "--config",
        config_arg.as_str(),
        "--level",
        "info",
        "--message",
        "quiet",
        "--output",
        "json",
        "--no-progress",
    ])?;

    assert_eq!(output.status.code(), Some(0));
    let summary = stdout_json(&output)?;
    assert_eq!(summary["published"], false);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        record_line(&stderr).is_none(),
        "unexpected record on stderr:\n{stderr}"
    );
    Ok(())
}

#[test]
fn check_rejects_a_broken_config_with_exit_code_two() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("broken.toml");
    std::fs::write(&config, "rootLevel = [oops")?;
    let config_arg = config.to_string_lossy().to_string();

    let output = run_logline(&[
        "check",
        "--config",
        config_arg.as_str(),
        "--output",
        "json",
        "--no-progress",
    ])?;

    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"]["namespace"], "config");
    assert_eq!(value["error"]["code"]["code"], "invalid_toml");
    Ok(())
}

#[test]
fn show_falls_back_to_the_builtin_defaults() -> io::Result<()> {
    let output = run_logline(&["show", "--output", "json", "--no-progress"])?;

    assert_eq!(output.status.code(), Some(0));
    let value = stdout_json(&output)?;
    assert_eq!(value["effectiveConfig"]["version"], 1);
    assert_eq!(value["effectiveConfig"]["rootLevel"], "info");
    Ok(())
}

#[test]
fn show_reads_the_env_config_path() -> io::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = dir.path().join("logging.json");
    std::fs::write(&config, r#"{ "rootLevel": "debug" }"#)?;

    let output = Command::new(env!("CARGO_BIN_EXE_logline"))
        .args(["show", "--output", "json", "--no-progress"])
        .env(ENV_CONFIG_PATH, &config)
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let value = stdout_json(&output)?;
    assert_eq!(value["effectiveConfig"]["rootLevel"], "debug");
    Ok(())
}

#[test]
#[cfg(any(debug_assertions, feature = "dev-tools"))]
fn self_check_is_deterministic() -> io::Result<()> {
    let first = run_logline(&["self-check", "--json"])?;
    let second = run_logline(&["self-check", "--json"])?;

    assert_eq!(first.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&first.stdout),
        String::from_utf8_lossy(&second.stdout)
    );
    Ok(())
}
