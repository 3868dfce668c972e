use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Binary isolated from any config file on the host
fn toolmcp(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("toolmcp").unwrap();
    cmd.current_dir(home.path())
        .env_remove("TOOLMCP_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .args(["--log-level", "error"]);
    cmd
}

fn exchange(cmd: &mut Command, requests: &[&str]) -> Vec<Value> {
    let mut input = requests.join("\n");
    input.push('\n');

    let output = cmd.write_stdin(input).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_full_session() {
    let home = TempDir::new().unwrap();
    let responses = exchange(
        &mut toolmcp(&home),
        &[
            r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"0"}}}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"calculator_add","arguments":{"a":2,"b":3}}}"#,
        ],
    );

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "toolmcp");

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names.first(), Some(&"calculator_add"));
    assert!(names.contains(&"string_touppercase"));
    assert!(names.contains(&"crypto_sha256hash"));
    assert!(!names.iter().any(|n| n.starts_with("systemlog_")));
    for tool in tools {
        assert!(tool["inputSchema"]["properties"].is_object(), "tool: {}", tool["name"]);
    }

    assert_eq!(
        responses[2],
        json!({"jsonrpc": "2.0", "id": 2, "result": {"content": [{"type": "text", "text": "5"}]}})
    );
}

#[test]
fn test_error_tiers() {
    let home = TempDir::new().unwrap();
    let responses = exchange(
        &mut toolmcp(&home),
        &[
            "this is not json",
            r#"{"jsonrpc":"2.0","id":"a","method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
            r#"{"jsonrpc":"2.0","id":"b","method":"prompts/list"}"#,
            r#"{"jsonrpc":"2.0","id":"c","method":"tools/call","params":{"name":"calculator_divide","arguments":{"a":10,"b":0}}}"#,
        ],
    );

    assert_eq!(responses.len(), 4);

    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[0]["error"]["code"], -32700);

    assert_eq!(responses[1]["id"], "a");
    assert_eq!(responses[1]["result"]["isError"], true);
    assert!(responses[1]["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("nope"));

    assert_eq!(responses[2]["id"], "b");
    assert_eq!(responses[2]["error"]["code"], -32601);

    assert_eq!(responses[3]["id"], "c");
    assert!(responses[3]["result"].get("isError").is_none());
    assert_eq!(responses[3]["result"]["content"][0]["text"], "Error: division by zero");
}

#[test]
fn test_config_file_and_database() {
    let home = TempDir::new().unwrap();
    let database = home.path().join("issues.db");
    let config = home.path().join("toolmcp.toml");
    std::fs::write(
        &config,
        format!(
            "[server]\nname = \"demo\"\nerror_prefix = \"Error: \"\n\n[providers]\nenabled = [\"systemlog\"]\n\n[system_log]\ndatabase = {:?}\n",
            database.to_string_lossy()
        ),
    )
    .unwrap();

    let mut cmd = toolmcp(&home);
    cmd.arg("--config").arg(&config);
    let responses = exchange(
        &mut cmd,
        &[
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"SystemLog_getSystemLog"}}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"calculator_add"}}"#,
        ],
    );

    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "demo");
    assert_eq!(responses[1]["result"]["content"][0]["text"], "No pending issue log found.");
    assert_eq!(responses[2]["result"]["content"][0]["text"], "Error: Unknown tool: calculator_add");
}

#[test]
fn test_list_tools_flag() {
    let home = TempDir::new().unwrap();
    toolmcp(&home)
        .arg("--list-tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculator_add\t"))
        .stdout(predicate::str::contains("user_createuser\t"));
}

#[test]
fn test_missing_config_file_fails() {
    let home = TempDir::new().unwrap();
    toolmcp(&home)
        .arg("--config")
        .arg(home.path().join("absent.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_empty_input_exits_cleanly() {
    let home = TempDir::new().unwrap();
    toolmcp(&home)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
