//! Tests for the `fieldarity` binary.
//!
//! Each test points the binary at a temporary config directory so a real
//! user config never leaks in.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const TYPES_TOML: &str = r#"
[scalars]
extra = ["Email"]

[types.Email]
fields = [{ name = "User", type = "String" }, { name = "Domain", type = "String" }]

[types.Level]
underlying = "bool"
text_decoder = true

[types.Opts]
fields = [
    { name = "Verbose", type = "bool" },
    { name = "Level", type = "Level" },
    { name = "Contact", type = "Option<Email>" },
    { name = "Tags", type = "Vec<String>" },
    { name = "secret", type = "Receiver<u8>" },
]
"#;

fn fieldarity_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fieldarity"));
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("FIELDARITY_LOG");
    cmd
}

fn with_config() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("types.toml");
    std::fs::write(&config_path, TYPES_TOML).expect("Failed to write config");
    (temp_dir, config_path)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let text = stdout(&output);
    assert!(output.status.success());
    for sub in ["classify", "fields", "zero", "exported"] {
        assert!(text.contains(sub), "help is missing {}", sub);
    }
}

#[test]
fn test_classify_builtin_types_without_config() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .args(["classify", "Vec<i32>", "Option<bool>", "HashMap<String, i32>"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Vec<i32>: multiple\nOption<bool>: zero (presence flag)\nHashMap<String, i32>: multiple\n"
    );
}

#[test]
fn test_classify_unsupported_exits_with_failure() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .args(["classify", "HashMap<String, Receiver<i32>>"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("because value type Receiver<i32> not supported"));
}

#[test]
fn test_classify_declared_types_as_json() {
    let (_dir, config) = with_config();
    let output = fieldarity_cmd(config.parent().unwrap())
        .arg("--config")
        .arg(&config)
        .args(["--format", "json", "classify", "Level", "Option<Email>"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(reports[0]["cardinality"], "one");
    assert_eq!(reports[0]["text_decodable"], true);
    assert_eq!(reports[1]["cardinality"], "one");
    assert_eq!(reports[1]["presence_flag"], false);
}

#[test]
fn test_fields_skips_unexported() {
    let (_dir, config) = with_config();
    let output = fieldarity_cmd(config.parent().unwrap())
        .arg("--config")
        .arg(&config)
        .args(["fields", "Opts"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Verbose: zero (bool)\nLevel: one (Level)\nContact: one (Option<Email>)\nTags: multiple (Vec<String>)\n"
    );
}

#[test]
fn test_zero_checks_json_values() {
    let (_dir, config) = with_config();
    let run = |ty: &str, json: &str| {
        let output = fieldarity_cmd(config.parent().unwrap())
            .arg("--config")
            .arg(&config)
            .args(["zero", ty, json])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        stdout(&output).trim().to_string()
    };

    assert_eq!(run("Option<Vec<i32>>", "null"), "true");
    assert_eq!(run("Vec<i32>", "[]"), "false");
    assert_eq!(run("Email", "{}"), "true");
    assert_eq!(run("Email", r#"{"User":"root"}"#), "false");
    assert_eq!(run("i64", "-1"), "false");
}

#[test]
fn test_invalid_type_expression_reports_error() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .args(["classify", "Vec<Widget>"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Invalid type expression 'Vec<Widget>'"));
    assert!(stderr.contains("unknown type 'Widget' at offset 4"));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .arg("--config")
        .arg(home.path().join("nope.toml"))
        .args(["exported", "Count"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_exported_names() {
    let home = TempDir::new().unwrap();
    let output = fieldarity_cmd(home.path())
        .args(["exported", "Count", "count", "Ωmega"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        stdout(&output),
        "Count: exported\ncount: unexported\nΩmega: exported\n"
    );
}

#[test]
fn test_deeply_nested_type_is_an_error_not_a_crash() {
    let home = TempDir::new().unwrap();
    let expr = format!("{}i32{}", "Vec<".repeat(2_000), ">".repeat(2_000));
    let output = fieldarity_cmd(home.path())
        .args(["classify", &expr])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("type nests deeper than 64 levels"));
}
