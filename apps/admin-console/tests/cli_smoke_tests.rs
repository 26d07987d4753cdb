//! CLI smoke tests for the admin-console binary
//!
//! Every test runs against its own temporary home directory, so the
//! file-backed slots start from the seed dataset.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run_console(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_admin-console"))
        .args(args)
        .env("HOME", home)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute admin-console")
}

/// Temp home plus a config file pointing `console.home_dir` at it.
fn console_home() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config_path = tmp.path().join("config.yaml");
    let home = tmp.path().to_string_lossy().replace('\\', "/");
    std::fs::write(
        &config_path,
        format!(
            r#"
console:
  home_dir: "{home}"
logging:
  default:
    console_level: "off"
    file: "logs/console.log"
    file_level: debug
"#
        ),
    )
    .expect("Failed to write config file");
    (tmp, config_path)
}

fn run_with_config(tmp: &TempDir, config: &Path, args: &[&str]) -> Output {
    let mut full = vec!["--config", config.to_str().unwrap()];
    full.extend_from_slice(args);
    run_console(tmp.path(), &full)
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).to_string()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).to_string()
}

#[test]
fn test_cli_help_command() {
    let tmp = TempDir::new().unwrap();
    let output = run_console(tmp.path(), &["--help"]);

    assert!(output.status.success(), "Help command should succeed");
    let out = stdout(&output);
    assert!(out.contains("Usage:"), "Should contain usage information");
    for sub in ["check", "login", "logout", "whoami", "roles", "stats", "users"] {
        assert!(out.contains(sub), "Should mention '{}' subcommand", sub);
    }
    assert!(out.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let tmp = TempDir::new().unwrap();
    let output = run_console(tmp.path(), &["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    assert!(stdout(&output).contains("admin-console 0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let tmp = TempDir::new().unwrap();
    let output = run_console(tmp.path(), &["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    assert!(stderr(&output).contains("error"));
}

#[test]
fn test_cli_config_validation_missing_file() {
    let tmp = TempDir::new().unwrap();
    let output = run_console(tmp.path(), &["--config", "/nonexistent/config.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let err = stderr(&output);
    assert!(err.contains("config file not found"), "stderr: {}", err);
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_with_config(&tmp, &config_path, &["check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_reports_seeded_store() {
    let (tmp, config) = console_home();
    let output = run_with_config(&tmp, &config, &["check"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Configuration check passed"));
    assert!(out.contains("users: 12"));
    assert!(tmp.path().join("data/users.json").exists());
    assert!(tmp.path().join("logs").is_dir());
}

#[test]
fn test_cli_print_config() {
    let (tmp, config) = console_home();
    let output = run_with_config(&tmp, &config, &["--print-config", "--memory"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("storage:"));
    assert!(out.contains("backend: memory"));
    assert!(out.contains("users_key: users"));
}

#[test]
fn test_cli_memory_backend_leaves_no_files() {
    let (tmp, config) = console_home();
    let output = run_with_config(&tmp, &config, &["--memory", "users", "list"]);

    assert!(output.status.success());
    assert!(!tmp.path().join("data/users.json").exists());
}

#[test]
fn test_cli_list_paginates_and_filters() {
    let (tmp, config) = console_home();

    let output = run_with_config(&tmp, &config, &["users", "list", "--page-size", "5"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Page 1 of 3 (12 users)"));

    let output = run_with_config(&tmp, &config, &["users", "list", "--search", "john"]);
    let out = stdout(&output);
    assert!(out.contains("John Doe"));
    assert!(out.contains("Robert Johnson"));
    assert!(out.contains("(2 users)"));

    let output = run_with_config(
        &tmp,
        &config,
        &["users", "list", "--status", "inactive", "--role", "all-roles"],
    );
    assert!(stdout(&output).contains("(3 users)"));

    let output = run_with_config(&tmp, &config, &["users", "list", "--status", "suspended"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("[error]"));
}

#[test]
fn test_cli_signed_out_mutation_is_denied() {
    let (tmp, config) = console_home();

    let output = run_with_config(&tmp, &config, &["users", "delete", "1"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("You don't have permission to delete users"));
    let output = run_with_config(&tmp, &config, &["stats"]);
    assert!(stdout(&output).contains("Total users:    12"));
}

#[test]
fn test_cli_denial_precedes_lookup_of_unknown_id() {
    let (tmp, config) = console_home();

    let output = run_with_config(&tmp, &config, &["--memory", "users", "delete", "no-such-id"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("You don't have permission to delete users"), "stderr: {}", err);
    assert!(!err.contains("not found"), "stderr: {}", err);

    run_with_config(&tmp, &config, &["login", "--email", "user@example.com"]);
    let output = run_with_config(&tmp, &config, &["users", "delete", "no-such-id"]);
    assert!(stderr(&output).contains("You don't have permission to delete users"));
}

#[test]
fn test_cli_manager_session_flow() {
    let (tmp, config) = console_home();

    let output = run_with_config(
        &tmp,
        &config,
        &["login", "--email", "manager@example.com", "--password", "x"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Signed in as Jane Smith"));

    let output = run_with_config(&tmp, &config, &["whoami"]);
    assert!(stdout(&output).contains("manager@example.com"));

    let output = run_with_config(
        &tmp,
        &config,
        &[
            "users", "create", "--name", "Ann Lee", "--email", "ann@example.com", "--role", "user",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("User Ann Lee created successfully"));

    let output = run_with_config(
        &tmp,
        &config,
        &["users", "update", "5", "--status", "inactive"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // Managers may not delete.
    let output = run_with_config(&tmp, &config, &["users", "delete", "3"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("You don't have permission to delete users"));

    let output = run_with_config(&tmp, &config, &["stats"]);
    let out = stdout(&output);
    assert!(out.contains("Total users:    13"));
    assert!(out.contains("Inactive users: 4"));

    let output = run_with_config(&tmp, &config, &["logout"]);
    assert!(output.status.success());
    let output = run_with_config(&tmp, &config, &["whoami"]);
    assert!(stdout(&output).contains("Not signed in"));
}

#[test]
fn test_cli_admin_can_delete() {
    let (tmp, config) = console_home();

    run_with_config(&tmp, &config, &["login", "--email", "admin@example.com"]);
    let output = run_with_config(&tmp, &config, &["users", "delete", "12"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("deleted successfully"));

    let output = run_with_config(&tmp, &config, &["users", "delete", "12"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("User not found: 12"));
}

#[test]
fn test_cli_rejects_unknown_login_and_role() {
    let (tmp, config) = console_home();

    let output = run_with_config(&tmp, &config, &["login", "--email", "nobody@example.com"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid email or password"));

    run_with_config(&tmp, &config, &["login", "--email", "admin@example.com"]);
    let output = run_with_config(
        &tmp,
        &config,
        &["users", "create", "--name", "X", "--email", "x@example.com", "--role", "root"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown role 'root'"));
}

#[test]
fn test_cli_roles_listing() {
    let (tmp, config) = console_home();
    let output = run_with_config(&tmp, &config, &["roles"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("admin"));
    assert!(out.contains("manage-roles"));
    assert!(out.contains("view-users"));
}
