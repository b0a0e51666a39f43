//! Integration tests for the `skills` binary.
//!
//! Each test runs the binary against a fresh store in a temporary
//! directory. `SKILLS_CONFIG` points at a path inside that directory so a
//! user's own config never leaks in.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    fn store_root(&self) -> std::path::PathBuf {
        self.dir.path().join("store")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("skills").expect("binary built");
        cmd.current_dir(self.dir.path())
            .env("SKILLS_CONFIG", self.dir.path().join("config.toml"))
            .env_remove("MINIONS_STORE")
            .env_remove("SKILLS_LOG")
            .arg("--store")
            .arg(self.store_root());
        cmd
    }

    /// Create a record and return its id.
    fn create(&self, slug: &str, data: &str) -> String {
        let output = self
            .cmd()
            .args(["-q", "create", slug, "-d", data])
            .output()
            .expect("run create");
        assert!(output.status.success(), "create failed: {:?}", output);
        String::from_utf8(output.stdout)
            .expect("utf-8 output")
            .trim()
            .to_string()
    }
}

// =============================================================================
// Types
// =============================================================================

#[test]
fn types_list_shows_builtin_types() {
    let env = TestEnv::new();
    env.cmd()
        .args(["types", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 types available"))
        .stdout(predicate::str::contains("skill-definition"))
        .stdout(predicate::str::contains("skill-assignment"))
        .stdout(predicate::str::contains("skill-result"));
}

#[test]
fn types_show_lists_fields() {
    let env = TestEnv::new();
    env.cmd()
        .args(["types", "show", "skill-result"])
        .assert()
        .success()
        .stdout(predicate::str::contains("qualityScore"))
        .stdout(predicate::str::contains("number"));
}

#[test]
fn types_show_unknown_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["types", "show", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown type: nope"))
        .stderr(predicate::str::contains("skill-definition"));
}

// =============================================================================
// Create / Show / List
// =============================================================================

#[test]
fn create_writes_record_file() {
    let env = TestEnv::new();
    let id = env.create("skill-definition", r#"{"name": "summarize"}"#);

    env.dir
        .child("store")
        .child("skill-definition")
        .child(format!("{}.json", id))
        .assert(predicate::path::is_file())
        .assert(predicate::str::contains("\"typeName\": \"Skill definition\""));
}

#[test]
fn create_title_and_status_shortcuts() {
    let env = TestEnv::new();
    let output = env
        .cmd()
        .args(["-q", "create", "skill-definition", "-t", "Summarize", "-s", "draft"])
        .output()
        .expect("run create");
    assert!(output.status.success());
    let id = String::from_utf8(output.stdout).unwrap().trim().to_string();

    env.cmd()
        .args(["show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Summarize\""))
        .stdout(predicate::str::contains("\"status\": \"draft\""));
}

#[test]
fn create_from_file() {
    let env = TestEnv::new();
    let file = env.dir.child("fields.json");
    file.write_str(r#"{"agentId": "agent-7"}"#).unwrap();

    env.cmd()
        .arg("create")
        .arg("skill-assignment")
        .arg("-f")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    env.cmd()
        .args(["list", "skill-assignment", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agent-7"));
}

#[test]
fn create_unknown_type_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["create", "widget", "-d", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown type: widget"));

    env.dir.child("store").assert(predicate::path::missing());
}

#[test]
fn create_malformed_data_fails_without_writing() {
    let env = TestEnv::new();
    env.cmd()
        .args(["create", "skill-result", "-d", "{not json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("malformed input"));

    env.cmd()
        .args(["create", "skill-result", "-d", r#"{"tags": [1]}"#])
        .assert()
        .failure();

    env.dir.child("store").assert(predicate::path::missing());
}

#[test]
fn show_missing_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("record not found: does-not-exist"));
}

#[test]
fn show_rejects_path_like_id() {
    let env = TestEnv::new();
    env.cmd()
        .args(["show", "../secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid record id"));
}

#[test]
fn list_empty_store() {
    let env = TestEnv::new();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records found."));

    env.cmd()
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn list_shows_titles_and_status() {
    let env = TestEnv::new();
    env.create("skill-definition", r#"{"name": "translate", "status": "active"}"#);

    env.cmd()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 record(s)"))
        .stdout(predicate::str::contains("translate [active]"));
}

// =============================================================================
// Update / Delete
// =============================================================================

#[test]
fn update_merges_fields() {
    let env = TestEnv::new();
    let id = env.create("skill-definition", r#"{"name": "a", "version": "1"}"#);

    env.cmd()
        .args(["update", &id, "-d", r#"{"version": "2"}"#, "-s", "active"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated a"));

    env.cmd()
        .args(["show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"a\""))
        .stdout(predicate::str::contains("\"version\": \"2\""))
        .stdout(predicate::str::contains("\"status\": \"active\""));
}

#[test]
fn soft_delete_then_hard_delete() {
    let env = TestEnv::new();
    let id = env.create("skill-result", r#"{"passed": true}"#);

    env.cmd()
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));

    env.cmd()
        .args(["show", &id, "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"cancelled\""));

    env.cmd()
        .args(["delete", &id, "--hard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Permanently deleted"));

    env.cmd().args(["show", &id]).assert().failure();
}

// =============================================================================
// Validate / Stats
// =============================================================================

#[test]
fn validate_reports_findings() {
    let env = TestEnv::new();
    let file = env.dir.child("draft.json");
    file.write_str(
        r#"{"type": "skill-assignment", "fields": {"agentId": "a", "isActive": "yes", "extra": 1}}"#,
    )
    .unwrap();

    env.cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Missing field: skillId"))
        .stdout(predicate::str::contains("Unknown field: extra"))
        .stdout(predicate::str::contains(
            "Field isActive should be boolean, got string",
        ));
}

#[test]
fn validate_conforming_file() {
    let env = TestEnv::new();
    let file = env.dir.child("ok.json");
    file.write_str(
        r#"{"type": "skill-assignment", "fields": {
            "agentId": "a", "skillId": "s", "assignedAt": "now",
            "assignedBy": "me", "isActive": true}}"#,
    )
    .unwrap();

    env.cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid"));
}

#[test]
fn validate_json_output() {
    let env = TestEnv::new();
    let file = env.dir.child("draft.json");
    file.write_str(r#"{"type": "skill-result", "fields": {"qualityScore": "high"}}"#)
        .unwrap();

    env.cmd()
        .arg("validate")
        .arg(file.path())
        .arg("--json")
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"valid\": false"))
        .stdout(predicate::str::contains("\"kind\": \"type_mismatch\""));
}

#[test]
fn stats_counts_per_type() {
    let env = TestEnv::new();
    for _ in 0..3 {
        env.create("skill-definition", "{}");
    }

    env.cmd()
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total\": 3"));

    env.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("███"))
        .stdout(predicate::str::contains("Total: 3 record(s)"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn store_env_is_used_without_flag() {
    let env = TestEnv::new();
    let root = env.dir.path().join("from-env");

    Command::cargo_bin("skills")
        .unwrap()
        .current_dir(env.dir.path())
        .env("SKILLS_CONFIG", env.dir.path().join("config.toml"))
        .env("MINIONS_STORE", &root)
        .args(["create", "skill-result", "-d", "{}"])
        .assert()
        .success();

    assert!(root.join("skill-result").is_dir());
}

#[test]
fn config_set_then_get() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "set", "output.json", "true"])
        .assert()
        .success();

    env.dir
        .child("config.toml")
        .assert(predicate::str::contains("json = true"));

    env.cmd()
        .args(["config", "get", "output.json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("true\n"));

    // JSON output is now the default.
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn config_output_ignores_quiet() {
    let env = TestEnv::new();
    env.cmd()
        .args(["-q", "config", "set", "store.root", "/data/minions"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    env.cmd()
        .args(["-q", "config", "get", "store.root"])
        .assert()
        .success()
        .stdout(predicate::str::diff("/data/minions\n"));

    env.cmd()
        .args(["-q", "config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Loaded from "))
        .stdout(predicate::str::contains("store.root = /data/minions"))
        .stdout(predicate::str::contains("output.json = (not set)"))
        .stdout(predicate::str::contains("# effective store root: "));
}

#[test]
fn config_unknown_key_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["config", "set", "store.colour", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn completion_generates_script() {
    let env = TestEnv::new();
    env.cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skills"));
}
