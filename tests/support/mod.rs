use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway data directory plus helpers for driving the tdl binary
/// against it.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A tdl command pointed at this home's data directory
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tdl").expect("tdl binary");
        cmd.env("TDL_DATA_DIR", self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run a command with `--json`, assert success, and parse the envelope
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json envelope")
    }

    /// Add an item and return its id
    pub fn add_item(&self, category: &str, title: &str, description: &str) -> String {
        let value = self.json(&["add", category, title, description]);
        value["data"]["item"]["id"]
            .as_str()
            .expect("item id")
            .to_string()
    }

    /// Write a `tdl.toml` into the data directory
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(self.dir.path()).expect("data dir");
        std::fs::write(self.dir.path().join("tdl.toml"), contents).expect("write config");
    }
}
