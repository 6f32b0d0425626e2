//! Temporary workspace for CLI tests
//!
//! Every CLI invocation passes `--config` pointing into the workspace, so a
//! configuration file in the developer's home directory never leaks into
//! test output.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// A temporary directory holding an optional config file and source files
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create an empty workspace (no config file: defaults apply)
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Create a workspace whose config file has the given TOML content
    pub fn with_config(content: &str) -> Self {
        let workspace = Self::new();
        fs::write(workspace.config_path(), content).expect("Failed to write config");
        workspace
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    /// Add a source file and return its path
    pub fn add_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_docblock"));
        command
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .env_remove("DOCBLOCK_CONFIG")
            .arg("--config")
            .arg(self.config_path())
            .args(args);
        command
    }

    /// Run the CLI with the given arguments
    pub fn run_cli(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to run CLI")
    }

    /// Run the CLI with `input` on stdin
    pub fn run_cli_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for CLI")
    }

    /// Run CLI and expect success, return stdout
    pub fn run_cli_success(&self, args: &[&str]) -> String {
        let output = self.run_cli(args);
        assert!(
            output.status.success(),
            "CLI command {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run CLI and expect failure, return the exit code and stderr
    pub fn run_cli_failure(&self, args: &[&str]) -> (i32, String) {
        let output = self.run_cli(args);
        assert!(
            !output.status.success(),
            "CLI command {:?} should have failed",
            args
        );
        (
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}
