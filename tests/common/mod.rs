#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper struct to run sdesk commands in an isolated temp directory
pub struct SdeskTest {
    pub temp_dir: TempDir,
    binary_path: &'static str,
}

impl SdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        SdeskTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_sdesk"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(self.binary_path);
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("SDESK_ROOT")
            .env_remove("SDESK_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute sdesk command")
    }

    /// Run with `input` piped to stdin
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn sdesk command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for sdesk")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Run a command with `--json` and parse its stdout
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let mut args = args.to_vec();
        args.push("--json");
        let stdout = self.run_success(&args);
        serde_json::from_str(&stdout).expect("command output should be JSON")
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().join(".servicedesk")
    }

    pub fn storage_path(&self) -> PathBuf {
        self.root().join("storage").join("servicedesk_tickets.json")
    }

    pub fn read_storage(&self) -> String {
        fs::read_to_string(self.storage_path()).expect("Failed to read storage slot")
    }

    pub fn write_storage(&self, content: &str) {
        let path = self.storage_path();
        fs::create_dir_all(path.parent().unwrap()).expect("Failed to create storage directory");
        fs::write(path, content).expect("Failed to write storage slot");
    }

    /// Create a ticket and return its ID
    pub fn create(&self, name: &str, assignee: &str, extra: &[&str]) -> String {
        let mut args = vec!["create", name, "--assigned-to", assignee];
        args.extend_from_slice(extra);
        let ticket = self.run_json(&args);
        ticket["id"].as_str().expect("ticket has an id").to_string()
    }
}
