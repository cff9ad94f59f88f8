//! Fluent wrapper around assert_cmd::Command.

#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `classnotes` binary.
pub struct ClassnotesCommand {
    args: Vec<String>,
    stdin: Option<String>,
}

impl ClassnotesCommand {
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            stdin: None,
        }
    }

    /// Sets the `--dir` option to point at a data directory.
    pub fn dir(mut self, path: &Path) -> Self {
        self.args.push("--dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Feeds `input` to the process on stdin.
    pub fn stdin(mut self, input: impl Into<String>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("classnotes").expect("Failed to find classnotes binary");
        cmd.args(&self.args);
        if let Some(input) = self.stdin {
            cmd.write_stdin(input);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures `ls` for one semester.
    pub fn ls_semester(self, semester: u32) -> Self {
        self.args(["ls", "--semester", &semester.to_string()])
    }

    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    pub fn fav(self, id: &str) -> Self {
        self.args(["fav", id])
    }

    pub fn sync(self) -> Self {
        self.args(["sync"])
    }

    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    pub fn format_html(self) -> Self {
        self.args(["--format", "html"])
    }
}

impl Default for ClassnotesCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_command_runs_binary() {
        ClassnotesCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_with_dir() {
        let temp = TempDir::new().unwrap();
        let cmd = ClassnotesCommand::new().dir(temp.path());
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], temp.path().to_string_lossy());
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ClassnotesCommand::new().ls_semester(3).format_json();
        assert_eq!(
            cmd.get_args(),
            ["ls", "--semester", "3", "--format", "json"]
        );
    }
}
