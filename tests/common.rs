#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

pub struct TestWorkspace {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().to_path_buf();
        Self { _dir: dir, path }
    }

    pub fn write_file(&self, relative_path: &str, content: &str) {
        let full_path = self.path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dirs");
        }
        std::fs::write(full_path, content).expect("failed to write file");
    }

    /// Creates a project folder with a `.project` descriptor.
    pub fn add_project(&self, relative_dir: &str, name: &str, natures: &[&str]) {
        let natures: String = natures
            .iter()
            .map(|n| format!("\t\t<nature>{n}</nature>\n"))
            .collect();
        self.write_file(
            &format!("{relative_dir}/.project"),
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<projectDescription>\n\t<name>{name}</name>\n\t<comment></comment>\n\t<projects>\n\t</projects>\n\t<natures>\n{natures}\t</natures>\n</projectDescription>\n"
            ),
        );
    }

    #[must_use]
    pub fn read_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.path.join(relative_path)).expect("failed to read file")
    }

    #[must_use]
    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.path.join(relative_path).exists()
    }

    #[must_use]
    pub fn list_files_in_dir(&self, relative_dir: &str) -> Vec<String> {
        let dir_path = self.path.join(relative_dir);
        if !dir_path.exists() {
            return Vec::new();
        }
        let mut names: Vec<String> = std::fs::read_dir(dir_path)
            .map(|entries| {
                entries
                    .filter_map(std::result::Result::ok)
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[must_use]
    pub fn run_releng_command(&self, args: &[&str]) -> Output {
        self.run_releng_command_with_env(args, &[])
    }

    #[must_use]
    pub fn run_releng_command_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Output {
        let releng_bin = env!("CARGO_BIN_EXE_releng");

        let mut cmd = Command::new(releng_bin);
        cmd.args(["--no-color"])
            .args(args)
            .current_dir(&self.path)
            .env("XDG_CONFIG_HOME", self.path.join(".xdg-config"));

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        cmd.output().expect("failed to run releng command")
    }
}

#[must_use]
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[must_use]
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
