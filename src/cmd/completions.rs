use std::io::Write;

use clap::CommandFactory;
use clap_complete::Shell;
use owo_colors::OwoColorize;

use crate::cli::Cli;
use crate::core::config::{user_config_file, WORKSPACE_CONFIG_FILE};

/// Writes the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
}

pub fn generate(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

pub fn print_version() {
    println!(
        "{} {}",
        "releng".cyan().bold(),
        env!("CARGO_PKG_VERSION").green().bold()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
    println!();
    println!("{:<14} {}", "Target:".dimmed(), env!("TARGET"));
    println!("{:<14} {}", "Rustc:".dimmed(), env!("RUSTC_VERSION"));
    match user_config_file() {
        Some(path) => println!("{:<14} {}", "User config:".dimmed(), path.display()),
        None => println!("{:<14} {}", "User config:".dimmed(), "unavailable"),
    }
    println!("{:<14} <workspace>/{}", "Workspace:".dimmed(), WORKSPACE_CONFIG_FILE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_list_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("releng"));
        assert!(script.contains("update-version"));
        assert!(script.contains("add-nature"));
    }
}
