//! Acquiring user input, kept apart from the transformations themselves.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{CliError, Result};
use crate::utils::theme::info_message;

pub fn is_interactive_terminal() -> bool {
    std::io::stdout().is_terminal() && std::io::stdin().is_terminal()
}

pub trait Prompter {
    /// Asks for a line of text. Dismissing the prompt or leaving the answer
    /// empty is a cancellation.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Shows a closing informational message.
    fn message(&self, text: &str);
}

#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }

        match input.interact_text() {
            Ok(answer) if answer.trim().is_empty() => Err(CliError::UserCancelled),
            Ok(answer) => Ok(answer.trim().to_string()),
            Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => {
                Err(CliError::UserCancelled)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn message(&self, text: &str) {
        println!("\n{}", info_message(text));
    }
}

/// Used when no terminal is attached: every prompt counts as dismissed.
#[derive(Debug, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn input(&self, prompt: &str, _default: Option<&str>) -> Result<String> {
        tracing::debug!("cannot prompt `{}` without a terminal", prompt);
        Err(CliError::UserCancelled)
    }

    fn message(&self, text: &str) {
        println!("{}", info_message(text));
    }
}

pub fn default_prompter() -> Box<dyn Prompter> {
    if is_interactive_terminal() {
        Box::new(TerminalPrompter)
    } else {
        Box::new(NonInteractive)
    }
}

/// Returns `value` if given, otherwise asks for it.
pub fn value_or_prompt(
    prompter: &dyn Prompter,
    value: Option<String>,
    prompt: &str,
    default: Option<&str>,
) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => prompter.input(prompt, default),
    }
}
