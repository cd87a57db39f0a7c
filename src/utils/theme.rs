//! Terminal styling for progress and summary lines.

use owo_colors::{OwoColorize, Rgb};

const ACCENT: Rgb = Rgb(114, 227, 173);
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Success,
    Error,
    Warning,
    Info,
    Step,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Error => "✗",
            Tone::Warning => "⚠",
            Tone::Info => "ℹ",
            Tone::Step => "→",
        }
    }

    fn color(self) -> Rgb {
        match self {
            Tone::Success | Tone::Step => ACCENT,
            Tone::Error => Rgb(202, 50, 20),
            Tone::Warning => Rgb(245, 158, 11),
            Tone::Info => Rgb(59, 130, 246),
        }
    }

    fn line(self, msg: &str) -> String {
        let icon = self.icon();
        let icon = icon.color(self.color());
        match self {
            Tone::Step => format!("{} {}", icon, msg.dimmed()),
            _ => format!("{} {}", icon.bold(), msg),
        }
    }
}

pub fn dimmed(text: &str) -> String {
    format!("{}", text.dimmed())
}

pub fn header(text: &str) -> String {
    format!(
        "\n{}\n{}",
        text.bold().color(ACCENT),
        "─".repeat(RULE_WIDTH).dimmed()
    )
}

pub fn highlight(text: &str) -> String {
    format!("{}", text.color(ACCENT).bold())
}

pub fn success_message(msg: &str) -> String {
    Tone::Success.line(msg)
}

pub fn error_message(msg: &str) -> String {
    Tone::Error.line(msg)
}

pub fn warning_message(msg: &str) -> String {
    Tone::Warning.line(msg)
}

pub fn info_message(msg: &str) -> String {
    Tone::Info.line(msg)
}

pub fn step_message(msg: &str) -> String {
    Tone::Step.line(msg)
}

/// Prints the `[current/total]` heading of one stage of a multi-stage command.
pub fn print_phase(current: usize, total: usize, message: &str) {
    println!(
        "\n{} {}",
        format!("[{current}/{total}]").color(ACCENT).bold(),
        message.bold()
    );
}
