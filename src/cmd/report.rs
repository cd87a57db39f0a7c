use crate::core::rewriter::{Outcome, RunReport};
use crate::utils::theme::{dimmed, error_message, success_message};

/// Prints one line per acted-on file plus a summary, and returns the number
/// of files that failed.
pub fn print(report: &RunReport, verb: &str, dry_run: bool) -> usize {
    let verb = if dry_run { "would modify" } else { verb };

    let mut modified = 0;
    let mut unchanged = 0;
    let mut failed = 0;

    for entry in &report.entries {
        match &entry.result {
            Ok(Outcome::Modified) => {
                modified += 1;
                println!("  {}", success_message(&format!("{verb} {}", entry.file)));
            }
            Ok(Outcome::Unchanged) => unchanged += 1,
            Err(e) => {
                failed += 1;
                eprintln!("  {}", error_message(&format!("{}: {}", entry.file, e)));
            }
        }
    }

    let mut summary = format!("{modified} modified, {unchanged} unchanged");
    if failed > 0 {
        summary.push_str(&format!(", {failed} failed"));
    }
    println!("  {}", dimmed(&summary));

    failed
}
