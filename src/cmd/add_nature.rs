//! Converting selected projects by adding a nature to them.

use anyhow::{bail, Result};

use crate::cmd::report;
use crate::core::nature;
use crate::core::session::{AppSession, SessionOptions};
use crate::core::workspace::Selectable;
use crate::utils::theme::{header, highlight, step_message, warning_message};

pub fn run(options: &SessionOptions, nature_id: Option<String>, items: Vec<String>) -> Result<i32> {
    let mut sess = AppSession::initialize(options)?;
    let nature_id = nature_id.unwrap_or_else(|| sess.config.nature.id.clone());

    let mut selection: Vec<Selectable> = Vec::with_capacity(items.len());
    for item in &items {
        match sess.workspace().resolve(item)? {
            Some(selected) => selection.push(selected),
            None => bail!("`{}` is neither a project nor a file in the workspace", item),
        }
    }

    println!("{}", header(&format!("Adding nature {}", highlight(&nature_id))));

    let dry_run = sess.dry_run;
    let tags = nature::tag_selection(sess.workspace_mut(), &selection, &nature_id);

    for skipped in &tags.skipped {
        println!(
            "  {}",
            warning_message(&format!("{skipped} is not a project, skipped"))
        );
    }
    for file in tags.report.unchanged() {
        println!(
            "  {}",
            step_message(&format!("{} already has the nature", file.project.name))
        );
    }

    let failed = report::print(&tags.report, "tagged", dry_run);
    Ok(if failed > 0 { 1 } else { 0 })
}
