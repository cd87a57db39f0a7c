//! Distributing one project's settings folder to the other projects.

use anyhow::Result;
use tracing::info;

use crate::cmd::report;
use crate::core::prompt::{self, Prompter};
use crate::core::session::{AppSession, SessionOptions};
use crate::core::settings::SettingsCopy;
use crate::core::workspace::ProjectFilter;
use crate::error::CliError;
use crate::utils::theme::{header, highlight, warning_message};

pub fn run(
    options: &SessionOptions,
    prompter: &dyn Prompter,
    from: Option<String>,
    prefix: Option<String>,
) -> Result<i32> {
    let mut sess = AppSession::initialize(options)?;

    let source_name = prompt::value_or_prompt(
        prompter,
        from,
        "Project to copy settings from",
        None,
    )?;
    let source = sess
        .workspace()
        .project(&source_name)?
        .ok_or_else(|| CliError::UnknownProject(source_name.clone()))?;

    let mut copy = SettingsCopy::new(&sess.config.settings.folder);
    if let Some(required) = sess.config.required_settings_file() {
        copy = copy.requiring(required);
    }

    let filter = ProjectFilter::from_option(
        prefix.or_else(|| Some(sess.config.workspace.project_prefix.clone())),
    );
    let targets = copy.targets(sess.workspace(), &source, &filter)?;
    let dry_run = sess.dry_run;

    println!(
        "{}",
        header(&format!(
            "Copying {} from {}",
            copy.folder().display(),
            highlight(&source.name)
        ))
    );

    if targets.is_empty() {
        println!("  {}", warning_message("no target projects match"));
        return Ok(0);
    }

    info!("copying settings of {} into {} projects", source.name, targets.len());
    let report = copy.run(sess.workspace_mut(), &source, &targets)?;
    if report.is_empty() {
        println!(
            "  {}",
            warning_message(&format!(
                "{} has no files in {}",
                source.name,
                copy.folder().display()
            ))
        );
    }

    let failed = report::print(&report, "copied", dry_run);
    Ok(if failed > 0 { 1 } else { 0 })
}
