//! Moving every bundle, feature, pom and category to a new version.

use anyhow::{Context, Result};
use tracing::info;

use crate::cmd::report;
use crate::core::prompt::{self, Prompter};
use crate::core::rewriter::{self, FileSet, RunReport, SubstituteAction};
use crate::core::session::{AppSession, SessionOptions};
use crate::core::version::{self, TargetVersion, VersionKind};
use crate::core::workspace::{ProjectFilter, WorkspaceView};
use crate::utils::theme::{header, highlight, print_phase};

/// Applies the version substitution for each file kind in turn. The files of
/// all kinds are listed before the first one is rewritten.
pub fn update_versions(
    ws: &mut dyn WorkspaceView,
    target: &TargetVersion,
    filter: &ProjectFilter,
) -> crate::error::Result<Vec<(VersionKind, RunReport)>> {
    let mut planned = Vec::with_capacity(VersionKind::ALL.len());
    for kind in VersionKind::ALL {
        let files = FileSet::new(kind.file_pattern(), filter.clone())?;
        planned.push((kind, files.enumerate(ws)?));
    }

    let mut reports = Vec::with_capacity(planned.len());
    for (kind, files) in planned {
        let action = SubstituteAction::new(|content: &str| version::substitute(content, kind, target));
        reports.push((kind, rewriter::apply(ws, files, &action)));
    }

    Ok(reports)
}

pub fn run(
    options: &SessionOptions,
    prompter: &dyn Prompter,
    to: Option<String>,
    prefix: Option<String>,
) -> Result<i32> {
    let mut sess = AppSession::initialize(options)?;

    let answer = prompt::value_or_prompt(
        prompter,
        to,
        "Please enter the version number to upgrade to",
        Some(sess.config.version.default.as_str()),
    )?;
    let target: TargetVersion = answer.parse()?;

    let filter = ProjectFilter::from_option(
        prefix.or_else(|| Some(sess.config.workspace.project_prefix.clone())),
    );
    let reminder = sess.config.version.reminder.clone();
    let dry_run = sess.dry_run;

    info!("updating versions to {}", target);
    println!("{}", header(&format!("Updating versions to {}", highlight(&target.to_string()))));

    let reports = update_versions(sess.workspace_mut(), &target, &filter)
        .context("failed to enumerate workspace files")?;

    let mut failed = 0;
    for (i, (kind, kind_report)) in reports.iter().enumerate() {
        print_phase(i + 1, reports.len(), kind.display_name());
        failed += report::print(kind_report, "updated", dry_run);
    }

    if let Some(reminder) = reminder.filter(|r| !r.trim().is_empty()) {
        prompter.message(&reminder);
    }

    Ok(if failed > 0 { 1 } else { 0 })
}
