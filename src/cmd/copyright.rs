//! Adding the copyright notice to source files that lack one.

use anyhow::Result;
use tracing::info;

use crate::cmd::report;
use crate::core::config::ConfigurationFile;
use crate::core::copyright;
use crate::core::rewriter::{FileSet, RunReport};
use crate::core::session::{AppSession, SessionOptions};
use crate::core::workspace::{ProjectFilter, WorkspaceView};
use crate::utils::theme::header;

pub fn add_notices(
    ws: &mut dyn WorkspaceView,
    config: &ConfigurationFile,
    pattern: Option<&str>,
    filter: ProjectFilter,
) -> crate::error::Result<RunReport> {
    let pattern = pattern.unwrap_or(&config.copyright.file_pattern);
    let files = FileSet::new(pattern, filter)?;
    let action = copyright::action(&config.copyright.notice, &config.copyright.marker);
    files.run(ws, &action)
}

pub fn run(options: &SessionOptions, pattern: Option<String>, prefix: Option<String>) -> Result<i32> {
    let mut sess = AppSession::initialize(options)?;
    info!("adding copyright notices below {}", sess.root.display());

    let config = sess.config.clone();
    let pattern = pattern.as_deref().unwrap_or(&config.copyright.file_pattern);
    println!("{}", header(&format!("Copyright notices ({pattern})")));

    let report = add_notices(
        sess.workspace_mut(),
        &config,
        Some(pattern),
        ProjectFilter::from_option(prefix),
    )?;

    let failed = report::print(&report, "added notice to", sess.dry_run);
    Ok(if failed > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::MemoryWorkspace;
    use tempfile::TempDir;

    #[test]
    fn test_add_notices_uses_configured_notice() {
        let dir = TempDir::new().unwrap();
        let config = ConfigurationFile::get(dir.path(), None).unwrap();
        let mut ws = MemoryWorkspace::new()
            .with_file("org.a", "src/A.java", "package a;\n")
            .with_file("org.a", "src/B.java", &format!("{}package a;\n", config.copyright.notice))
            .with_file("org.a", "build.properties", "bin.includes = .\n");

        let report = add_notices(&mut ws, &config, None, ProjectFilter::any()).unwrap();

        assert_eq!(report.modified().count(), 1);
        assert_eq!(report.unchanged().count(), 1);
        let a = ws.contents("org.a", "src/A.java").unwrap();
        assert!(a.starts_with("/*****"));
        assert!(a.ends_with("*/\npackage a;\n"));
        assert_eq!(ws.contents("org.a", "build.properties").unwrap(), "bin.includes = .\n");
    }
}
