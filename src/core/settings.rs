//! Copying a project's settings folder into other projects.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::rewriter::{Outcome, RunReport};
use crate::core::workspace::{FileRef, Project, ProjectFilter, WorkspaceView};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct SettingsCopy {
    folder: PathBuf,
    required_file: Option<String>,
}

impl SettingsCopy {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        SettingsCopy {
            folder: folder.into(),
            required_file: None,
        }
    }

    /// Only projects holding `file` at their root receive settings.
    pub fn requiring(mut self, file: impl Into<String>) -> Self {
        self.required_file = Some(file.into());
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn targets(
        &self,
        ws: &dyn WorkspaceView,
        source: &Project,
        filter: &ProjectFilter,
    ) -> Result<Vec<Project>> {
        let mut targets = Vec::new();
        for project in ws.projects()? {
            if project.name == source.name || !filter.accepts(&project) {
                continue;
            }
            if let Some(required) = &self.required_file {
                if !ws.exists(&FileRef::new(&project, required)) {
                    debug!("{} has no {}, skipping", project.name, required);
                    continue;
                }
            }
            targets.push(project);
        }
        Ok(targets)
    }

    /// Copies every file of the source settings folder into each target's
    /// settings folder, replacing files of the same name.
    pub fn run(
        &self,
        ws: &mut dyn WorkspaceView,
        source: &Project,
        targets: &[Project],
    ) -> Result<RunReport> {
        let sources = ws.list_dir(source, &self.folder)?;
        let mut report = RunReport::default();

        for target in targets {
            for src in &sources {
                let Some(name) = src.path.file_name() else {
                    continue;
                };
                let dest = FileRef::new(target, self.folder.join(name));
                let result = ws.copy(src, &dest).map(|_| Outcome::Modified);
                match &result {
                    Ok(_) => info!("copied {} to {}", src, dest),
                    Err(e) => warn!("skipping {}: {}", dest, e),
                }
                report.push(dest, result);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::workspace::MemoryWorkspace;

    fn sample() -> MemoryWorkspace {
        MemoryWorkspace::new()
            .with_file("org.x.releng", ".settings/org.eclipse.jdt.core.prefs", "compliance=17\n")
            .with_file("org.x.releng", ".settings/org.eclipse.core.resources.prefs", "encoding=UTF-8\n")
            .with_file("org.x.feature", "feature.xml", "<feature/>")
            .with_file("org.x.feature", ".settings/org.eclipse.jdt.core.prefs", "compliance=1.8\n")
            .with_file("org.x.feature", ".settings/local.prefs", "keep=me\n")
            .with_file("org.x.plugin", "plugin.xml", "<plugin/>")
            .with_file("com.y.feature", "feature.xml", "<feature/>")
    }

    #[test]
    fn test_targets_require_feature_and_prefix() {
        let ws = sample();
        let source = ws.project("org.x.releng").unwrap().unwrap();
        let copy = SettingsCopy::new(".settings").requiring("feature.xml");
        let targets = copy
            .targets(&ws, &source, &ProjectFilter::prefix("org.x"))
            .unwrap();
        let names: Vec<_> = targets.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["org.x.feature"]);
    }

    #[test]
    fn test_copy_overwrites_and_keeps_other_files() {
        let mut ws = sample();
        let source = ws.project("org.x.releng").unwrap().unwrap();
        let copy = SettingsCopy::new(".settings").requiring("feature.xml");
        let targets = copy
            .targets(&ws, &source, &ProjectFilter::prefix("org.x"))
            .unwrap();

        let report = copy.run(&mut ws, &source, &targets).unwrap();

        assert_eq!(report.modified().count(), 2);
        assert_eq!(
            ws.contents("org.x.feature", ".settings/org.eclipse.jdt.core.prefs").unwrap(),
            "compliance=17\n"
        );
        assert_eq!(
            ws.contents("org.x.feature", ".settings/org.eclipse.core.resources.prefs").unwrap(),
            "encoding=UTF-8\n"
        );
        assert_eq!(
            ws.contents("org.x.feature", ".settings/local.prefs").unwrap(),
            "keep=me\n"
        );
        assert!(ws.contents("org.x.plugin", ".settings/org.eclipse.jdt.core.prefs").is_none());
    }

    #[test]
    fn test_without_requirement_all_filtered_projects_are_targets() {
        let ws = sample();
        let source = ws.project("org.x.releng").unwrap().unwrap();
        let targets = SettingsCopy::new(".settings")
            .targets(&ws, &source, &ProjectFilter::any())
            .unwrap();
        assert_eq!(targets.len(), 3);
    }
}
