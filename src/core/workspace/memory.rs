//! In-memory workspace used to exercise commands without touching disk.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use glob::Pattern;

use super::{FileRef, Project, WorkspaceView};
use crate::error::{CliError, Result};

#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    projects: BTreeMap<String, BTreeMap<PathBuf, Vec<u8>>>,
    unreadable: BTreeSet<PathBuf>,
    unlistable: bool,
    unlistable_patterns: BTreeSet<String>,
    writes: usize,
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, name: &str) -> Self {
        self.projects.entry(name.to_string()).or_default();
        self
    }

    pub fn with_file(mut self, project: &str, path: &str, contents: &str) -> Self {
        self.projects
            .entry(project.to_string())
            .or_default()
            .insert(PathBuf::from(path), contents.as_bytes().to_vec());
        self
    }

    /// Reads and writes of this file fail with a permission error.
    pub fn with_unreadable(mut self, project: &str, path: &str) -> Self {
        self.unreadable.insert(Path::new(project).join(path));
        self
    }

    /// Every listing fails, as if the workspace could not be enumerated.
    pub fn with_unlistable(mut self) -> Self {
        self.unlistable = true;
        self
    }

    /// Listing files by this exact pattern fails.
    pub fn with_unlistable_pattern(mut self, pattern: &str) -> Self {
        self.unlistable_patterns.insert(pattern.to_string());
        self
    }

    pub fn contents(&self, project: &str, path: &str) -> Option<String> {
        self.projects
            .get(project)?
            .get(Path::new(path))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn file_names(&self, project: &str) -> Vec<String> {
        self.projects
            .get(project)
            .map(|files| {
                files
                    .keys()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of writes performed so far, copies included.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn project_ref(name: &str) -> Project {
        Project::new(name, name)
    }

    fn check_access(&self, file: &FileRef) -> Result<()> {
        if self.unreadable.contains(&file.location()) {
            return Err(CliError::file_io(
                file.location(),
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }
        Ok(())
    }

    fn check_listing(&self, project: &Project) -> Result<()> {
        if self.unlistable {
            return Err(CliError::resource_access(
                &project.location,
                "listing refused",
            ));
        }
        Ok(())
    }
}

impl WorkspaceView for MemoryWorkspace {
    fn projects(&self) -> Result<Vec<Project>> {
        if self.unlistable {
            return Err(CliError::resource_access("<memory>", "listing refused"));
        }
        Ok(self.projects.keys().map(|n| Self::project_ref(n)).collect())
    }

    fn files(&self, project: &Project, pattern: &Pattern) -> Result<Vec<FileRef>> {
        self.check_listing(project)?;
        if self.unlistable_patterns.contains(pattern.as_str()) {
            return Err(CliError::resource_access(&project.location, "listing refused"));
        }
        let Some(files) = self.projects.get(&project.name) else {
            return Ok(Vec::new());
        };

        Ok(files
            .keys()
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| pattern.matches(n))
            })
            .map(|path| FileRef::new(project, path.clone()))
            .collect())
    }

    fn list_dir(&self, project: &Project, dir: &Path) -> Result<Vec<FileRef>> {
        self.check_listing(project)?;
        let Some(files) = self.projects.get(&project.name) else {
            return Ok(Vec::new());
        };

        Ok(files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .map(|path| FileRef::new(project, path.clone()))
            .collect())
    }

    fn exists(&self, file: &FileRef) -> bool {
        self.projects
            .get(&file.project.name)
            .is_some_and(|files| files.contains_key(&file.path))
    }

    fn read(&self, file: &FileRef) -> Result<Vec<u8>> {
        self.check_access(file)?;
        self.projects
            .get(&file.project.name)
            .and_then(|files| files.get(&file.path))
            .cloned()
            .ok_or_else(|| CliError::file_io(file.location(), io::Error::from(io::ErrorKind::NotFound)))
    }

    fn write(&mut self, file: &FileRef, contents: &[u8]) -> Result<()> {
        self.check_access(file)?;
        let files = self.projects.get_mut(&file.project.name).ok_or_else(|| {
            CliError::file_io(file.location(), io::Error::from(io::ErrorKind::NotFound))
        })?;
        files.insert(file.path.clone(), contents.to_vec());
        self.writes += 1;
        Ok(())
    }
}
