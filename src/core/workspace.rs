//! Access to the projects and files of a workspace.
//!
//! Everything that touches the workspace goes through [`WorkspaceView`], so
//! commands can run against the real file system, an in-memory fake, or a
//! dry-run wrapper that records writes without performing them.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use glob::Pattern;
use tracing::{debug, trace};

use crate::core::descriptor::{self, DESCRIPTOR_FILE};
use crate::error::{CliError, Result};
use crate::utils::file_io::read_file;

pub mod memory;

pub use memory::MemoryWorkspace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub location: PathBuf,
}

impl Project {
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Project {
            name: name.into(),
            location: location.into(),
        }
    }
}

/// A file addressed relative to the root of its project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub project: Project,
    pub path: PathBuf,
}

impl FileRef {
    pub fn new(project: &Project, path: impl Into<PathBuf>) -> Self {
        FileRef {
            project: project.clone(),
            path: path.into(),
        }
    }

    pub fn location(&self) -> PathBuf {
        self.project.location.join(&self.path)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project.name, self.path.display())
    }
}

/// An item picked by the user. Only the listed variants can be selected, and
/// each operation checks which of them it supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selectable {
    Project(Project),
    File(FileRef),
}

impl fmt::Display for Selectable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selectable::Project(p) => write!(f, "{}", p.name),
            Selectable::File(file) => write!(f, "{file}"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    prefix: Option<String>,
}

impl ProjectFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        ProjectFilter {
            prefix: Some(prefix.into()),
        }
    }

    pub fn from_option(prefix: Option<String>) -> Self {
        ProjectFilter {
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    pub fn accepts(&self, project: &Project) -> bool {
        match &self.prefix {
            Some(prefix) => project.name.starts_with(prefix.as_str()),
            None => true,
        }
    }
}

pub trait WorkspaceView {
    /// All projects of the workspace, ordered by name.
    fn projects(&self) -> Result<Vec<Project>>;

    /// Files anywhere below `project` whose file name matches `pattern`.
    fn files(&self, project: &Project, pattern: &Pattern) -> Result<Vec<FileRef>>;

    /// Regular files directly inside the project folder `dir`. A missing
    /// folder has no files.
    fn list_dir(&self, project: &Project, dir: &Path) -> Result<Vec<FileRef>>;

    fn exists(&self, file: &FileRef) -> bool;

    fn read(&self, file: &FileRef) -> Result<Vec<u8>>;

    /// Replaces the whole content of `file`, creating parent folders.
    fn write(&mut self, file: &FileRef, contents: &[u8]) -> Result<()>;

    fn copy(&mut self, from: &FileRef, to: &FileRef) -> Result<()> {
        let bytes = self.read(from)?;
        self.write(to, &bytes)
    }

    fn read_to_string(&self, file: &FileRef) -> Result<String> {
        let bytes = self.read(file)?;
        String::from_utf8(bytes).map_err(|e| {
            CliError::file_io(
                file.location(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })
    }

    fn project(&self, name: &str) -> Result<Option<Project>> {
        Ok(self.projects()?.into_iter().find(|p| p.name == name))
    }

    /// Turns a user-supplied selection into a typed item: a project name, or
    /// `<project>/<path>` naming an existing file.
    fn resolve(&self, item: &str) -> Result<Option<Selectable>> {
        let item = item.trim_end_matches('/');
        if let Some(project) = self.project(item)? {
            return Ok(Some(Selectable::Project(project)));
        }

        for project in self.projects()? {
            let Some(rest) = item.strip_prefix(project.name.as_str()) else {
                continue;
            };
            let Some(rel) = rest.strip_prefix('/') else {
                continue;
            };
            let file = FileRef::new(&project, rel);
            if self.exists(&file) {
                return Ok(Some(Selectable::File(file)));
            }
        }

        Ok(None)
    }
}

/// A workspace backed by a directory tree. Any directory holding a
/// `.project` descriptor is a project.
#[derive(Debug)]
pub struct FsWorkspace {
    root: PathBuf,
    exclude_dirs: Vec<String>,
}

impl FsWorkspace {
    pub fn new(root: impl Into<PathBuf>, exclude_dirs: Vec<String>) -> Self {
        FsWorkspace {
            root: root.into(),
            exclude_dirs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded(&self, rel: &Path) -> bool {
        rel.components().any(|c| match c {
            Component::Normal(name) => self
                .exclude_dirs
                .iter()
                .any(|d| name.to_str() == Some(d.as_str())),
            _ => false,
        })
    }

    /// True if some folder between `base` (exclusive) and `path` holds a
    /// descriptor of its own, i.e. `path` belongs to a nested project.
    fn is_nested(base: &Path, path: &Path) -> bool {
        path.ancestors()
            .skip(1)
            .take_while(|dir| *dir != base && dir.starts_with(base))
            .any(|dir| dir.join(DESCRIPTOR_FILE).is_file())
    }

    fn walk(&self, base: &Path, file_pattern: &str) -> Result<Vec<PathBuf>> {
        let full = format!(
            "{}/**/{}",
            Pattern::escape(&base.to_string_lossy()),
            file_pattern
        );
        trace!("enumerating `{}`", full);

        let mut found = Vec::new();
        for entry in glob::glob(&full)? {
            let path = entry.map_err(|e| CliError::resource_access(e.path(), e.error()))?;
            let Ok(rel) = path.strip_prefix(base) else {
                continue;
            };
            if self.is_excluded(rel) {
                continue;
            }
            found.push(path);
        }
        found.sort();
        Ok(found)
    }

    fn project_name(dir: &Path, descriptor_path: &Path) -> String {
        let from_descriptor = read_file(descriptor_path)
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|content| descriptor::parse(&content).ok())
            .and_then(|d| d.name);

        from_descriptor.unwrap_or_else(|| {
            dir.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
    }
}

impl WorkspaceView for FsWorkspace {
    fn projects(&self) -> Result<Vec<Project>> {
        if !self.root.is_dir() {
            return Err(CliError::resource_access(&self.root, "not a directory"));
        }

        let mut projects: Vec<Project> = self
            .walk(&self.root, DESCRIPTOR_FILE)?
            .into_iter()
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let dir = path.parent()?.to_path_buf();
                let name = Self::project_name(&dir, &path);
                Some(Project::new(name, dir))
            })
            .collect();

        projects.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("found {} projects below {}", projects.len(), self.root.display());
        Ok(projects)
    }

    fn files(&self, project: &Project, pattern: &Pattern) -> Result<Vec<FileRef>> {
        let base = &project.location;
        let mut files = Vec::new();

        for path in self.walk(base, pattern.as_str())? {
            if !path.is_file() || Self::is_nested(base, &path) {
                continue;
            }
            if let Ok(rel) = path.strip_prefix(base) {
                files.push(FileRef::new(project, rel));
            }
        }

        Ok(files)
    }

    fn list_dir(&self, project: &Project, dir: &Path) -> Result<Vec<FileRef>> {
        let full = project.location.join(dir);
        if !full.is_dir() {
            return Ok(Vec::new());
        }

        let entries =
            fs::read_dir(&full).map_err(|e| CliError::resource_access(&full, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CliError::resource_access(&full, e))?;
            let is_file = entry
                .file_type()
                .map(|t| t.is_file())
                .map_err(|e| CliError::resource_access(entry.path(), e))?;
            if is_file {
                files.push(FileRef::new(project, dir.join(entry.file_name())));
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn exists(&self, file: &FileRef) -> bool {
        file.location().is_file()
    }

    fn read(&self, file: &FileRef) -> Result<Vec<u8>> {
        let path = file.location();
        read_file(&path).map_err(|e| CliError::file_io(path, e))
    }

    fn write(&mut self, file: &FileRef, contents: &[u8]) -> Result<()> {
        let path = file.location();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CliError::file_io(parent, e))?;
        }

        let af = atomicwrites::AtomicFile::new(&path, atomicwrites::OverwriteBehavior::AllowOverwrite);
        let r = af.write(|f| f.write_all(contents));

        match r {
            Err(atomicwrites::Error::Internal(e)) | Err(atomicwrites::Error::User(e)) => {
                Err(CliError::file_io(path, e))
            }
            Ok(()) => Ok(()),
        }
    }

    fn resolve(&self, item: &str) -> Result<Option<Selectable>> {
        if let Some(project) = self.project(item.trim_end_matches('/'))? {
            return Ok(Some(Selectable::Project(project)));
        }

        let candidate = Path::new(item);
        let path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        if path.exists() {
            let path = path.canonicalize().map_err(|e| CliError::file_io(&path, e))?;
            let mut best: Option<(Project, PathBuf)> = None;

            for project in self.projects()? {
                let Ok(location) = project.location.canonicalize() else {
                    continue;
                };
                let Ok(rel) = path.strip_prefix(&location) else {
                    continue;
                };
                let deeper = best
                    .as_ref()
                    .is_none_or(|(p, _)| location.starts_with(&p.location));
                if deeper {
                    best = Some((Project::new(project.name, location.clone()), rel.to_path_buf()));
                }
            }

            if let Some((project, rel)) = best {
                if rel.as_os_str().is_empty() {
                    return Ok(Some(Selectable::Project(project)));
                }
                if path.is_file() {
                    return Ok(Some(Selectable::File(FileRef::new(&project, rel))));
                }
            }
        }

        Ok(None)
    }
}

/// Passes reads through to the wrapped view and records writes instead of
/// performing them.
#[derive(Debug)]
pub struct DryRunWorkspace<W> {
    inner: W,
    planned: Vec<String>,
}

impl<W: WorkspaceView> DryRunWorkspace<W> {
    pub fn new(inner: W) -> Self {
        DryRunWorkspace {
            inner,
            planned: Vec::new(),
        }
    }

    pub fn planned(&self) -> &[String] {
        &self.planned
    }
}

impl<W: WorkspaceView> WorkspaceView for DryRunWorkspace<W> {
    fn projects(&self) -> Result<Vec<Project>> {
        self.inner.projects()
    }

    fn files(&self, project: &Project, pattern: &Pattern) -> Result<Vec<FileRef>> {
        self.inner.files(project, pattern)
    }

    fn list_dir(&self, project: &Project, dir: &Path) -> Result<Vec<FileRef>> {
        self.inner.list_dir(project, dir)
    }

    fn exists(&self, file: &FileRef) -> bool {
        self.inner.exists(file)
    }

    fn read(&self, file: &FileRef) -> Result<Vec<u8>> {
        self.inner.read(file)
    }

    fn write(&mut self, file: &FileRef, contents: &[u8]) -> Result<()> {
        debug!("dry run: would write {} bytes to {}", contents.len(), file);
        self.planned.push(file.to_string());
        Ok(())
    }

    fn copy(&mut self, from: &FileRef, to: &FileRef) -> Result<()> {
        if !self.inner.exists(from) {
            return Err(CliError::file_io(
                from.location(),
                std::io::Error::from(std::io::ErrorKind::NotFound),
            ));
        }
        debug!("dry run: would copy {} to {}", from, to);
        self.planned.push(to.to_string());
        Ok(())
    }

    fn resolve(&self, item: &str) -> Result<Option<Selectable>> {
        self.inner.resolve(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn descriptor(name: &str) -> String {
        format!("<projectDescription>\n\t<name>{name}</name>\n\t<natures>\n\t</natures>\n</projectDescription>\n")
    }

    fn sample() -> (TempDir, FsWorkspace) {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "plugins/org.example.core/.project", &descriptor("org.example.core"));
        write(root, "plugins/org.example.core/src/A.java", "class A {}\n");
        write(root, "plugins/org.example.core/src/b/B.java", "class B {}\n");
        write(root, "plugins/org.example.core/bin/A.java", "stale\n");
        write(root, "plugins/org.example.core/target/classes/C.java", "stale\n");
        write(root, "features/org.example.feature/.project", &descriptor("org.example.feature"));
        write(root, "features/org.example.feature/feature.xml", "<feature/>\n");
        write(root, "misc/renamed/.project", "not xml at all");
        let ws = FsWorkspace::new(root, vec!["target".into(), "bin".into(), ".git".into()]);
        (dir, ws)
    }

    #[test]
    fn test_projects_sorted_and_named_from_descriptor() {
        let (_dir, ws) = sample();
        let names: Vec<_> = ws.projects().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["org.example.core", "org.example.feature", "renamed"]);
    }

    #[test]
    fn test_files_skips_excluded_dirs() {
        let (_dir, ws) = sample();
        let project = ws.project("org.example.core").unwrap().unwrap();
        let files = ws.files(&project, &Pattern::new("*.java").unwrap()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("src/A.java"), PathBuf::from("src/b/B.java")]
        );
    }

    #[test]
    fn test_missing_root_is_resource_error() {
        let ws = FsWorkspace::new("/nonexistent/workspace/root", Vec::new());
        assert!(matches!(ws.projects(), Err(CliError::ResourceAccess { .. })));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let (_dir, mut ws) = sample();
        let project = ws.project("org.example.feature").unwrap().unwrap();
        let file = FileRef::new(&project, ".settings/org.eclipse.core.resources.prefs");
        ws.write(&file, b"eclipse.preferences.version=1\n").unwrap();
        assert_eq!(ws.read(&file).unwrap(), b"eclipse.preferences.version=1\n");
    }

    #[test]
    fn test_list_dir_missing_folder_is_empty() {
        let (_dir, ws) = sample();
        let project = ws.project("org.example.core").unwrap().unwrap();
        assert!(ws.list_dir(&project, Path::new(".settings")).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_path_and_name() {
        let (dir, ws) = sample();
        match ws.resolve("plugins/org.example.core").unwrap() {
            Some(Selectable::Project(p)) => assert_eq!(p.name, "org.example.core"),
            other => panic!("unexpected selection: {other:?}"),
        }
        match ws.resolve("org.example.feature").unwrap() {
            Some(Selectable::Project(p)) => assert_eq!(p.name, "org.example.feature"),
            other => panic!("unexpected selection: {other:?}"),
        }
        let file = dir.path().join("plugins/org.example.core/src/A.java");
        match ws.resolve(file.to_str().unwrap()).unwrap() {
            Some(Selectable::File(f)) => assert_eq!(f.path, PathBuf::from("src/A.java")),
            other => panic!("unexpected selection: {other:?}"),
        }
        assert!(ws.resolve("does-not-exist").unwrap().is_none());
    }

    #[test]
    fn test_resolve_prefers_project_name_over_folder() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "foo/.project", &descriptor("bar"));
        write(root, "elsewhere/foo-project/.project", &descriptor("foo"));
        let ws = FsWorkspace::new(root, Vec::new());

        match ws.resolve("foo").unwrap() {
            Some(Selectable::Project(p)) => {
                assert_eq!(p.name, "foo");
                assert!(p.location.ends_with("elsewhere/foo-project"));
            }
            other => panic!("unexpected selection: {other:?}"),
        }
        match ws.resolve("foo/").unwrap() {
            Some(Selectable::Project(p)) => assert_eq!(p.name, "foo"),
            other => panic!("unexpected selection: {other:?}"),
        }
        match ws.resolve("bar").unwrap() {
            Some(Selectable::Project(p)) => assert!(p.location.ends_with("foo")),
            other => panic!("unexpected selection: {other:?}"),
        }
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let (_dir, ws) = sample();
        let project = ws.project("org.example.feature").unwrap().unwrap();
        let file = FileRef::new(&project, "feature.xml");
        let mut dry = DryRunWorkspace::new(ws);
        dry.write(&file, b"changed").unwrap();
        assert_eq!(dry.read(&file).unwrap(), b"<feature/>\n");
        assert_eq!(dry.planned(), ["org.example.feature/feature.xml".to_string()]);
    }

    #[test]
    fn test_prefix_filter() {
        let filter = ProjectFilter::prefix("org.eclipse.ease");
        assert!(filter.accepts(&Project::new("org.eclipse.ease.ui", "x")));
        assert!(!filter.accepts(&Project::new("com.other", "x")));
        assert!(ProjectFilter::from_option(Some(String::new())).accepts(&Project::new("a", "x")));
    }
}
