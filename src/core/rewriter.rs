//! Bulk find-file-and-rewrite over a workspace.

use glob::Pattern;
use tracing::{debug, info, warn};

use crate::core::workspace::{FileRef, ProjectFilter, WorkspaceView};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Modified,
    Unchanged,
}

/// A per-file action, applied by [`FileSet::run`].
pub trait FileAction: std::fmt::Debug {
    fn apply(&self, ws: &mut dyn WorkspaceView, file: &FileRef) -> Result<Outcome>;
}

#[derive(Debug)]
pub struct FileReport {
    pub file: FileRef,
    pub result: Result<Outcome>,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub entries: Vec<FileReport>,
}

impl RunReport {
    pub fn push(&mut self, file: FileRef, result: Result<Outcome>) {
        self.entries.push(FileReport { file, result });
    }

    pub fn extend(&mut self, other: RunReport) {
        self.entries.extend(other.entries);
    }

    pub fn modified(&self) -> impl Iterator<Item = &FileRef> {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(Outcome::Modified)))
            .map(|e| &e.file)
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &FileRef> {
        self.entries
            .iter()
            .filter(|e| matches!(e.result, Ok(Outcome::Unchanged)))
            .map(|e| &e.file)
    }

    pub fn failures(&self) -> impl Iterator<Item = (&FileRef, &CliError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (&e.file, err)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The files of a workspace whose name matches a pattern, restricted to the
/// projects accepted by a filter.
#[derive(Debug, Clone)]
pub struct FileSet {
    pattern: Pattern,
    filter: ProjectFilter,
}

impl FileSet {
    pub fn new(pattern: &str, filter: ProjectFilter) -> Result<Self> {
        Ok(FileSet {
            pattern: Pattern::new(pattern)?,
            filter,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Lists every matching file. Fails as a whole if any listing fails.
    pub fn enumerate(&self, ws: &dyn WorkspaceView) -> Result<Vec<FileRef>> {
        let mut files = Vec::new();
        for project in ws.projects()? {
            if !self.filter.accepts(&project) {
                continue;
            }
            files.extend(ws.files(&project, &self.pattern)?);
        }
        debug!("{} files match `{}`", files.len(), self.pattern);
        Ok(files)
    }

    /// Applies `action` to every matching file. Enumeration happens up front,
    /// so a listing failure aborts before anything is touched; failures on
    /// single files are recorded and the remaining files are still processed.
    pub fn run(&self, ws: &mut dyn WorkspaceView, action: &dyn FileAction) -> Result<RunReport> {
        let files = self.enumerate(ws)?;
        Ok(apply(ws, files, action))
    }
}

/// Applies `action` to already enumerated `files`, in order.
pub fn apply(ws: &mut dyn WorkspaceView, files: Vec<FileRef>, action: &dyn FileAction) -> RunReport {
    let mut report = RunReport::default();

    for file in files {
        let result = action.apply(ws, &file);
        match &result {
            Ok(Outcome::Modified) => info!("updated {}", file),
            Ok(Outcome::Unchanged) => debug!("left {} unchanged", file),
            Err(e) => warn!("skipping {}: {}", file, e),
        }
        report.push(file, result);
    }

    report
}

/// Prepends `text` to files whose content fails `predicate`.
pub struct PrependIfMissing<P> {
    text: String,
    predicate: P,
}

impl<P: Fn(&str) -> bool> PrependIfMissing<P> {
    pub fn new(text: impl Into<String>, predicate: P) -> Self {
        PrependIfMissing {
            text: text.into(),
            predicate,
        }
    }
}

impl<P> std::fmt::Debug for PrependIfMissing<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrependIfMissing")
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl<P: Fn(&str) -> bool> FileAction for PrependIfMissing<P> {
    fn apply(&self, ws: &mut dyn WorkspaceView, file: &FileRef) -> Result<Outcome> {
        let content = ws.read(file)?;
        if (self.predicate)(&String::from_utf8_lossy(&content)) {
            return Ok(Outcome::Unchanged);
        }

        let mut updated = Vec::with_capacity(self.text.len() + content.len());
        updated.extend_from_slice(self.text.as_bytes());
        updated.extend_from_slice(&content);
        ws.write(file, &updated)?;
        Ok(Outcome::Modified)
    }
}

/// Rewrites a file through `transform`, which returns `None` when it has
/// nothing to change. Files are only written when their content changes.
pub struct SubstituteAction<F> {
    transform: F,
}

impl<F: Fn(&str) -> Option<String>> SubstituteAction<F> {
    pub fn new(transform: F) -> Self {
        SubstituteAction { transform }
    }
}

impl<F> std::fmt::Debug for SubstituteAction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubstituteAction").finish_non_exhaustive()
    }
}

impl<F: Fn(&str) -> Option<String>> FileAction for SubstituteAction<F> {
    fn apply(&self, ws: &mut dyn WorkspaceView, file: &FileRef) -> Result<Outcome> {
        let content = ws.read_to_string(file)?;
        match (self.transform)(&content) {
            Some(updated) if updated != content => {
                ws.write(file, updated.as_bytes())?;
                Ok(Outcome::Modified)
            }
            _ => Ok(Outcome::Unchanged),
        }
    }
}
