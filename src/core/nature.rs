//! Adding natures to the projects of a selection.

use tracing::{info, warn};

use crate::core::descriptor::{self, DESCRIPTOR_FILE};
use crate::core::rewriter::{FileAction, Outcome, RunReport};
use crate::core::workspace::{FileRef, Selectable, WorkspaceView};
use crate::error::{CliError, Result};

#[derive(Debug, Clone)]
pub struct AddNature {
    nature: String,
}

impl AddNature {
    pub fn new(nature: impl Into<String>) -> Self {
        AddNature {
            nature: nature.into(),
        }
    }
}

impl FileAction for AddNature {
    fn apply(&self, ws: &mut dyn WorkspaceView, file: &FileRef) -> Result<Outcome> {
        let content = ws.read_to_string(file)?;
        let updated = descriptor::insert_nature(&content, &self.nature).map_err(|reason| {
            CliError::Descriptor {
                path: file.location(),
                reason,
            }
        })?;

        match updated {
            Some(updated) => {
                ws.write(file, updated.as_bytes())?;
                Ok(Outcome::Modified)
            }
            None => Ok(Outcome::Unchanged),
        }
    }
}

#[derive(Debug, Default)]
pub struct TagReport {
    pub report: RunReport,
    /// Selected items that cannot carry a nature.
    pub skipped: Vec<Selectable>,
}

/// Adds `nature` to every project in `items`. Items are independent: a
/// failure on one does not affect the others, and nothing is rolled back.
pub fn tag_selection(ws: &mut dyn WorkspaceView, items: &[Selectable], nature: &str) -> TagReport {
    let action = AddNature::new(nature);
    let mut tags = TagReport::default();

    for item in items {
        match item {
            Selectable::Project(project) => {
                let file = FileRef::new(project, DESCRIPTOR_FILE);
                let result = action.apply(ws, &file);
                match &result {
                    Ok(Outcome::Modified) => info!("added nature {} to {}", nature, project.name),
                    Ok(Outcome::Unchanged) => info!("{} already has nature {}", project.name, nature),
                    Err(e) => warn!("cannot tag {}: {}", project.name, e),
                }
                tags.report.push(file, result);
            }
            Selectable::File(file) => {
                warn!("{} is a file, not a project; skipping", file);
                tags.skipped.push(item.clone());
            }
        }
    }

    tags
}
