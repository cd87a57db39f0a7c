//! State shared by the commands of one invocation.

use std::path::PathBuf;

use tracing::info;

use crate::core::config::ConfigurationFile;
use crate::core::workspace::{DryRunWorkspace, FsWorkspace, WorkspaceView};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub workspace: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
}

pub struct AppSession {
    pub root: PathBuf,
    pub config: ConfigurationFile,
    pub dry_run: bool,
    workspace: Box<dyn WorkspaceView>,
}

impl AppSession {
    pub fn initialize(options: &SessionOptions) -> Result<Self> {
        let root = match &options.workspace {
            Some(path) => path.clone(),
            None => std::env::current_dir().map_err(|e| CliError::file_io(".", e))?,
        };

        let config = ConfigurationFile::get(&root, options.config.as_deref())?;
        let fs = FsWorkspace::new(&root, config.workspace.exclude_dirs.clone());

        let workspace: Box<dyn WorkspaceView> = if options.dry_run {
            info!("dry run: no files will be modified");
            Box::new(DryRunWorkspace::new(fs))
        } else {
            Box::new(fs)
        };

        Ok(AppSession {
            root,
            config,
            dry_run: options.dry_run,
            workspace,
        })
    }

    pub fn workspace(&self) -> &dyn WorkspaceView {
        self.workspace.as_ref()
    }

    pub fn workspace_mut(&mut self) -> &mut dyn WorkspaceView {
        self.workspace.as_mut()
    }
}
